//! Error types for Canopy operations.
//!
//! This module provides the main error type [`CanopyError`]. Interaction never
//! fails; errors only arise while configuring, building or exporting a
//! diagram.

use thiserror::Error;

use canopy_core::tree::TreeError;

/// The main error type for Canopy operations.
#[derive(Debug, Error)]
pub enum CanopyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<TreeError> for CanopyError {
    fn from(error: TreeError) -> Self {
        Self::Graph(error.to_string())
    }
}
