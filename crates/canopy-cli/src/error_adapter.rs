//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error types and miette's
//! rich diagnostic formatting. TOML parse failures are rendered with the
//! offending snippet and a label at the reported span; everything else is
//! rendered as a plain message with an error code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use canopy::CanopyError;

use crate::{
    config::ConfigError,
    error::{CliError, Document, TomlError},
};

/// Adapter rendering a [`CliError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Read { .. } => "canopy::io",
            CliError::Canopy(CanopyError::Config(_)) => "canopy::config",
            CliError::Canopy(CanopyError::Graph(_)) => "canopy::graph",
            CliError::Canopy(CanopyError::Export(_)) => "canopy::export",
            CliError::Config(ConfigError::MissingFile(_)) => "canopy::config",
            CliError::Config(ConfigError::Parse(err)) | CliError::Toml(err) => {
                match err.document() {
                    Document::Config => "canopy::config",
                    Document::Records => "canopy::records",
                    Document::Script => "canopy::script",
                }
            }
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Canopy(CanopyError::Graph(_)) => {
                "every record id must be unique, including the root id"
            }
            CliError::Toml(err) if err.document() == Document::Records => {
                "records are `[[record]]` tables with `id`, `kind` and optional `label`, \
                 `collapsed`, `payload` and `[[record.children]]`"
            }
            CliError::Toml(err) if err.document() == Document::Script => {
                "steps are `[[step]]` tables with an `action` such as \"down\", \"move\", \
                 \"up\", \"wheel\" or \"toggle\""
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.0.as_toml().map(TomlError::as_source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let err = self.0.as_toml()?;
        let span = err.span()?;
        let label = LabeledSpan::new_primary_with_span(
            Some(err.message().to_string()),
            SourceSpan::from(span),
        );
        Some(Box::new(std::iter::once(label)))
    }
}
