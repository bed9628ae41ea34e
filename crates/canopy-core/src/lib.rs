//! Canopy Core Types and Definitions
//!
//! This crate provides the foundational types for the Canopy hierarchical
//! diagram engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned node identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Node tree**: The typed node arena and its expansion cascade ([`tree`] module)
//! - **Viewport**: Zoom/pan transform between model and screen space ([`viewport`] module)
//! - **Draw**: Drawing surfaces and stroke styling ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod tree;
pub mod viewport;
