//! Error types for the Canopy CLI.
//!
//! [`CliError`] wraps engine errors together with failures to read or parse
//! the CLI's own TOML inputs. Parse failures keep the source text and the
//! byte span reported by `toml` so they can be rendered as annotated
//! snippets.

use std::{fmt, io, ops::Range, path::PathBuf};

use thiserror::Error;

use canopy::CanopyError;

use crate::config::ConfigError;

/// Which TOML input a [`TomlError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Config,
    Records,
    Script,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "configuration",
            Self::Records => "records",
            Self::Script => "script",
        })
    }
}

/// A TOML input that failed to deserialize.
#[derive(Debug, Error)]
#[error("Failed to parse {document} file `{}`: {message}", path.display())]
pub struct TomlError {
    document: Document,
    path: PathBuf,
    src: String,
    message: String,
    span: Option<Range<usize>>,
}

impl TomlError {
    pub fn new(
        document: Document,
        path: impl Into<PathBuf>,
        src: impl Into<String>,
        err: &toml::de::Error,
    ) -> Self {
        Self {
            document,
            path: path.into(),
            src: src.into(),
            message: err.message().trim_end().to_string(),
            span: err.span(),
        }
    }

    pub fn document(&self) -> Document {
        self.document
    }

    /// The text that failed to parse.
    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn as_source_code(&self) -> &dyn miette::SourceCode {
        &self.src
    }

    /// The parser's message, without location information.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending input, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

/// The error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Canopy(#[from] CanopyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Toml(#[from] TomlError),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// The TOML parse failure behind this error, if any.
    pub fn as_toml(&self) -> Option<&TomlError> {
        match self {
            Self::Toml(err) | Self::Config(ConfigError::Parse(err)) => Some(err),
            _ => None,
        }
    }
}
