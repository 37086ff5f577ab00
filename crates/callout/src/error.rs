//! Error types for Callout operations.
//!
//! [`CalloutError`] wraps every failure that can happen between reading a
//! scene description and producing SVG.

use std::io;

use thiserror::Error;

use callout_core::{AttrError, TreeError};

/// The main error type for Callout operations.
///
/// The `Parse` variant keeps the scene source next to the TOML error so
/// callers can point at the offending span.
#[derive(Debug, Error)]
pub enum CalloutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: toml::de::Error, src: String },

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Attribute error: {0}")]
    Attr(#[from] AttrError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<TreeError> for CalloutError {
    fn from(error: TreeError) -> Self {
        Self::Scene(error.to_string())
    }
}

impl CalloutError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
