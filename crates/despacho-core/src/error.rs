//! Error types for the despacho-core library.
//!
//! Extraction itself never fails. [`FormError`] covers edits addressed by
//! field or flag name, [`DespachoError`] covers configuration files.

use thiserror::Error;

/// Main error type for the despacho library.
#[derive(Error, Debug)]
pub enum DespachoError {
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when editing a form by field or flag name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The key does not name a record field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The key does not name a shipping flag.
    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    /// A flag value could not be read as a boolean.
    #[error("invalid value for flag {flag}: {value}")]
    InvalidFlagValue { flag: String, value: String },
}

/// Result type for the despacho library.
pub type Result<T> = std::result::Result<T, DespachoError>;
