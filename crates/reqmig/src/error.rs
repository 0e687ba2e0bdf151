//! Error types for migration operations.

use std::io;

use thiserror::Error;

/// The main error type for migration operations.
///
/// The transformation itself cannot fail; errors arise only when decoding
/// or encoding documents, or when loading configuration.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A document could not be decoded or encoded. `src` holds the text
    /// that was being decoded, empty when encoding.
    #[error("{err}")]
    Json { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MigrationError {
    /// Create a new `Json` error with the associated source text.
    pub fn new_json_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Json {
            err,
            src: src.into(),
        }
    }
}
