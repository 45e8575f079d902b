//! Error types for loading override tables.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("failed to read override file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse override table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid override entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}
