//! Error types for the `pourquote` binary.

use pourquote_core::{ConfigError, QuoteError};

/// CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value for {0}")]
    InvalidEnv(String),

    #[error("Could not read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project record {path}: {source}")]
    InvalidProject {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rate card rejected: {0}")]
    Pricing(#[from] ConfigError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("Could not encode quote: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Quote(_) => 2,
            CliError::InvalidArgument(_) | CliError::MissingValue(_) => 64,
            _ => 1,
        }
    }
}
