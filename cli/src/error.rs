//! Unified error handling for the CLI.

use crate::config::ConfigError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] fcfg_engine::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Engine(_) => 2,
            AppError::Config(_) => 3,
            AppError::Io { .. } | AppError::Json { .. } => 4,
            AppError::NotFound(_) => 5,
            AppError::Output(_) => 1,
        }
    }
}

/// Result type alias for commands.
pub type Result<T> = std::result::Result<T, AppError>;
