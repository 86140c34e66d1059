use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid schema directory: {path}")]
    InvalidSchemaDirectory { path: PathBuf },

    #[error("Script file not found: {path}")]
    ScriptNotFound { path: PathBuf },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Event forwarder stopped unexpectedly: {0}")]
    Forwarder(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CliError {
    pub fn invalid_directory(path: PathBuf) -> Self {
        CliError::InvalidSchemaDirectory { path }
    }

    pub fn script_not_found(path: PathBuf) -> Self {
        CliError::ScriptNotFound { path }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
