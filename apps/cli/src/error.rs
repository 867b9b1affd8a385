//! Error types for the CLI.

use stockroom_db::DbError;

use crate::config::ConfigError;

/// CLI errors. Only startup and login failures end the process.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Db(#[from] DbError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication failed after {attempts} attempts")]
    AuthFailed { attempts: u32 },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
