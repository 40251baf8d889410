//! CLI error type and its mapping to process exit codes.

use std::path::PathBuf;

use thiserror::Error;

use graphsql_storage::StorageError;

/// Errors surfaced by the CLI, each mapped to a process exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// 0 = success, 1 = storage error, 2 = not found, 3 = config or I/O error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Storage(e) if e.is_not_found() => 2,
            CliError::Storage(StorageError::Open(_)) => 3,
            CliError::Storage(_) | CliError::Output(_) => 1,
            CliError::ConfigRead { .. } | CliError::ConfigParse { .. } => 3,
        }
    }
}
