//! Error types for Canary

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanaryError {
    #[error("executable not found at {0}")]
    ExecutableNotFound(String),

    #[error("Permission denied trying to execute {0}")]
    ExecutePermissionDenied(String),

    #[error("file not found at {0}")]
    FileNotFound(String),

    #[error("Permission denied {verb} file at {path}")]
    FilePermissionDenied { verb: &'static str, path: String },

    #[error("Connection refused at {host}:{port}")]
    ConnectionRefused { host: String, port: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Invalid batch file {}: {source}", path.display())]
    BatchParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No IPv4 address found for {0}")]
    Resolve(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CanaryError {
    /// Whether this error is one of the expected outcomes that gets turned
    /// into a failure record instead of aborting the invocation.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            CanaryError::ExecutableNotFound(_)
                | CanaryError::ExecutePermissionDenied(_)
                | CanaryError::FileNotFound(_)
                | CanaryError::FilePermissionDenied { .. }
                | CanaryError::ConnectionRefused { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CanaryError>;
