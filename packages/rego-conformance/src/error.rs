use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the conformance checker.
///
/// Only `DirectoryNotFound` is an expected condition; the runner turns it into a
/// reported failure. Everything else is propagated to the caller.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConformanceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConformanceError>;
