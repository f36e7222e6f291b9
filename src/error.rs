use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the m3uc library
#[derive(Error, Debug)]
pub enum M3ucError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No playlist entries found in {0}")]
    NoEntries(String),

    #[error("Missing validation outcome for entry #{index}")]
    MissingOutcome { index: usize },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to create backup {}: {source}", path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the m3uc library
pub type Result<T> = std::result::Result<T, M3ucError>;

impl M3ucError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        M3ucError::Config(msg.into())
    }

    /// Create a "no entries" parse error for the named source
    pub fn no_entries<S: Into<String>>(source: S) -> Self {
        M3ucError::NoEntries(source.into())
    }

    pub fn write<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        M3ucError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn backup<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        M3ucError::Backup {
            path: path.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        M3ucError::Other(msg.into())
    }
}
