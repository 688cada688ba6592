//! Error types for snaptree-fs

use std::path::PathBuf;

/// Result type for snaptree-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snaptree-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No such file or directory: {path}")]
    NotFound { path: PathBuf },

    #[error("Cannot copy {path}: unsupported file type")]
    UnsupportedFileType { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
