//! Error types for snaptree-core

/// Result type for snaptree-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snaptree-core operations.
///
/// Conflicts are not errors: they are reported as [`crate::Event::Conflict`]
/// and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-level requirement was not met; nothing has been mutated
    #[error("{message}")]
    Precondition { message: String },

    /// Filesystem failure; aborts the whole run without rollback
    #[error(transparent)]
    Fs(#[from] snaptree_fs::Error),
}

impl Error {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }
}
