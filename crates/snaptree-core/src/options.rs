//! Comparison and copy options

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Options threaded unchanged through every recursive call.
///
/// Deserializable so a config file can provide defaults; fields missing
/// from the file keep their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonOptions {
    /// Treat entries that differ only in owner as equal
    pub ignore_uid: bool,
    /// Treat entries that differ only in group as equal
    pub ignore_gid: bool,
    /// Treat directories that differ only in mtime as equal
    pub ignore_directory_timestamp: bool,
    /// Hard-link files instead of copying when on the same device
    pub use_hardlink: bool,
    /// Copy owner and group onto created entries
    pub preserve_ownership: bool,
    /// Paths skipped by `replace`, matched exactly
    pub exclude: HashSet<PathBuf>,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            ignore_uid: false,
            ignore_gid: false,
            ignore_directory_timestamp: true,
            use_hardlink: true,
            preserve_ownership: true,
            exclude: HashSet::new(),
        }
    }
}

impl ComparisonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hardlink(mut self, enabled: bool) -> Self {
        self.use_hardlink = enabled;
        self
    }

    pub fn with_ownership(mut self, enabled: bool) -> Self {
        self.preserve_ownership = enabled;
        self
    }

    pub fn with_directory_timestamps_ignored(mut self, ignored: bool) -> Self {
        self.ignore_directory_timestamp = ignored;
        self
    }

    pub fn with_exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude.insert(path.into());
        self
    }

    /// Literal match only: listing a directory does not exclude its children
    /// unless they are reached through that exact path.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.contains(path)
    }
}
