//! Transient stat view of a single tree entry

use std::fmt;

/// Kind of entry a [`TreeNode`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link (never dereferenced)
    Symlink,
    /// Sockets, fifos, device nodes
    Other,
}

/// A point in time with nanosecond precision, as reported by `stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: i64,
}

impl Timestamp {
    pub fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

/// Metadata of one path, taken with a non-following stat.
///
/// Nodes are never cached: every call to [`crate::Filesystem::stat`]
/// produces a fresh view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Permission and file type bits (`st_mode`)
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub mtime: Timestamp,
    pub atime: Timestamp,
    /// Device the entry lives on
    pub dev: u64,
    pub ino: u64,
    pub kind: NodeKind,
}

impl TreeNode {
    /// Build a node from `std::fs::symlink_metadata` output.
    #[cfg(unix)]
    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            NodeKind::Symlink
        } else if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        };

        Self {
            mode: meta.mode(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            mtime: Timestamp::new(meta.mtime(), meta.mtime_nsec()),
            atime: Timestamp::new(meta.atime(), meta.atime_nsec()),
            dev: meta.dev(),
            ino: meta.ino(),
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == NodeKind::Symlink
    }

    /// Permission bits only, without the file type.
    pub fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }
}
