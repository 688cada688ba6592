//! The filesystem seam consumed by the reconciliation engines

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

use crate::{Error, Result, TreeNode};

/// Operations the engines need from a filesystem.
///
/// Every call is blocking and is attempted exactly once. None of the
/// operations follow symlinks.
pub trait Filesystem {
    /// Non-following stat. Returns `None` when nothing exists at `path`.
    fn stat(&self, path: &Path) -> Result<Option<TreeNode>>;

    /// Names of the entries directly inside the directory `path`.
    ///
    /// The set is unordered; callers must not rely on any ordering.
    fn list_child_names(&self, path: &Path) -> Result<HashSet<OsString>>;

    /// Create a single directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Create `dest` as another name for the inode at `src`.
    fn hard_link(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Copy a file or symlink with its permissions and timestamps.
    fn copy_entry(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Copy permissions and timestamps from `src` onto the existing `dest`.
    fn copy_metadata(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Set the permission bits of `path`, which must not be a symlink.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    /// Change the owner and group of `path`.
    fn set_ownership(&self, path: &Path, uid: u32, gid: u32) -> Result<()>;

    /// Remove a single non-directory entry.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory and everything below it.
    fn remove_tree(&self, path: &Path) -> Result<()>;

    /// Whether anything (including a dangling symlink) exists at `path`.
    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.stat(path)?.is_some())
    }

    /// Stat a path that is required to exist.
    fn stat_existing(&self, path: &Path) -> Result<TreeNode> {
        self.stat(path)?.ok_or_else(|| Error::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Directory that will contain `path`.
///
/// A bare file name lives in the current directory.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
