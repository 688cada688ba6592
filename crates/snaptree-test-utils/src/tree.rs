//! [`TestTree`] builder for snapshot and merge scenarios.

use std::fs::{self, File, FileTimes};
use std::os::unix::fs::{MetadataExt, PermissionsExt, lchown, symlink};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary directory holding any number of trees, with helpers to build
/// and inspect them by relative path.
///
/// # Example
///
/// ```rust,no_run
/// use snaptree_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.file_with_mtime("ref/a", "0123456789", 1_000);
/// tree.dir("ref/empty");
/// assert_eq!(tree.listing("ref"), vec!["a", "empty/"]);
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel`, which need not exist.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Create a directory and any missing parents.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("TestTree::dir: failed to create {}: {}", rel, e));
        path
    }

    /// Write a file, creating missing parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestTree::file: failed to write {}: {}", rel, e));
        path
    }

    /// Write a file and pin its mtime to `secs` since the epoch.
    pub fn file_with_mtime(&self, rel: &str, content: &str, secs: u64) -> PathBuf {
        let path = self.file(rel, content);
        self.set_mtime(rel, secs);
        path
    }

    /// Create a symlink at `rel` pointing at `target` (stored verbatim).
    pub fn symlink(&self, rel: &str, target: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        symlink(target, &path).unwrap();
        path
    }

    /// Pin the access and modification times of a file or directory.
    pub fn set_mtime(&self, rel: &str, secs: u64) {
        let time = UNIX_EPOCH + Duration::from_secs(secs);
        File::open(self.path(rel))
            .and_then(|file| file.set_times(FileTimes::new().set_modified(time).set_accessed(time)))
            .unwrap_or_else(|e| panic!("TestTree::set_mtime: failed on {}: {}", rel, e));
    }

    /// Change the permission bits of an entry.
    pub fn set_mode(&self, rel: &str, mode: u32) {
        fs::set_permissions(self.path(rel), fs::Permissions::from_mode(mode)).unwrap();
    }

    /// Change owner and group of `rel` without following a symlink.
    pub fn chown(&self, rel: &str, uid: u32, gid: u32) {
        lchown(self.path(rel), Some(uid), Some(gid))
            .unwrap_or_else(|e| panic!("TestTree::chown: failed on {}: {}", rel, e));
    }

    /// Owner and group of `rel`, without following symlinks.
    pub fn owner(&self, rel: &str) -> (u32, u32) {
        let meta = fs::symlink_metadata(self.path(rel)).unwrap();
        (meta.uid(), meta.gid())
    }

    /// Whether the tests run with root privileges (the temp dir belongs to
    /// whoever created it).
    pub fn is_root(&self) -> bool {
        self.owner("").0 == 0
    }

    /// Read a file as UTF-8.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("TestTree::read: failed to read {}: {}", rel, e))
    }

    /// Whether anything, including a dangling symlink, exists at `rel`.
    pub fn exists(&self, rel: &str) -> bool {
        fs::symlink_metadata(self.path(rel)).is_ok()
    }

    /// Inode number of `rel`, without following symlinks.
    pub fn inode(&self, rel: &str) -> u64 {
        fs::symlink_metadata(self.path(rel)).unwrap().ino()
    }

    /// Permission bits of `rel`, without the file type.
    pub fn mode(&self, rel: &str) -> u32 {
        fs::symlink_metadata(self.path(rel)).unwrap().permissions().mode() & 0o7777
    }

    /// Modification time of `rel` in whole seconds.
    pub fn mtime(&self, rel: &str) -> i64 {
        fs::symlink_metadata(self.path(rel)).unwrap().mtime()
    }

    /// Sorted listing of the tree at `rel`; see [`listing`].
    pub fn listing(&self, rel: &str) -> Vec<String> {
        listing(&self.path(rel))
    }

    /// Panic unless something exists at `rel`.
    pub fn assert_exists(&self, rel: &str) {
        assert!(self.exists(rel), "Expected {} to exist", rel);
    }

    /// Panic if anything exists at `rel`.
    pub fn assert_absent(&self, rel: &str) {
        assert!(!self.exists(rel), "Expected {} to be absent", rel);
    }
}

/// Every entry below `root` as a path relative to it, sorted.
///
/// Directories end in `/`, symlinks are rendered as `name -> target`.
/// A missing `root` lists as empty.
pub fn listing(root: &Path) -> Vec<String> {
    if fs::symlink_metadata(root).is_err() {
        return Vec::new();
    }
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            let file_type = entry.file_type();
            if file_type.is_dir() {
                format!("{}/", rel)
            } else if file_type.is_symlink() {
                let target = fs::read_link(entry.path()).unwrap();
                format!("{} -> {}", rel, target.display())
            } else {
                rel
            }
        })
        .collect()
}
