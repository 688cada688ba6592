//! Host filesystem implementation

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, Permissions};
use std::io::ErrorKind;
use std::os::unix::fs::{PermissionsExt, lchown, symlink};
use std::path::Path;

use rustix::fs::{AtFlags, CWD, Timespec, Timestamps, utimensat};
use tracing::trace;

use crate::{Error, Filesystem, NodeKind, Result, Timestamp, TreeNode};

/// [`Filesystem`] backed by the host's POSIX filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

/// Set access and modification times without following a final symlink.
fn set_times(path: &Path, atime: Timestamp, mtime: Timestamp) -> Result<()> {
    let times = Timestamps {
        last_access: timespec(atime),
        last_modification: timespec(mtime),
    };
    utimensat(CWD, path, &times, AtFlags::SYMLINK_NOFOLLOW).map_err(|e| Error::io(path, e.into()))
}

fn timespec(ts: Timestamp) -> Timespec {
    Timespec {
        tv_sec: ts.secs as _,
        tv_nsec: ts.nanos as _,
    }
}

impl Filesystem for LocalFs {
    fn stat(&self, path: &Path) -> Result<Option<TreeNode>> {
        match fs::symlink_metadata(path) {
            Ok(meta) => Ok(Some(TreeNode::from_metadata(&meta))),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Ok(None)
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn list_child_names(&self, path: &Path) -> Result<HashSet<OsString>> {
        let mut names = HashSet::new();
        for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
            let entry = entry.map_err(|e| Error::io(path, e))?;
            names.insert(entry.file_name());
        }
        Ok(names)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        trace!(path = %path.display(), "mkdir");
        fs::create_dir(path).map_err(|e| Error::io(path, e))
    }

    fn hard_link(&self, src: &Path, dest: &Path) -> Result<()> {
        trace!(src = %src.display(), dest = %dest.display(), "link");
        fs::hard_link(src, dest).map_err(|e| Error::io(dest, e))
    }

    fn copy_entry(&self, src: &Path, dest: &Path) -> Result<()> {
        let node = self.stat_existing(src)?;
        trace!(src = %src.display(), dest = %dest.display(), kind = ?node.kind, "copy");
        match node.kind {
            NodeKind::File => {
                // fs::copy carries the permission bits over
                fs::copy(src, dest).map_err(|e| Error::io(dest, e))?;
            }
            NodeKind::Symlink => {
                let target = fs::read_link(src).map_err(|e| Error::io(src, e))?;
                symlink(&target, dest).map_err(|e| Error::io(dest, e))?;
            }
            NodeKind::Directory | NodeKind::Other => {
                return Err(Error::UnsupportedFileType {
                    path: src.to_path_buf(),
                });
            }
        }
        set_times(dest, node.atime, node.mtime)
    }

    fn copy_metadata(&self, src: &Path, dest: &Path) -> Result<()> {
        let node = self.stat_existing(src)?;
        // Linux cannot chmod a symlink itself
        if !node.is_symlink() {
            self.set_permissions(dest, node.permissions())?;
        }
        set_times(dest, node.atime, node.mtime)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        trace!(path = %path.display(), mode = %format!("{:o}", mode), "chmod");
        fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|e| Error::io(path, e))
    }

    fn set_ownership(&self, path: &Path, uid: u32, gid: u32) -> Result<()> {
        lchown(path, Some(uid), Some(gid)).map_err(|e| Error::io(path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        trace!(path = %path.display(), "rm");
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }

    fn remove_tree(&self, path: &Path) -> Result<()> {
        trace!(path = %path.display(), "rmtree");
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    }
}
