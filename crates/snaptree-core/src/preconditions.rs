//! Caller-level checks run before any mutation
//!
//! The engines trust their callers and do not repeat these checks.

use std::path::{Path, PathBuf};

use snaptree_fs::{Filesystem, parent_dir};

use crate::options::ComparisonOptions;
use crate::{Error, Result};

/// Validate the arguments of a merge.
pub fn check_merge(
    fs: &dyn Filesystem,
    reference: &Path,
    dest: &Path,
    sources: &[PathBuf],
    options: &ComparisonOptions,
) -> Result<()> {
    let mut any_exists = fs.exists(reference)?;
    for source in sources {
        any_exists = any_exists || fs.exists(source)?;
    }
    if !any_exists {
        return Err(Error::precondition(
            "At least one of the reference and the listed sources must exist",
        ));
    }

    if fs.exists(dest)? {
        return Err(Error::precondition(format!(
            "Destination must not exist: {}",
            dest.display()
        )));
    }
    let parent = check_parent(fs, dest)?;

    if options.use_hardlink
        && let Some(reference_node) = fs.stat(reference)?
        && reference_node.dev != parent.dev
    {
        return Err(Error::precondition(format!(
            "The reference {} and destination {} must be on the same device to hard-link",
            reference.display(),
            dest.display()
        )));
    }
    Ok(())
}

/// Validate the arguments of a replace.
pub fn check_replace(fs: &dyn Filesystem, dest: &Path) -> Result<()> {
    check_parent(fs, dest).map(|_| ())
}

fn check_parent(fs: &dyn Filesystem, dest: &Path) -> Result<snaptree_fs::TreeNode> {
    let parent = parent_dir(dest);
    match fs.stat(parent)? {
        Some(node) if node.is_dir() => Ok(node),
        _ => Err(Error::precondition(format!(
            "Destination parent directory does not exist: {}",
            parent.display()
        ))),
    }
}
