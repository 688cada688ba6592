//! Shallow, metadata-only equality
//!
//! Contents are never read: two files are equal when mode, owner, group,
//! size and mtime agree. Directories are compared on their own metadata
//! only; callers that care about what is inside must recurse themselves.

use std::path::Path;

use snaptree_fs::{Filesystem, TreeNode};

use crate::Result;
use crate::options::ComparisonOptions;

/// Compare any number of paths without descending into directories.
///
/// - fewer than two paths are vacuously equal
/// - paths that all do not exist are equal
/// - a mix of existing and missing paths is unequal
pub fn equal(fs: &dyn Filesystem, paths: &[&Path], options: &ComparisonOptions) -> Result<bool> {
    if paths.len() < 2 {
        return Ok(true);
    }

    let mut nodes = Vec::with_capacity(paths.len());
    for path in paths {
        nodes.push(fs.stat(path)?);
    }

    let present: Vec<&TreeNode> = nodes.iter().flatten().collect();
    if present.is_empty() {
        return Ok(true);
    }
    if present.len() != nodes.len() {
        return Ok(false);
    }

    let first = present[0];
    Ok(present[1..]
        .iter()
        .all(|node| nodes_equal(first, node, options)))
}

/// Compare two already-stat'ed nodes.
pub fn nodes_equal(a: &TreeNode, b: &TreeNode, options: &ComparisonOptions) -> bool {
    if a.mode != b.mode {
        return false;
    }
    if !options.ignore_uid && a.uid != b.uid {
        return false;
    }
    if !options.ignore_gid && a.gid != b.gid {
        return false;
    }

    // Directory sizes say nothing about their contents
    let both_dirs = a.is_dir() && b.is_dir();
    if !both_dirs && a.size != b.size {
        return false;
    }
    if !(both_dirs && options.ignore_directory_timestamp) && a.mtime != b.mtime {
        return false;
    }
    true
}
