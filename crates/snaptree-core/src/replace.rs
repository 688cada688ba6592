//! Two-way sync: make a destination tree match a source tree

use std::path::Path;

use snaptree_fs::TreeNode;
use tracing::debug;

use crate::Result;
use crate::engine::Engine;
use crate::equal::nodes_equal;
use crate::event::Event;

/// Owner read, write and search.
const OWNER_ACCESS: u32 = 0o700;

impl Engine<'_> {
    /// Bring `dest` into metadata-and-structure agreement with `src`.
    ///
    /// Either side may be missing. Only `dest` is mutated:
    ///
    /// | src       | dest      | action                                   |
    /// |-----------|-----------|------------------------------------------|
    /// | missing   | missing   | nothing                                  |
    /// | missing   | any       | remove dest                              |
    /// | any       | missing   | strongcopy                               |
    /// | non-dir   | dir       | remove dest tree, strongcopy             |
    /// | non-dir   | non-dir   | nothing if equal, else remove + strongcopy |
    /// | dir       | non-dir   | remove dest, strongcopy                  |
    /// | dir       | dir       | open up and chown if unequal, recurse into the union of child names, then stamp metadata |
    ///
    /// A `src` listed in [`crate::ComparisonOptions::exclude`] is skipped
    /// entirely, at any depth.
    pub fn replace(&mut self, src: &Path, dest: &Path) -> Result<()> {
        if self.options.is_excluded(src) {
            debug!(path = %src.display(), "excluded");
            return Ok(());
        }

        let src_node = self.fs.stat(src)?;
        let dest_node = self.fs.stat(dest)?;

        match (src_node, dest_node) {
            (None, None) => Ok(()),
            (None, Some(dest_node)) => self.remove(dest, &dest_node),
            (Some(_), None) => self.strongcopy(src, dest),
            (Some(src_node), Some(dest_node)) if !src_node.is_dir() => {
                if !dest_node.is_dir() && nodes_equal(&src_node, &dest_node, self.options) {
                    return Ok(());
                }
                self.remove(dest, &dest_node)?;
                self.place_node(src, dest, &src_node)
            }
            (Some(_), Some(dest_node)) if !dest_node.is_dir() => {
                self.remove(dest, &dest_node)?;
                self.strongcopy(src, dest)
            }
            (Some(src_node), Some(dest_node)) => {
                self.replace_directory(src, dest, &src_node, &dest_node)
            }
        }
    }

    /// Both sides are directories. Equal directory metadata says nothing about
    /// contents, so children are always visited.
    ///
    /// Ownership and permissions of an unequal directory are applied before
    /// the children so that a destination directory left read-only by an
    /// earlier run can be written. The owner keeps write and search access
    /// until the children are done, then the exact bits and times are copied.
    fn replace_directory(
        &mut self,
        src: &Path,
        dest: &Path,
        src_node: &TreeNode,
        dest_node: &TreeNode,
    ) -> Result<()> {
        let restamp = !nodes_equal(src_node, dest_node, self.options);
        if restamp {
            if self.options.preserve_ownership {
                self.fs.set_ownership(dest, src_node.uid, src_node.gid)?;
            }
            self.fs
                .set_permissions(dest, src_node.permissions() | OWNER_ACCESS)?;
        }

        let mut names = self.fs.list_child_names(src)?;
        names.extend(self.fs.list_child_names(dest)?);

        for name in names {
            self.replace(&src.join(&name), &dest.join(&name))?;
        }

        // Writing children moves the mtime, so compare again
        if restamp || !self.equal(&[src, dest])? {
            self.stamp_directory(src, dest, src_node)?;
            self.emit(Event::UpdateMetadata {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }
        Ok(())
    }
}
