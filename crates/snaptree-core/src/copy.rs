//! Attribute-preserving copy primitives

use std::path::Path;

use snaptree_fs::{TreeNode, parent_dir};
use tracing::debug;

use crate::Result;
use crate::engine::Engine;
use crate::event::Event;

impl Engine<'_> {
    /// Copy one existing non-directory entry to a destination that does not
    /// exist yet.
    ///
    /// With hard-linking enabled, a regular file on the same device as the
    /// destination's parent is linked instead of copied. Both names then
    /// share one inode, so a later in-place edit through either name shows
    /// through the other.
    pub fn place(&mut self, src: &Path, dest: &Path) -> Result<()> {
        let node = self.fs.stat_existing(src)?;
        self.place_node(src, dest, &node)
    }

    pub(crate) fn place_node(&mut self, src: &Path, dest: &Path, node: &TreeNode) -> Result<()> {
        if self.options.use_hardlink && !node.is_symlink() {
            let parent = self.fs.stat_existing(parent_dir(dest))?;
            if parent.dev == node.dev {
                self.fs.hard_link(src, dest)?;
                self.emit(Event::Link {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                });
                return Ok(());
            }
            debug!(src = %src.display(), "different device, copying instead of linking");
        }

        self.fs.copy_entry(src, dest)?;
        if self.options.preserve_ownership {
            self.fs.set_ownership(dest, node.uid, node.gid)?;
            // chown can clear setuid/setgid bits
            self.fs.copy_metadata(src, dest)?;
        }

        let (src, dest) = (src.to_path_buf(), dest.to_path_buf());
        self.emit(if node.is_symlink() {
            Event::CopyLink { src, dest }
        } else {
            Event::Copy { src, dest }
        });
        Ok(())
    }

    /// Recursively copy an existing file or directory to a destination that
    /// does not exist yet.
    pub fn strongcopy(&mut self, src: &Path, dest: &Path) -> Result<()> {
        let node = self.fs.stat_existing(src)?;
        if !node.is_dir() {
            return self.place_node(src, dest, &node);
        }

        self.fs.create_dir(dest)?;
        self.emit(Event::CreateDir {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });

        for name in self.fs.list_child_names(src)? {
            self.strongcopy(&src.join(&name), &dest.join(&name))?;
        }

        self.stamp_directory(src, dest, &node)
    }
}
