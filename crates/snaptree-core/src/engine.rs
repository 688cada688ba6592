//! Engine shared by the copy, replace and merge operations

use std::path::Path;

use snaptree_fs::{Filesystem, TreeNode};

use crate::event::{Event, EventSink};
use crate::options::ComparisonOptions;
use crate::{Result, equal};

/// Runs tree operations against one filesystem with one set of options.
///
/// The operations themselves live next to their helpers:
/// [`Engine::place`] and [`Engine::strongcopy`] in [`crate::copy`],
/// [`Engine::replace`] in [`crate::replace`], [`Engine::merge`] in
/// [`crate::merge`].
///
/// # Example
///
/// ```no_run
/// use snaptree_core::{ComparisonOptions, Engine, Recorder};
/// use snaptree_fs::LocalFs;
/// use std::path::{Path, PathBuf};
///
/// let fs = LocalFs::new();
/// let options = ComparisonOptions::default();
/// let mut recorder = Recorder::new();
/// let mut engine = Engine::new(&fs, &options, &mut recorder);
/// engine
///     .merge(Path::new("snap/1"), Path::new("snap/2"), &[PathBuf::from("/home")])
///     .unwrap();
/// ```
pub struct Engine<'a> {
    pub(crate) fs: &'a dyn Filesystem,
    pub(crate) options: &'a ComparisonOptions,
    sink: &'a mut dyn EventSink,
}

impl<'a> Engine<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        options: &'a ComparisonOptions,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        Self { fs, options, sink }
    }

    /// Shallow equality of `paths` under this engine's options.
    pub fn equal(&self, paths: &[&Path]) -> Result<bool> {
        equal(self.fs, paths, self.options)
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.sink.record(event);
    }

    /// Give an existing directory the permissions, times and (optionally)
    /// ownership of `node`, which was taken from `src`.
    ///
    /// Runs after the children are in place so that creating them does not
    /// disturb the copied mtime.
    pub(crate) fn stamp_directory(&self, src: &Path, dest: &Path, node: &TreeNode) -> Result<()> {
        if self.options.preserve_ownership {
            self.fs.set_ownership(dest, node.uid, node.gid)?;
        }
        self.fs.copy_metadata(src, dest)?;
        Ok(())
    }

    /// Remove whatever `node` describes at `path`.
    pub(crate) fn remove(&mut self, path: &Path, node: &TreeNode) -> Result<()> {
        if node.is_dir() {
            self.fs.remove_tree(path)?;
            self.emit(Event::RemoveTree {
                path: path.to_path_buf(),
            });
        } else {
            self.fs.remove_file(path)?;
            self.emit(Event::Remove {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}
