//! Three-way merge of candidate trees against a baseline
//!
//! Every path is classified on its own, independently of its siblings:
//!
//! - **ref-dominant**: every source agrees with the baseline. The baseline
//!   is materialized and directories are merged again child by child.
//! - **single-divergent**: the sources that differ from the baseline all
//!   agree with each other. The first of them wins and the subtree is handed
//!   to [`Engine::replace`]; no three-way reasoning happens below it.
//! - **conflicted**: two sources differ from the baseline and from each
//!   other. A [`ConflictReport`] is emitted and the path is left out of the
//!   destination.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Result;
use crate::engine::Engine;
use crate::event::{ConflictReport, Event};

impl Engine<'_> {
    /// Merge `sources` into the new tree `dest` using `reference` as the
    /// baseline.
    ///
    /// `dest` must not exist; its parent must. With no sources this restores
    /// `reference` into `dest`.
    pub fn merge(&mut self, reference: &Path, dest: &Path, sources: &[PathBuf]) -> Result<()> {
        if sources.is_empty() {
            return self.merge_agreed(reference, dest, sources);
        }

        let mut divergent: Option<&Path> = None;
        for source in sources.iter().map(PathBuf::as_path) {
            if self.equal(&[source, reference])? {
                continue;
            }
            match divergent {
                None => divergent = Some(source),
                Some(first) if self.equal(&[source, first])? => {}
                Some(_) => return self.report_conflict(reference, sources),
            }
        }

        match divergent {
            Some(winner) => {
                debug!(src = %winner.display(), dest = %dest.display(), "single change, replacing");
                self.replace(winner, dest)
            }
            None => self.merge_agreed(reference, dest, sources),
        }
    }

    /// `reference` is authoritative at this path.
    fn merge_agreed(&mut self, reference: &Path, dest: &Path, sources: &[PathBuf]) -> Result<()> {
        // Nothing exists anywhere at this path
        let Some(node) = self.fs.stat(reference)? else {
            return Ok(());
        };
        if !node.is_dir() {
            return self.place_node(reference, dest, &node);
        }

        self.fs.create_dir(dest)?;
        self.emit(Event::CreateDir {
            src: reference.to_path_buf(),
            dest: dest.to_path_buf(),
        });

        for name in self.child_names(reference, sources)? {
            let child_sources: Vec<PathBuf> =
                sources.iter().map(|source| source.join(&name)).collect();
            self.merge(&reference.join(&name), &dest.join(&name), &child_sources)?;
        }

        self.stamp_directory(reference, dest, &node)
    }

    /// Union of the names under the reference and every source. All of them
    /// are directories here, having compared equal to the reference.
    fn child_names(&self, reference: &Path, sources: &[PathBuf]) -> Result<HashSet<OsString>> {
        let mut names = self.fs.list_child_names(reference)?;
        for source in sources {
            names.extend(self.fs.list_child_names(source)?);
        }
        Ok(names)
    }

    fn report_conflict(&mut self, reference: &Path, sources: &[PathBuf]) -> Result<()> {
        let mut divergent = Vec::new();
        for source in sources {
            if !self.equal(&[source.as_path(), reference])? {
                divergent.push(source.clone());
            }
        }
        self.emit(Event::Conflict(ConflictReport {
            reference: reference.to_path_buf(),
            sources: divergent,
        }));
        Ok(())
    }
}
