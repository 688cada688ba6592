//! Merge command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use snaptree_core::preconditions::check_merge;
use snaptree_core::{ComparisonOptions, Engine};
use snaptree_fs::LocalFs;
use tracing::info;

use super::output_mode;
use crate::error::Result;
use crate::output::{ConsoleSink, OutputMode};

/// Run the merge command
///
/// Builds `destination` from `reference` and `sources`. Conflicts are
/// reported but do not fail the command.
pub fn run_merge(
    reference: &Path,
    destination: &Path,
    sources: &[PathBuf],
    options: &ComparisonOptions,
    json: bool,
) -> Result<()> {
    let fs = LocalFs::new();
    check_merge(&fs, reference, destination, sources, options)?;

    let mode = output_mode(json);
    if mode == OutputMode::Human {
        println!(
            "{} Merging {} source(s) over {} into {}",
            "=>".blue().bold(),
            sources.len(),
            reference.display().to_string().cyan(),
            destination.display().to_string().cyan()
        );
    }
    info!(
        reference = %reference.display(),
        destination = %destination.display(),
        sources = sources.len(),
        "Starting merge"
    );

    let mut sink = ConsoleSink::new(mode);
    Engine::new(&fs, options, &mut sink).merge(reference, destination, sources)?;
    let report = sink.finish()?;

    info!(
        operations = report.operations.len(),
        conflicts = report.conflicts.len(),
        "Merge finished"
    );
    Ok(())
}
