//! Replace command implementation

use std::path::Path;

use colored::Colorize;
use snaptree_core::preconditions::check_replace;
use snaptree_core::{ComparisonOptions, Engine};
use snaptree_fs::LocalFs;
use tracing::info;

use super::output_mode;
use crate::error::Result;
use crate::output::{ConsoleSink, OutputMode};

/// Run the replace command
pub fn run_replace(
    source: &Path,
    destination: &Path,
    options: &ComparisonOptions,
    json: bool,
) -> Result<()> {
    let fs = LocalFs::new();
    check_replace(&fs, destination)?;

    let mode = output_mode(json);
    if mode == OutputMode::Human {
        println!(
            "{} Replacing {} with {}",
            "=>".blue().bold(),
            destination.display().to_string().cyan(),
            source.display().to_string().cyan()
        );
    }

    let mut sink = ConsoleSink::new(mode);
    Engine::new(&fs, options, &mut sink).replace(source, destination)?;
    let report = sink.finish()?;

    info!(operations = report.operations.len(), "Replace finished");
    Ok(())
}
