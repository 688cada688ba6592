//! Equal command implementation

use std::path::{Path, PathBuf};

use snaptree_core::{ComparisonOptions, equal};
use snaptree_fs::LocalFs;
use tracing::debug;

use crate::error::{CliError, Result};

/// Run the equal command
///
/// Prints `true` or `false`. Only the given entries are compared, never
/// their children.
pub fn run_equal(paths: &[PathBuf], options: &ComparisonOptions) -> Result<()> {
    if paths.len() < 2 {
        return Err(CliError::user("equal needs at least two paths"));
    }
    let refs: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    let result = equal(&LocalFs::new(), &refs, options)?;
    debug!(paths = paths.len(), result, "Compared");
    println!("{}", result);
    Ok(())
}
