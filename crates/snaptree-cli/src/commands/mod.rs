//! Command implementations

mod equal;
mod merge;
mod replace;

pub use equal::run_equal;
pub use merge::run_merge;
pub use replace::run_replace;

use std::path::Path;

use snaptree_core::ComparisonOptions;
use snaptree_fs::ConfigStore;
use tracing::debug;

use crate::cli::OptionFlags;
use crate::error::Result;
use crate::output::OutputMode;

/// Layer built-in defaults, the optional config file and command-line flags.
pub fn resolve_options(config: Option<&Path>, flags: &OptionFlags) -> Result<ComparisonOptions> {
    let base = match config {
        Some(path) => {
            debug!(path = %path.display(), "Loading options");
            ConfigStore::new().load::<ComparisonOptions>(path)?
        }
        None => ComparisonOptions::default(),
    };
    let options = flags.apply(base);
    debug!(?options, "Resolved options");
    Ok(options)
}

fn output_mode(json: bool) -> OutputMode {
    if json { OutputMode::Json } else { OutputMode::Human }
}
