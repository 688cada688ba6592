//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use snaptree_core::ComparisonOptions;

/// snaptree - Space-efficient, attribute-faithful snapshots of directory trees
#[derive(Parser, Debug)]
#[command(name = "snaptree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read option defaults from a TOML, JSON or YAML file
    #[arg(long, global = true, value_name = "FILE", env = "SNAPTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge source trees into a new destination using a reference tree
    ///
    /// Paths unchanged in every source are taken from the reference (hard-linked
    /// when possible). A path changed the same way by one or more sources takes
    /// that change. A path changed in incompatible ways is reported and left out.
    ///
    /// Examples:
    ///   snaptree merge snap/1 snap/2 /home            # next snapshot of /home
    ///   snaptree merge snap/1 restored                # restore a snapshot
    Merge {
        /// Reference (baseline) tree
        reference: PathBuf,

        /// Destination tree (must not exist)
        destination: PathBuf,

        /// Trees to merge
        sources: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionFlags,

        /// Print a JSON report instead of one line per operation
        #[arg(long)]
        json: bool,
    },

    /// Make a destination tree match a source tree
    Replace {
        /// Source tree
        source: PathBuf,

        /// Destination tree (created if missing)
        destination: PathBuf,

        #[command(flatten)]
        options: OptionFlags,

        /// Print a JSON report instead of one line per operation
        #[arg(long)]
        json: bool,
    },

    /// Compare paths by metadata without descending into directories
    Equal {
        /// Paths to compare
        #[arg(required = true, num_args = 2..)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionFlags,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags mapped onto [`ComparisonOptions`]. Unset pairs keep the value from
/// the config file or the built-in default.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionFlags {
    /// Consider directories that differ only in timestamp equal (default)
    #[arg(long, overrides_with = "no_ignore_directory_timestamps")]
    pub ignore_directory_timestamps: bool,

    /// Compare directory timestamps
    #[arg(long, overrides_with = "ignore_directory_timestamps")]
    pub no_ignore_directory_timestamps: bool,

    /// Hard-link files if possible (default)
    #[arg(long, overrides_with = "no_hard_link")]
    pub hard_link: bool,

    /// Always copy file contents
    #[arg(long, overrides_with = "hard_link")]
    pub no_hard_link: bool,

    /// Consider entries that differ only in user ID equal
    #[arg(long, overrides_with = "no_ignore_uid")]
    pub ignore_uid: bool,

    /// Compare user IDs (default)
    #[arg(long, overrides_with = "ignore_uid")]
    pub no_ignore_uid: bool,

    /// Consider entries that differ only in group ID equal
    #[arg(long, overrides_with = "no_ignore_gid")]
    pub ignore_gid: bool,

    /// Compare group IDs (default)
    #[arg(long, overrides_with = "ignore_gid")]
    pub no_ignore_gid: bool,

    /// Preserve ownership (default)
    #[arg(long, overrides_with = "no_chown")]
    pub chown: bool,

    /// Leave created entries owned by the current user
    #[arg(long, overrides_with = "chown")]
    pub no_chown: bool,

    /// Skip this exact path when replacing (repeatable)
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<PathBuf>,
}

fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl OptionFlags {
    /// Layer these flags over `base`.
    pub fn apply(&self, mut base: ComparisonOptions) -> ComparisonOptions {
        if let Some(value) = toggle(
            self.ignore_directory_timestamps,
            self.no_ignore_directory_timestamps,
        ) {
            base.ignore_directory_timestamp = value;
        }
        if let Some(value) = toggle(self.hard_link, self.no_hard_link) {
            base.use_hardlink = value;
        }
        if let Some(value) = toggle(self.ignore_uid, self.no_ignore_uid) {
            base.ignore_uid = value;
        }
        if let Some(value) = toggle(self.ignore_gid, self.no_ignore_gid) {
            base.ignore_gid = value;
        }
        if let Some(value) = toggle(self.chown, self.no_chown) {
            base.preserve_ownership = value;
        }
        base.exclude.extend(self.exclude.iter().cloned());
        base
    }
}
