//! snaptree CLI
//!
//! Snapshot backups built from hard links: merge, replace and compare trees.

mod cli;
mod commands;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!("{} Tree snapshots with hard links", "snaptree".green().bold());
            println!();
            println!("Run {} for available commands.", "snaptree --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<()> {
    match cmd {
        Commands::Merge {
            reference,
            destination,
            sources,
            options,
            json,
        } => {
            let options = commands::resolve_options(config, &options)?;
            commands::run_merge(&reference, &destination, &sources, &options, json)
        }
        Commands::Replace {
            source,
            destination,
            options,
            json,
        } => {
            let options = commands::resolve_options(config, &options)?;
            commands::run_replace(&source, &destination, &options, json)
        }
        Commands::Equal { paths, options } => {
            let options = commands::resolve_options(config, &options)?;
            commands::run_equal(&paths, &options)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "snaptree", &mut std::io::stdout());
            Ok(())
        }
    }
}
