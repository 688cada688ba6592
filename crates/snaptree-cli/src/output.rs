//! Console rendering of engine events

use colored::Colorize;
use snaptree_core::{Event, EventSink, Recorder, RunReport, TracingSink};

use crate::error::Result;

/// How a run reports to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One line per operation as it happens, conflicts in full
    Human,
    /// A single JSON report once the run finishes
    Json,
}

/// Sink that prints events, forwards them to `tracing` and keeps them for
/// the final summary.
pub struct ConsoleSink {
    mode: OutputMode,
    recorder: Recorder,
    tracing: TracingSink,
}

impl ConsoleSink {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            recorder: Recorder::new(),
            tracing: TracingSink,
        }
    }

    /// Print the summary (or the JSON report) and hand back the report.
    pub fn finish(self) -> Result<RunReport> {
        let report = self.recorder.into_report();
        match self.mode {
            OutputMode::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputMode::Human => {
                let conflicts = if report.has_conflicts() {
                    report.conflicts.len().to_string().yellow().bold()
                } else {
                    "0".normal()
                };
                println!(
                    "{} {} operation(s), {} conflict(s)",
                    "=>".blue().bold(),
                    report.operations.len(),
                    conflicts
                );
            }
        }
        Ok(report)
    }
}

impl EventSink for ConsoleSink {
    fn record(&mut self, event: Event) {
        self.tracing.record(event.clone());
        if self.mode == OutputMode::Human {
            println!("{}", render(&event));
        }
        self.recorder.record(event);
    }
}

fn render(event: &Event) -> String {
    match event {
        Event::Link { src, dest } => {
            format!("{} {} {}", "link".cyan(), src.display(), dest.display())
        }
        Event::Copy { src, dest } => {
            format!("{} {} {}", "copy".green(), src.display(), dest.display())
        }
        Event::CopyLink { src, dest } => {
            format!("{} {} {}", "copylink".green(), src.display(), dest.display())
        }
        Event::CreateDir { src, dest } => {
            format!("{} {} {}", "mkdir".blue(), src.display(), dest.display())
        }
        Event::UpdateMetadata { src, dest } => {
            format!("{} {} {}", "stamp".blue(), src.display(), dest.display())
        }
        Event::Remove { path } => format!("{} {}", "rm".red(), path.display()),
        Event::RemoveTree { path } => format!("{} {}", "rmtree".red(), path.display()),
        Event::Conflict(report) => format!("{} {}", "conflict".yellow().bold(), report),
    }
}
