//! Structured reporting of what the engines did and decided

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A path where the sources changed the baseline in more than one way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Baseline path
    pub reference: PathBuf,
    /// Every source that differs from the baseline at this location
    pub sources: Vec<PathBuf>,
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "More than one difference among the following:")?;
        write!(f, "\t{}", self.reference.display())?;
        for source in &self.sources {
            write!(f, "\n\t{}", source.display())?;
        }
        Ok(())
    }
}

/// Something an engine did to the destination, or a conflict it found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// `dest` was hard-linked to `src`
    Link { src: PathBuf, dest: PathBuf },
    /// A regular file was copied with its metadata
    Copy { src: PathBuf, dest: PathBuf },
    /// A symlink was recreated
    CopyLink { src: PathBuf, dest: PathBuf },
    /// A directory was created from `src`
    CreateDir { src: PathBuf, dest: PathBuf },
    /// An existing directory took over the metadata of `src`
    UpdateMetadata { src: PathBuf, dest: PathBuf },
    /// A non-directory was removed
    Remove { path: PathBuf },
    /// A directory was removed recursively
    RemoveTree { path: PathBuf },
    /// The path was left out of the destination
    Conflict(ConflictReport),
}

impl Event {
    /// Whether the event changed the destination tree.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Conflict(_))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link { src, dest } => write!(f, "link {} {}", src.display(), dest.display()),
            Self::Copy { src, dest } => write!(f, "copy {} {}", src.display(), dest.display()),
            Self::CopyLink { src, dest } => {
                write!(f, "copylink {} {}", src.display(), dest.display())
            }
            Self::CreateDir { src, dest } => {
                write!(f, "mkdir {} {}", src.display(), dest.display())
            }
            Self::UpdateMetadata { src, dest } => {
                write!(f, "stamp {} {}", src.display(), dest.display())
            }
            Self::Remove { path } => write!(f, "rm {}", path.display()),
            Self::RemoveTree { path } => write!(f, "rmtree {}", path.display()),
            Self::Conflict(report) => write!(f, "{}", report),
        }
    }
}

/// Receiver of engine events.
pub trait EventSink {
    fn record(&mut self, event: Event);
}

/// Sink that keeps every event, in emission order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn mutations(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|event| event.is_mutation())
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ConflictReport> {
        self.events.iter().filter_map(|event| match event {
            Event::Conflict(report) => Some(report),
            _ => None,
        })
    }

    pub fn into_report(self) -> RunReport {
        let mut report = RunReport::default();
        for event in self.events {
            match event {
                Event::Conflict(conflict) => report.conflicts.push(conflict),
                other => report.operations.push(other),
            }
        }
        report
    }
}

impl EventSink for Recorder {
    fn record(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Sink that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: Event) {
        match &event {
            Event::Conflict(report) => warn!(
                reference = %report.reference.display(),
                sources = report.sources.len(),
                "conflict, path omitted"
            ),
            other => info!("{}", other),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Mutations performed on the destination
    pub operations: Vec<Event>,
    /// Paths omitted because of conflicting changes
    pub conflicts: Vec<ConflictReport>,
}

impl RunReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
