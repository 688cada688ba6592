//! Reconciliation of filesystem trees
//!
//! This crate implements the algorithm family behind snapshot-style backups:
//!
//! - **Equality**: shallow, metadata-only comparison of any number of paths
//! - **Copy**: attribute-preserving `place` (one entry) and `strongcopy` (a subtree)
//! - **Replace**: two-way sync that mutates a destination until it matches a source
//! - **Merge**: three-way reconciliation of a baseline and candidate trees into a
//!   new destination, reporting conflicts instead of guessing
//!
//! # Architecture
//!
//! ```text
//!         merge
//!        /     \
//!    equal    replace
//!            /       \
//!        equal     place / strongcopy
//!                       |
//!              snaptree_fs::Filesystem
//! ```
//!
//! Every operation reports what it did through an [`EventSink`].

pub mod copy;
pub mod engine;
pub mod equal;
pub mod error;
pub mod event;
pub mod merge;
pub mod options;
pub mod preconditions;
pub mod replace;

pub use engine::Engine;
pub use equal::{equal, nodes_equal};
pub use error::{Error, Result};
pub use event::{ConflictReport, Event, EventSink, Recorder, RunReport, TracingSink};
pub use options::ComparisonOptions;
