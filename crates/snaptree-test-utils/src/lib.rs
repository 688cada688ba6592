//! Shared test utilities for the snaptree workspace.
//!
//! This crate provides standardised tree fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`] builder for scratch directory trees

pub mod tree;

pub use tree::{TestTree, listing};
