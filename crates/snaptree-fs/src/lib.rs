//! Filesystem collaborator for snaptree
//!
//! Provides the [`Filesystem`] seam the reconciliation engines talk to, the
//! host implementation [`LocalFs`], the transient [`TreeNode`] stat view and
//! format-agnostic config loading.

pub mod config;
pub mod error;
pub mod filesystem;
#[cfg(unix)]
pub mod local;
pub mod node;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use filesystem::{Filesystem, parent_dir};
#[cfg(unix)]
pub use local::LocalFs;
pub use node::{NodeKind, Timestamp, TreeNode};
