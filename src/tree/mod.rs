//! The size tree and the walk that builds it.
//!
//! ## Main Parts
//!
//! - [`Node`] - One entry with its block-rounded size and sorted children
//! - [`TreeBuilder`] - Recursive, best-effort filesystem walk
//! - [`PathExclusion`] - Predicate for directories that must not be listed

pub mod builder;
pub mod exclude;
pub mod node;

pub use builder::{ScanStats, TreeBuilder};
pub use exclude::{NoExclusion, PathExclusion, PseudoFsExclusion};
pub use node::{Node, NodeKind};
