//! # scandisk
//!
//! A `du`-style disk usage scanner. It walks a directory tree, sizes every
//! file in whole filesystem blocks, sums directory sizes bottom-up and sorts
//! each directory's entries largest first. The result is printed as an
//! indented text report or written as an interactive HTML tree view.
//!
//! ## Main Parts
//!
//! - [`tree::TreeBuilder`] - the recursive, best-effort walk
//! - [`tree::Node`] - the size-annotated tree it produces
//! - [`BlockSizeProvider`] - where the block size comes from
//! - [`render`] - text, JSON and HTML output
//! - [`utils::format_size`] - the `"1.5 KB"` style size labels
//!
//! ## Usage
//!
//! ```bash
//! # Interactive report of the whole filesystem, written to output.html
//! scandisk
//!
//! # Text report of a single directory
//! scandisk --root ~/Projects --output text
//! ```

pub mod block_size;
pub mod config;
pub mod error;
pub mod render;
pub mod tree;
pub mod utils;

pub use block_size::{BlockSize, BlockSizeProvider, FixedBlockSize, SystemBlockSize};
pub use config::{OutputMode, OutputOptions, ScanOptions};
pub use error::{Error, Result};
pub use tree::{Node, TreeBuilder};
