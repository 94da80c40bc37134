//! Utility functions and helpers.
//!
//! This module contains the size formatting used by every report line and
//! the size parser used for the block-size override.

pub mod size;

pub use size::{format_size, parse_size};
