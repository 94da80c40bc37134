//! Report rendering.
//!
//! All renderers consume a finished, read-only [`Node`](crate::tree::Node)
//! tree:
//!
//! - [`text`] - indented lines for the terminal
//! - [`json`] - `{text, children}` records, compact JSON
//! - [`html`] - a self-contained interactive page built on the JSON records

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlReport;
pub use json::{JsonNode, to_json};
pub use text::{text_lines, write_text};
