//! Indented text report.
//!
//! One line per node in depth-first pre-order, each indented by two spaces
//! per level below the root:
//!
//! ```text
//! 8 KB       /data
//!   8 KB       a.txt
//!   0  B       b/
//! ```

use std::io::{self, Write};

use crate::tree::Node;

/// Indentation added per tree level.
const INDENT: &str = "  ";

/// Render the tree as report lines, root first.
#[must_use]
pub fn text_lines(root: &Node) -> Vec<String> {
    root.iter()
        .map(|(depth, node)| format!("{}{}", INDENT.repeat(depth), node.label()))
        .collect()
}

/// Write the report to `out`, one line per node.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_text(root: &Node, mut out: impl Write) -> io::Result<()> {
    for line in text_lines(root) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let mut docs = Node::directory("docs/");
        docs.push_child(Node::file("guide.pdf", 2048));

        let mut root = Node::directory("/data");
        root.push_child(Node::file("a.txt", 8192));
        root.push_child(docs);
        root.sort_children();
        root
    }

    #[test]
    fn test_text_lines_indent_by_depth() {
        let lines = text_lines(&tree());

        assert_eq!(
            lines,
            vec![
                "10 KB      /data".to_string(),
                "  8 KB       a.txt".to_string(),
                "  2 KB       docs/".to_string(),
                "    2 KB       guide.pdf".to_string(),
            ]
        );
    }

    #[test]
    fn test_write_text_ends_lines_with_newline() {
        let mut out = Vec::new();
        write_text(&Node::file("lonely", 0), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0  B       lonely\n");
    }
}
