//! Size-annotated filesystem tree.
//!
//! A [`Node`] is built once by the [`TreeBuilder`](crate::tree::TreeBuilder)
//! and is read-only afterwards. Every directory owns its children, sorted
//! largest first, and its size is the sum of theirs.

use std::fmt::{self, Display, Formatter};

use crate::utils::format_size;

/// Whether a node was a directory when it was scanned.
///
/// Symbolic links, devices, sockets and entries whose metadata could not be
/// read are all `File`: they are never descended into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeKind {
    /// A regular file or any other non-directory entry
    File,

    /// A directory, including the scan root
    Directory,
}

/// One filesystem entry and everything beneath it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    /// Space on disk in bytes.
    ///
    /// For files, the byte length rounded up to whole blocks. For
    /// directories, the sum of the children's sizes.
    pub size: u64,

    /// Base name of the entry. Directory names end with the platform path
    /// separator; the root keeps the path it was scanned from.
    pub name: String,

    /// File or directory
    pub kind: NodeKind,

    /// Children sorted by `size`, largest first. Always empty for files.
    pub children: Vec<Self>,
}

impl Node {
    /// Create an empty file node.
    #[must_use]
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            size,
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Create an empty directory node.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            size: 0,
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Append a child and add its size to this node's total.
    pub fn push_child(&mut self, child: Self) {
        self.size = self.size.saturating_add(child.size);
        self.children.push(child);
    }

    /// Order children by size, largest first. Ties are left in any order.
    pub fn sort_children(&mut self) {
        self.children.sort_unstable_by(|a, b| b.size.cmp(&a.size));
    }

    /// Whether this node is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    /// The report label: the formatted size, left-aligned in a ten character
    /// column, followed by the name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scandisk::tree::Node;
    /// assert_eq!(Node::file("a.txt", 8192).label(), "8 KB       a.txt");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:<10} {}", format_size(self.size), self.name)
    }

    /// Number of file nodes in this subtree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.iter().filter(|(_, node)| !node.is_dir()).count()
    }

    /// Depth-first pre-order walk yielding each node with its depth, the
    /// receiver being depth 0.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![(0, self)],
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Pre-order iterator over a [`Node`] tree. See [`Node::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let mut sub = Node::directory("sub/");
        sub.push_child(Node::file("inner.bin", 4096));
        sub.sort_children();

        let mut root = Node::directory("/data");
        root.push_child(Node::file("small.txt", 4096));
        root.push_child(sub);
        root.push_child(Node::file("big.iso", 1_048_576));
        root.sort_children();
        root
    }

    #[test]
    fn test_push_child_accumulates_size() {
        let root = sample_tree();

        assert_eq!(root.size, 4096 + 4096 + 1_048_576);
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn test_sort_children_descending() {
        let root = sample_tree();
        let sizes: Vec<u64> = root.children.iter().map(|c| c.size).collect();

        assert_eq!(sizes[0], 1_048_576);
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_label_alignment() {
        assert_eq!(Node::file("a", 0).label(), "0  B       a");
        assert_eq!(Node::file("b", 1536).label(), "1.5 KB     b");
        assert_eq!(
            Node::file("c", 1_234_567_890_123).label(),
            "1149.78 GB c"
        );
        assert_eq!(format!("{}", Node::directory("d/")), "0  B       d/");
    }

    #[test]
    fn test_iter_is_preorder_with_depth() {
        let root = sample_tree();
        let visited: Vec<(usize, &str)> = root
            .iter()
            .map(|(depth, node)| (depth, node.name.as_str()))
            .collect();

        assert_eq!(visited[0], (0, "/data"));
        assert_eq!(visited[1], (1, "big.iso"));
        // `sub/` and `small.txt` tie at 4096, so either may come first
        let sub_pos = visited.iter().position(|v| *v == (1, "sub/")).unwrap();
        assert_eq!(visited[sub_pos + 1], (2, "inner.bin"));
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn test_file_count_and_kind() {
        let root = sample_tree();

        assert_eq!(root.file_count(), 3);
        assert!(root.is_dir());
        assert!(!Node::file("x", 0).is_dir());
    }
}
