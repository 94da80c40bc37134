//! Structured tree output for the HTML view and for scripting.
//!
//! Each node becomes `{"text": <label>, "children": [...]}`, with `children`
//! left out for leaves. The `text` field is the same label as a line of the
//! text report, so both views read identically.

use serde::{Deserialize, Serialize};

use crate::{error::Result, tree::Node};

/// Serializable form of a [`Node`].
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct JsonNode {
    /// Formatted size and name, as in the text report
    pub text: String,

    /// Children in the tree's order (largest first)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl JsonNode {
    /// Convert a tree, recursively.
    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        Self {
            text: node.label(),
            children: node.children.iter().map(Self::from_node).collect(),
        }
    }
}

impl From<&Node> for JsonNode {
    fn from(node: &Node) -> Self {
        Self::from_node(node)
    }
}

/// Serialize a tree to compact JSON.
///
/// # Errors
///
/// Returns [`Error::Serialize`](crate::Error::Serialize) if serialization fails.
pub fn to_json(root: &Node) -> Result<String> {
    Ok(serde_json::to_string(&JsonNode::from_node(root))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_no_children_key() {
        let json = to_json(&Node::file("a.txt", 8192)).unwrap();

        assert_eq!(json, r#"{"text":"8 KB       a.txt"}"#);
    }

    #[test]
    fn test_nested_structure_keeps_order() {
        let mut root = Node::directory("/r");
        root.push_child(Node::directory("b/"));
        root.push_child(Node::file("a.txt", 8192));
        root.sort_children();

        let json = to_json(&root).unwrap();
        let parsed: JsonNode = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.text, "8 KB       /r");
        assert_eq!(parsed.children.len(), 2);
        assert_eq!(parsed.children[0].text, "8 KB       a.txt");
        assert_eq!(parsed.children[1].text, "0  B       b/");
        assert!(parsed.children[1].children.is_empty());
        assert!(!json.contains('\n'));
    }
}
