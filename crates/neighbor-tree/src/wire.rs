//! External JSON shape of a topic tree.
//!
//! The tree diagram and the JSON export consume
//! `{ "name": string, "children"?: [...], "size"?: number }`. That shape is
//! kept separate from [`TreeNode`] so the in-memory type can change without
//! breaking saved exports or the renderer.

use neighbor_core::{TreeNode, TreeNodeKind};
use serde::{Deserialize, Serialize};

/// Bumped whenever the payload shape changes incompatibly.
pub const WIRE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadNode {
    pub name: String,
    /// Absent on leaves; present (possibly empty) on the root and on groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PayloadNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

pub fn to_payload(node: &TreeNode) -> PayloadNode {
    let children = match node.kind {
        TreeNodeKind::Leaf if node.children.is_empty() => None,
        _ => Some(node.children.iter().map(to_payload).collect()),
    };
    PayloadNode {
        name: node.name.clone(),
        children,
        size: node.size(),
    }
}

pub fn to_json(tree: &TreeNode) -> serde_json::Result<String> {
    serde_json::to_string(&to_payload(tree))
}

pub fn to_json_pretty(tree: &TreeNode) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_payload(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree;
    use neighbor_core::{NeighborGraph, TreeDirection};
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let graph = NeighborGraph::new(
            vec!["Root".into(), "A".into(), "B".into()],
            vec![vec![1], vec![2], vec![]],
        );
        let tree = build_tree("Root", &graph, TreeDirection::Forward)
            .unwrap()
            .tree;

        let value: serde_json::Value = serde_json::from_str(&to_json(&tree).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Root",
                "size": 1,
                "children": [
                    {"name": "A", "children": [{"name": "Root", "size": 2}]},
                    {"name": "B", "children": [{"name": "A", "size": 2}]}
                ]
            })
        );
    }

    #[test]
    fn test_empty_group_keeps_children_array() {
        let mut root = TreeNode::root("Root");
        root.children.push(TreeNode::group("Lonely"));
        let value = serde_json::to_value(to_payload(&root)).unwrap();
        assert_eq!(value["children"][0], json!({"name": "Lonely", "children": []}));
    }

    #[test]
    fn test_pretty_and_compact_agree() {
        let root = TreeNode::root("Root");
        let compact: PayloadNode = serde_json::from_str(&to_json(&root).unwrap()).unwrap();
        let pretty: PayloadNode = serde_json::from_str(&to_json_pretty(&root).unwrap()).unwrap();
        assert_eq!(compact, pretty);
        assert_eq!(compact.children, Some(vec![]));
    }
}
