use neighbor_core::TreeNode;
use serde_json::Value;

/// Every name in the tree, depth-first pre-order, starting with the root.
///
/// Names repeated across branches are kept; this is the list written to the
/// CSV export.
pub fn flatten_names(tree: &TreeNode) -> Vec<String> {
    let mut names = Vec::with_capacity(tree.node_count());
    collect_names(tree, &mut names);
    names
}

fn collect_names(node: &TreeNode, out: &mut Vec<String>) {
    out.push(node.name.clone());
    for child in &node.children {
        collect_names(child, out);
    }
}

/// Names of the root's direct children, in stored order. One entry per
/// group, even when the service handed back an empty title.
pub fn top_level_names(tree: &TreeNode) -> Vec<String> {
    tree.children.iter().map(|c| c.name.clone()).collect()
}

/// [`top_level_names`] over an already serialized payload.
///
/// Anything that is not a tree-shaped object yields an empty list, and
/// children without a string `name` are skipped.
pub fn top_level_names_json(value: &Value) -> Vec<String> {
    let Some(children) = value
        .as_object()
        .and_then(|obj| obj.get("children"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    children
        .iter()
        .filter_map(|child| child.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}
