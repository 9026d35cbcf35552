use neighbor_core::TreeNode;

/// Draws the tree as an indented outline with box-drawing guides.
pub fn render_outline(tree: &TreeNode) -> String {
    let mut out = String::new();
    out.push_str(&tree.name);
    out.push('\n');
    render_children(tree, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (idx, child) in node.children.iter().enumerate() {
        let last = idx + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&child.name);
        out.push('\n');
        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(child, &nested, out);
    }
}
