use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod keyword;

pub use error::{MalformedGraph, TreeError};
pub use keyword::{clean_keyword, title_case};

/// Position of a title in a single graph response. Not stable across responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexIndex(pub usize);

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of one neighbor-graph request. Identical queries return
/// identical graphs, so this doubles as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphQuery {
    /// Wikipedia language code, e.g. "en"
    pub language: String,
    /// Normalized entity title
    pub title: String,
    pub pred_levels: u32,
    pub succ_levels: u32,
}

impl GraphQuery {
    pub fn new(language: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            title: title.into(),
            pred_levels: 0,
            succ_levels: 1,
        }
    }

    pub fn with_levels(mut self, pred_levels: u32, succ_levels: u32) -> Self {
        self.pred_levels = pred_levels;
        self.succ_levels = succ_levels;
        self
    }
}

/// A non-empty neighbor graph as delivered by the remote service.
///
/// `successors[u]` lists every `v` with an edge `u -> v`; `titles[u]` names
/// vertex `u`. Shape consistency is checked by the tree builder, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborGraph {
    pub n_vertices: usize,
    pub titles: Vec<String>,
    pub successors: Vec<Vec<usize>>,
    /// Edge total reported by the server; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_edges: Option<usize>,
}

impl NeighborGraph {
    pub fn new(titles: Vec<String>, successors: Vec<Vec<usize>>) -> Self {
        Self {
            n_vertices: titles.len(),
            titles,
            successors,
            n_edges: None,
        }
    }

    /// Every `u -> v` edge, in vertex order then successor order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        self.successors.iter().enumerate().flat_map(|(u, succ)| {
            succ.iter().map(move |&v| (VertexIndex(u), VertexIndex(v)))
        })
    }

    pub fn title(&self, vertex: VertexIndex) -> Option<&str> {
        self.titles.get(vertex.0).map(String::as_str)
    }
}

/// Which endpoint of a successor edge `u -> v` becomes the parent in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TreeDirection {
    /// parent = `v`, child = `u`
    #[default]
    Forward,
    /// parent = `u`, child = `v`
    Reverse,
}

impl TreeDirection {
    /// Returns `(parent, child)` for the edge `source -> target`.
    pub fn orient<'a>(self, source: &'a str, target: &'a str) -> (&'a str, &'a str) {
        match self {
            TreeDirection::Forward => (target, source),
            TreeDirection::Reverse => (source, target),
        }
    }
}

impl From<bool> for TreeDirection {
    fn from(reverse: bool) -> Self {
        if reverse {
            TreeDirection::Reverse
        } else {
            TreeDirection::Forward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeNodeKind {
    /// The queried topic
    Root,
    /// A first-level parent collecting related titles
    Group,
    /// A title attached under a group
    Leaf,
}

impl TreeNodeKind {
    /// Visualization weight. Groups carry none.
    pub fn size(self) -> Option<u32> {
        match self {
            TreeNodeKind::Root => Some(1),
            TreeNodeKind::Group => None,
            TreeNodeKind::Leaf => Some(2),
        }
    }
}

/// A node of the topic tree. Children are owned by value, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: TreeNodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn root(name: impl Into<String>) -> Self {
        Self::with_kind(name, TreeNodeKind::Root)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, TreeNodeKind::Group)
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::with_kind(name, TreeNodeKind::Leaf)
    }

    fn with_kind(name: impl Into<String>, kind: TreeNodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn size(&self) -> Option<u32> {
        self.kind.size()
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.name.as_str())
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}
