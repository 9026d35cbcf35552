use neighbor_core::{MalformedGraph, NeighborGraph, TreeDirection, TreeError, TreeNode, VertexIndex};
use tracing::debug;

/// What happened to a single edge handed to [`TreeBuilder::push_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// The child was appended under its group.
    Inserted,
    /// The parent is the root topic; nothing was touched.
    DroppedRootParent,
    /// Parent and child share a name. The group exists but stays unchanged.
    DroppedSelfLoop,
    /// The group already lists a child with this name.
    Duplicate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub edges_seen: usize,
    pub edges_inserted: usize,
    pub edges_dropped_root: usize,
    pub edges_dropped_self: usize,
    pub edges_duplicate: usize,
    /// Edge total the server claimed, if it sent one
    pub reported_edges: Option<usize>,
}

impl BuildStats {
    fn record(&mut self, outcome: EdgeInsertion) {
        self.edges_seen += 1;
        match outcome {
            EdgeInsertion::Inserted => self.edges_inserted += 1,
            EdgeInsertion::DroppedRootParent => self.edges_dropped_root += 1,
            EdgeInsertion::DroppedSelfLoop => self.edges_dropped_self += 1,
            EdgeInsertion::Duplicate => self.edges_duplicate += 1,
        }
    }

    pub fn matches_reported(&self) -> bool {
        self.reported_edges.is_none_or(|n| n == self.edges_seen)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTree {
    pub tree: TreeNode,
    pub stats: BuildStats,
}

/// Incrementally grows a two-level topic tree: root -> groups -> leaves.
///
/// The root name is fixed at construction. Edges whose parent is the root
/// are dropped. Every other edge lands in a first-level group named after
/// the parent, so the root title itself can show up as a leaf. Sibling names
/// stay unique within each group.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: TreeNode,
    stats: BuildStats,
}

impl TreeBuilder {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: TreeNode::root(root_name),
            stats: BuildStats::default(),
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    pub fn push_edge(&mut self, parent: &str, child: &str) -> EdgeInsertion {
        let outcome = self.insert(parent, child);
        self.stats.record(outcome);
        outcome
    }

    fn insert(&mut self, parent: &str, child: &str) -> EdgeInsertion {
        if parent == self.root.name {
            return EdgeInsertion::DroppedRootParent;
        }

        let group = match self.root.children.iter().position(|c| c.name == parent) {
            Some(idx) => &mut self.root.children[idx],
            None => {
                self.root.children.push(TreeNode::group(parent));
                let last = self.root.children.len() - 1;
                &mut self.root.children[last]
            }
        };

        if child == parent {
            return EdgeInsertion::DroppedSelfLoop;
        }
        if group.child(child).is_some() {
            return EdgeInsertion::Duplicate;
        }
        group.children.push(TreeNode::leaf(child));
        EdgeInsertion::Inserted
    }

    pub fn finish(self) -> BuiltTree {
        BuiltTree {
            tree: self.root,
            stats: self.stats,
        }
    }
}

/// Checks the shape of a graph before any of it is used.
pub fn validate_graph(graph: &NeighborGraph) -> Result<(), TreeError> {
    let n = graph.n_vertices;
    if n == 0 {
        return Err(TreeError::EmptyGraph);
    }
    if graph.titles.len() != n {
        return Err(MalformedGraph::TitleCount {
            expected: n,
            actual: graph.titles.len(),
        }
        .into());
    }
    if graph.successors.len() != n {
        return Err(MalformedGraph::SuccessorCount {
            expected: n,
            actual: graph.successors.len(),
        }
        .into());
    }
    if let Some((from, to)) = graph.edges().find(|(_, v)| v.0 >= n) {
        return Err(MalformedGraph::VertexOutOfRange {
            from,
            to,
            vertex_count: n,
        }
        .into());
    }
    Ok(())
}

/// Builds the topic tree for `graph`, rooted at `root_name`.
///
/// Edges are visited in vertex order, then successor order; `direction`
/// picks which endpoint of `u -> v` becomes the parent. Titles are used
/// verbatim.
pub fn build_tree(
    root_name: &str,
    graph: &NeighborGraph,
    direction: TreeDirection,
) -> Result<BuiltTree, TreeError> {
    validate_graph(graph)?;

    let mut builder = TreeBuilder::new(root_name);
    for (u, v) in graph.edges() {
        let (parent, child) = direction.orient(title_of(graph, u), title_of(graph, v));
        builder.push_edge(parent, child);
    }
    builder.stats.reported_edges = graph.n_edges;

    let built = builder.finish();
    if !built.stats.matches_reported() {
        debug!(
            seen = built.stats.edges_seen,
            reported = ?built.stats.reported_edges,
            "Edge count differs from server total"
        );
    }
    debug!(
        root = %built.tree.name,
        groups = built.tree.children.len(),
        inserted = built.stats.edges_inserted,
        dropped_root = built.stats.edges_dropped_root,
        "Built topic tree"
    );
    Ok(built)
}

// Indices were checked by validate_graph.
fn title_of(graph: &NeighborGraph, vertex: VertexIndex) -> &str {
    &graph.titles[vertex.0]
}
