use neighbor_client::{FetchOutcome, GraphSource};
use neighbor_core::{GraphQuery, TreeDirection, TreeError, TreeNode, clean_keyword};
use neighbor_tree::{BuildStats, build_tree, flatten_names, panel_height, top_level_names};
use tracing::{info, warn};

pub mod export;
pub mod languages;

pub use export::{ExportError, ExportFormat, export_file_name, write_export};
pub use languages::{CatalogError, Language, LanguageCatalog};

const EXPLORE_TARGET: &str = "neighbor::explore";

/// One user query: the raw topic as typed plus how to fetch and orient it.
#[derive(Debug, Clone)]
pub struct ExploreRequest {
    pub topic: String,
    pub language: String,
    pub pred_levels: u32,
    pub succ_levels: u32,
    pub direction: TreeDirection,
}

impl ExploreRequest {
    pub fn new(topic: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            language: language.into(),
            pred_levels: 0,
            succ_levels: 1,
            direction: TreeDirection::Forward,
        }
    }

    /// Normalized topic; this is both the requested title and the root name.
    pub fn root_name(&self) -> String {
        clean_keyword(&self.topic)
    }

    pub fn to_query(&self) -> GraphQuery {
        GraphQuery::new(self.language.clone(), self.root_name())
            .with_levels(self.pred_levels, self.succ_levels)
    }
}

/// Everything the presentation layer needs for one rendered tree.
#[derive(Debug, Clone)]
pub struct TreeView {
    pub topic: String,
    pub tree: TreeNode,
    pub stats: BuildStats,
    /// Pre-order names, as exported to CSV
    pub names: Vec<String>,
    pub top_level: Vec<String>,
    pub panel_height: u32,
}

#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Tree(Box<TreeView>),
    /// The service knows the topic but returned no relations.
    NoRelations { topic: String },
    /// Fetch or decode failed; no graph is available.
    Failed { topic: String, reason: String },
}

/// Runs fetch -> build -> walk for a query against any [`GraphSource`].
pub struct Explorer<S> {
    source: S,
}

impl<S: GraphSource> Explorer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn explore(&self, request: &ExploreRequest) -> QueryOutcome {
        let query = request.to_query();
        let topic = query.title.clone();
        if topic.is_empty() {
            return QueryOutcome::Failed {
                topic,
                reason: "topic is empty".to_string(),
            };
        }

        let graph = match self.source.fetch(&query).await {
            Ok(FetchOutcome::Graph(graph)) => graph,
            Ok(FetchOutcome::Empty) => {
                info!(target: EXPLORE_TARGET, %topic, "No relations found");
                return QueryOutcome::NoRelations { topic };
            }
            Err(e) => {
                warn!(target: EXPLORE_TARGET, %topic, "Fetch failed: {e}");
                return QueryOutcome::Failed {
                    topic,
                    reason: e.to_string(),
                };
            }
        };

        let built = match build_tree(&topic, &graph, request.direction) {
            Ok(built) => built,
            Err(TreeError::EmptyGraph) => return QueryOutcome::NoRelations { topic },
            Err(e) => {
                warn!(target: EXPLORE_TARGET, %topic, "Rejected graph: {e}");
                return QueryOutcome::Failed {
                    topic,
                    reason: e.to_string(),
                };
            }
        };

        let names = flatten_names(&built.tree);
        let top_level = top_level_names(&built.tree);
        let panel_height = panel_height(top_level.len());
        info!(
            target: EXPLORE_TARGET,
            %topic,
            vertices = graph.n_vertices,
            groups = top_level.len(),
            names = names.len(),
            "Explored topic"
        );

        QueryOutcome::Tree(Box::new(TreeView {
            topic,
            tree: built.tree,
            stats: built.stats,
            names,
            top_level,
            panel_height,
        }))
    }
}
