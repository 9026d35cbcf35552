use neighbor_core::{GraphQuery, NeighborGraph};
use std::future::Future;
use thiserror::Error;

pub mod cache;
pub mod http;

pub use cache::{CacheStats, CachedSource, GraphCache};
pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpGraphSource, HttpSourceConfig, decode_response};

/// A successful answer from the graph service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Graph(NeighborGraph),
    /// The service knows no relations for this title.
    Empty,
}

impl FetchOutcome {
    pub fn into_graph(self) -> Option<NeighborGraph> {
        match self {
            FetchOutcome::Graph(graph) => Some(graph),
            FetchOutcome::Empty => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("the request timed out, please try again later")]
    Timeout,
    #[error("graph service answered HTTP {status}")]
    Status { status: u16 },
    #[error("connection error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Anything able to answer neighbor-graph queries.
pub trait GraphSource: Send + Sync {
    fn fetch(
        &self,
        query: &GraphQuery,
    ) -> impl Future<Output = Result<FetchOutcome, FetchError>> + Send;
}

impl<S: GraphSource> GraphSource for std::sync::Arc<S> {
    fn fetch(
        &self,
        query: &GraphQuery,
    ) -> impl Future<Output = Result<FetchOutcome, FetchError>> + Send {
        (**self).fetch(query)
    }
}
