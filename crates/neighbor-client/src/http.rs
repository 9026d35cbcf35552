//! HTTP client for the wikifier neighbor-graph endpoint.

use crate::{FetchError, FetchOutcome, GraphSource};
use neighbor_core::{GraphQuery, NeighborGraph};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://www.wikifier.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const NEIGH_GRAPH_PATH: &str = "/get-neigh-graph";

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_env_proxy: bool,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_env_proxy: true,
        }
    }
}

/// Fetches neighbor graphs over HTTP. One attempt per query, no retries.
pub struct HttpGraphSource {
    http: Client,
    endpoint: String,
}

impl HttpGraphSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().timeout(config.timeout);
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                NEIGH_GRAPH_PATH
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GraphSource for HttpGraphSource {
    async fn fetch(&self, query: &GraphQuery) -> Result<FetchOutcome, FetchError> {
        let pred_levels = query.pred_levels.to_string();
        let succ_levels = query.succ_levels.to_string();
        debug!(
            endpoint = %self.endpoint,
            lang = %query.language,
            title = %query.title,
            "Requesting neighbor graph"
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("lang", query.language.as_str()),
                ("title", query.title.as_str()),
                ("nPredLevels", pred_levels.as_str()),
                ("nSuccLevels", succ_levels.as_str()),
            ])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, title = %query.title, "Graph service returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        decode_response(&body)
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNeighborGraph {
    #[serde(default)]
    n_vertices: Option<usize>,
    #[serde(default)]
    titles: Option<Vec<String>>,
    #[serde(default)]
    successors: Option<Vec<Vec<usize>>>,
    #[serde(default)]
    n_edges: Option<usize>,
}

/// Decodes a response body. An absent or zero `nVertices` means "no
/// relations"; a non-empty graph must carry both `titles` and `successors`.
pub fn decode_response(body: &[u8]) -> Result<FetchOutcome, FetchError> {
    let raw: RawNeighborGraph =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let n_vertices = match raw.n_vertices {
        Some(n) if n > 0 => n,
        _ => return Ok(FetchOutcome::Empty),
    };
    let titles = raw
        .titles
        .ok_or_else(|| FetchError::Decode("missing field `titles`".to_string()))?;
    let successors = raw
        .successors
        .ok_or_else(|| FetchError::Decode("missing field `successors`".to_string()))?;

    Ok(FetchOutcome::Graph(NeighborGraph {
        n_vertices,
        titles,
        successors,
        n_edges: raw.n_edges,
    }))
}
