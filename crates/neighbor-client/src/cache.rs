use crate::{FetchError, FetchOutcome, GraphSource};
use neighbor_core::GraphQuery;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<GraphQuery, FetchOutcome>,
    // insertion order, oldest first
    order: VecDeque<GraphQuery>,
    hits: u64,
    misses: u64,
}

/// Bounded memo of fetch results keyed by request parameters.
///
/// Holds at most `capacity` entries and evicts the oldest insertion first.
/// A capacity of zero stores nothing.
pub struct GraphCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl GraphCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, query: &GraphQuery) -> Option<FetchOutcome> {
        let mut state = self.state.lock();
        let found = state.entries.get(query).cloned();
        if found.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }
        found
    }

    pub fn insert(&self, query: GraphQuery, outcome: FetchOutcome) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if state.entries.insert(query.clone(), outcome).is_some() {
            return;
        }
        state.order.push_back(query);
        while state.order.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
            }
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }
}

/// Wraps a [`GraphSource`] with a shared [`GraphCache`]. Failed fetches are
/// never cached.
pub struct CachedSource<S> {
    inner: S,
    cache: Arc<GraphCache>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S, cache: Arc<GraphCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<GraphCache> {
        &self.cache
    }
}

impl<S: GraphSource> GraphSource for CachedSource<S> {
    async fn fetch(&self, query: &GraphQuery) -> Result<FetchOutcome, FetchError> {
        if let Some(hit) = self.cache.get(query) {
            debug!(title = %query.title, "Neighbor graph cache hit");
            return Ok(hit);
        }
        let outcome = self.inner.fetch(query).await?;
        self.cache.insert(query.clone(), outcome.clone());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighbor_core::NeighborGraph;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl GraphSource for CountingSource {
        async fn fetch(&self, query: &GraphQuery) -> Result<FetchOutcome, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Timeout);
            }
            Ok(FetchOutcome::Graph(NeighborGraph::new(
                vec![query.title.clone()],
                vec![vec![]],
            )))
        }
    }

    fn query(title: &str) -> GraphQuery {
        GraphQuery::new("en", title)
    }

    #[test]
    fn test_fifo_eviction() {
        let cache = GraphCache::new(2);
        cache.insert(query("A"), FetchOutcome::Empty);
        cache.insert(query("B"), FetchOutcome::Empty);
        cache.insert(query("C"), FetchOutcome::Empty);

        assert!(cache.get(&query("A")).is_none());
        assert!(cache.get(&query("B")).is_some());
        assert!(cache.get(&query("C")).is_some());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 2,
                misses: 1,
                entries: 2
            }
        );
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let cache = GraphCache::new(2);
        cache.insert(query("A"), FetchOutcome::Empty);
        cache.insert(query("A"), FetchOutcome::Empty);
        cache.insert(query("B"), FetchOutcome::Empty);
        assert!(cache.get(&query("A")).is_some());
        assert_eq!(cache.stats().entries, 2);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache = GraphCache::new(0);
        cache.insert(query("A"), FetchOutcome::Empty);
        assert!(cache.get(&query("A")).is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_key_includes_levels() {
        let cache = GraphCache::new(4);
        cache.insert(query("A"), FetchOutcome::Empty);
        assert!(cache.get(&query("A").with_levels(1, 1)).is_none());
        cache.clear();
        assert!(cache.get(&query("A")).is_none());
    }

    #[tokio::test]
    async fn test_cached_source_fetches_once() {
        let cache = Arc::new(GraphCache::new(8));
        let source = CachedSource::new(CountingSource::new(false), cache.clone());

        let first = source.fetch(&query("Paris")).await.unwrap();
        let second = source.fetch(&query("Paris")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);

        source.fetch(&query("Rome")).await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cached_source_does_not_cache_errors() {
        let cache = Arc::new(GraphCache::new(8));
        let source = CachedSource::new(CountingSource::new(true), cache.clone());

        assert_eq!(
            source.fetch(&query("Paris")).await,
            Err(FetchError::Timeout)
        );
        assert_eq!(
            source.fetch(&query("Paris")).await,
            Err(FetchError::Timeout)
        );
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().entries, 0);
    }
}
