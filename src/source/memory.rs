//! In-memory graph source.
//!
//! Networks are registered up front by query string. Unknown queries
//! answer `Unavailable::NoResult`, and places can be registered as
//! unavailable with a specific reason.

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::model::Unavailable;
use crate::snapshot::RawGraph;
use crate::Result;
use super::{Fetched, GraphSource};

/// Preloaded networks keyed by query.
#[derive(Clone, Default)]
pub struct MemorySource {
    inner: Arc<RwLock<HashMap<String, Fetched>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the network for `query`, replacing any earlier entry.
    pub fn insert(&self, query: impl Into<String>, graph: RawGraph) {
        self.inner.write().insert(query.into(), Fetched::Available(graph));
    }

    /// Register `query` as known but unusable.
    pub fn insert_unavailable(&self, query: impl Into<String>, reason: Unavailable) {
        self.inner.write().insert(query.into(), Fetched::Unavailable(reason));
    }

    pub fn with_graph(self, query: impl Into<String>, graph: RawGraph) -> Self {
        self.insert(query, graph);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[async_trait]
impl GraphSource for MemorySource {
    async fn fetch(&self, place: &str) -> Result<Fetched> {
        Ok(self
            .inner
            .read()
            .get(place)
            .cloned()
            .unwrap_or(Fetched::Unavailable(Unavailable::NoResult)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_places_have_no_result() {
        let source = MemorySource::new();
        assert!(source.is_empty());
        let fetched = source.fetch("Atlantis, Nowhere").await.unwrap();
        assert_eq!(fetched, Fetched::Unavailable(Unavailable::NoResult));
    }

    #[tokio::test]
    async fn registered_places_are_returned() {
        let graph = RawGraph::from_edges([(1u64, 2u64)]);
        let source = MemorySource::new().with_graph("Porto, Portugal", graph.clone());
        source.insert_unavailable("Vatican, Vatican", Unavailable::ImplausibleArea { area: 0.00004 });
        assert_eq!(source.len(), 2);

        assert_eq!(source.fetch("Porto, Portugal").await.unwrap(), Fetched::Available(graph));
        assert!(matches!(
            source.fetch("Vatican, Vatican").await.unwrap(),
            Fetched::Unavailable(Unavailable::ImplausibleArea { .. })
        ));
    }
}
