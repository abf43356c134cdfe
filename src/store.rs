//! Graph store: explicit owner of the current snapshot.
//!
//! One `GraphStore` holds the graph the renderer is drawing. Reloading
//! decodes a fresh buffer and swaps the snapshot wholesale; readers holding
//! the previous `Arc` keep a consistent view until they drop it.
//!
//! ## Limitations
//!
//! - **No merge**: a reload never patches the old graph, even when only the
//!   threshold changed.
//! - **Failures keep the old graph**: a failed load records its error and
//!   leaves the current snapshot in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::codec::{decode, Decoded, DecodeWarning, EncodingProfile};
use crate::config::DecodeConfig;
use crate::model::{GraphDataSet, GraphNode, NodeIndex};
use crate::Result;

/// Current graph plus the state that travels with it.
#[derive(Default)]
pub struct GraphStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    current: Option<Arc<GraphDataSet>>,
    warnings: Vec<DecodeWarning>,
    last_error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    selected: Option<NodeIndex>,
    /// Bumped on every successful swap.
    generation: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `buf` and make it the current snapshot.
    pub fn load(
        &self,
        buf: &[u8],
        profile: &EncodingProfile,
        config: &DecodeConfig,
    ) -> Result<Arc<GraphDataSet>> {
        match decode(buf, profile, config) {
            Ok(decoded) => Ok(self.replace(decoded)),
            Err(e) => {
                warn!(error = %e, "graph load failed, keeping previous snapshot");
                self.inner.write().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Install an already-decoded graph. Clears selection and the last error.
    pub fn replace(&self, decoded: Decoded) -> Arc<GraphDataSet> {
        let snapshot = Arc::new(decoded.graph);
        let mut state = self.inner.write();
        state.current = Some(Arc::clone(&snapshot));
        state.warnings = decoded.warnings;
        state.last_error = None;
        state.loaded_at = Some(Utc::now());
        state.selected = None;
        state.generation += 1;
        debug!(generation = state.generation, nodes = snapshot.len(), "snapshot replaced");
        snapshot
    }

    pub fn snapshot(&self) -> Option<Arc<GraphDataSet>> {
        self.inner.read().current.clone()
    }

    pub fn warnings(&self) -> Vec<DecodeWarning> {
        self.inner.read().warnings.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.read().last_error.clone()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().loaded_at
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Select a node by id. Returns its index, or `None` (and clears the
    /// selection) if the current graph has no such node.
    pub fn select(&self, id: &str) -> Option<NodeIndex> {
        let mut state = self.inner.write();
        let index = state.current.as_ref().and_then(|g| g.index_of(id));
        state.selected = index;
        index
    }

    pub fn clear_selection(&self) {
        self.inner.write().selected = None;
    }

    pub fn selected(&self) -> Option<GraphNode> {
        let state = self.inner.read();
        let index = state.selected?;
        state.current.as_ref()?.node(index).cloned()
    }
}
