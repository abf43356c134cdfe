//! Link (undirected, weighted edge) in the similarity graph.

use serde::Serialize;
use super::NodeIndex;

/// A weighted link between two nodes.
///
/// Links are conceptually undirected. The codec stores one direction only:
/// `source` is always the later-indexed node and `target` the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(skip)]
    pub source_index: NodeIndex,
    #[serde(skip)]
    pub target_index: NodeIndex,
    /// Similarity / strength, nominally in `[0.0, 1.0]`.
    #[serde(rename = "similarity")]
    pub weight: f64,
}

impl GraphLink {
    pub fn endpoints(&self) -> (NodeIndex, NodeIndex) {
        (self.source_index, self.target_index)
    }

    pub fn touches(&self, node: NodeIndex) -> bool {
        self.source_index == node || self.target_index == node
    }

    /// The "other" end of the link from the given node.
    pub fn other(&self, from: NodeIndex) -> Option<NodeIndex> {
        if from == self.source_index { Some(self.target_index) }
        else if from == self.target_index { Some(self.source_index) }
        else { None }
    }
}
