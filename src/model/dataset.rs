//! GraphDataSet: the immutable snapshot handed to the renderer.

use hashbrown::HashMap;
use serde::Serialize;

use super::{GraphLink, GraphNode, NodeIndex};

/// An ordered node sequence plus the links between them.
///
/// Built once per decode and never patched: a new threshold or a new buffer
/// produces a new snapshot. Node order is the positional index used by the
/// adjacency matrix, so the sequence is never reordered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphDataSet {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    #[serde(skip)]
    by_id: HashMap<String, NodeIndex>,
}

impl GraphDataSet {
    /// Combine decoded nodes and links into one snapshot.
    ///
    /// No validation: unique ids and in-range link endpoints are guaranteed
    /// by the decoders that produced the parts.
    pub(crate) fn assemble(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        let by_id = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), NodeIndex(i)))
            .collect();
        Self { nodes, links, by_id }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.nodes.get(index.0)
    }

    /// Look up a node's positional index by its id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of links touching `index`, as source or target.
    pub fn degree(&self, index: NodeIndex) -> usize {
        self.links.iter().filter(|l| l.touches(index)).count()
    }

    /// Degree of every node, indexed positionally.
    pub fn degrees(&self) -> Vec<usize> {
        degree_table(self.nodes.len(), &self.links)
    }

    /// Nodes linked to `index`, with the link weight.
    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.links
            .iter()
            .filter_map(move |l| l.other(index).map(|other| (other, l.weight)))
    }

    /// Resolve both endpoints of a link through the positional index.
    pub fn endpoints(&self, link: &GraphLink) -> Option<(&GraphNode, &GraphNode)> {
        Some((self.node(link.source_index)?, self.node(link.target_index)?))
    }
}

/// Count incident links per positional index.
pub(crate) fn degree_table(node_count: usize, links: &[GraphLink]) -> Vec<usize> {
    let mut degrees = vec![0usize; node_count];
    for link in links {
        degrees[link.source_index.0] += 1;
        degrees[link.target_index.0] += 1;
    }
    degrees
}
