//! Degree-derived sizing for the quantized profile.
//!
//! Runs after the whole matrix is scanned and before the snapshot is
//! assembled: `value = 1 + 0.5·degree`, except isolated nodes, which shrink
//! to 0.5 and turn neutral gray.

use crate::model::dataset::degree_table;
use crate::model::{GraphLink, GraphNode, Rgb};

pub const BASE_VALUE: f64 = 1.0;
pub const VALUE_PER_LINK: f64 = 0.5;
pub const ISOLATED_VALUE: f64 = 0.5;

/// Overwrite `value` (and `color` for isolated nodes) from link degree.
pub(crate) fn apply_degree_sizing(nodes: &mut [GraphNode], links: &[GraphLink]) {
    let degrees = degree_table(nodes.len(), links);
    for (node, degree) in nodes.iter_mut().zip(degrees) {
        if degree == 0 {
            node.value = ISOLATED_VALUE;
            node.color = Rgb::ISOLATED;
        } else {
            node.value = BASE_VALUE + degree as f64 * VALUE_PER_LINK;
        }
    }
}
