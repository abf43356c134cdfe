//! Lower-triangular adjacency matrix decoding.
//!
//! Cells are laid out in canonical order, never row-major over the full
//! matrix:
//!
//! ```text
//! for i in 1..N:          (1,0)
//!     for j in 0..i:      (2,0) (2,1)
//!         cell(i, j)      (3,0) (3,1) (3,2) ...
//! ```
//!
//! Every unordered pair is visited once with `i > j`, so a decoded link
//! always has the later-indexed node as `source`.

use crate::model::{GraphLink, GraphNode, NodeIndex};
use super::profile::{pair_count, CellFormat, ThresholdRule};
use super::DecodeWarning;

// ============================================================================
// Canonical enumeration
// ============================================================================

/// Iterator over `(i, j)` pairs in canonical order.
#[derive(Debug, Clone)]
pub struct LowerTriangle {
    n: usize,
    i: usize,
    j: usize,
}

/// Canonical pair enumeration for `n` nodes.
pub fn lower_triangle(n: usize) -> LowerTriangle {
    LowerTriangle { n, i: 1, j: 0 }
}

impl Iterator for LowerTriangle {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.n {
            return None;
        }
        let pair = (self.i, self.j);
        self.j += 1;
        if self.j == self.i {
            self.i += 1;
            self.j = 0;
        }
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = pair_count(self.n).saturating_sub(cell_index(self.i, self.j));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LowerTriangle {}

/// Offset of pair `(i, j)` (with `i > j`) in canonical order.
#[inline]
pub fn cell_index(i: usize, j: usize) -> usize {
    i * i.saturating_sub(1) / 2 + j
}

// ============================================================================
// Matrix scan
// ============================================================================

/// Links kept from one pass over the matrix region, plus how far it got.
#[derive(Debug, Clone, Default)]
pub(crate) struct MatrixScan {
    pub links: Vec<GraphLink>,
    pub cells_read: usize,
    pub expected_cells: usize,
    /// Bytes left after the last expected cell. Only counted on a complete scan.
    pub trailing_bytes: usize,
    /// Cells whose weight was skipped or clamped.
    pub warnings: Vec<DecodeWarning>,
}

impl MatrixScan {
    pub fn is_truncated(&self) -> bool {
        self.cells_read < self.expected_cells
    }
}

/// Walk `region` in canonical order against the positional node sequence.
///
/// A region that runs out early is not an error: the scan stops at the last
/// whole cell and reports how many it read.
///
/// Weights are held to `[0, 1]` before the threshold applies. A NaN or
/// infinite cell is skipped, a finite one outside the range is clamped, and
/// both are reported.
pub(crate) fn scan_matrix(
    region: &[u8],
    nodes: &[GraphNode],
    format: CellFormat,
    rule: ThresholdRule,
    threshold: f64,
) -> MatrixScan {
    let expected_cells = pair_count(nodes.len());
    let mut scan = MatrixScan { expected_cells, ..MatrixScan::default() };

    for ((i, j), cell) in lower_triangle(nodes.len()).zip(region.chunks_exact(format.width())) {
        let offset = scan.cells_read;
        scan.cells_read += 1;
        let Some(weight) = checked_weight(offset, format.decode(cell), &mut scan.warnings) else {
            continue;
        };
        if rule.admits(weight, threshold) {
            scan.links.push(GraphLink {
                source: nodes[i].id.clone(),
                target: nodes[j].id.clone(),
                source_index: NodeIndex(i),
                target_index: NodeIndex(j),
                weight,
            });
        }
    }

    if !scan.is_truncated() {
        scan.trailing_bytes = region.len() - expected_cells * format.width();
    }
    scan
}

fn checked_weight(cell: usize, weight: f64, warnings: &mut Vec<DecodeWarning>) -> Option<f64> {
    if !weight.is_finite() {
        warnings.push(DecodeWarning::NonFiniteWeight { cell, weight });
        return None;
    }
    if !(0.0..=1.0).contains(&weight) {
        warnings.push(DecodeWarning::WeightOutOfRange { cell, weight });
        return Some(weight.clamp(0.0, 1.0));
    }
    Some(weight)
}
