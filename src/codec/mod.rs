//! # Binary Graph Codec
//!
//! Turns one complete, immutable byte buffer into a `GraphDataSet`.
//!
//! ```text
//! bytes ─► node table ─► matrix scan ─► [degree pass] ─► assemble ─► Decoded
//!          (profile)     (canonical      (quantized       (snapshot)
//!                         i>j order)      profile only)
//! ```
//!
//! Decoding is pure and synchronous: no I/O, no shared state, nothing to
//! cancel. Two decodes of different buffers may run concurrently.
//!
//! ## Failure model
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Node table shorter than `N × 16` | `Error::TruncatedNodeTable`, nothing returned |
//! | Matrix shorter than `N(N-1)/2` cells | `DecodeWarning::TruncatedMatrix`, partial links kept |
//! | Id is empty (rich: after trimming) | `DecodeWarning::MalformedIdentifier`, placeholder id |
//! | Id repeats | `DecodeWarning::DuplicateIdentifier`, suffixed id |
//! | Bytes after the last cell | `DecodeWarning::TrailingBytes` |
//! | Cell weight is NaN or infinite | `DecodeWarning::NonFiniteWeight`, cell skipped |
//! | Cell weight outside `[0, 1]` | `DecodeWarning::WeightOutOfRange`, weight clamped |

pub mod dequant;
pub mod profile;
pub mod matrix;
pub mod encode;
mod nodes;
mod degree;

pub use profile::{
    EncodingProfile, CellFormat, ThresholdRule, ELEMENT_ORDER, RICH_RECORD_STRIDE,
    DEFAULT_RICH_THRESHOLD, DEFAULT_QUANTIZED_THRESHOLD,
};
pub use matrix::{lower_triangle, cell_index, LowerTriangle};
pub use encode::{encode_rich, encode_quantized, RichNodeRecord, TriangularMatrix};
pub use degree::{BASE_VALUE, VALUE_PER_LINK, ISOLATED_VALUE};

use tracing::{debug, debug_span, info, warn};

use crate::config::DecodeConfig;
use crate::model::{GraphDataSet, NodeIndex};
use crate::{Error, Result};

// ============================================================================
// Diagnostics
// ============================================================================

/// A non-fatal condition met while decoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeWarning {
    #[error("matrix truncated: read {cells_read} of {expected_cells} cells")]
    TruncatedMatrix { expected_cells: usize, cells_read: usize },

    #[error("node {index}: identifier {raw:?} is empty, using {substitute:?}")]
    MalformedIdentifier { index: NodeIndex, raw: Vec<u8>, substitute: String },

    #[error("node {index}: identifier {id:?} already used by node {first}, using {substitute:?}")]
    DuplicateIdentifier { index: NodeIndex, id: String, first: NodeIndex, substitute: String },

    #[error("{count} bytes left after the last matrix cell")]
    TrailingBytes { count: usize },

    /// `cell` is the canonical offset of the pair.
    #[error("cell {cell}: weight {weight} is not finite, cell skipped")]
    NonFiniteWeight { cell: usize, weight: f64 },

    #[error("cell {cell}: weight {weight} outside [0, 1], clamped")]
    WeightOutOfRange { cell: usize, weight: f64 },
}

// ============================================================================
// Decoded
// ============================================================================

/// A successful (possibly partial) decode.
///
/// A truncated matrix still yields a usable graph; `warnings` says what was
/// lost.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub graph: GraphDataSet,
    pub warnings: Vec<DecodeWarning>,
    /// Threshold the links were filtered with.
    pub threshold: f64,
    pub cells_read: usize,
    pub expected_cells: usize,
}

impl Decoded {
    /// True when every matrix cell was present.
    pub fn is_complete(&self) -> bool {
        self.cells_read == self.expected_cells
    }

    /// `(cells_read, expected_cells)` if the matrix came up short.
    pub fn truncation(&self) -> Option<(usize, usize)> {
        (!self.is_complete()).then_some((self.cells_read, self.expected_cells))
    }

    pub fn into_graph(self) -> GraphDataSet {
        self.graph
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Decode `buf` under `profile`.
///
/// Node-table problems abort; matrix truncation degrades to a partial link
/// set reported through `Decoded::warnings`.
pub fn decode(buf: &[u8], profile: &EncodingProfile, config: &DecodeConfig) -> Result<Decoded> {
    config.validate()?;
    let threshold = config.threshold_for(profile);

    let span = debug_span!("decode", profile = profile.name(), bytes = buf.len());
    let _guard = span.enter();

    // Phase 1: node table
    let (mut nodes, mut warnings) = match profile {
        EncodingProfile::RichBinary { node_count } => nodes::decode_rich(buf, *node_count, config)?,
        EncodingProfile::QuantizedMatrix { identifiers } => nodes::instantiate_listed(identifiers),
    };
    debug!(nodes = nodes.len(), "node table decoded");

    // Phase 2: matrix, addressed positionally against the node sequence
    let region = buf.get(profile.node_table_len()..).unwrap_or_default();
    let mut scan = matrix::scan_matrix(
        region,
        &nodes,
        profile.cell_format(),
        profile.threshold_rule(),
        threshold,
    );
    warnings.append(&mut scan.warnings);
    if scan.is_truncated() {
        warnings.push(DecodeWarning::TruncatedMatrix {
            expected_cells: scan.expected_cells,
            cells_read: scan.cells_read,
        });
    }
    if scan.trailing_bytes > 0 {
        warnings.push(DecodeWarning::TrailingBytes { count: scan.trailing_bytes });
    }

    // Phase 3: needs every link, so strictly after the full scan
    if let EncodingProfile::QuantizedMatrix { .. } = profile {
        degree::apply_degree_sizing(&mut nodes, &scan.links);
    }

    // Phase 4: assemble
    let graph = GraphDataSet::assemble(nodes, scan.links);

    for w in &warnings {
        warn!(warning = %w, "decode degraded");
    }
    info!(
        nodes = graph.len(),
        links = graph.link_count(),
        threshold,
        "parsed {} links (threshold: {})",
        graph.link_count(),
        threshold
    );

    Ok(Decoded {
        graph,
        warnings,
        threshold,
        cells_read: scan.cells_read,
        expected_cells: scan.expected_cells,
    })
}

/// Decode a rich buffer whose node count is implied by its length.
pub fn decode_rich_inferred(buf: &[u8], config: &DecodeConfig) -> Result<Decoded> {
    let profile = EncodingProfile::rich_inferred(buf.len())
        .ok_or(Error::UnrecognizedLength { len: buf.len() })?;
    decode(buf, &profile, config)
}
