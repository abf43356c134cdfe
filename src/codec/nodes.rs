//! Node-table decoding.
//!
//! Rich profile record layout (16 bytes, multi-byte fields little-endian):
//!
//! ```text
//! offset  0  1 | 2  3 | 4  5 | 6  7 | 8  9   | 10 | 11 | 12 | 13    | 14 15
//!         id   |  x   |  y   |  z   | radius | r  | g  | b  | group | pad
//!         ascii| i16  | i16  | i16  | u16    | u8 | u8 | u8 | u8    |
//! ```
//!
//! The quantized profile has no table in the buffer; its nodes are
//! instantiated straight from the agreed identifier list.

use hashbrown::HashMap;

use crate::config::DecodeConfig;
use crate::model::{GraphNode, NodeIndex, Position, Rgb};
use crate::{Error, Result};
use super::dequant;
use super::profile::RICH_RECORD_STRIDE;
use super::DecodeWarning;

/// Decode `node_count` rich records from the head of `buf`.
///
/// The length check happens before any record is read, so a short buffer
/// never yields a partial node table.
pub(crate) fn decode_rich(
    buf: &[u8],
    node_count: usize,
    config: &DecodeConfig,
) -> Result<(Vec<GraphNode>, Vec<DecodeWarning>)> {
    let needed = node_count.saturating_mul(RICH_RECORD_STRIDE);
    if buf.len() < needed {
        return Err(Error::TruncatedNodeTable {
            node_count,
            needed,
            available: buf.len(),
        });
    }

    let mut ids = IdentifierLedger::with_capacity(node_count);
    let nodes: Vec<GraphNode> = buf[..needed]
        .chunks_exact(RICH_RECORD_STRIDE)
        .enumerate()
        .map(|(i, record)| decode_record(NodeIndex(i), record, config, &mut ids))
        .collect();

    Ok((nodes, ids.into_warnings()))
}

fn decode_record(
    index: NodeIndex,
    record: &[u8],
    config: &DecodeConfig,
    ids: &mut IdentifierLedger,
) -> GraphNode {
    let i16_at = |at: usize| i16::from_le_bytes([record[at], record[at + 1]]);
    let radius_raw = u16::from_le_bytes([record[8], record[9]]);

    let raw = &record[0..2];
    let id = ids.admit(index, raw, String::from_utf8_lossy(trim_identifier(raw)).into_owned());
    let position = Position::new(
        dequant::coordinate(i16_at(2), config.coord_scale),
        dequant::coordinate(i16_at(4), config.coord_scale),
        dequant::coordinate(i16_at(6), config.coord_scale),
    );

    GraphNode::new(id)
        .with_group(record[13].to_string())
        .with_value(dequant::radius(radius_raw, config.radius_scale))
        .with_position(position)
        .with_color(Rgb::new(record[10], record[11], record[12]))
}

/// Instantiate one node per listed identifier, in list order.
///
/// Listed ids are used exactly as given, without trimming. Every node starts at size 1 with the default color; the degree pass
/// overwrites both once the links are known.
pub(crate) fn instantiate_listed(identifiers: &[String]) -> (Vec<GraphNode>, Vec<DecodeWarning>) {
    let mut ids = IdentifierLedger::with_capacity(identifiers.len());
    let nodes: Vec<GraphNode> = identifiers
        .iter()
        .enumerate()
        .map(|(i, raw)| GraphNode::new(ids.admit(NodeIndex(i), raw.as_bytes(), raw.clone())))
        .collect();
    (nodes, ids.into_warnings())
}

/// Strip trailing NUL padding and ASCII whitespace.
pub(crate) fn trim_identifier(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|&b| b != 0 && !b.is_ascii_whitespace())
        .map_or(0, |p| p + 1);
    &raw[..end]
}

// ============================================================================
// Identifier ledger
// ============================================================================

/// Keeps ids non-empty and unique while a node table is built.
///
/// An empty id becomes `#<index>`; a repeated id becomes `<id>#<index>`.
/// Both cases are reported, neither aborts the decode. Substitutes skip any
/// id already issued, so a literal `#0` can't collide with a placeholder.
struct IdentifierLedger {
    seen: HashMap<String, NodeIndex>,
    warnings: Vec<DecodeWarning>,
}

impl IdentifierLedger {
    fn with_capacity(n: usize) -> Self {
        Self { seen: HashMap::with_capacity(n), warnings: Vec::new() }
    }

    fn admit(&mut self, index: NodeIndex, raw: &[u8], candidate: String) -> String {
        let id = if candidate.is_empty() {
            let substitute = self.unclaimed(format!("#{index}"));
            self.warnings.push(DecodeWarning::MalformedIdentifier {
                index,
                raw: raw.to_vec(),
                substitute: substitute.clone(),
            });
            substitute
        } else if let Some(&first) = self.seen.get(&candidate) {
            let substitute = self.unclaimed(format!("{candidate}#{index}"));
            self.warnings.push(DecodeWarning::DuplicateIdentifier {
                index,
                id: candidate,
                first,
                substitute: substitute.clone(),
            });
            substitute
        } else {
            candidate
        };

        self.seen.insert(id.clone(), index);
        id
    }

    fn unclaimed(&self, mut candidate: String) -> String {
        while self.seen.contains_key(&candidate) {
            candidate.push('#');
        }
        candidate
    }

    fn into_warnings(self) -> Vec<DecodeWarning> {
        self.warnings
    }
}
