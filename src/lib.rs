//! # simnet-codec: Binary Similarity-Graph Codec
//!
//! Decodes the compact binary format a weighted similarity network (e.g. an
//! element-similarity graph) is shipped in, and hands the renderer one
//! immutable `GraphDataSet` per buffer.
//!
//! ## Design Principles
//!
//! 1. **Positional addressing**: matrix cells refer to nodes by their index
//!    in the decoded sequence, never by id. The sequence is never reordered.
//! 2. **Profiles, not flags**: each `EncodingProfile` owns its node-table
//!    layout, cell width and threshold operator; the enumeration is shared.
//! 3. **Degrade, don't fail**: a short matrix returns the links it has plus a
//!    `DecodeWarning`; only a short node table is fatal.
//! 4. **Snapshots**: a decode builds a new `GraphDataSet`; nothing is patched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simnet_codec::{decode, DecodeConfig, EncodingProfile};
//!
//! # fn example(bytes: &[u8]) -> simnet_codec::Result<()> {
//! let decoded = decode(bytes, &EncodingProfile::elements(), &DecodeConfig::default())?;
//! if let Some((read, expected)) = decoded.truncation() {
//!     eprintln!("matrix cut short: {read}/{expected} cells");
//! }
//! for link in decoded.graph.links() {
//!     println!("{} - {} ({:.2})", link.source, link.target, link.weight);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Profiles
//!
//! | Profile | Node table | Cell | Keep |
//! |---------|------------|------|------|
//! | `RichBinary` | 16-byte records | f32 LE | `w > t` (t = 0.0) |
//! | `QuantizedMatrix` | agreed id list | u8 / 255 | `w >= t` (t = 0.82) |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod codec;
pub mod config;
pub mod store;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{GraphDataSet, GraphLink, GraphNode, NodeIndex, Position, Rgb};

// ============================================================================
// Re-exports: Codec
// ============================================================================

pub use codec::{
    decode, decode_rich_inferred, Decoded, DecodeWarning, EncodingProfile, ThresholdRule,
    CellFormat, ELEMENT_ORDER,
};
pub use config::DecodeConfig;
pub use store::GraphStore;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node table truncated: {node_count} nodes need {needed} bytes, buffer has {available}")]
    TruncatedNodeTable { node_count: usize, needed: usize, available: usize },

    #[error("buffer length {len} does not match any rich-profile node count")]
    UnrecognizedLength { len: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("matrix shape mismatch: {node_count} nodes need {expected} cells, got {got}")]
    MatrixShape { node_count: usize, expected: usize, got: usize },

    #[error("identifier {0:?} does not fit a 2-byte ASCII field")]
    UnencodableIdentifier(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
