//! Encoding profiles: node-table layout plus matrix-cell format.
//!
//! ```text
//! RichBinary       [ N × 16-byte node records ][ N(N-1)/2 × f32 LE cells ]   keep w >  t
//! QuantizedMatrix  [ N(N-1)/2 × u8 cells ]  ids from an agreed list          keep w >= t
//! ```

use super::dequant;

/// Byte stride of one rich-profile node record.
pub const RICH_RECORD_STRIDE: usize = 16;

/// Default inclusion threshold of the rich profile (keep every positive weight).
pub const DEFAULT_RICH_THRESHOLD: f64 = 0.0;

/// Default inclusion threshold of the quantized profile.
pub const DEFAULT_QUANTIZED_THRESHOLD: f64 = 0.82;

/// Ordering of the 118 element symbols the quantized matrix files are
/// written against. Position in this list is the node's positional index.
pub const ELEMENT_ORDER: [&str; 118] = [
    "Ne", "Ar", "Kr", "Rn", "Xe", "C", "He", "H", "N", "O",
    "F", "Cl", "Br", "I", "Se", "Te", "P", "S", "At", "Po",
    "As", "Sb", "Bi", "Mo", "W", "Re", "Tc", "Nb", "Ta", "Ti",
    "Hf", "Zr", "Pd", "Rh", "Ru", "Pt", "Ir", "Os", "K", "Li",
    "Na", "Sr", "Ba", "Ra", "Fr", "Cs", "Rb", "Co", "Cr", "V",
    "Mn", "Fe", "Ni", "In", "Ca", "Cd", "Mg", "Zn", "Sc", "Al",
    "Ga", "Be", "B", "Ge", "Si", "Ag", "Cu", "Au", "Pb", "Sn",
    "Hg", "Tl", "Mc", "Nh", "Ts", "Lv", "Og", "Cn", "Fl", "Hs",
    "Mt", "Ds", "Rg", "Sg", "Db", "Bh", "Rf", "Yb", "Y", "Tb",
    "Tm", "Dy", "Er", "Ho", "Nd", "Pr", "Pm", "Ce", "La", "Gd",
    "Eu", "Sm", "Lr", "Lu", "No", "Fm", "Md", "Es", "Am", "Cm",
    "Bk", "Cf", "Ac", "Pa", "Th", "U", "Np", "Pu",
];

// ============================================================================
// Threshold rule
// ============================================================================

/// How a cell's weight is compared against the inclusion threshold.
///
/// The two profiles disagree on the boundary; both are kept as observed so
/// boundary-exact weights land on the same side they always have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRule {
    /// `weight > threshold`
    Exclusive,
    /// `weight >= threshold`
    Inclusive,
}

impl ThresholdRule {
    #[inline]
    pub fn admits(self, weight: f64, threshold: f64) -> bool {
        match self {
            ThresholdRule::Exclusive => weight > threshold,
            ThresholdRule::Inclusive => weight >= threshold,
        }
    }
}

// ============================================================================
// Cell format
// ============================================================================

/// Width and value decode of one adjacency-matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// 4-byte little-endian IEEE float, identity decode.
    F32Le,
    /// 1-byte unsigned integer, `raw / 255`.
    U8,
}

impl CellFormat {
    pub const fn width(self) -> usize {
        match self {
            CellFormat::F32Le => 4,
            CellFormat::U8 => 1,
        }
    }

    /// Decode one cell. `cell` must be exactly `width()` bytes.
    #[inline]
    pub fn decode(self, cell: &[u8]) -> f64 {
        match self {
            CellFormat::F32Le => {
                dequant::similarity_f32(f32::from_le_bytes([cell[0], cell[1], cell[2], cell[3]]))
            }
            CellFormat::U8 => dequant::similarity_u8(cell[0]),
        }
    }
}

// ============================================================================
// EncodingProfile
// ============================================================================

/// A complete, self-consistent choice of node-table layout and matrix-cell
/// format. The assembler downstream does not care which one produced a graph.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingProfile {
    /// 16-byte node records (id, xyz, radius, rgb, group) followed by f32 cells.
    RichBinary { node_count: usize },
    /// No node table; node ids come from an externally agreed ordered list.
    QuantizedMatrix { identifiers: Vec<String> },
}

impl EncodingProfile {
    pub fn rich(node_count: usize) -> Self {
        EncodingProfile::RichBinary { node_count }
    }

    pub fn quantized(identifiers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        EncodingProfile::QuantizedMatrix {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Quantized profile over the built-in element ordering.
    pub fn elements() -> Self {
        Self::quantized(ELEMENT_ORDER)
    }

    /// Rich profile whose node count is recovered from the buffer length.
    ///
    /// A rich buffer of `N` nodes is exactly `16N + 4·N(N-1)/2 = 2N² + 14N`
    /// bytes. Returns `None` if `len` is not of that form.
    pub fn rich_inferred(len: usize) -> Option<Self> {
        let disc = len.checked_mul(8)?.checked_add(196)?;
        let root = disc.isqrt();
        if root * root != disc || (root - 14) % 4 != 0 {
            return None;
        }
        Some(Self::rich((root - 14) / 4))
    }

    pub fn name(&self) -> &'static str {
        match self {
            EncodingProfile::RichBinary { .. } => "rich",
            EncodingProfile::QuantizedMatrix { .. } => "quantized",
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            EncodingProfile::RichBinary { node_count } => *node_count,
            EncodingProfile::QuantizedMatrix { identifiers } => identifiers.len(),
        }
    }

    pub fn cell_format(&self) -> CellFormat {
        match self {
            EncodingProfile::RichBinary { .. } => CellFormat::F32Le,
            EncodingProfile::QuantizedMatrix { .. } => CellFormat::U8,
        }
    }

    pub fn threshold_rule(&self) -> ThresholdRule {
        match self {
            EncodingProfile::RichBinary { .. } => ThresholdRule::Exclusive,
            EncodingProfile::QuantizedMatrix { .. } => ThresholdRule::Inclusive,
        }
    }

    pub fn default_threshold(&self) -> f64 {
        match self {
            EncodingProfile::RichBinary { .. } => DEFAULT_RICH_THRESHOLD,
            EncodingProfile::QuantizedMatrix { .. } => DEFAULT_QUANTIZED_THRESHOLD,
        }
    }

    /// Bytes occupied by the node table at the head of the buffer.
    pub fn node_table_len(&self) -> usize {
        match self {
            EncodingProfile::RichBinary { node_count } => node_count.saturating_mul(RICH_RECORD_STRIDE),
            EncodingProfile::QuantizedMatrix { .. } => 0,
        }
    }

    /// Number of matrix cells a complete buffer carries: `N(N-1)/2`.
    pub fn expected_cells(&self) -> usize {
        pair_count(self.node_count())
    }

    /// Length in bytes of a complete buffer for this profile.
    pub fn expected_len(&self) -> usize {
        self.node_table_len() + self.expected_cells() * self.cell_format().width()
    }
}

/// Unordered pairs among `n` nodes.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
