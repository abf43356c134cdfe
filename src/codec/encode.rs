//! Encoder: the write side of both profiles.
//!
//! Produces byte-exact buffers the decoder reads back. Quantization rounds to
//! nearest and saturates to the field's range, so every value inside the
//! representable range survives a round trip within `0.5 / scale`.

use serde::{Deserialize, Serialize};

use crate::config::DecodeConfig;
use crate::model::{Position, Rgb};
use crate::{Error, Result};
use super::matrix::{cell_index, lower_triangle};
use super::profile::{pair_count, RICH_RECORD_STRIDE};
use super::dequant::U8_SIMILARITY_SCALE;

// ============================================================================
// TriangularMatrix
// ============================================================================

/// Dense symmetric weight storage, one cell per unordered pair, kept in
/// canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangularMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl TriangularMatrix {
    /// All-zero matrix over `n` nodes.
    pub fn new(n: usize) -> Self {
        Self { n, cells: vec![0.0; pair_count(n)] }
    }

    /// Wrap cells already in canonical order.
    pub fn from_cells(n: usize, cells: Vec<f64>) -> Result<Self> {
        let expected = pair_count(n);
        if cells.len() != expected {
            return Err(Error::MatrixShape { node_count: n, expected, got: cells.len() });
        }
        Ok(Self { n, cells })
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Cells in canonical order.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Weight between `a` and `b` in either order. `None` on the diagonal
    /// or out of range.
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.offset(a, b).map(|k| self.cells[k])
    }

    pub fn get_mut(&mut self, a: usize, b: usize) -> Option<&mut f64> {
        let k = self.offset(a, b)?;
        self.cells.get_mut(k)
    }

    /// `(i, j, weight)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        lower_triangle(self.n).zip(&self.cells).map(|((i, j), &w)| (i, j, w))
    }

    fn offset(&self, a: usize, b: usize) -> Option<usize> {
        let (i, j) = if a > b { (a, b) } else { (b, a) };
        (i != j && i < self.n).then(|| cell_index(i, j))
    }
}

// ============================================================================
// Rich records
// ============================================================================

/// Physical-scale attributes of one rich-profile node, before quantization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichNodeRecord {
    /// At most two ASCII bytes.
    pub id: String,
    pub position: Position,
    pub radius: f64,
    pub color: Rgb,
    pub group: u8,
}

impl RichNodeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: Position::ORIGIN,
            radius: 0.0,
            color: Rgb::default(),
            group: 0,
        }
    }

    fn write(&self, out: &mut Vec<u8>, config: &DecodeConfig) -> Result<()> {
        let id = self.id.as_bytes();
        if !self.id.is_ascii() || id.len() > 2 {
            return Err(Error::UnencodableIdentifier(self.id.clone()));
        }
        let mut id_field = [0u8; 2];
        id_field[..id.len()].copy_from_slice(id);

        out.extend_from_slice(&id_field);
        for c in [self.position.x, self.position.y, self.position.z] {
            out.extend_from_slice(&quantize_coordinate(c, config.coord_scale).to_le_bytes());
        }
        out.extend_from_slice(&quantize_radius(self.radius, config.radius_scale).to_le_bytes());
        out.extend_from_slice(&[self.color.r, self.color.g, self.color.b, self.group, 0, 0]);
        Ok(())
    }
}

// ============================================================================
// Quantizers
// ============================================================================

pub fn quantize_coordinate(value: f64, scale: i32) -> i16 {
    (value * f64::from(scale)).round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

pub fn quantize_radius(value: f64, scale: u32) -> u16 {
    (value * f64::from(scale)).round().clamp(0.0, f64::from(u16::MAX)) as u16
}

pub fn quantize_similarity(weight: f64) -> u8 {
    (weight * U8_SIMILARITY_SCALE).round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Buffers
// ============================================================================

/// Node table followed by f32 cells.
pub fn encode_rich(
    nodes: &[RichNodeRecord],
    matrix: &TriangularMatrix,
    config: &DecodeConfig,
) -> Result<Vec<u8>> {
    config.validate()?;
    if matrix.node_count() != nodes.len() {
        return Err(Error::MatrixShape {
            node_count: nodes.len(),
            expected: pair_count(nodes.len()),
            got: matrix.cells().len(),
        });
    }

    let mut out = Vec::with_capacity(nodes.len() * RICH_RECORD_STRIDE + matrix.cells().len() * 4);
    for node in nodes {
        node.write(&mut out, config)?;
    }
    for &w in matrix.cells() {
        out.extend_from_slice(&(w as f32).to_le_bytes());
    }
    Ok(out)
}

/// u8 cells only; node ids travel out of band.
pub fn encode_quantized(matrix: &TriangularMatrix) -> Vec<u8> {
    matrix.cells().iter().map(|&w| quantize_similarity(w)).collect()
}
