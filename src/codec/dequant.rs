//! Dequantization: fixed-divisor reconstruction of physical values.
//!
//! Every function is total over the raw field's width, so none of them can
//! fail. Scales come from `DecodeConfig` and are validated there (> 0).

/// Default divisor for signed 16-bit coordinates (±1.09 physical units).
pub const DEFAULT_COORD_SCALE: i32 = 30_000;

/// Default divisor for unsigned 16-bit radii (0..1.31 physical units).
pub const DEFAULT_RADIUS_SCALE: u32 = 50_000;

/// Divisor for 8-bit similarity cells.
pub const U8_SIMILARITY_SCALE: f64 = 255.0;

/// Signed int16 coordinate → physical coordinate.
#[inline]
pub fn coordinate(raw: i16, scale: i32) -> f64 {
    f64::from(raw) / f64::from(scale)
}

/// Unsigned int16 radius → physical radius.
#[inline]
pub fn radius(raw: u16, scale: u32) -> f64 {
    f64::from(raw) / f64::from(scale)
}

/// IEEE float32 similarity, passed through unscaled.
#[inline]
pub fn similarity_f32(raw: f32) -> f64 {
    f64::from(raw)
}

/// Unsigned 8-bit similarity → `[0.0, 1.0]`.
#[inline]
pub fn similarity_u8(raw: u8) -> f64 {
    f64::from(raw) / U8_SIMILARITY_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate() {
        assert_eq!(coordinate(0, DEFAULT_COORD_SCALE), 0.0);
        assert_eq!(coordinate(30_000, DEFAULT_COORD_SCALE), 1.0);
        assert_eq!(coordinate(-15_000, DEFAULT_COORD_SCALE), -0.5);
        assert!((coordinate(i16::MIN, DEFAULT_COORD_SCALE) + 1.092_266).abs() < 1e-6);
    }

    #[test]
    fn test_radius() {
        assert_eq!(radius(0, DEFAULT_RADIUS_SCALE), 0.0);
        assert_eq!(radius(25_000, DEFAULT_RADIUS_SCALE), 0.5);
        assert_eq!(radius(u16::MAX, 65_535), 1.0);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity_f32(0.5), 0.5);
        assert_eq!(similarity_u8(0), 0.0);
        assert_eq!(similarity_u8(255), 1.0);
        assert!((similarity_u8(209) - 0.819_607).abs() < 1e-6);
    }
}
