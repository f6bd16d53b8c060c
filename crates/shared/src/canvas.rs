//! Radar canvas coordinate system.
//!
//! Smokes are stored in percentage space (two floats in [0, 100]). The viewer
//! works in a square virtual canvas of side `IMAGE_SIZE` whose vertical axis
//! grows upward from the bottom-left corner. Canvas points are `(u, v)`: `u`
//! is the vertical component and comes from the percentage Y, `v` is the
//! horizontal component and comes from the percentage X. Canvas values are
//! never stored; they are recomputed from percentages on every render.

use crate::models::PercentPoint;

/// Side of the virtual canvas, in canvas units.
pub const IMAGE_SIZE: f64 = 1024.0;

pub const PERCENT_MAX: f64 = 100.0;

// Keeps values that sit a rounding error below a .xx5 boundary on the same
// side as the exact value.
const ROUND_NUDGE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub u: f64,
    pub v: f64,
}

/// Corners of the image overlay in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub south_west: CanvasPoint,
    pub north_east: CanvasPoint,
}

impl CanvasBounds {
    pub fn square(size: f64) -> Self {
        CanvasBounds {
            south_west: CanvasPoint { u: 0.0, v: 0.0 },
            north_east: CanvasPoint { u: size, v: size },
        }
    }

    pub fn center(&self) -> CanvasPoint {
        CanvasPoint {
            u: (self.south_west.u + self.north_east.u) / 2.0,
            v: (self.south_west.v + self.north_east.v) / 2.0,
        }
    }

    pub fn contains(&self, p: CanvasPoint) -> bool {
        p.u >= self.south_west.u
            && p.u <= self.north_east.u
            && p.v >= self.south_west.v
            && p.v <= self.north_east.v
    }
}

/// Round to two decimals, the precision of the wire format.
pub fn round2(value: f64) -> f64 {
    if value >= 0.0 {
        (value * 100.0 + ROUND_NUDGE).round() / 100.0
    } else {
        (value * 100.0 - ROUND_NUDGE).round() / 100.0
    }
}

/// Clamp into `[0, 100]` and round to two decimals. NaN collapses to 0.
pub fn normalize_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    round2(value.clamp(0.0, PERCENT_MAX))
}

/// Percentage space to canvas space for a canvas of side `size`.
pub fn to_canvas_sized(x_percent: f64, y_percent: f64, size: f64) -> CanvasPoint {
    CanvasPoint {
        u: y_percent * size / PERCENT_MAX,
        v: x_percent * size / PERCENT_MAX,
    }
}

/// Canvas space back to percentage space, clamped and rounded.
pub fn to_percent_sized(u: f64, v: f64, size: f64) -> PercentPoint {
    PercentPoint {
        x: normalize_percent(v * PERCENT_MAX / size),
        y: normalize_percent(u * PERCENT_MAX / size),
    }
}

pub fn to_canvas(x_percent: f64, y_percent: f64) -> CanvasPoint {
    to_canvas_sized(x_percent, y_percent, IMAGE_SIZE)
}

pub fn to_percent(u: f64, v: f64) -> PercentPoint {
    to_percent_sized(u, v, IMAGE_SIZE)
}

pub fn point_to_canvas(p: PercentPoint) -> CanvasPoint {
    to_canvas(p.x, p.y)
}

pub fn image_bounds() -> CanvasBounds {
    CanvasBounds::square(IMAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_canvas_swaps_axes() {
        let p = to_canvas(25.0, 50.0);
        assert_eq!(p.u, 512.0);
        assert_eq!(p.v, 256.0);
    }

    #[test]
    fn test_to_percent_pick_scenario() {
        let p = to_percent(512.0, 256.0);
        assert_eq!(p.x, 25.0);
        assert_eq!(p.y, 50.0);
    }

    #[test]
    fn test_corners() {
        let origin = to_canvas(0.0, 0.0);
        assert_eq!(origin, CanvasPoint { u: 0.0, v: 0.0 });
        let far = to_canvas(100.0, 100.0);
        assert_eq!(far, CanvasPoint { u: IMAGE_SIZE, v: IMAGE_SIZE });
    }

    #[test]
    fn test_roundtrip_matches_rounded_input() {
        // Sweep includes values that land exactly on a .xx5 boundary.
        let mut x = 0.0;
        while x <= 100.0 {
            let y = 100.0 - x;
            let c = to_canvas(x, y);
            let p = to_percent(c.u, c.v);
            assert_eq!(p.x, round2(x), "x = {x}");
            assert_eq!(p.y, round2(y), "y = {y}");
            x += 0.0125;
        }
    }

    #[test]
    fn test_roundtrip_idempotent_on_rounded_values() {
        for n in 0..=10_000 {
            let value = n as f64 / 100.0;
            let c = to_canvas(value, value);
            let p = to_percent(c.u, c.v);
            assert_eq!(p.x, value);
            assert_eq!(p.y, value);
        }
    }

    #[test]
    fn test_out_of_range_canvas_clamps() {
        let cases = [
            (-10.0, -10.0),
            (2048.0, 512.0),
            (512.0, -0.5),
            (1e9, -1e9),
            (f64::INFINITY, f64::NEG_INFINITY),
        ];
        for (u, v) in cases {
            let p = to_percent(u, v);
            assert!((0.0..=100.0).contains(&p.x), "x out of range for ({u}, {v})");
            assert!((0.0..=100.0).contains(&p.y), "y out of range for ({u}, {v})");
        }
        assert_eq!(to_percent(-10.0, 2000.0), PercentPoint { x: 100.0, y: 0.0 });
    }

    #[test]
    fn test_nan_canvas_input_is_zero() {
        let p = to_percent(f64::NAN, 512.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.x, 50.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(33.333333), 33.33);
    }

    #[test]
    fn test_bounds_center_and_contains() {
        let b = image_bounds();
        assert_eq!(b.center(), CanvasPoint { u: 512.0, v: 512.0 });
        assert!(b.contains(CanvasPoint { u: 0.0, v: 1024.0 }));
        assert!(!b.contains(CanvasPoint { u: -1.0, v: 10.0 }));
    }
}
