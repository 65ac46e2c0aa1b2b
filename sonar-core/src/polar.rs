//! Polar to display mapping
//!
//! Maps (angle, range) pairs onto a 2D display surface. The sensor sits at an
//! apex near the bottom centre of the surface and sweeps left-right in front
//! of it, so 0° points straight up and positive angles lean right.
//!
//! The mapper never clamps. Callers keep `range` within [0, max_range] or
//! accept a point outside the wedge.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Distance from the bottom edge of the surface to the apex
const APEX_INSET: f64 = 28.0;
/// Head-room kept above the outermost arc
const TOP_INSET: f64 = 80.0;
/// Fraction of the width the wedge radius may use
const WIDTH_FRACTION: f64 = 0.48;

/// Size of the display surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySurface {
    pub width: f64,
    pub height: f64,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        DisplaySurface {
            width: 960.0,
            height: 520.0,
        }
    }
}

/// Apex position and wedge radius, derived from a [`DisplaySurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    pub origin: Point2<f64>,
    pub radius: f64,
}

impl DisplayGeometry {
    pub fn from_surface(surface: &DisplaySurface) -> Self {
        let origin = Point2::new(surface.width / 2.0, surface.height - APEX_INSET);
        let radius = (surface.width * WIDTH_FRACTION)
            .min(surface.height - TOP_INSET)
            .max(0.0);
        DisplayGeometry { origin, radius }
    }
}

impl From<&DisplaySurface> for DisplayGeometry {
    fn from(surface: &DisplaySurface) -> Self {
        DisplayGeometry::from_surface(surface)
    }
}

/// A point in display space (pixels, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point2<f64>> for DisplayPoint {
    fn from(p: Point2<f64>) -> Self {
        DisplayPoint { x: p.x, y: p.y }
    }
}

/// Convert a sensor angle to the mathematical angle used on the display.
///
/// 0° maps to -90° (straight up, since display y grows downwards).
#[inline]
pub fn display_radians(angle_deg: f64) -> f64 {
    (angle_deg - 90.0).to_radians()
}

/// Project (angle, range) onto the display.
///
/// `radius = range / max_range * geometry.radius`.
pub fn project(angle_deg: f64, range: f64, max_range: f64, geometry: &DisplayGeometry) -> DisplayPoint {
    let r = range / max_range * geometry.radius;
    let a = display_radians(angle_deg);
    let p = geometry.origin + Vector2::new(a.cos(), a.sin()) * r;
    p.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> DisplayGeometry {
        DisplayGeometry::from_surface(&DisplaySurface::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_geometry() {
        let g = geometry();
        assert_eq!(g.origin, Point2::new(480.0, 492.0));
        // min(960 * 0.48, 520 - 80)
        assert!(close(g.radius, 440.0));
    }

    #[test]
    fn test_wide_surface_limited_by_height() {
        let g = DisplayGeometry::from_surface(&DisplaySurface {
            width: 400.0,
            height: 1000.0,
        });
        assert!(close(g.radius, 192.0));
    }

    #[test]
    fn test_zero_angle_points_up() {
        let g = geometry();
        let p = project(0.0, 800.0, 800.0, &g);
        assert!(close(p.x, 480.0));
        assert!(close(p.y, 492.0 - 440.0));
    }

    #[test]
    fn test_positive_angle_leans_right() {
        let g = geometry();
        let p = project(90.0, 400.0, 800.0, &g);
        assert!(close(p.x, 480.0 + 220.0));
        assert!(close(p.y, 492.0));

        let q = project(-30.0, 400.0, 800.0, &g);
        assert!(q.x < g.origin.x);
        assert!(q.y < g.origin.y);
    }

    #[test]
    fn test_range_scales_linearly() {
        let g = geometry();
        let half = project(20.0, 400.0, 800.0, &g);
        let full = project(20.0, 800.0, 800.0, &g);
        let dh = ((half.x - g.origin.x).powi(2) + (half.y - g.origin.y).powi(2)).sqrt();
        let df = ((full.x - g.origin.x).powi(2) + (full.y - g.origin.y).powi(2)).sqrt();
        assert!(close(df, 2.0 * dh));
        assert!(close(df, g.radius));
    }

    #[test]
    fn test_zero_range_is_origin() {
        let g = geometry();
        let p = project(45.0, 0.0, 800.0, &g);
        assert!(close(p.x, g.origin.x));
        assert!(close(p.y, g.origin.y));
    }

    #[test]
    fn test_no_clamping_beyond_max_range() {
        let g = geometry();
        let p = project(0.0, 1600.0, 800.0, &g);
        assert!(close(p.y, 492.0 - 880.0));
    }
}
