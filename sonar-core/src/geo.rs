//! Geographic projection
//!
//! Converts a pair of (latitude, longitude) points into a bearing and a
//! great-circle distance on a spherical Earth. No ellipsoid correction.
//!
//! # Example
//!
//! ```rust
//! use sonar_core::geo::{bearing, distance, signed_bearing, GeoPoint};
//!
//! let reference = GeoPoint::new(19.987, 109.000).unwrap();
//! let contact = GeoPoint::new(20.000, 109.010).unwrap();
//!
//! let angle = signed_bearing(bearing(&reference, &contact));
//! let range = distance(&reference, &contact);
//! assert!(angle > -180.0 && angle <= 180.0);
//! assert!(range > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SonarError};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A validated (latitude, longitude) pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting NaN/infinite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(SonarError::NonFiniteCoordinate { lat, lon });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(SonarError::CoordinateOutOfRange { lat, lon });
        }
        Ok(GeoPoint { lat, lon })
    }

    /// Build a point from a `[lat, lon]` slice. Any other arity is rejected.
    pub fn from_slice(pair: &[f64]) -> Option<Self> {
        match pair {
            [lat, lon] => GeoPoint::new(*lat, *lon).ok(),
            _ => None,
        }
    }

    /// Build a point from a JSON `[lat, lon]` array.
    ///
    /// Returns `None` for anything that is not a two element numeric array,
    /// so callers can skip malformed entries in a coordinate list.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let pair = value.as_array()?;
        if pair.len() != 2 {
            return None;
        }
        let lat = pair[0].as_f64()?;
        let lon = pair[1].as_f64()?;
        GeoPoint::new(lat, lon).ok()
    }
}

/// Default reference position for geo-sourced targets
impl Default for GeoPoint {
    fn default() -> Self {
        GeoPoint {
            lat: 19.987,
            lon: 109.000,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Initial bearing (forward azimuth) from `from` to `to`, degrees in [0, 360).
///
/// Coincident points yield 0.
pub fn bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

/// Haversine great-circle distance in meters.
pub fn distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Re-express a [0, 360) compass bearing in the signed (-180, 180] convention.
#[inline]
pub fn signed_bearing(bearing: f64) -> f64 {
    if bearing > 180.0 {
        bearing - 360.0
    } else {
        bearing
    }
}

/// Fold any angle in degrees into (-180, 180].
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let reference = pt(19.987, 109.000);
        let contact = pt(20.000, 109.010);

        let b = bearing(&reference, &contact);
        let d = distance(&reference, &contact);

        assert!(b.is_finite());
        assert!(d.is_finite());
        assert!(d > 0.0);
        // Roughly 1.4 km north, 1.0 km east
        assert!((b - 35.9).abs() < 1.0, "bearing {}", b);
        assert!((d - 1780.0).abs() < 30.0, "distance {}", d);

        let angle = signed_bearing(b);
        assert!(angle > -180.0 && angle <= 180.0);
    }

    #[test]
    fn test_cardinal_bearings() {
        let origin = pt(0.0, 0.0);
        assert!((bearing(&origin, &pt(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((bearing(&origin, &pt(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(&origin, &pt(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((bearing(&origin, &pt(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance(&pt(0.0, 0.0), &pt(1.0, 0.0));
        // 6371 km * pi / 180
        assert!((d - 111_194.9).abs() < 1.0, "distance {}", d);
    }

    #[test]
    fn test_coincident_points() {
        let p = pt(51.5, -0.1);
        assert_eq!(distance(&p, &p), 0.0);
        let b = bearing(&p, &p);
        assert!((0.0..360.0).contains(&b));
    }

    #[test]
    fn test_distance_symmetric() {
        let a = pt(10.0, 20.0);
        let b = pt(-5.0, 33.0);
        assert!((distance(&a, &b) - distance(&b, &a)).abs() < 1e-6);
    }

    #[test]
    fn test_signed_bearing() {
        assert_eq!(signed_bearing(0.0), 0.0);
        assert_eq!(signed_bearing(180.0), 180.0);
        assert_eq!(signed_bearing(270.0), -90.0);
        assert_eq!(signed_bearing(359.0), -1.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(180.0), 180.0);
        assert_eq!(normalize_angle(-180.0), 180.0);
        assert_eq!(normalize_angle(190.0), -170.0);
        assert_eq!(normalize_angle(-190.0), 170.0);
        assert_eq!(normalize_angle(725.0), 5.0);
    }

    #[test]
    fn test_invalid_points() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(SonarError::NonFiniteCoordinate { .. })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(SonarError::NonFiniteCoordinate { .. })
        ));
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(SonarError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_slice_arity() {
        assert!(GeoPoint::from_slice(&[20.0, 109.0]).is_some());
        assert!(GeoPoint::from_slice(&[20.0]).is_none());
        assert!(GeoPoint::from_slice(&[20.0, 109.0, 5.0]).is_none());
        assert!(GeoPoint::from_slice(&[f64::NAN, 109.0]).is_none());
    }

    #[test]
    fn test_from_json() {
        let ok = serde_json::json!([20.0, 109.01]);
        assert_eq!(GeoPoint::from_json(&ok), Some(pt(20.0, 109.01)));

        for bad in [
            serde_json::json!([20.0]),
            serde_json::json!(["20.0", 109.0]),
            serde_json::json!({"lat": 20.0, "lon": 109.0}),
            serde_json::json!(null),
            serde_json::json!([1.0, 2.0, 3.0]),
        ] {
            assert!(GeoPoint::from_json(&bad).is_none(), "{}", bad);
        }
    }
}
