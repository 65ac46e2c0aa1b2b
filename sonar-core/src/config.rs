//! Sensor configuration
//!
//! [`SensorConfig`] is immutable during a run. It only changes through the
//! validated reconfiguration entry points on
//! [`Simulation`](crate::simulation::Simulation), which build a candidate
//! copy, call [`SensorConfig::validate`] and swap it in only on success.
//!
//! The serialized form is exactly the importable/exportable surface:
//!
//! ```json
//! {
//!   "range":   { "min": 200, "max": 800 },
//!   "scan":    { "fov": 120, "beamSpeed": 0.35, "beamWidth": 8 },
//!   "targets": { "count": 6, "driftSpeed": 0.5, "trailCapacity": 20, "edgeMargin": 5 },
//!   "scoring": { "baseClose": 90, "baseFar": 45, "noise": 6 },
//!   "display": { "width": 960, "height": 520 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SonarError};
use crate::polar::{DisplayGeometry, DisplaySurface};

/// Detection range window in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig {
            min: 200.0,
            max: 800.0,
        }
    }
}

/// Sweep parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Total angular width swept, centred on 0°
    pub fov: f64,
    /// Degrees advanced per tick, 0 freezes the beam
    pub beam_speed: f64,
    /// Angular tolerance window for detection
    pub beam_width: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            fov: 120.0,
            beam_speed: 0.35,
            beam_width: 8.0,
        }
    }
}

/// Procedural target generation and trail settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetConfig {
    /// Number of procedural targets
    pub count: usize,
    /// Scale factor applied to sampled drift velocities
    pub drift_speed: f64,
    /// Maximum number of samples kept per trail
    pub trail_capacity: usize,
    /// Degrees kept clear of each sweep boundary when spawning and clamping
    pub edge_margin: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig {
            count: 6,
            drift_speed: 0.5,
            trail_capacity: 20,
            edge_margin: 5.0,
        }
    }
}

/// Confidence scoring model.
///
/// Linear interpolation from `base_close` at min range to `base_far` at max
/// range, plus symmetric noise of total width `noise`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    pub base_close: f64,
    pub base_far: f64,
    pub noise: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            base_close: 90.0,
            base_far: 45.0,
            noise: 6.0,
        }
    }
}

/// Complete sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorConfig {
    pub range: RangeConfig,
    pub scan: ScanConfig,
    pub targets: TargetConfig,
    pub scoring: ScoringConfig,
    pub display: DisplaySurface,
}

fn check(name: &'static str, value: f64, ok: bool) -> Result<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(SonarError::InvalidParameter { name, value })
    }
}

impl SensorConfig {
    /// Half of the field of view, the sweep boundary
    #[inline]
    pub fn half_fov(&self) -> f64 {
        self.scan.fov / 2.0
    }

    /// Angle bounds for moving targets: the field of view minus the edge margin
    pub fn target_angle_bounds(&self) -> (f64, f64) {
        let limit = self.half_fov() - self.targets.edge_margin;
        (-limit, limit)
    }

    /// Display apex and radius derived from the display surface
    pub fn geometry(&self) -> DisplayGeometry {
        DisplayGeometry::from_surface(&self.display)
    }

    /// Reject any configuration the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let range = &self.range;
        if !range.min.is_finite() || !range.max.is_finite() || range.min < 0.0 || range.min >= range.max {
            return Err(SonarError::InvalidRangeWindow {
                min: range.min,
                max: range.max,
            });
        }

        let fov = self.scan.fov;
        if !fov.is_finite() || fov <= 0.0 || fov > 360.0 {
            return Err(SonarError::InvalidFieldOfView(fov));
        }

        let width = self.scan.beam_width;
        if !width.is_finite() || width <= 0.0 || width > 360.0 {
            return Err(SonarError::InvalidBeamWidth(width));
        }

        check("beam speed", self.scan.beam_speed, self.scan.beam_speed >= 0.0)?;
        check("drift speed", self.targets.drift_speed, self.targets.drift_speed >= 0.0)?;

        let margin = self.targets.edge_margin;
        check("edge margin", margin, margin >= 0.0 && 2.0 * margin < fov)?;

        check("close score", self.scoring.base_close, true)?;
        check("far score", self.scoring.base_far, true)?;
        check("score noise", self.scoring.noise, self.scoring.noise >= 0.0)?;

        check("display width", self.display.width, self.display.width > 0.0)?;
        check("display height", self.display.height, self.display.height > 0.0)?;

        Ok(())
    }

    /// Import a configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SensorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SensorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.half_fov(), 60.0);
        assert_eq!(config.target_angle_bounds(), (-55.0, 55.0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = SensorConfig::default();
        config.range.min = 800.0;
        config.range.max = 800.0;
        assert!(matches!(
            config.validate(),
            Err(SonarError::InvalidRangeWindow { .. })
        ));

        config.range.min = 900.0;
        assert!(config.validate().is_err());

        config.range.min = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fov_bounds() {
        let mut config = SensorConfig::default();
        config.scan.fov = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SonarError::InvalidFieldOfView(_))
        ));
        config.scan.fov = 361.0;
        assert!(config.validate().is_err());
        config.scan.fov = 360.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_margin_must_leave_room() {
        let mut config = SensorConfig::default();
        config.scan.fov = 10.0;
        assert!(matches!(
            config.validate(),
            Err(SonarError::InvalidParameter {
                name: "edge margin",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_speed_rejected() {
        let mut config = SensorConfig::default();
        config.scan.beam_speed = -0.1;
        assert!(config.validate().is_err());
        config.scan.beam_speed = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let config = SensorConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"beamWidth\""));
        assert!(json.contains("\"trailCapacity\""));
        assert_eq!(SensorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = SensorConfig::from_json(r#"{ "scan": { "fov": 100 } }"#).unwrap();
        assert_eq!(config.scan.fov, 100.0);
        assert_eq!(config.scan.beam_width, 8.0);
        assert_eq!(config.range, RangeConfig::default());
    }

    #[test]
    fn test_partial_display_takes_defaults() {
        let config = SensorConfig::from_json(r#"{ "display": { "width": 800 } }"#).unwrap();
        assert_eq!(config.display.width, 800.0);
        assert_eq!(config.display.height, 520.0);
        assert_eq!(config.scan, ScanConfig::default());
    }

    #[test]
    fn test_invalid_json_import_rejected() {
        assert!(matches!(
            SensorConfig::from_json(r#"{ "range": { "min": 900, "max": 100 } }"#),
            Err(SonarError::InvalidRangeWindow { .. })
        ));
        assert!(matches!(
            SensorConfig::from_json("not json"),
            Err(SonarError::Json(_))
        ));
    }
}
