//! Detection Engine
//!
//! Decides whether a target is illuminated by the beam, and derives a
//! confidence score and tier from the target's range.
//!
//! # Illumination
//!
//! A target is detected when the shortest angular distance between the beam
//! centreline and the target is strictly less than half the beam width. The
//! difference is taken modulo 360 and folded into [-180, 180], so the test
//! stays correct across the ±180° seam even though bounded sweeps never
//! reach it.
//!
//! # Scoring
//!
//! The score interpolates linearly from `base_close` at min range to
//! `base_far` at max range, adds symmetric noise, rounds, and clamps to
//! [10, 99]. Individual samples are not monotonic in range because of the
//! noise.
//!
//! # Example
//!
//! ```rust
//! use sonar_core::detection::is_detected;
//!
//! assert!(is_detected(10.0, 12.0, 8.0));
//! assert!(!is_detected(10.0, 20.0, 8.0));
//! assert!(is_detected(179.0, -179.0, 8.0));
//! ```

mod level;

pub use level::*;

use serde::Serialize;

use crate::config::SensorConfig;
use crate::random::RandomSource;

pub const MIN_SCORE: u8 = 10;
pub const MAX_SCORE: u8 = 99;

/// Shortest signed difference `a - b` in degrees, folded into [-180, 180]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = (a - b) % 360.0;
    if d > 180.0 {
        d - 360.0
    } else if d < -180.0 {
        d + 360.0
    } else {
        d
    }
}

/// Is a target at `target_angle` inside the beam centred on `beam_angle`?
pub fn is_detected(beam_angle: f64, target_angle: f64, beam_width: f64) -> bool {
    angular_difference(beam_angle, target_angle).abs() < beam_width / 2.0
}

/// Confidence score for a target at `range`, in [10, 99]
pub fn score(range: f64, config: &SensorConfig, rng: &mut dyn RandomSource) -> u8 {
    let window = &config.range;
    let scoring = &config.scoring;
    let t = (range - window.min) / (window.max - window.min);
    let base = scoring.base_close - t * (scoring.base_close - scoring.base_far);
    let noisy = (base + rng.symmetric(scoring.noise)).round();
    noisy.clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8
}

/// Outcome of evaluating one target against the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    pub detected: bool,
    pub score: u8,
    pub level: ConfidenceLevel,
}

/// Evaluate a target at (`angle`, `range`) against the current beam angle
pub fn evaluate(
    beam_angle: f64,
    angle: f64,
    range: f64,
    config: &SensorConfig,
    rng: &mut dyn RandomSource,
) -> Detection {
    let detected = is_detected(beam_angle, angle, config.scan.beam_width);
    let score = score(range, config, rng);
    Detection {
        detected,
        score,
        level: ConfidenceLevel::from_score(score),
    }
}
