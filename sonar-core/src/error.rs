//! Error types
//!
//! Every failure in the engine is local: a reconfiguration is rejected and the
//! previous configuration stays active, or a malformed input entry is skipped.
//! Nothing here is fatal to the process.

use thiserror::Error;

/// Errors reported by the sonar engine
#[derive(Error, Debug)]
pub enum SonarError {
    /// `min_range >= max_range`, or a negative bound
    #[error("Invalid range window {min} - {max} m")]
    InvalidRangeWindow { min: f64, max: f64 },

    /// Field of view must be in (0, 360]
    #[error("Invalid field of view {0}°")]
    InvalidFieldOfView(f64),

    /// Beam width must be positive and no wider than the field of view
    #[error("Invalid beam width {0}°")]
    InvalidBeamWidth(f64),

    /// Any other numeric parameter outside its domain
    #[error("Invalid value {value} for {name}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// NaN or infinite latitude/longitude
    #[error("Non-finite coordinate ({lat}, {lon})")]
    NonFiniteCoordinate { lat: f64, lon: f64 },

    /// Latitude outside [-90, 90] or longitude outside [-180, 180]
    #[error("Coordinate ({lat}, {lon}) out of range")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("Configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SonarError>;
