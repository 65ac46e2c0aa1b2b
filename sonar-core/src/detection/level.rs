//! Discrete confidence tiers for display

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Lowest score of each tier above Very Low
pub const LOW_THRESHOLD: u8 = 46;
pub const MEDIUM_THRESHOLD: u8 = 60;
pub const HIGH_THRESHOLD: u8 = 74;
pub const VERY_HIGH_THRESHOLD: u8 = 88;

/// Five step classification of a confidence score.
///
/// Serializes as `{ "name": "High", "tier": 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= VERY_HIGH_THRESHOLD {
            ConfidenceLevel::VeryHigh
        } else if score >= HIGH_THRESHOLD {
            ConfidenceLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            ConfidenceLevel::Medium
        } else if score >= LOW_THRESHOLD {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "Very Low",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::VeryHigh => "Very High",
        }
    }

    /// 1 (Very Low) to 5 (Very High)
    pub fn tier(self) -> u8 {
        match self {
            ConfidenceLevel::VeryLow => 1,
            ConfidenceLevel::Low => 2,
            ConfidenceLevel::Medium => 3,
            ConfidenceLevel::High => 4,
            ConfidenceLevel::VeryHigh => 5,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for ConfidenceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ConfidenceLevel", 2)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("tier", &self.tier())?;
        s.end()
    }
}
