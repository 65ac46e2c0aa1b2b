//! Per-tick output handed to renderers
//!
//! A [`Snapshot`] is read-only: renderers get a shared reference or a clone
//! and cannot reach back into the simulation state.

use serde::Serialize;

use crate::beam::SweepDirection;
use crate::detection::ConfidenceLevel;
use crate::geo::GeoPoint;
use crate::polar::DisplayPoint;
use crate::targets::{TargetId, TargetSource};

/// One past trail sample with its display position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSample {
    pub angle: f64,
    pub range: f64,
    pub display: DisplayPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSnapshot {
    pub id: TargetId,
    pub label: String,
    pub angle: f64,
    pub range: f64,
    pub display: DisplayPoint,
    /// Oldest first
    pub trail: Vec<TrailSample>,
    pub detected: bool,
    pub score: u8,
    pub level: ConfidenceLevel,
    /// Inside the swept field of view
    pub in_view: bool,
    pub source: TargetSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tick: u64,
    pub beam_angle: f64,
    pub beam_direction: SweepDirection,
    pub paused: bool,
    pub detected_count: usize,
    pub reference: GeoPoint,
    pub targets: Vec<TargetSnapshot>,
}

impl Snapshot {
    pub fn detected(&self) -> impl Iterator<Item = &TargetSnapshot> {
        self.targets.iter().filter(|t| t.detected)
    }

    pub fn target(&self, id: TargetId) -> Option<&TargetSnapshot> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Single line JSON, for streaming one snapshot per line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
