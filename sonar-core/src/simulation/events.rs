//! Discrete events a renderer may subscribe to

use bitflags::bitflags;
use serde::Serialize;

use crate::geo::GeoPoint;

bitflags! {
    /// Event kinds, used as a subscription mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        const DETECTION_COUNT = 0b0000_0001;
        const REFERENCE_POSITION = 0b0000_0010;
    }
}

impl Default for EventKinds {
    fn default() -> Self {
        EventKinds::all()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SimulationEvent {
    /// The number of illuminated targets differs from the previous snapshot
    DetectionCountChanged { previous: usize, current: usize },
    /// The reference position for geo targets moved
    ReferencePositionChanged { reference: GeoPoint },
}

impl SimulationEvent {
    pub fn kind(&self) -> EventKinds {
        match self {
            SimulationEvent::DetectionCountChanged { .. } => EventKinds::DETECTION_COUNT,
            SimulationEvent::ReferencePositionChanged { .. } => EventKinds::REFERENCE_POSITION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let e = SimulationEvent::DetectionCountChanged {
            previous: 0,
            current: 2,
        };
        assert_eq!(e.kind(), EventKinds::DETECTION_COUNT);
        assert!(EventKinds::default().contains(e.kind()));
    }

    #[test]
    fn test_serialize_tagged() {
        let e = SimulationEvent::DetectionCountChanged {
            previous: 1,
            current: 0,
        };
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            serde_json::json!({ "event": "detectionCountChanged", "previous": 1, "current": 0 })
        );
    }
}
