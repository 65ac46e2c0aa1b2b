//! Target store
//!
//! Owns the tracked targets, their motion parameters and bounded trails.
//! Targets come from one of three creation strategies:
//!
//! - **procedural**: random spawn inside the sweep, random drift that
//!   occasionally inverts sign ([`TargetStore::init_from_count`])
//! - **geo**: static targets derived from (lat, lon) coordinates relative to a
//!   reference position ([`TargetStore::init_from_coordinates`])
//! - **scripted**: explicit seeds with constant velocities
//!   ([`TargetStore::init_from_tracks`])
//!
//! Every `init_*` call replaces the whole set. Ids come from a store-wide
//! counter and are never reused.

use serde::{Deserialize, Serialize};

use crate::config::SensorConfig;
use crate::geo::{bearing, distance, signed_bearing, GeoPoint};
use crate::random::RandomSource;
use crate::trails::{Trail, TrailPoint};

pub type TargetId = u64;

/// Per-tick probability that a drifting target inverts one velocity component
pub const DRIFT_FLIP_PROBABILITY: f64 = 0.02;
/// Angular drift sample width (degrees per tick) at drift speed 1.0
pub const ANGULAR_DRIFT_SCALE: f64 = 0.06;
/// Radial drift sample width (meters per tick) at drift speed 1.0
pub const RADIAL_DRIFT_SCALE: f64 = 0.4;

/// Where a target came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum TargetSource {
    Procedural,
    Geo { position: GeoPoint },
    Scripted,
}

/// How a target moves each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Never moves, never clamped
    Static,
    /// Fixed velocities, clamped to the sweep
    Constant,
    /// Velocities that randomly invert sign, clamped to the sweep
    Drifting,
}

/// A tracked entity
#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub label: String,
    /// Signed bearing in degrees, (-180, 180]
    pub angle: f64,
    /// Meters
    pub range: f64,
    /// Degrees per tick
    pub angular_velocity: f64,
    /// Meters per tick
    pub radial_velocity: f64,
    pub source: TargetSource,
    pub motion: Motion,
    pub trail: Trail,
}

impl Target {
    pub fn position(&self) -> TrailPoint {
        TrailPoint::new(self.angle, self.range)
    }

    pub fn is_geo(&self) -> bool {
        matches!(self.source, TargetSource::Geo { .. })
    }

    fn constrain(&mut self, config: &SensorConfig) {
        let (lo, hi) = config.target_angle_bounds();
        self.range = self.range.clamp(config.range.min, config.range.max);
        self.angle = self.angle.clamp(lo, hi);
    }

    /// Pull past trail samples into the current window so none is drawn
    /// outside the display.
    fn constrain_trail(&mut self, config: &SensorConfig) {
        let (lo, hi) = config.target_angle_bounds();
        let (min, max) = (config.range.min, config.range.max);
        match self.motion {
            Motion::Static => self.trail.update(|p| p.range = p.range.min(max)),
            _ => self.trail.update(|p| {
                p.range = p.range.clamp(min, max);
                p.angle = p.angle.clamp(lo, hi);
            }),
        }
    }
}

/// Explicit starting state for a scripted target.
///
/// Loaded from JSON as `{ "label", "angle", "range", "angularVelocity",
/// "radialVelocity" }`; missing velocities mean a static target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSeed {
    pub label: String,
    pub angle: f64,
    pub range: f64,
    #[serde(default)]
    pub angular_velocity: f64,
    #[serde(default)]
    pub radial_velocity: f64,
}

impl TrackSeed {
    pub fn new(label: &str, angle: f64, range: f64, angular_velocity: f64, radial_velocity: f64) -> Self {
        TrackSeed {
            label: label.to_string(),
            angle,
            range,
            angular_velocity,
            radial_velocity,
        }
    }

    /// Six moving demo tracks, A to F
    pub fn demo_set() -> Vec<TrackSeed> {
        vec![
            TrackSeed::new("A", -30.0, 180.0, 0.2, 1.0),
            TrackSeed::new("B", 40.0, 120.0, 0.02, 0.03),
            TrackSeed::new("C", 15.0, 300.0, 0.16, -0.6),
            TrackSeed::new("D", -45.0, 250.0, -0.1, 0.4),
            TrackSeed::new("E", -15.0, 400.0, 0.24, -0.8),
            TrackSeed::new("F", 35.0, 350.0, -0.06, 0.3),
        ]
    }

    /// Six motionless demo contacts
    pub fn static_demo_set() -> Vec<TrackSeed> {
        [(-42.0, 340.0), (-14.0, 570.0), (18.0, 690.0), (25.0, 600.0), (10.0, 520.0), (-6.0, 390.0)]
            .iter()
            .enumerate()
            .map(|(i, &(angle, range))| TrackSeed::new(&geo_label(i), angle, range, 0.0, 0.0))
            .collect()
    }

    fn is_static(&self) -> bool {
        self.angular_velocity == 0.0 && self.radial_velocity == 0.0
    }
}

fn geo_label(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

/// Angle and range of `position` as seen from `reference`, range capped at max range
fn derive_polar(reference: &GeoPoint, position: &GeoPoint, config: &SensorConfig) -> (f64, f64) {
    let angle = signed_bearing(bearing(reference, position));
    let range = distance(reference, position).min(config.range.max);
    (angle, range)
}

/// The set of tracked targets
#[derive(Debug, Clone)]
pub struct TargetStore {
    targets: Vec<Target>,
    next_id: TargetId,
    reference: GeoPoint,
}

impl Default for TargetStore {
    fn default() -> Self {
        TargetStore::new(GeoPoint::default())
    }
}

impl TargetStore {
    pub fn new(reference: GeoPoint) -> Self {
        TargetStore {
            targets: Vec::new(),
            next_id: 1,
            reference,
        }
    }

    fn alloc_id(&mut self) -> TargetId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn reference(&self) -> GeoPoint {
        self.reference
    }

    fn spawn(&mut self, config: &SensorConfig, rng: &mut dyn RandomSource) -> Target {
        let id = self.alloc_id();
        let (lo, hi) = config.target_angle_bounds();
        let drift = config.targets.drift_speed;
        Target {
            id,
            label: format!("T{}", id),
            angle: rng.between(lo, hi),
            range: rng.between(config.range.min, config.range.max),
            angular_velocity: rng.symmetric(ANGULAR_DRIFT_SCALE * drift),
            radial_velocity: rng.symmetric(RADIAL_DRIFT_SCALE * drift),
            source: TargetSource::Procedural,
            motion: Motion::Drifting,
            trail: Trail::new(config.targets.trail_capacity),
        }
    }

    fn geo_target(&mut self, index: usize, position: GeoPoint, config: &SensorConfig) -> Target {
        let (angle, range) = derive_polar(&self.reference, &position, config);
        Target {
            id: self.alloc_id(),
            label: geo_label(index),
            angle,
            range,
            angular_velocity: 0.0,
            radial_velocity: 0.0,
            source: TargetSource::Geo { position },
            motion: Motion::Static,
            trail: Trail::new(config.targets.trail_capacity),
        }
    }

    /// Replace all targets with `count` procedurally generated ones.
    pub fn init_from_count(&mut self, count: usize, config: &SensorConfig, rng: &mut dyn RandomSource) {
        self.targets = (0..count).map(|_| self.spawn(config, rng)).collect();
        log::info!("Initialized {} procedural target(s)", self.targets.len());
    }

    /// Replace all targets with one static target per valid `[lat, lon]` entry.
    ///
    /// Entries that are not a finite two element pair are skipped. Returns the
    /// number of targets created.
    pub fn init_from_coordinates<P: AsRef<[f64]>>(
        &mut self,
        coords: &[P],
        reference: GeoPoint,
        config: &SensorConfig,
    ) -> usize {
        let mut points = Vec::with_capacity(coords.len());
        for (i, entry) in coords.iter().enumerate() {
            let pair: &[f64] = entry.as_ref();
            match GeoPoint::from_slice(pair) {
                Some(p) => points.push(p),
                None => log::warn!("Skipping malformed coordinate entry #{}: {:?}", i, pair),
            }
        }
        self.replace_with_geo(points, reference, config)
    }

    /// As [`init_from_coordinates`](Self::init_from_coordinates), for a JSON
    /// array whose entries may be anything.
    pub fn init_from_json_coordinates(
        &mut self,
        coords: &[serde_json::Value],
        reference: GeoPoint,
        config: &SensorConfig,
    ) -> usize {
        let mut points = Vec::with_capacity(coords.len());
        for (i, value) in coords.iter().enumerate() {
            match GeoPoint::from_json(value) {
                Some(p) => points.push(p),
                None => log::warn!("Skipping malformed coordinate entry #{}: {}", i, value),
            }
        }
        self.replace_with_geo(points, reference, config)
    }

    fn replace_with_geo(&mut self, points: Vec<GeoPoint>, reference: GeoPoint, config: &SensorConfig) -> usize {
        self.reference = reference;
        self.targets = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| self.geo_target(i, p, config))
            .collect();
        if self.targets.is_empty() {
            log::info!("No geo targets, display stays blank until targets are added");
        } else {
            log::info!("Initialized {} geo target(s) from {}", self.targets.len(), reference);
        }
        self.targets.len()
    }

    /// Replace all targets with scripted tracks.
    ///
    /// Seeds with zero velocity become static targets and keep their given
    /// position. Moving seeds are clamped into the sweep.
    pub fn init_from_tracks(&mut self, seeds: &[TrackSeed], config: &SensorConfig) {
        self.targets = seeds
            .iter()
            .map(|seed| {
                let mut target = Target {
                    id: self.alloc_id(),
                    label: seed.label.clone(),
                    angle: seed.angle,
                    range: seed.range,
                    angular_velocity: seed.angular_velocity,
                    radial_velocity: seed.radial_velocity,
                    source: TargetSource::Scripted,
                    motion: if seed.is_static() {
                        Motion::Static
                    } else {
                        Motion::Constant
                    },
                    trail: Trail::new(config.targets.trail_capacity),
                };
                if target.motion != Motion::Static {
                    target.constrain(config);
                }
                target
            })
            .collect();
        log::info!("Initialized {} scripted target(s)", self.targets.len());
    }

    /// Add one geo target without disturbing the others
    pub fn add_geo_target(&mut self, position: GeoPoint, config: &SensorConfig) -> TargetId {
        let index = self.targets.iter().filter(|t| t.is_geo()).count();
        let target = self.geo_target(index, position, config);
        let id = target.id;
        log::debug!(
            "Added geo target {} ({}) at {:.1}° {:.0} m",
            target.label,
            id,
            target.angle,
            target.range
        );
        self.targets.push(target);
        id
    }

    /// Remove every geo-sourced target. Returns how many were removed.
    pub fn clear_geo_targets(&mut self) -> usize {
        let before = self.targets.len();
        self.targets.retain(|t| !t.is_geo());
        before - self.targets.len()
    }

    /// Move the reference position and re-derive every geo target from it.
    ///
    /// Re-derived targets lose their trail since their position jumps.
    /// Procedural and scripted targets are untouched.
    pub fn set_reference(&mut self, reference: GeoPoint, config: &SensorConfig) {
        self.reference = reference;
        let mut count = 0;
        for target in self.targets.iter_mut() {
            if let TargetSource::Geo { position } = target.source {
                let (angle, range) = derive_polar(&reference, &position, config);
                target.angle = angle;
                target.range = range;
                target.trail.clear();
                count += 1;
            }
        }
        log::debug!("Reference moved to {}, re-derived {} geo target(s)", reference, count);
    }

    /// One tick of motion, then append each target's position to its trail.
    pub fn advance(&mut self, config: &SensorConfig, rng: &mut dyn RandomSource) {
        for target in self.targets.iter_mut() {
            if target.motion != Motion::Static {
                target.angle += target.angular_velocity;
                target.range += target.radial_velocity;
                target.constrain(config);
            }
            if target.motion == Motion::Drifting {
                if rng.chance(DRIFT_FLIP_PROBABILITY) {
                    target.angular_velocity = -target.angular_velocity;
                }
                if rng.chance(DRIFT_FLIP_PROBABILITY) {
                    target.radial_velocity = -target.radial_velocity;
                }
            }
            let position = target.position();
            target.trail.push(position);
        }
    }

    /// Re-sample the velocities of every drifting target for a new drift speed
    pub fn resample_drift(&mut self, config: &SensorConfig, rng: &mut dyn RandomSource) {
        let drift = config.targets.drift_speed;
        for target in self.targets.iter_mut().filter(|t| t.motion == Motion::Drifting) {
            target.angular_velocity = rng.symmetric(ANGULAR_DRIFT_SCALE * drift);
            target.radial_velocity = rng.symmetric(RADIAL_DRIFT_SCALE * drift);
        }
    }

    /// Bring existing targets in line with a newly applied configuration
    pub fn apply_config(&mut self, config: &SensorConfig) {
        let reference = self.reference;
        for target in self.targets.iter_mut() {
            target.trail.set_capacity(config.targets.trail_capacity);
            match target.source {
                TargetSource::Geo { position } => {
                    let (angle, range) = derive_polar(&reference, &position, config);
                    target.angle = angle;
                    target.range = range;
                }
                _ if target.motion != Motion::Static => target.constrain(config),
                _ => {}
            }
            target.constrain_trail(config);
        }
    }
}
