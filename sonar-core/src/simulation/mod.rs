//! Simulation Clock
//!
//! [`Simulation`] owns every piece of mutable state: configuration, beam,
//! targets and the random source. One call to [`Simulation::tick`] runs a
//! full step in a fixed order:
//!
//! 1. advance the beam
//! 2. advance the targets (position, then trail)
//! 3. evaluate detection for every target
//! 4. publish a [`Snapshot`] and queue any [`SimulationEvent`]s
//!
//! Reconfiguration goes through validated methods taking `&mut self`, so a
//! change always lands between two ticks and a tick never sees a half
//! applied configuration. A rejected change leaves the previous
//! configuration in place.
//!
//! # Example
//!
//! ```rust
//! use sonar_core::config::SensorConfig;
//! use sonar_core::random::SeededRandom;
//! use sonar_core::simulation::{ManualFrames, Simulation};
//!
//! let mut sim = Simulation::new(SensorConfig::default(), Box::new(SeededRandom::new(1))).unwrap();
//! let ticks = sim.run(&mut ManualFrames::new(100), |snapshot, _events| {
//!     assert!(snapshot.targets.len() == 6);
//! });
//! assert_eq!(ticks, 100);
//! ```

mod events;
mod frames;
mod snapshot;

pub use events::{EventKinds, SimulationEvent};
pub use frames::{FrameSource, ManualFrames};
pub use snapshot::{Snapshot, TargetSnapshot, TrailSample};

use crate::beam::BeamSweeper;
use crate::config::SensorConfig;
use crate::detection::evaluate;
use crate::error::Result;
use crate::geo::{normalize_angle, GeoPoint};
use crate::polar::project;
use crate::random::RandomSource;
use crate::targets::{TargetId, TargetStore, TrackSeed};

pub struct Simulation {
    config: SensorConfig,
    beam: BeamSweeper,
    store: TargetStore,
    rng: Box<dyn RandomSource>,
    paused: bool,
    tick: u64,
    subscriptions: EventKinds,
    events: Vec<SimulationEvent>,
    snapshot: Snapshot,
}

impl Simulation {
    /// Start with `config.targets.count` procedural targets.
    pub fn new(config: SensorConfig, mut rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        let beam = BeamSweeper::new(config.scan.fov, config.scan.beam_speed);
        let mut store = TargetStore::default();
        store.init_from_count(config.targets.count, &config, rng.as_mut());

        let snapshot = Snapshot {
            tick: 0,
            beam_angle: beam.angle(),
            beam_direction: beam.direction(),
            paused: false,
            detected_count: 0,
            reference: store.reference(),
            targets: Vec::new(),
        };
        let mut sim = Simulation {
            config,
            beam,
            store,
            rng,
            paused: false,
            tick: 0,
            subscriptions: EventKinds::default(),
            events: Vec::new(),
            snapshot,
        };
        sim.refresh();
        // Nothing has been shown yet, so the first count is not a change
        sim.events.clear();
        Ok(sim)
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn beam(&self) -> &BeamSweeper {
        &self.beam
    }

    pub fn targets(&self) -> &TargetStore {
        &self.store
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// The latest snapshot, without advancing
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Run one tick and return the new snapshot.
    ///
    /// While paused nothing moves and the frozen snapshot is returned.
    pub fn tick(&mut self) -> &Snapshot {
        if self.paused {
            return &self.snapshot;
        }
        self.beam.advance();
        self.store.advance(&self.config, self.rng.as_mut());
        self.tick += 1;
        self.refresh();
        log::trace!(
            "tick {}: beam {:.2}° {} detected",
            self.tick,
            self.beam.angle(),
            self.snapshot.detected_count
        );
        &self.snapshot
    }

    /// Tick once per frame until `frames` runs dry. Returns the number of
    /// frames delivered.
    pub fn run<F, S>(&mut self, frames: &mut F, mut on_frame: S) -> u64
    where
        F: FrameSource,
        S: FnMut(&Snapshot, &[SimulationEvent]),
    {
        let mut count = 0;
        while frames.next_frame() {
            self.tick();
            let events = self.drain_events();
            on_frame(&self.snapshot, &events);
            count += 1;
        }
        count
    }

    /// Evaluate detection for the current state and publish a new snapshot
    fn refresh(&mut self) {
        let geometry = self.config.geometry();
        let max_range = self.config.range.max;
        let half_fov = self.config.half_fov();
        let beam_angle = self.beam.angle();
        let config = &self.config;
        let rng = self.rng.as_mut();

        let targets: Vec<TargetSnapshot> = self
            .store
            .targets()
            .iter()
            .map(|t| {
                let detection = evaluate(beam_angle, t.angle, t.range, config, &mut *rng);
                TargetSnapshot {
                    id: t.id,
                    label: t.label.clone(),
                    angle: t.angle,
                    range: t.range,
                    display: project(t.angle, t.range, max_range, &geometry),
                    trail: t
                        .trail
                        .iter()
                        .map(|p| TrailSample {
                            angle: p.angle,
                            range: p.range,
                            display: project(p.angle, p.range, max_range, &geometry),
                        })
                        .collect(),
                    detected: detection.detected,
                    score: detection.score,
                    level: detection.level,
                    in_view: normalize_angle(t.angle).abs() <= half_fov,
                    source: t.source,
                }
            })
            .collect();

        let previous = self.snapshot.detected_count;
        let current = targets.iter().filter(|t| t.detected).count();
        self.snapshot = Snapshot {
            tick: self.tick,
            beam_angle,
            beam_direction: self.beam.direction(),
            paused: self.paused,
            detected_count: current,
            reference: self.store.reference(),
            targets,
        };
        if current != previous {
            self.emit(SimulationEvent::DetectionCountChanged { previous, current });
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    fn emit(&mut self, event: SimulationEvent) {
        if self.subscriptions.contains(event.kind()) {
            self.events.push(event);
        }
    }

    pub fn subscribe(&mut self, kinds: EventKinds) {
        self.subscriptions.insert(kinds);
    }

    pub fn unsubscribe(&mut self, kinds: EventKinds) {
        self.subscriptions.remove(kinds);
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Clock control
    // -------------------------------------------------------------------------

    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("Paused at tick {}", self.tick);
        }
        self.paused = true;
        self.snapshot.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("Resumed at tick {}", self.tick);
        }
        self.paused = false;
        self.snapshot.paused = false;
    }

    /// Returns the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replace the whole configuration.
    ///
    /// The beam picks up the new field of view and speed, existing targets are
    /// re-clamped and their trails resized. Drifting targets get new
    /// velocities if the drift speed changed. The target count takes effect on
    /// the next [`regenerate`](Self::regenerate).
    pub fn reconfigure(&mut self, config: SensorConfig) -> Result<()> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected configuration: {}", e);
            return Err(e);
        }
        let previous = std::mem::replace(&mut self.config, config);

        if previous.scan.fov != config.scan.fov {
            self.beam.set_fov(config.scan.fov);
        }
        self.beam.set_speed(config.scan.beam_speed);
        self.store.apply_config(&config);
        if previous.targets.drift_speed != config.targets.drift_speed {
            self.store.resample_drift(&config, self.rng.as_mut());
        }
        log::info!(
            "Configuration applied: fov {}°, range {}-{} m, beam width {}°",
            config.scan.fov,
            config.range.min,
            config.range.max,
            config.scan.beam_width
        );
        self.refresh();
        Ok(())
    }

    fn update(&mut self, change: impl FnOnce(&mut SensorConfig)) -> Result<()> {
        let mut candidate = self.config;
        change(&mut candidate);
        self.reconfigure(candidate)
    }

    pub fn set_fov(&mut self, fov: f64) -> Result<()> {
        self.update(|c| c.scan.fov = fov)
    }

    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        self.update(|c| {
            c.range.min = min;
            c.range.max = max;
        })
    }

    pub fn set_beam_width(&mut self, width: f64) -> Result<()> {
        self.update(|c| c.scan.beam_width = width)
    }

    pub fn set_beam_speed(&mut self, speed: f64) -> Result<()> {
        self.update(|c| c.scan.beam_speed = speed)
    }

    pub fn set_drift_speed(&mut self, drift: f64) -> Result<()> {
        self.update(|c| c.targets.drift_speed = drift)
    }

    /// Back to the default configuration with fresh procedural targets
    pub fn reset(&mut self) {
        self.config = SensorConfig::default();
        self.beam = BeamSweeper::new(self.config.scan.fov, self.config.scan.beam_speed);
        self.store
            .init_from_count(self.config.targets.count, &self.config, self.rng.as_mut());
        self.paused = false;
        log::info!("Reset to defaults");
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Targets
    // -------------------------------------------------------------------------

    /// Replace all targets with procedural ones, optionally changing the count
    pub fn regenerate(&mut self, count: Option<usize>) {
        if let Some(count) = count {
            self.config.targets.count = count;
        }
        self.store
            .init_from_count(self.config.targets.count, &self.config, self.rng.as_mut());
        self.refresh();
    }

    /// Replace all targets with geo targets. Malformed entries are skipped.
    pub fn load_coordinates<P: AsRef<[f64]>>(&mut self, coords: &[P], reference: GeoPoint) -> usize {
        let moved = reference != self.store.reference();
        let count = self.store.init_from_coordinates(coords, reference, &self.config);
        if moved {
            self.emit(SimulationEvent::ReferencePositionChanged { reference });
        }
        self.refresh();
        count
    }

    /// As [`load_coordinates`](Self::load_coordinates), from JSON entries
    pub fn load_json_coordinates(&mut self, coords: &[serde_json::Value], reference: GeoPoint) -> usize {
        let moved = reference != self.store.reference();
        let count = self.store.init_from_json_coordinates(coords, reference, &self.config);
        if moved {
            self.emit(SimulationEvent::ReferencePositionChanged { reference });
        }
        self.refresh();
        count
    }

    /// Replace all targets with scripted tracks
    pub fn load_tracks(&mut self, seeds: &[TrackSeed]) {
        self.store.init_from_tracks(seeds, &self.config);
        self.refresh();
    }

    /// Add a target at a geographic coordinate.
    ///
    /// Non-finite or out-of-range coordinates are rejected and the existing
    /// targets are left as they were.
    pub fn add_geo_target(&mut self, lat: f64, lon: f64) -> Result<TargetId> {
        let position = GeoPoint::new(lat, lon)?;
        let id = self.store.add_geo_target(position, &self.config);
        self.refresh();
        Ok(id)
    }

    /// Remove every geo target. Returns how many were removed.
    pub fn clear_geo_targets(&mut self) -> usize {
        let removed = self.store.clear_geo_targets();
        log::info!("Cleared {} geo target(s)", removed);
        self.refresh();
        removed
    }

    /// Move the reference position and re-derive all geo targets
    pub fn set_reference(&mut self, lat: f64, lon: f64) -> Result<()> {
        let reference = GeoPoint::new(lat, lon)?;
        self.store.set_reference(reference, &self.config);
        self.emit(SimulationEvent::ReferencePositionChanged { reference });
        self.refresh();
        Ok(())
    }
}
