//! Sonar Core
//!
//! Platform-independent engine behind a sweeping sonar/radar display: a beam
//! oscillates across a field of view, targets move inside a bounded polar
//! region, and each target is reported as detected while the beam's angular
//! window covers it.
//!
//! This crate contains no I/O, no async runtime and no rendering. A frame
//! driver owns a [`Simulation`], calls [`Simulation::tick`] once per frame and
//! hands the resulting [`Snapshot`] to whatever draws it.
//!
//! # Modules
//!
//! - [`geo`]: bearing and distance between geographic coordinates
//! - [`polar`]: (angle, range) to display coordinates
//! - [`config`]: the validated [`SensorConfig`]
//! - [`targets`]: target creation, motion and trails
//! - [`beam`]: the sweep state machine
//! - [`detection`]: illumination test and confidence scoring
//! - [`simulation`]: the tick loop, snapshots and events
//!
//! # Example
//!
//! ```rust
//! use sonar_core::{SensorConfig, SeededRandom, Simulation};
//!
//! let mut sim = Simulation::new(SensorConfig::default(), Box::new(SeededRandom::new(7))).unwrap();
//! sim.add_geo_target(20.000, 109.010).unwrap();
//! let snapshot = sim.tick();
//! println!("beam at {:.1}°, {} detected", snapshot.beam_angle, snapshot.detected_count);
//! ```

pub mod beam;
pub mod config;
pub mod detection;
pub mod error;
pub mod geo;
pub mod polar;
pub mod random;
pub mod simulation;
pub mod targets;
pub mod trails;

pub use config::SensorConfig;
pub use error::{Result, SonarError};
pub use geo::GeoPoint;
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use simulation::{
    EventKinds, FrameSource, ManualFrames, Simulation, SimulationEvent, Snapshot, TargetSnapshot,
};
pub use targets::{TargetId, TrackSeed};
