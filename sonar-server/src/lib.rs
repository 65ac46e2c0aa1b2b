//! Sonar Server
//!
//! Frame driver for the `sonar-core` engine. Ticks a
//! [`Simulation`](sonar_core::Simulation) on a fixed interval, applies
//! runtime commands read from stdin between ticks, and streams snapshots to
//! stdout as JSON lines.

pub mod args;
pub mod command;
pub mod config_file;
pub mod runner;

pub use args::Args;
pub use command::{parse_command, Command, CommandError};
pub use runner::SimulationRunner;
