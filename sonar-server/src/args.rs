use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use sonar_core::GeoPoint;

use crate::command::parse_position;

fn position_arg(text: &str) -> Result<GeoPoint, String> {
    parse_position(text).map_err(|e| e.to_string())
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Sonar sweep simulation driver")]
pub struct Args {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Sensor configuration JSON file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ticks per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,

    /// Seed for repeatable runs, random if not given
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of procedural targets, overrides the configuration file
    #[arg(short, long)]
    pub targets: Option<usize>,

    /// JSON file with an array of [lat, lon] target coordinates
    #[arg(long)]
    pub coordinates: Option<PathBuf>,

    /// Reference position for geo targets, as <lat>,<lon>
    #[arg(short, long, value_parser = position_arg)]
    pub reference: Option<GeoPoint>,

    /// JSON file with an array of scripted track seeds
    #[arg(long, conflicts_with = "coordinates")]
    pub tracks: Option<PathBuf>,

    /// Start with the scripted demo tracks
    #[arg(long, conflicts_with_all = ["coordinates", "tracks"])]
    pub demo: bool,

    /// Run this many ticks as fast as possible, then exit
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Write every snapshot to stdout as a JSON line
    #[arg(short, long, default_value_t = false)]
    pub output: bool,
}

impl Args {
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}
