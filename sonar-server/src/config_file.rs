//! Loading configuration and coordinate files

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use sonar_core::{SensorConfig, TrackSeed};

/// Read and validate a sensor configuration file
pub fn load_config(path: &Path) -> anyhow::Result<SensorConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let config = SensorConfig::from_json(&text).with_context(|| format!("Invalid configuration in {}", path.display()))?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Read a JSON array of coordinate entries.
///
/// Entries are returned as-is; malformed ones are skipped later when the
/// targets are created.
pub fn load_coordinates(path: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))?;
    match value {
        serde_json::Value::Array(entries) => Ok(entries),
        _ => bail!("{}: expected an array of [lat, lon] entries", path.display()),
    }
}

/// Read a JSON array of scripted track seeds
pub fn load_tracks(path: &Path) -> anyhow::Result<Vec<TrackSeed>> {
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let seeds: Vec<TrackSeed> =
        serde_json::from_str(&text).with_context(|| format!("Invalid tracks in {}", path.display()))?;
    log::info!("Loaded {} track(s) from {}", seeds.len(), path.display());
    Ok(seeds)
}
