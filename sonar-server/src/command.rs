//! Runtime command parsing
//!
//! Pure functions turning one stdin line into a [`Command`], plus
//! [`Command::apply`] which performs it on a [`Simulation`]. No I/O here.
//!
//! Line format: `<name> [args...]`, arguments separated by whitespace or
//! commas. Names are case-insensitive.
//!
//! ```text
//! add 20.0 109.01
//! ref 19.987,109.0
//! range 100 600
//! regen 10
//! ```

use std::str::FromStr;

use sonar_core::{GeoPoint, Simulation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected} argument(s), got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("'{command}': '{value}' is not a number")]
    InvalidNumber { command: &'static str, value: String },
    #[error("Invalid position '{0}', expected <lat>,<lon>")]
    InvalidPosition(String),
}

/// One runtime reconfiguration request
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTarget { lat: f64, lon: f64 },
    ClearGeoTargets,
    SetReference { lat: f64, lon: f64 },
    Regenerate(Option<usize>),
    Pause,
    Resume,
    TogglePause,
    FieldOfView(f64),
    Range { min: f64, max: f64 },
    BeamWidth(f64),
    BeamSpeed(f64),
    DriftSpeed(f64),
    Reset,
    Snapshot,
}

fn tokens(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect()
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::WrongArity {
            command,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn number<T: FromStr>(command: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse::<T>().map_err(|_| CommandError::InvalidNumber {
        command,
        value: value.to_string(),
    })
}

/// Parse `<lat>,<lon>` (or whitespace separated) into a validated position
pub fn parse_position(text: &str) -> Result<GeoPoint, CommandError> {
    let parts = tokens(text);
    let invalid = || CommandError::InvalidPosition(text.to_string());
    if parts.len() != 2 {
        return Err(invalid());
    }
    let lat = parts[0].parse::<f64>().map_err(|_| invalid())?;
    let lon = parts[1].parse::<f64>().map_err(|_| invalid())?;
    GeoPoint::new(lat, lon).map_err(|_| invalid())
}

/// Parse one command line
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let parts = tokens(line.trim());
    let (name, args) = match parts.split_first() {
        Some((name, args)) => (name.to_ascii_lowercase(), args),
        None => return Err(CommandError::Empty),
    };

    let command = match name.as_str() {
        "add" => {
            expect_args("add", args, 2)?;
            Command::AddTarget {
                lat: number("add", args[0])?,
                lon: number("add", args[1])?,
            }
        }
        "clear" => {
            expect_args("clear", args, 0)?;
            Command::ClearGeoTargets
        }
        "ref" | "reference" => {
            expect_args("ref", args, 2)?;
            Command::SetReference {
                lat: number("ref", args[0])?,
                lon: number("ref", args[1])?,
            }
        }
        "regen" => match args {
            [] => Command::Regenerate(None),
            [count] => Command::Regenerate(Some(number("regen", count)?)),
            _ => {
                return Err(CommandError::WrongArity {
                    command: "regen",
                    expected: 1,
                    got: args.len(),
                })
            }
        },
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "toggle" => Command::TogglePause,
        "fov" => {
            expect_args("fov", args, 1)?;
            Command::FieldOfView(number("fov", args[0])?)
        }
        "range" => {
            expect_args("range", args, 2)?;
            Command::Range {
                min: number("range", args[0])?,
                max: number("range", args[1])?,
            }
        }
        "width" => {
            expect_args("width", args, 1)?;
            Command::BeamWidth(number("width", args[0])?)
        }
        "speed" => {
            expect_args("speed", args, 1)?;
            Command::BeamSpeed(number("speed", args[0])?)
        }
        "drift" => {
            expect_args("drift", args, 1)?;
            Command::DriftSpeed(number("drift", args[0])?)
        }
        "reset" => Command::Reset,
        "snapshot" => Command::Snapshot,
        _ => return Err(CommandError::Unknown(name)),
    };
    Ok(command)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command(s)
    }
}

impl Command {
    /// Perform the command. Runs between two ticks, so the change is atomic
    /// from the point of view of the frame loop.
    pub fn apply(&self, sim: &mut Simulation) -> sonar_core::Result<()> {
        match *self {
            Command::AddTarget { lat, lon } => {
                let id = sim.add_geo_target(lat, lon)?;
                log::info!("Added geo target {} at ({}, {})", id, lat, lon);
            }
            Command::ClearGeoTargets => {
                sim.clear_geo_targets();
            }
            Command::SetReference { lat, lon } => sim.set_reference(lat, lon)?,
            Command::Regenerate(count) => sim.regenerate(count),
            Command::Pause => sim.pause(),
            Command::Resume => sim.resume(),
            Command::TogglePause => {
                sim.toggle_pause();
            }
            Command::FieldOfView(fov) => sim.set_fov(fov)?,
            Command::Range { min, max } => sim.set_range(min, max)?,
            Command::BeamWidth(width) => sim.set_beam_width(width)?,
            Command::BeamSpeed(speed) => sim.set_beam_speed(speed)?,
            Command::DriftSpeed(drift) => sim.set_drift_speed(drift)?,
            Command::Reset => sim.reset(),
            Command::Snapshot => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::{SensorConfig, SeededRandom};

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse_command("add 20.0 109.01").unwrap(),
            Command::AddTarget { lat: 20.0, lon: 109.01 }
        );
        assert_eq!(
            parse_command("  ADD 20.0,109.01 ").unwrap(),
            Command::AddTarget { lat: 20.0, lon: 109.01 }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("clear").unwrap(), Command::ClearGeoTargets);
        assert_eq!(parse_command("pause").unwrap(), Command::Pause);
        assert_eq!(parse_command("resume").unwrap(), Command::Resume);
        assert_eq!(parse_command("toggle").unwrap(), Command::TogglePause);
        assert_eq!(parse_command("reset").unwrap(), Command::Reset);
        assert_eq!(parse_command("snapshot").unwrap(), Command::Snapshot);
        assert_eq!("fov 90".parse::<Command>().unwrap(), Command::FieldOfView(90.0));
        assert_eq!(
            parse_command("range 100 600").unwrap(),
            Command::Range { min: 100.0, max: 600.0 }
        );
        assert_eq!(
            parse_command("reference 19.9 109").unwrap(),
            Command::SetReference { lat: 19.9, lon: 109.0 }
        );
    }

    #[test]
    fn test_parse_regen() {
        assert_eq!(parse_command("regen").unwrap(), Command::Regenerate(None));
        assert_eq!(parse_command("regen 12").unwrap(), Command::Regenerate(Some(12)));
        assert!(matches!(
            parse_command("regen -1"),
            Err(CommandError::InvalidNumber { command: "regen", .. })
        ));
        assert!(matches!(
            parse_command("regen 1 2"),
            Err(CommandError::WrongArity { .. })
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("launch"),
            Err(CommandError::Unknown("launch".to_string()))
        );
        assert_eq!(
            parse_command("add 20.0"),
            Err(CommandError::WrongArity {
                command: "add",
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            parse_command("width wide"),
            Err(CommandError::InvalidNumber {
                command: "width",
                value: "wide".to_string()
            })
        );
    }

    #[test]
    fn test_parse_position() {
        let p = parse_position("19.987,109.0").unwrap();
        assert_eq!(p, GeoPoint::new(19.987, 109.0).unwrap());
        assert!(parse_position("19.987").is_err());
        assert!(parse_position("91,0").is_err());
        assert!(parse_position("north,east").is_err());
    }

    #[test]
    fn test_apply() {
        let mut sim = Simulation::new(SensorConfig::default(), Box::new(SeededRandom::new(1))).unwrap();

        parse_command("fov 90").unwrap().apply(&mut sim).unwrap();
        assert_eq!(sim.config().scan.fov, 90.0);

        parse_command("add 19.988 109.0").unwrap().apply(&mut sim).unwrap();
        assert_eq!(sim.targets().len(), 7);

        parse_command("clear").unwrap().apply(&mut sim).unwrap();
        assert_eq!(sim.targets().len(), 6);

        parse_command("toggle").unwrap().apply(&mut sim).unwrap();
        assert!(sim.is_paused());
    }

    #[test]
    fn test_apply_rejected_keeps_config() {
        let mut sim = Simulation::new(SensorConfig::default(), Box::new(SeededRandom::new(1))).unwrap();
        assert!(parse_command("range 600 100").unwrap().apply(&mut sim).is_err());
        assert_eq!(sim.config().range.min, 200.0);
        assert!(parse_command("add NaN 109").unwrap().apply(&mut sim).is_err());
        assert_eq!(sim.targets().len(), 6);
    }
}
