//! Frame driver
//!
//! [`SimulationRunner`] owns the [`Simulation`] and is the only thing that
//! touches it. In the tokio subsystem one `select!` loop handles the frame
//! interval, stdin commands and shutdown, so commands always land between two
//! ticks.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use sonar_core::{
    GeoPoint, ManualFrames, RandomSource, SeededRandom, Simulation, SimulationEvent, Snapshot, TrackSeed,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::MissedTickBehavior;
use tokio_graceful_shutdown::SubsystemHandle;

use crate::args::Args;
use crate::command::{parse_command, Command, CommandError};
use crate::config_file::{load_config, load_coordinates, load_tracks};

fn log_event(event: &SimulationEvent) {
    match event {
        SimulationEvent::DetectionCountChanged { previous, current } => {
            log::info!("Detected targets: {} -> {}", previous, current);
        }
        SimulationEvent::ReferencePositionChanged { reference } => {
            log::info!("Reference position now {}", reference);
        }
    }
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &Snapshot) -> anyhow::Result<()> {
    let line = snapshot.to_json_line()?;
    writeln!(out, "{}", line)?;
    Ok(())
}

/// Build the simulation described by the command line
pub fn simulation_from_args(args: &Args) -> anyhow::Result<Simulation> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    if let Some(count) = args.targets {
        config.targets.count = count;
    }

    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(SeededRandom::from_entropy()),
    };
    let mut sim = Simulation::new(config, rng).context("Invalid configuration")?;

    if let Some(path) = &args.coordinates {
        let entries = load_coordinates(path)?;
        let reference = args.reference.unwrap_or_default();
        let count = sim.load_json_coordinates(&entries, reference);
        log::info!("{} of {} coordinate entries usable", count, entries.len());
    } else {
        if let Some(path) = &args.tracks {
            sim.load_tracks(&load_tracks(path)?);
        } else if args.demo {
            sim.load_tracks(&TrackSeed::demo_set());
        }
        if let Some(reference) = args.reference {
            sim.set_reference(reference.lat, reference.lon)?;
        }
    }
    sim.drain_events();
    Ok(sim)
}

pub struct SimulationRunner {
    sim: Simulation,
    period: Duration,
    output: bool,
}

impl SimulationRunner {
    pub fn new(sim: Simulation, period: Duration, output: bool) -> Self {
        SimulationRunner { sim, period, output }
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let sim = simulation_from_args(args)?;
        Ok(SimulationRunner::new(sim, args.frame_period(), args.output))
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn reference(&self) -> GeoPoint {
        self.sim.targets().reference()
    }

    /// Handle one stdin line. Returns a snapshot line when one was asked for.
    ///
    /// Bad commands are logged and otherwise ignored.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return None,
            Err(e) => {
                log::warn!("{}", e);
                return None;
            }
        };
        log::debug!("Command: {:?}", command);
        if let Err(e) = command.apply(&mut self.sim) {
            log::warn!("{:?} rejected: {}", command, e);
        }
        for event in self.sim.drain_events() {
            log_event(&event);
        }
        if command == Command::Snapshot {
            match self.sim.snapshot().to_json_line() {
                Ok(line) => return Some(line),
                Err(e) => log::error!("Cannot serialize snapshot: {}", e),
            }
        }
        None
    }

    /// Advance one frame. Returns the snapshot line if output is enabled.
    fn step(&mut self) -> anyhow::Result<Option<String>> {
        let line = {
            let snapshot = self.sim.tick();
            if self.output {
                Some(snapshot.to_json_line()?)
            } else {
                None
            }
        };
        for event in self.sim.drain_events() {
            log_event(&event);
        }
        Ok(line)
    }

    /// Run `frames` ticks back to back, without a clock.
    pub fn run_headless<W: Write>(&mut self, frames: u64, out: &mut W) -> anyhow::Result<u64> {
        let output = self.output;
        let mut failure = None;
        let count = self.sim.run(&mut ManualFrames::new(frames), |snapshot, events| {
            events.iter().for_each(log_event);
            if output && failure.is_none() {
                failure = write_snapshot(&mut *out, snapshot).err();
            }
        });
        if let Some(e) = failure {
            return Err(e);
        }
        out.flush()?;
        log::info!(
            "Ran {} ticks, {} target(s), {} detected at the end",
            count,
            self.sim.snapshot().targets.len(),
            self.sim.snapshot().detected_count
        );
        Ok(count)
    }

    /// Tick on a fixed interval until shutdown, applying stdin commands between
    /// ticks.
    pub async fn run(mut self, subsys: SubsystemHandle) -> anyhow::Result<()> {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        let mut stdout = tokio::io::stdout();

        log::info!(
            "Simulation running at {:.1} fps with {} target(s)",
            1.0 / self.period.as_secs_f64(),
            self.sim.targets().len()
        );

        loop {
            let line = tokio::select! {
                _ = subsys.on_shutdown_requested() => {
                    log::debug!("simulation: shutdown at tick {}", self.sim.tick_count());
                    return Ok(());
                },

                _ = interval.tick() => self.step()?,

                r = lines.next_line(), if stdin_open => {
                    match r {
                        Ok(Some(line)) => self.handle_line(&line),
                        Ok(None) => {
                            log::debug!("stdin closed, no more commands");
                            stdin_open = false;
                            None
                        }
                        Err(e) => {
                            log::warn!("Cannot read stdin: {}", e);
                            stdin_open = false;
                            None
                        }
                    }
                },
            };

            if let Some(line) = line {
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }
    }
}
