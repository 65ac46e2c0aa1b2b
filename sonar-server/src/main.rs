use std::time::Duration;

use clap::Parser;
use miette::Result;
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};

use sonar_server::{Args, SimulationRunner};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut runner = SimulationRunner::from_args(&args).map_err(|e| miette::miette!("{:#}", e))?;

    if let Some(ticks) = args.ticks {
        let mut stdout = std::io::stdout().lock();
        runner
            .run_headless(ticks, &mut stdout)
            .map_err(|e| miette::miette!("{:#}", e))?;
        return Ok(());
    }

    Toplevel::new(move |s| async move {
        s.start(SubsystemBuilder::new("simulation", |s| runner.run(s)));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(Into::into)
}
