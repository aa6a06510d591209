// stride_sim/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stride_sim::{cli::Cli, config, error::SimError, report, runner};

fn main() -> Result<(), SimError> {
    let cli = Cli::parse();

    // `RUST_LOG` wins over the command line.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let scenario = config::load_scenario(&cli.scenario)?;
    if cli.print_config {
        println!("{}", toml::to_string_pretty(&scenario)?);
        return Ok(());
    }

    let summary = runner::run_scenario(&scenario, cli.seed)?;
    print!("{}", report::render(&summary, cli.trajectory_tail));
    Ok(())
}
