// stride_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Stride: replays scripted IMU scenarios through the motion engine.
///
/// This struct defines the command-line arguments accepted by the
/// `stride_sim` binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/walk_and_pause.toml")]
    pub scenario: PathBuf,

    /// Overrides the scenario's PRNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Number of trailing trajectory points to include in the report.
    #[arg(long, default_value_t = 10)]
    pub trajectory_tail: usize,

    /// Print the resolved scenario (file plus environment overrides) as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}
