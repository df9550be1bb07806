//! mc-pricer - Monte Carlo pricing of European and Asian options
//!
//! # Commands
//!
//! - `mc-pricer run` - simulate with the Euler and the exact scheme, compare with the
//!   closed-form price and write the curves
//! - `mc-pricer convergence` - measure run time and pricing error for a doubling
//!   number of simulations
//!
//! Settings come from the TOML file given with `--config` (defaults otherwise), then
//! from `MC_PRICER_*` environment variables, then from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use crate::commands::run::RunOptions;
use crate::config::PricerConfig;

#[derive(Parser)]
#[command(name = "mc-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory the curves are written to
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate both schemes and compare them with the fair value
    Run {
        /// Number of Monte Carlo simulations
        #[arg(short, long)]
        paths: Option<usize>,

        /// Rerun with the number of simulations needed for the configured accuracy
        #[arg(short, long)]
        refine: bool,

        /// Upper bound on the number of simulations of a refined run
        #[arg(long, default_value = "1000000")]
        max_paths: usize,

        /// Only print the summary
        #[arg(long)]
        no_save: bool,
    },

    /// Measure time and max pricing error for a doubling number of simulations
    Convergence {
        /// First number of simulations
        #[arg(short, long, default_value = "10")]
        start: usize,

        /// Exclusive upper bound on the number of simulations
        #[arg(long, default_value = "500000")]
        limit: usize,

        /// File for the "M, t, e, t, e" lines
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PricerConfig::load_or_default(cli.config.as_deref())?.with_env_override()?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if let Commands::Run { paths: Some(paths), .. } = cli.command {
        config.simulation.path_count = paths;
    }
    config.validate()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();
    info!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Commands::Run {
            refine,
            max_paths,
            no_save,
            ..
        } => {
            let options = RunOptions {
                refine: refine.then_some(max_paths),
                save: !no_save,
            };
            commands::run::run(&config, options).map(|_| ())
        }
        Commands::Convergence { start, limit, output } => {
            commands::convergence::run(&config, start, limit, output.as_deref()).map(|_| ())
        }
    }
}
