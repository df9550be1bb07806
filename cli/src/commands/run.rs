//! Run command implementation
//!
//! Simulates the configured contract with the Euler and the exact scheme, compares
//! both against the closed-form fair value and stores the curves.

use std::path::Path;

use pricing::analytic::FairValue;
use pricing::simulation::{MonteCarloSimulation, RunStatistics, SimulationScheme};
use tracing::info;

use crate::commands::simulations;
use crate::config::PricerConfig;
use crate::output;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// rerun with the number of simulations needed for the configured accuracy,
    /// capped at the given count
    pub refine: Option<usize>,
    pub save: bool,
}

/// Run the run command
pub fn run(config: &PricerConfig, options: RunOptions) -> Result<Vec<(SimulationScheme, RunStatistics)>> {
    let contract = config.contract()?;
    let mut sims = simulations(config)?;
    let Some(first) = sims.first() else {
        return Ok(Vec::new());
    };
    let fair_value = FairValue::generate(&contract, first.config().grid());

    info!("Starting simulation...");
    info!("  Contract: {:?} {:?}, K = {}", contract.style, contract.option_type, contract.strike);
    info!("  Paths: {}, time steps: {}", first.config().nr_paths(), first.config().nr_steps());

    let dir = &config.output_dir;
    if options.save {
        output::write_fair_value(dir, &fair_value)?;
        output::write_title(dir, &contract, first.config())?;
    }

    let mut reports = Vec::with_capacity(sims.len());
    for sim in sims.iter_mut() {
        let save_to = options.save.then_some(dir.as_path());
        let stats = simulate_scheme(sim, &fair_value, options.refine, save_to)?;
        reports.push((sim.config().scheme(), stats));
    }
    if options.save {
        info!("Curves written to {}", dir.display());
    }

    println!("{}", output::format_summary(&reports));
    Ok(reports)
}

/// Runs (and refines) one simulation, stores its curves and releases its increments
/// and curves once the statistics are taken.
fn simulate_scheme(
    sim: &mut MonteCarloSimulation,
    fair_value: &FairValue,
    refine: Option<usize>,
    save_to: Option<&Path>,
) -> Result<RunStatistics> {
    info!("Running the {} method", sim.config().scheme().name());
    sim.run()?;
    if let Some(max_paths) = refine {
        sim.refine(max_paths)?;
    }
    let stats = sim.statistics(&fair_value.prices)?;
    if let Some(dir) = save_to {
        output::write_simulation(dir, sim)?;
    }
    sim.refresh();
    Ok(stats)
}
