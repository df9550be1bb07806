//! CLI command implementations
//!
//! Each submodule implements one subcommand of `mc-pricer`.

pub mod convergence;
pub mod run;

use pricing::simulation::{MonteCarloSimulation, SimulationScheme};

use crate::config::PricerConfig;
use crate::Result;

/// Both schemes are simulated side by side on the same contract.
pub const SCHEMES: [SimulationScheme; 2] = [SimulationScheme::Euler, SimulationScheme::Exact];

/// One simulation per scheme, configured but not run yet.
pub(crate) fn simulations(config: &PricerConfig) -> Result<Vec<MonteCarloSimulation>> {
    let contract = config.contract()?;
    SCHEMES
        .iter()
        .map(|&scheme| Ok(MonteCarloSimulation::new(contract, config.simulation_config(scheme)?)))
        .collect()
}
