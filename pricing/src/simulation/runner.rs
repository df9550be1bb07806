use std::time::Duration;

use tracing::{debug, info, info_span};

use crate::common::{Curve, OptionContract};
use crate::error::Result;
use crate::simulation::config::SimulationConfig;
use crate::simulation::greek_engine::{first_derivative, second_derivative};
use crate::simulation::monte_carlo::{MonteCarloEngine, SweepResult};
use crate::simulation::path_generator::{RandomPathGenerator, WienerIncrements};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// nothing simulated yet
    Configured,
    /// curves hold the results of the last run
    Completed,
    /// curves and increments were cleared, the next run draws new randomness
    Refreshed,
}

/// Summary of a run against a reference price curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStatistics {
    pub nr_paths: usize,
    pub elapsed: Duration,
    pub max_pricing_error: f64,
    pub max_standard_error: f64,
    pub max_standard_deviation: f64,
    pub minimum_simulations: u64,
}

/// Monte Carlo prices, deltas and gammas of one contract over a grid of initial
/// stock prices.
///
/// The increments are drawn once and reused by every `run` until a `refresh`
/// (or a new path count) discards them.
pub struct MonteCarloSimulation {
    contract: OptionContract,
    config: SimulationConfig,
    rn_generator: RandomPathGenerator,
    increments: Option<WienerIncrements>,
    sweep: SweepResult,
    deltas: Curve,
    gammas: Curve,
    state: RunState,
}

impl MonteCarloSimulation {
    pub fn new(contract: OptionContract, config: SimulationConfig) -> Self {
        let rn_generator = match config.seed() {
            Some(seed_nr) => RandomPathGenerator::with_seed(seed_nr),
            None => RandomPathGenerator::new(),
        };
        Self {
            contract,
            config,
            rn_generator,
            increments: None,
            sweep: SweepResult::default(),
            deltas: Curve::new(),
            gammas: Curve::new(),
            state: RunState::Configured,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let span = info_span!(
            "mc_run",
            scheme = self.config.scheme().name(),
            style = ?self.contract.style,
            option_type = ?self.contract.option_type,
            nr_paths = self.config.nr_paths(),
        );
        let _guard = span.enter();

        let nr_steps = self.config.nr_steps();
        let nr_paths = self.config.nr_paths();
        let dt = self.contract.time_to_expiration / nr_steps as f64;
        let rn_generator = &mut self.rn_generator;
        let increments = self.increments.get_or_insert_with(|| {
            debug!(nr_steps, nr_paths, "drawing increments");
            rn_generator.generate(nr_steps, nr_paths, dt)
        });

        let sweep = MonteCarloEngine::new(nr_paths, nr_steps)
            .parallel(self.config.parallel())
            .sweep(&self.contract, self.config.grid(), increments, self.config.scheme());
        let deltas = first_derivative(&sweep.prices)?;
        let gammas = second_derivative(&sweep.prices)?;

        info!(elapsed = ?sweep.elapsed, points = sweep.prices.len(), "run completed");
        self.sweep = sweep;
        self.deltas = deltas;
        self.gammas = gammas;
        self.state = RunState::Completed;
        Ok(())
    }

    /// Discards all results and the increments.
    pub fn refresh(&mut self) {
        self.increments = None;
        self.sweep = SweepResult::default();
        self.deltas = Curve::new();
        self.gammas = Curve::new();
        if self.state != RunState::Configured {
            self.state = RunState::Refreshed;
        }
    }

    /// Runs again on new increments.
    pub fn rerun(&mut self) -> Result<()> {
        self.refresh();
        self.run()
    }

    /// Changes the number of simulations; the results of earlier runs are discarded.
    pub fn set_path_count(&mut self, nr_paths: usize) -> Result<()> {
        self.config = self.config.with_nr_paths(nr_paths)?;
        self.refresh();
        Ok(())
    }

    /// Raises the number of simulations to the one needed for the configured
    /// accuracy (at most `max_paths`) and reruns. Returns the number of simulations
    /// the results are based on.
    pub fn refine(&mut self, max_paths: usize) -> Result<usize> {
        if self.state != RunState::Completed {
            self.run()?;
        }
        let needed = usize::try_from(self.minimum_simulations_needed()?).unwrap_or(usize::MAX);
        let target = needed.min(max_paths);
        if target > self.config.nr_paths() {
            info!(
                from = self.config.nr_paths(),
                to = target,
                needed,
                "refining number of simulations"
            );
            self.set_path_count(target)?;
            self.run()?;
        }
        Ok(self.config.nr_paths())
    }

    pub fn prices(&self) -> &Curve {
        &self.sweep.prices
    }

    pub fn deltas(&self) -> &Curve {
        &self.deltas
    }

    pub fn gammas(&self) -> &Curve {
        &self.gammas
    }

    pub fn std_devs(&self) -> &Curve {
        &self.sweep.std_devs
    }

    pub fn std_errors(&self) -> &Curve {
        &self.sweep.std_errors
    }

    /// Simulated price for the initial stock price `s`, if `s` is on the grid.
    pub fn price_at(&self, s: f64) -> Option<f64> {
        self.sweep.prices.get(s)
    }

    pub fn elapsed(&self) -> Duration {
        self.sweep.elapsed
    }

    pub fn max_standard_error(&self) -> f64 {
        self.sweep.std_errors.max_value()
    }

    pub fn max_standard_deviation(&self) -> f64 {
        self.sweep.std_devs.max_value()
    }

    /// Simulations needed so that every price of the curve is within the
    /// configured dollar accuracy at the configured confidence level.
    pub fn minimum_simulations_needed(&self) -> Result<u64> {
        Ok(risk::minimum_simulations(
            self.max_standard_deviation(),
            self.config.confidence_level(),
            self.config.dollar_accuracy(),
        )?)
    }

    pub fn max_pricing_error(&self, reference: &Curve) -> Result<f64> {
        self.sweep.prices.max_abs_difference(reference)
    }

    pub fn statistics(&self, reference: &Curve) -> Result<RunStatistics> {
        Ok(RunStatistics {
            nr_paths: self.config.nr_paths(),
            elapsed: self.elapsed(),
            max_pricing_error: self.max_pricing_error(reference)?,
            max_standard_error: self.max_standard_error(),
            max_standard_deviation: self.max_standard_deviation(),
            minimum_simulations: self.minimum_simulations_needed()?,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{OptionStyle, OptionType};
    use crate::error::PricingError;
    use crate::simulation::gbm::SimulationScheme;
    use assert_approx_eq::assert_approx_eq;

    fn contract() -> OptionContract {
        OptionContract::new(
            50.0,
            1.0,
            0.05,
            0.25,
            0.01,
            OptionType::Call,
            OptionStyle::European,
        )
        .unwrap()
    }

    fn config(seed_nr: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .grid(45.0, 55.0, 1.0)
            .nr_steps(20)
            .nr_paths(2_000)
            .dollar_accuracy(0.05)
            .scheme(SimulationScheme::Exact)
            .seed(seed_nr)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_before_run() {
        let sim = MonteCarloSimulation::new(contract(), config(1));
        assert_eq!(sim.state(), RunState::Configured);
        assert!(sim.prices().is_empty());
        assert!(sim.deltas().is_empty());
        assert!(sim.gammas().is_empty());
        assert_eq!(sim.max_standard_error(), 0.0);
        assert_eq!(sim.price_at(50.0), None);
    }

    #[test]
    fn run_fills_curves() {
        let mut sim = MonteCarloSimulation::new(contract(), config(1));
        sim.run().unwrap();

        assert_eq!(sim.state(), RunState::Completed);
        assert_eq!(sim.prices().len(), 10);
        assert_eq!(sim.std_devs().len(), 10);
        assert_eq!(sim.std_errors().len(), 10);
        assert_eq!(sim.deltas().len(), 8);
        assert_eq!(sim.gammas().len(), 8);
        assert!(sim.price_at(50.0).unwrap() > 0.0);
        assert!(sim.max_standard_error() > 0.0);
        assert!(sim.max_standard_deviation() > sim.max_standard_error());
        // call deltas lie in [0, 1]
        assert!(sim.deltas().values().all(|d| (0.0..=1.0).contains(d)));
    }

    #[test]
    fn run_reuses_increments() {
        let mut sim = MonteCarloSimulation::new(contract(), config(3));
        sim.run().unwrap();
        let first = sim.prices().clone();
        sim.run().unwrap();
        assert_eq!(&first, sim.prices());
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut sim = MonteCarloSimulation::new(contract(), config(5));
        sim.run().unwrap();
        sim.refresh();
        assert_eq!(sim.state(), RunState::Refreshed);
        assert!(sim.prices().is_empty());
        sim.refresh();
        assert_eq!(sim.state(), RunState::Refreshed);
        assert!(sim.std_devs().is_empty());
        assert!(sim.deltas().is_empty());
        assert_eq!(sim.elapsed(), Duration::ZERO);
    }

    #[test]
    fn rerun_draws_new_randomness() {
        let mut sim = MonteCarloSimulation::new(contract(), config(7));
        sim.run().unwrap();
        let first = sim.price_at(50.0).unwrap();
        sim.rerun().unwrap();
        let second = sim.price_at(50.0).unwrap();
        assert_ne!(first, second);
        // both are estimates of the same price
        assert_approx_eq!(first, second, 1.5);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = MonteCarloSimulation::new(contract(), config(11));
        let mut b = MonteCarloSimulation::new(contract(), config(11));
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(a.prices(), b.prices());
        assert_eq!(a.gammas(), b.gammas());
    }

    #[test]
    fn path_count() {
        let mut sim = MonteCarloSimulation::new(contract(), config(13));
        sim.run().unwrap();
        assert!(sim.set_path_count(1).is_err());
        assert_eq!(sim.config().nr_paths(), 2_000);

        sim.set_path_count(500).unwrap();
        assert!(sim.prices().is_empty());
        sim.run().unwrap();
        assert_eq!(sim.config().nr_paths(), 500);
        assert_eq!(sim.prices().len(), 10);
    }

    #[test]
    fn refine_raises_path_count() {
        let mut sim = MonteCarloSimulation::new(contract(), config(17));
        sim.run().unwrap();
        let needed = sim.minimum_simulations_needed().unwrap();
        // a standard deviation of a few dollars at $0.05 accuracy needs far more than 2000 paths
        assert!(needed > 2_000);

        let nr_paths = sim.refine(4_000).unwrap();
        assert_eq!(nr_paths, 4_000);
        assert_eq!(sim.config().nr_paths(), 4_000);
        assert_eq!(sim.state(), RunState::Completed);
    }

    #[test]
    fn statistics_against_reference() {
        let mut sim = MonteCarloSimulation::new(contract(), config(19));
        sim.run().unwrap();
        let zero = Curve::from_fn(sim.config().grid(), |_| 0.0);
        let stats = sim.statistics(&zero).unwrap();

        assert_eq!(stats.nr_paths, 2_000);
        assert_eq!(stats.max_pricing_error, sim.prices().max_value());
        assert_eq!(stats.max_standard_error, sim.max_standard_error());
        assert_eq!(
            stats.minimum_simulations,
            sim.minimum_simulations_needed().unwrap()
        );

        let other = Curve::from_fn(&crate::common::PriceGrid::new(1.0, 2.0, 0.5).unwrap(), |s| s);
        assert_eq!(sim.max_pricing_error(&other), Err(PricingError::DomainMismatch));
    }
}
