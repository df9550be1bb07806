use std::time::{Duration, Instant};

use rayon::prelude::*;
use risk::PayoffAccumulator;
use tracing::debug;

use crate::common::{Curve, OptionContract, PriceGrid};
use crate::simulation::antithetic::{AntitheticPathSimulator, PathPair};
use crate::simulation::gbm::{Euler, Exact, GeometricBrownianMotion, SimulationScheme, StepScheme};
use crate::simulation::path_generator::WienerIncrements;
use crate::simulation::payoff::PayoffEvaluator;

/// Curves of one sweep over the grid of initial stock prices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepResult {
    /// discounted mean payoff
    pub prices: Curve,
    /// standard deviation of the (undiscounted) antithetic payoffs
    pub std_devs: Curve,
    pub std_errors: Curve,
    /// wall-clock time of the whole sweep
    pub elapsed: Duration,
}

/// Prices a contract for every initial stock price of a grid. Every grid point
/// reuses the same rows of Wiener increments.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloEngine {
    nr_paths: usize,
    nr_steps: usize,
    parallel: bool,
}

impl MonteCarloEngine {
    pub fn new(nr_paths: usize, nr_steps: usize) -> Self {
        Self {
            nr_paths,
            nr_steps,
            parallel: true,
        }
    }

    /// Fan out over the grid points with rayon (default) or sweep on the calling thread.
    pub fn parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    pub fn nr_paths(&self) -> usize {
        self.nr_paths
    }

    pub fn nr_steps(&self) -> usize {
        self.nr_steps
    }

    /// Panics if `increments` holds fewer than `nr_paths` rows or rows of the wrong length.
    pub fn sweep(
        &self,
        contract: &OptionContract,
        grid: &PriceGrid,
        increments: &WienerIncrements,
        scheme: SimulationScheme,
    ) -> SweepResult {
        assert!(
            increments.nr_paths() >= self.nr_paths,
            "{} rows of increments for {} paths",
            increments.nr_paths(),
            self.nr_paths
        );
        match scheme {
            SimulationScheme::Euler => self.sweep_with::<Euler>(contract, grid, increments),
            SimulationScheme::Exact => self.sweep_with::<Exact>(contract, grid, increments),
        }
    }

    fn sweep_with<S: StepScheme>(
        &self,
        contract: &OptionContract,
        grid: &PriceGrid,
        increments: &WienerIncrements,
    ) -> SweepResult {
        let start = Instant::now();

        let gbm = GeometricBrownianMotion::risk_neutral(contract, self.nr_steps);
        let simulator = AntitheticPathSimulator::<S>::new(gbm, self.nr_steps);
        let evaluator = PayoffEvaluator::new(contract);

        let keys: Vec<f64> = grid.keys().collect();
        let estimate = |s0: &f64| self.estimate(&simulator, &evaluator, *s0, increments);
        let estimates: Vec<PayoffAccumulator> = if self.parallel {
            keys.par_iter().map(estimate).collect()
        } else {
            keys.iter().map(estimate).collect()
        };

        let disc_factor = contract.discount_factor();
        let prices = Curve::from_grid(
            grid,
            estimates.iter().map(|acc| disc_factor * acc.mean().unwrap_or(0.0)),
        );
        let std_devs = Curve::from_grid(
            grid,
            estimates.iter().map(|acc| acc.std_dev().unwrap_or(0.0)),
        );
        let std_errors = Curve::from_grid(
            grid,
            estimates.iter().map(|acc| acc.std_error().unwrap_or(0.0)),
        );

        let elapsed = start.elapsed();
        debug!(
            scheme = S::SCHEME.name(),
            points = keys.len(),
            nr_paths = self.nr_paths,
            ?elapsed,
            "sweep done"
        );

        SweepResult {
            prices,
            std_devs,
            std_errors,
            elapsed,
        }
    }

    /// Moments of the antithetic payoffs of `nr_paths` pairs starting at `s0`.
    pub fn estimate<S: StepScheme>(
        &self,
        simulator: &AntitheticPathSimulator<S>,
        evaluator: &PayoffEvaluator,
        s0: f64,
        increments: &WienerIncrements,
    ) -> PayoffAccumulator {
        let mut pair = PathPair::with_capacity(self.nr_steps + 1);
        increments
            .rows()
            .take(self.nr_paths)
            .map(|row| {
                simulator.simulate_into(s0, row, &mut pair);
                evaluator.evaluate_pair(&pair)
            })
            .collect()
    }
}
