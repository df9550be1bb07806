use std::marker::PhantomData;

use ndarray::ArrayView1;

use crate::simulation::gbm::{GeometricBrownianMotion, StepScheme};

pub type Path = Vec<f64>;

/// Two stock price paths driven by the same increments with opposite sign.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathPair {
    pub plus: Path,
    pub minus: Path,
}

impl PathPair {
    pub fn with_capacity(nr_samples: usize) -> Self {
        Self {
            plus: Vec::with_capacity(nr_samples),
            minus: Vec::with_capacity(nr_samples),
        }
    }
}

/// Antithetic variates: for every row of Wiener increments `dW` a path is driven
/// by `dW` and its mirror by `-dW`, which lowers the variance of the averaged payoff.
/// https://en.wikipedia.org/wiki/Antithetic_variates
pub struct AntitheticPathSimulator<S: StepScheme> {
    gbm: GeometricBrownianMotion,
    nr_steps: usize,
    _scheme: PhantomData<S>,
}

impl<S: StepScheme> AntitheticPathSimulator<S> {
    pub fn new(gbm: GeometricBrownianMotion, nr_steps: usize) -> Self {
        Self {
            gbm,
            nr_steps,
            _scheme: PhantomData,
        }
    }

    pub fn nr_steps(&self) -> usize {
        self.nr_steps
    }

    pub fn simulate(&self, s0: f64, increments: ArrayView1<f64>) -> PathPair {
        let mut pair = PathPair::with_capacity(self.nr_steps + 1);
        self.simulate_into(s0, increments, &mut pair);
        pair
    }

    /// Fills `pair` with `nr_steps + 1` samples per path, both starting at `s0`.
    /// Buffers of `pair` are reused across calls.
    ///
    /// Panics if the row does not hold `nr_steps + 1` increments.
    pub fn simulate_into(&self, s0: f64, increments: ArrayView1<f64>, pair: &mut PathPair) {
        assert_eq!(
            increments.len(),
            self.nr_steps + 1,
            "increment row does not match the number of time steps"
        );
        pair.plus.clear();
        pair.minus.clear();
        pair.plus.push(s0);
        pair.minus.push(s0);

        let (mut plus, mut minus) = (s0, s0);
        let dt = self.gbm.dt();
        for (i, dw) in increments.iter().take(self.nr_steps).enumerate() {
            let t = i as f64 * dt;
            plus = S::step(&self.gbm, t, plus, *dw);
            minus = S::step(&self.gbm, t, minus, -dw);
            pair.plus.push(plus);
            pair.minus.push(minus);
        }
    }
}
