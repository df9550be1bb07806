use crate::common::OptionContract;

/// Model params for the SDE
/// '''math
/// dS_t / S_t = mu dt + sigma dW_t
/// ''', where $dW_t ~ N(0, sqrt(dt))$
/// https://en.wikipedia.org/wiki/Geometric_Brownian_motion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricBrownianMotion {
    /// drift term
    mu: f64,
    /// volatility
    sigma: f64,
    /// change in time
    dt: f64,
}

impl GeometricBrownianMotion {
    pub fn new(drift: f64, vola: f64, dt: f64) -> Self {
        Self {
            mu: drift,
            sigma: vola,
            dt,
        }
    }

    /// Under the risk neutral measure the stock drifts with the cost of carry `r - D`.
    pub fn risk_neutral(contract: &OptionContract, nr_steps: usize) -> Self {
        let dt = contract.time_to_expiration / nr_steps as f64;
        Self::new(contract.cost_of_carry(), contract.vola, dt)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn drift(&self, _t: f64, st: f64) -> f64 {
        self.mu * st
    }

    #[inline]
    pub fn diffusion(&self, _t: f64, st: f64) -> f64 {
        self.sigma * st
    }

    /// Explicit Euler step, `dw` is the Wiener increment over `dt`.
    #[inline]
    pub fn step(&self, t: f64, st: f64, dw: f64) -> f64 {
        st + self.drift(t, st) * self.dt + self.diffusion(t, st) * dw
    }

    /// Step along the closed-form solution, free of discretization bias.
    /// See https://en.wikipedia.org/wiki/Geometric_Brownian_motion
    #[inline]
    pub fn step_analytic(&self, st: f64, dw: f64) -> f64 {
        let ret = self.dt * (self.mu - self.sigma.powi(2) / 2.0) + self.sigma * dw;
        st * ret.exp()
    }
}

/// Discretization of the SDE, chosen per simulator at compile time.
pub trait StepScheme: Send + Sync {
    const SCHEME: SimulationScheme;

    fn step(gbm: &GeometricBrownianMotion, t: f64, st: f64, dw: f64) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Euler;

#[derive(Clone, Copy, Debug, Default)]
pub struct Exact;

impl StepScheme for Euler {
    const SCHEME: SimulationScheme = SimulationScheme::Euler;

    #[inline]
    fn step(gbm: &GeometricBrownianMotion, t: f64, st: f64, dw: f64) -> f64 {
        gbm.step(t, st, dw)
    }
}

impl StepScheme for Exact {
    const SCHEME: SimulationScheme = SimulationScheme::Exact;

    #[inline]
    fn step(gbm: &GeometricBrownianMotion, _t: f64, st: f64, dw: f64) -> f64 {
        gbm.step_analytic(st, dw)
    }
}

/// Runtime selector for the discretization of a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SimulationScheme {
    #[default]
    Euler,
    Exact,
}

impl SimulationScheme {
    pub fn name(&self) -> &'static str {
        match self {
            SimulationScheme::Euler => "euler",
            SimulationScheme::Exact => "exact",
        }
    }
}
