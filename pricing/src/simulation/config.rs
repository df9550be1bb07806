use crate::common::PriceGrid;
use crate::error::{PricingError, Result};
use crate::simulation::gbm::SimulationScheme;

pub const DEFAULT_S_MIN: f64 = 10.0;
pub const DEFAULT_S_MAX: f64 = 100.0;
pub const DEFAULT_DS: f64 = 0.5;
pub const DEFAULT_NR_STEPS: usize = 100;
pub const DEFAULT_NR_PATHS: usize = 100_000;
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
pub const DEFAULT_DOLLAR_ACCURACY: f64 = 0.01;

/// Parameters of a Monte Carlo run over a grid of initial stock prices.
/// Built and validated by [`SimulationConfigBuilder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    grid: PriceGrid,
    nr_steps: usize,
    nr_paths: usize,
    confidence_level: f64,
    dollar_accuracy: f64,
    scheme: SimulationScheme,
    parallel: bool,
    seed_nr: Option<u64>,
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    pub fn grid(&self) -> &PriceGrid {
        &self.grid
    }

    pub fn nr_steps(&self) -> usize {
        self.nr_steps
    }

    pub fn nr_paths(&self) -> usize {
        self.nr_paths
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn dollar_accuracy(&self) -> f64 {
        self.dollar_accuracy
    }

    pub fn scheme(&self) -> SimulationScheme {
        self.scheme
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed_nr
    }

    /// Same configuration with another number of simulations.
    pub fn with_nr_paths(self, nr_paths: usize) -> Result<Self> {
        validate_nr_paths(nr_paths)?;
        Ok(Self { nr_paths, ..self })
    }

    pub fn with_scheme(self, scheme: SimulationScheme) -> Self {
        Self { scheme, ..self }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: PriceGrid::new_unchecked(DEFAULT_S_MIN, DEFAULT_S_MAX, DEFAULT_DS),
            nr_steps: DEFAULT_NR_STEPS,
            nr_paths: DEFAULT_NR_PATHS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            dollar_accuracy: DEFAULT_DOLLAR_ACCURACY,
            scheme: SimulationScheme::default(),
            parallel: true,
            seed_nr: None,
        }
    }
}

fn validate_nr_paths(nr_paths: usize) -> Result<()> {
    if nr_paths < 2 {
        return Err(PricingError::invalid(
            "nr_paths",
            format!("{nr_paths} simulations, at least 2 are needed"),
        ));
    }
    Ok(())
}

/// Fluent construction of a [`SimulationConfig`]; unset fields take the defaults.
///
/// ```
/// use pricing::simulation::{SimulationConfig, SimulationScheme};
///
/// let config = SimulationConfig::builder()
///     .grid(40.0, 60.0, 1.0)
///     .nr_steps(50)
///     .nr_paths(10_000)
///     .scheme(SimulationScheme::Exact)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(config.grid().len(), 20);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    grid: Option<(f64, f64, f64)>,
    nr_steps: Option<usize>,
    nr_paths: Option<usize>,
    confidence_level: Option<f64>,
    dollar_accuracy: Option<f64>,
    scheme: SimulationScheme,
    parallel: Option<bool>,
    seed_nr: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Initial stock prices `s_min, s_min + ds, ...` below `s_max`.
    pub fn grid(mut self, s_min: f64, s_max: f64, ds: f64) -> Self {
        self.grid = Some((s_min, s_max, ds));
        self
    }

    pub fn nr_steps(mut self, nr_steps: usize) -> Self {
        self.nr_steps = Some(nr_steps);
        self
    }

    pub fn nr_paths(mut self, nr_paths: usize) -> Self {
        self.nr_paths = Some(nr_paths);
        self
    }

    pub fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }

    pub fn dollar_accuracy(mut self, dollar_accuracy: f64) -> Self {
        self.dollar_accuracy = Some(dollar_accuracy);
        self
    }

    pub fn scheme(mut self, scheme: SimulationScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Reproducible increments; without a seed the generator draws from OS entropy.
    pub fn seed(mut self, seed_nr: u64) -> Self {
        self.seed_nr = Some(seed_nr);
        self
    }

    pub fn build(self) -> Result<SimulationConfig> {
        let (s_min, s_max, ds) = self
            .grid
            .unwrap_or((DEFAULT_S_MIN, DEFAULT_S_MAX, DEFAULT_DS));
        let grid = PriceGrid::new(s_min, s_max, ds)?;
        // centered differences need a neighbour on both sides
        if grid.len() < 3 {
            return Err(PricingError::InsufficientPoints(grid.len()));
        }

        let nr_steps = self.nr_steps.unwrap_or(DEFAULT_NR_STEPS);
        if nr_steps == 0 {
            return Err(PricingError::invalid("nr_steps", "at least one time step is needed"));
        }
        let nr_paths = self.nr_paths.unwrap_or(DEFAULT_NR_PATHS);
        validate_nr_paths(nr_paths)?;

        let confidence_level = self.confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL);
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(PricingError::invalid(
                "confidence_level",
                format!("{confidence_level} is not in (0, 1)"),
            ));
        }
        let dollar_accuracy = self.dollar_accuracy.unwrap_or(DEFAULT_DOLLAR_ACCURACY);
        if !(dollar_accuracy > 0.0 && dollar_accuracy.is_finite()) {
            return Err(PricingError::invalid(
                "dollar_accuracy",
                format!("{dollar_accuracy} must be positive"),
            ));
        }

        Ok(SimulationConfig {
            grid,
            nr_steps,
            nr_paths,
            confidence_level,
            dollar_accuracy,
            scheme: self.scheme,
            parallel: self.parallel.unwrap_or(true),
            seed_nr: self.seed_nr,
        })
    }
}
