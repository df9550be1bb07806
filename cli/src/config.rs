//! Pricer configuration from a TOML file with environment variable overrides.
//!
//! ```toml
//! output_dir = "data"
//! log_level = "info"
//!
//! [contract]
//! strike = 50.0
//! maturity = 1.0
//! rate = 0.05
//! volatility = 0.25
//! dividend = 0.01
//! option_type = "call"
//! style = "european"
//!
//! [simulation]
//! s_min = 10.0
//! s_max = 100.0
//! ds = 0.5
//! time_steps = 100
//! path_count = 100000
//! ```

use std::path::{Path, PathBuf};

use pricing::common::{OptionContract, OptionStyle, OptionType};
use pricing::simulation::{config as defaults, SimulationConfig, SimulationScheme};
use serde::Deserialize;

use crate::{CliError, Result};

pub const ENV_OUTPUT_DIR: &str = "MC_PRICER_OUTPUT_DIR";
pub const ENV_LOG_LEVEL: &str = "MC_PRICER_LOG_LEVEL";
pub const ENV_PATHS: &str = "MC_PRICER_PATHS";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ContractSection {
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub volatility: f64,
    pub dividend: f64,
    pub option_type: OptionType,
    pub style: OptionStyle,
}

impl Default for ContractSection {
    fn default() -> Self {
        Self {
            strike: 50.0,
            maturity: 1.0,
            rate: 0.05,
            volatility: 0.25,
            dividend: 0.01,
            option_type: OptionType::Call,
            style: OptionStyle::European,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub s_min: f64,
    pub s_max: f64,
    pub ds: f64,
    pub time_steps: usize,
    pub path_count: usize,
    pub confidence_level: f64,
    pub dollar_accuracy: f64,
    pub parallel: bool,
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            s_min: defaults::DEFAULT_S_MIN,
            s_max: defaults::DEFAULT_S_MAX,
            ds: defaults::DEFAULT_DS,
            time_steps: defaults::DEFAULT_NR_STEPS,
            path_count: defaults::DEFAULT_NR_PATHS,
            confidence_level: defaults::DEFAULT_CONFIDENCE_LEVEL,
            dollar_accuracy: defaults::DEFAULT_DOLLAR_ACCURACY,
            parallel: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PricerConfig {
    pub contract: ContractSection,
    pub simulation: SimulationSection,
    /// directory the curves are written to
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            contract: ContractSection::default(),
            simulation: SimulationSection::default(),
            output_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
        }
    }
}

impl PricerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The file at `path` if one is given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_env_override(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies the overrides `lookup` finds for the `MC_PRICER_*` keys.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(output_dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }
        if let Some(paths) = lookup(ENV_PATHS) {
            self.simulation.path_count = paths
                .trim()
                .parse()
                .map_err(|e| CliError::Config(format!("{ENV_PATHS}='{paths}': {e}")))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(CliError::Config(format!(
                "invalid log_level '{}', valid values: {:?}",
                self.log_level, LOG_LEVELS
            )));
        }
        self.contract()?;
        self.simulation_config(SimulationScheme::Euler)?;
        Ok(())
    }

    pub fn contract(&self) -> Result<OptionContract> {
        let c = &self.contract;
        Ok(OptionContract::new(
            c.strike,
            c.maturity,
            c.rate,
            c.volatility,
            c.dividend,
            c.option_type,
            c.style,
        )?)
    }

    pub fn simulation_config(&self, scheme: SimulationScheme) -> Result<SimulationConfig> {
        let s = &self.simulation;
        let mut builder = SimulationConfig::builder()
            .grid(s.s_min, s.s_max, s.ds)
            .nr_steps(s.time_steps)
            .nr_paths(s.path_count)
            .confidence_level(s.confidence_level)
            .dollar_accuracy(s.dollar_accuracy)
            .scheme(scheme)
            .parallel(s.parallel);
        if let Some(seed_nr) = s.seed {
            builder = builder.seed(seed_nr);
        }
        Ok(builder.build()?)
    }
}
