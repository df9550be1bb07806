//! Convergence command implementation
//!
//! Doubles the number of simulations and measures run time and maximum pricing
//! error of both schemes for every count.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use pricing::analytic::FairValue;
use tracing::info;

use crate::commands::simulations;
use crate::config::PricerConfig;
use crate::{CliError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceRow {
    pub nr_paths: usize,
    pub euler_elapsed: Duration,
    pub euler_error: f64,
    pub exact_elapsed: Duration,
    pub exact_error: f64,
}

impl ConvergenceRow {
    /// `M, t, e, t, e` with times in seconds.
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.nr_paths,
            self.euler_elapsed.as_secs_f64(),
            self.euler_error,
            self.exact_elapsed.as_secs_f64(),
            self.exact_error
        )
    }
}

/// Run the convergence command for path counts `start, 2 start, 4 start, ...` below `limit`.
pub fn run(config: &PricerConfig, start: usize, limit: usize, output: Option<&Path>) -> Result<Vec<ConvergenceRow>> {
    if start < 2 {
        return Err(CliError::Config(format!("start must be at least 2, got {}", start)));
    }
    if limit <= start {
        return Err(CliError::Config(format!("limit {} must exceed start {}", limit, start)));
    }

    let contract = config.contract()?;
    let mut sims = simulations(config)?;
    let (euler, exact) = match sims.as_mut_slice() {
        [euler, exact] => (euler, exact),
        _ => return Err(CliError::Config("expected one simulation per scheme".to_string())),
    };
    let reference = FairValue::generate(&contract, euler.config().grid()).prices;

    let mut rows = Vec::new();
    let mut nr_paths = start;
    while nr_paths < limit {
        info!("Number of simulations: {}", nr_paths);
        euler.set_path_count(nr_paths)?;
        exact.set_path_count(nr_paths)?;
        euler.run()?;
        exact.run()?;
        rows.push(ConvergenceRow {
            nr_paths,
            euler_elapsed: euler.elapsed(),
            euler_error: euler.max_pricing_error(&reference)?,
            exact_elapsed: exact.elapsed(),
            exact_error: exact.max_pricing_error(&reference)?,
        });
        nr_paths = nr_paths.saturating_mul(2);
    }

    for row in &rows {
        println!("{}", row.to_line());
    }
    if let Some(path) = output {
        let mut writer = BufWriter::new(File::create(path)?);
        for row in &rows {
            writeln!(writer, "{}", row.to_line())?;
        }
        writer.flush()?;
        info!("Measurements written to {}", path.display());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> PricerConfig {
        let mut config = PricerConfig::default();
        config.simulation.s_min = 45.0;
        config.simulation.s_max = 55.0;
        config.simulation.ds = 1.0;
        config.simulation.time_steps = 10;
        config.simulation.seed = Some(23);
        config
    }

    #[test]
    fn doubles_up_to_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measurements.txt");

        let rows = run(&small_config(), 100, 1_000, Some(&path)).unwrap();

        let counts: Vec<usize> = rows.iter().map(|row| row.nr_paths).collect();
        assert_eq!(counts, vec![100, 200, 400, 800]);
        assert!(rows.iter().all(|row| row.euler_error > 0.0 && row.exact_error > 0.0));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert!(content.starts_with("100, "));
        assert_eq!(content.lines().next().unwrap().split(", ").count(), 5);
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(matches!(run(&small_config(), 1, 100, None), Err(CliError::Config(_))));
        assert!(matches!(run(&small_config(), 100, 100, None), Err(CliError::Config(_))));
    }
}
