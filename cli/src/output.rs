//! Curve files and the printed summary.
//!
//! Every curve is written as one `key, value` line per grid point in ascending key
//! order, so the files can be read back by any plotting script.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use pricing::analytic::FairValue;
use pricing::common::{Curve, OptionContract};
use pricing::simulation::{MonteCarloSimulation, RunStatistics, SimulationConfig, SimulationScheme};
use tracing::debug;

use crate::Result;

pub fn write_curve(path: &Path, curve: &Curve) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (key, value) in curve {
        writeln!(writer, "{}, {}", key, value)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), points = curve.len(), "curve written");
    Ok(())
}

pub fn write_fair_value(dir: &Path, fair_value: &FairValue) -> Result<()> {
    fs::create_dir_all(dir)?;
    write_curve(&dir.join("option_price.txt"), &fair_value.prices)?;
    write_curve(&dir.join("option_delta.txt"), &fair_value.deltas)?;
    write_curve(&dir.join("option_gamma.txt"), &fair_value.gammas)?;
    if let Some(sensitivities) = &fair_value.sensitivities {
        write_curve(&dir.join("option_theta.txt"), &sensitivities.thetas)?;
        write_curve(&dir.join("option_vega.txt"), &sensitivities.vegas)?;
        write_curve(&dir.join("option_rho.txt"), &sensitivities.rhos)?;
    }
    Ok(())
}

/// File name prefix of the curves of a scheme.
pub fn scheme_prefix(scheme: SimulationScheme) -> &'static str {
    match scheme {
        SimulationScheme::Euler => "MC",
        SimulationScheme::Exact => "MC_exact",
    }
}

/// Writes prices, deltas, gammas and standard deviations of a finished simulation,
/// returns the paths written.
pub fn write_simulation(dir: &Path, sim: &MonteCarloSimulation) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let prefix = scheme_prefix(sim.config().scheme());
    let curves = [
        ("prices", sim.prices()),
        ("deltas", sim.deltas()),
        ("gammas", sim.gammas()),
        ("stddev", sim.std_devs()),
    ];
    let mut written = Vec::with_capacity(curves.len());
    for (name, curve) in curves {
        let path = dir.join(format!("{}_{}.txt", prefix, name));
        write_curve(&path, curve)?;
        written.push(path);
    }
    Ok(written)
}

pub fn title(contract: &OptionContract, config: &SimulationConfig) -> String {
    format!(
        "Simulations with parameters: \n(T, r, D, sigma, NT, M) = ({}, {}, {})",
        contract,
        config.nr_steps(),
        config.nr_paths(),
    )
}

pub fn write_title(dir: &Path, contract: &OptionContract, config: &SimulationConfig) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("title.txt"), title(contract, config))?;
    Ok(())
}

/// Side by side statistics of the simulated schemes.
pub fn format_summary(reports: &[(SimulationScheme, RunStatistics)]) -> String {
    let rule = "----------------------------------";
    let mut out = String::new();
    let _ = writeln!(out, "{rule}\nSummary of Monte Carlo simulation:\n{rule}");
    for (scheme, stats) in reports {
        let name = match scheme {
            SimulationScheme::Euler => "Euler method:",
            SimulationScheme::Exact => "Exact method:",
        };
        let _ = writeln!(out, "{name}");
        let _ = writeln!(out, "Paths simulated:\t{}", stats.nr_paths);
        let _ = writeln!(out, "Max pricing error:\t{}", stats.max_pricing_error);
        let _ = writeln!(out, "Max standard error:\t{}", stats.max_standard_error);
        let _ = writeln!(out, "Max standard deviation:\t{}", stats.max_standard_deviation);
        let _ = writeln!(out, "Min simulations needed:\t{}", stats.minimum_simulations);
        let _ = writeln!(out, "Time elapsed:\t\t{:.3}s", stats.elapsed.as_secs_f64());
        let _ = writeln!(out, "{rule}");
    }
    out
}
