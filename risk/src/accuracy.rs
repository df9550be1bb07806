use crate::error::RiskError;

// Abramowitz & Stegun 26.2.23
const C0: f64 = 2.515517;
const C1: f64 = 0.802853;
const C2: f64 = 0.010328;
const D1: f64 = 1.432788;
const D2: f64 = 0.189269;
const D3: f64 = 0.001308;

/// Upper tail quantile `x` with `Q(x) = p` for `0 < p <= 0.5`.
fn upper_tail_quantile(p: f64) -> f64 {
    let t = (-2.0 * p.ln()).sqrt();
    let numerator = C0 + t * (C1 + t * C2);
    let denominator = 1.0 + t * (D1 + t * (D2 + t * D3));
    t - numerator / denominator
}

/// The inverse of the standard normal cumulative distribution function.
///
/// Rational approximation of Abramowitz & Stegun (26.2.23), the absolute error
/// is below 4.5e-4 on the whole open unit interval.
/// See https://en.wikipedia.org/wiki/Normal_distribution#Generating_values_from_normal_distribution
pub fn inverse_normal_cdf(p: f64) -> Result<f64, RiskError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(RiskError::domain("probability", p, "(0, 1)"));
    }
    if p < 0.5 {
        // Φ⁻¹(p) = -Φ⁻¹(1 - p)
        Ok(-upper_tail_quantile(p))
    } else {
        Ok(upper_tail_quantile(1.0 - p))
    }
}

/// Minimal number of simulations such that the Monte Carlo estimate lies within
/// `dollar_accuracy` of the true value with probability `confidence_level`:
/// '''math
/// N = (sd * z_{1 - alpha/2} / accuracy)^2, alpha = 1 - confidence_level
/// '''
/// rounded to the nearest integer.
pub fn minimum_simulations(
    max_std_dev: f64,
    confidence_level: f64,
    dollar_accuracy: f64,
) -> Result<u64, RiskError> {
    if !(max_std_dev >= 0.0 && max_std_dev.is_finite()) {
        return Err(RiskError::domain("standard deviation", max_std_dev, "[0, inf)"));
    }
    if !(dollar_accuracy > 0.0 && dollar_accuracy.is_finite()) {
        return Err(RiskError::domain("accuracy", dollar_accuracy, "(0, inf)"));
    }
    let alpha = 1.0 - confidence_level;
    let z = inverse_normal_cdf(1.0 - alpha / 2.0)?;

    Ok((max_std_dev * z / dollar_accuracy).powi(2).round() as u64)
}
