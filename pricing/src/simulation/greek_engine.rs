use crate::common::Curve;
use crate::error::{PricingError, Result};

/// Centered differences of a curve over evenly spaced keys; the first and the
/// last key have no neighbour on one side and are left out.
/// https://en.wikipedia.org/wiki/Finite_difference#Basic_types
fn centered(curve: &Curve, stencil: impl Fn(f64, f64, f64, f64) -> f64) -> Result<Curve> {
    if curve.len() < 3 {
        return Err(PricingError::InsufficientPoints(curve.len()));
    }
    let ds = curve.uniform_step()?;
    let points = curve
        .points()
        .windows(3)
        .map(|w| (w[1].0, stencil(w[0].1, w[1].1, w[2].1, ds)))
        .collect();
    Curve::from_points(points)
}

/// Delta of a price curve
/// '''math
/// V'(s) = (V(s + ds) - V(s - ds)) / (2 ds)
/// '''
pub fn first_derivative(curve: &Curve) -> Result<Curve> {
    centered(curve, |prev, _, next, ds| (next - prev) / (2.0 * ds))
}

/// Gamma of a price curve
/// '''math
/// V''(s) = (V(s + ds) - 2 V(s) + V(s - ds)) / ds^2
/// '''
pub fn second_derivative(curve: &Curve) -> Result<Curve> {
    centered(curve, |prev, curr, next, ds| (next - 2.0 * curr + prev) / ds.powi(2))
}
