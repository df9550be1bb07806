//! Statistics of Monte Carlo estimators: sample moments of payoffs, worst-case
//! errors over a curve, and the number of simulations needed for a target accuracy.

pub mod accuracy;
pub mod error;
pub mod estimator;

pub use accuracy::{inverse_normal_cdf, minimum_simulations};
pub use error::RiskError;
pub use estimator::{max_abs_difference, max_value, PayoffAccumulator};
