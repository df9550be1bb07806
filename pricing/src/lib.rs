//! Monte Carlo and closed-form prices of European and Asian options over a grid of
//! initial stock prices, with finite difference greeks and accuracy statistics.

pub mod analytic;
pub mod common;
pub mod error;
pub mod simulation;

pub use error::{PricingError, Result};
