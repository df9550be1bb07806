use crate::common::{Instrument, OptionContract, OptionStyle};
use crate::simulation::antithetic::PathPair;

/// Price of the underlying the option settles on: the terminal price of a
/// European option, the arithmetic or geometric mean of the path of an Asian one.
///
/// Panics on an empty path.
#[inline]
pub fn settlement_price(path: &[f64], style: OptionStyle) -> f64 {
    assert!(!path.is_empty(), "cannot evaluate the payoff of an empty path");
    let n = path.len() as f64;
    match style {
        OptionStyle::European => path[path.len() - 1],
        OptionStyle::ArithmeticAsian => path.iter().sum::<f64>() / n,
        // exp(mean(ln S)) == (prod S)^(1/n), without overflowing the product
        OptionStyle::GeometricAsian => (path.iter().map(|s| s.ln()).sum::<f64>() / n).exp(),
    }
}

/// Undiscounted payoff of a single path.
#[inline]
pub fn payoff(path: &[f64], instrument: Instrument, strike: f64) -> f64 {
    instrument.intrinsic_value(settlement_price(path, instrument.style()), strike)
}

/// Average of the payoffs of both paths of an antithetic pair.
#[inline]
pub fn antithetic_payoff(pair: &PathPair, instrument: Instrument, strike: f64) -> f64 {
    0.5 * (payoff(&pair.plus, instrument, strike) + payoff(&pair.minus, instrument, strike))
}

/// Payoff of one contract, evaluated path by path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffEvaluator {
    instrument: Instrument,
    strike: f64,
}

impl PayoffEvaluator {
    pub fn new(contract: &OptionContract) -> Self {
        Self {
            instrument: contract.instrument(),
            strike: contract.strike,
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    #[inline]
    pub fn evaluate(&self, path: &[f64]) -> f64 {
        payoff(path, self.instrument, self.strike)
    }

    #[inline]
    pub fn evaluate_pair(&self, pair: &PathPair) -> f64 {
        antithetic_payoff(pair, self.instrument, self.strike)
    }
}
