//! Closed-form prices of Asian options with continuous averaging from today until
//! expiration. Both map the average onto a lognormal variable and price it with an
//! adjusted cost of carry and volatility in the Black-Scholes-Merton formula.

use crate::analytic::black_scholes::{BlackScholesMerton, OptionPrice};
use crate::common::{OptionContract, OptionType};

/// Below this cost of carry the moments of the arithmetic average use their limit at b = 0.
const MIN_CARRY: f64 = 1e-8;

/// Geometric average rate option after Kemna & Vorst (1990)
/// '''math
/// b_A = (b - sigma^2 / 6) / 2, sigma_A = sigma / sqrt(3)
/// '''
/// The geometric average of a lognormal process is lognormal, the price is exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricAsian {
    adjusted: BlackScholesMerton,
}

impl GeometricAsian {
    pub fn new(
        option_type: OptionType,
        strike: f64,
        time_to_expiration: f64,
        rfr: f64,
        cost_of_carry: f64,
        vola: f64,
    ) -> Self {
        let adjusted = BlackScholesMerton::new(
            option_type,
            strike,
            time_to_expiration,
            rfr,
            (cost_of_carry - vola.powi(2) / 6.0) / 2.0,
            vola / 3.0_f64.sqrt(),
        );
        Self { adjusted }
    }

    pub fn from_contract(contract: &OptionContract) -> Self {
        Self::new(
            contract.option_type,
            contract.strike,
            contract.time_to_expiration,
            contract.rfr,
            contract.cost_of_carry(),
            contract.vola,
        )
    }
}

impl OptionPrice for GeometricAsian {
    fn price(&self, asset_price: f64) -> f64 {
        self.adjusted.price(asset_price)
    }

    fn delta(&self, asset_price: f64) -> f64 {
        self.adjusted.delta(asset_price)
    }

    fn gamma(&self, asset_price: f64) -> f64 {
        self.adjusted.gamma(asset_price)
    }
}

/// Arithmetic average rate option, approximated after Turnbull & Wakeman (1991) by a
/// lognormal variable with the first two moments `M1`, `M2` of the average:
/// '''math
/// b_A = ln(M1) / T, sigma_A = sqrt(ln(M2) / T - 2 b_A)
/// '''
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArithmeticAsian {
    adjusted: BlackScholesMerton,
}

impl ArithmeticAsian {
    pub fn new(
        option_type: OptionType,
        strike: f64,
        time_to_expiration: f64,
        rfr: f64,
        cost_of_carry: f64,
        vola: f64,
    ) -> Self {
        let (m1, m2) = average_moments(time_to_expiration, cost_of_carry, vola);
        let carry = m1.ln() / time_to_expiration;
        let adjusted = BlackScholesMerton::new(
            option_type,
            strike,
            time_to_expiration,
            rfr,
            carry,
            (m2.ln() / time_to_expiration - 2.0 * carry).sqrt(),
        );
        Self { adjusted }
    }

    pub fn from_contract(contract: &OptionContract) -> Self {
        Self::new(
            contract.option_type,
            contract.strike,
            contract.time_to_expiration,
            contract.rfr,
            contract.cost_of_carry(),
            contract.vola,
        )
    }

    /// Volatility of the lognormal proxy of the average.
    pub fn adjusted_vola(&self) -> f64 {
        self.adjusted.vola
    }
}

impl OptionPrice for ArithmeticAsian {
    fn price(&self, asset_price: f64) -> f64 {
        self.adjusted.price(asset_price)
    }
}

/// First and second moment of the continuous arithmetic average of `S_t / S_0` over `[0, T]`.
fn average_moments(tte: f64, carry: f64, vola: f64) -> (f64, f64) {
    let v2 = vola.powi(2);
    if carry.abs() < MIN_CARRY {
        let m2 = 2.0 * ((v2 * tte).exp() - 1.0 - v2 * tte) / (v2.powi(2) * tte.powi(2));
        return (1.0, m2);
    }
    let m1 = ((carry * tte).exp() - 1.0) / (carry * tte);
    let m2 = 2.0 * ((2.0 * carry + v2) * tte).exp()
        / ((carry + v2) * (2.0 * carry + v2) * tte.powi(2))
        + 2.0 / (carry * tte.powi(2))
            * (1.0 / (2.0 * carry + v2) - (carry * tte).exp() / (carry + v2));
    (m1, m2)
}
