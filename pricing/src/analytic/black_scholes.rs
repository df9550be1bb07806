use probability::distribution::{Continuous, Distribution, Gaussian};

use crate::common::{OptionContract, OptionType};

pub(crate) fn cdf(d: f64) -> f64 {
    let normal = Gaussian::new(0.0, 1.0);
    normal.distribution(d)
}

pub(crate) fn pdf(d: f64) -> f64 {
    let normal = Gaussian::new(0.0, 1.0);
    normal.density(d)
}

/// Closed-form price of an option as a function of the initial stock price.
pub trait OptionPrice {
    fn price(&self, asset_price: f64) -> f64;

    /// Central difference of the price with a bump relative to the stock price.
    fn delta(&self, asset_price: f64) -> f64 {
        let h = bump(asset_price);
        (self.price(asset_price + h) - self.price(asset_price - h)) / (2.0 * h)
    }

    fn gamma(&self, asset_price: f64) -> f64 {
        let h = bump(asset_price);
        (self.price(asset_price + h) - 2.0 * self.price(asset_price)
            + self.price(asset_price - h))
            / h.powi(2)
    }
}

fn bump(asset_price: f64) -> f64 {
    1e-3 * asset_price.abs().max(1e-2)
}

/// Generalized Black-Scholes-Merton model with cost of carry `b`; `b = r - D` for a
/// stock paying the continuous dividend yield `D`.
/// https://en.wikipedia.org/wiki/Black-Scholes_model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholesMerton {
    pub option_type: OptionType,
    pub strike: f64,
    pub time_to_expiration: f64,
    pub rfr: f64,
    pub cost_of_carry: f64,
    pub vola: f64,
}

impl BlackScholesMerton {
    pub fn new(
        option_type: OptionType,
        strike: f64,
        time_to_expiration: f64,
        rfr: f64,
        cost_of_carry: f64,
        vola: f64,
    ) -> Self {
        Self {
            option_type,
            strike,
            time_to_expiration,
            rfr,
            cost_of_carry,
            vola,
        }
    }

    /// European option on the contract's terms.
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

    fn d1_d2(&self, asset_price: f64) -> (f64, f64) {
        let sigma_exp = self.vola * self.time_to_expiration.sqrt();
        let d1 = ((asset_price / self.strike).ln()
            + (self.cost_of_carry + self.vola.powi(2) / 2.0) * self.time_to_expiration)
            / sigma_exp;
        (d1, d1 - sigma_exp)
    }

    /// e^{(b - r) T}
    fn carry_factor(&self) -> f64 {
        ((self.cost_of_carry - self.rfr) * self.time_to_expiration).exp()
    }

    fn discount_factor(&self) -> f64 {
        (-self.rfr * self.time_to_expiration).exp()
    }

    pub fn vega(&self, asset_price: f64) -> f64 {
        let (d1, _) = self.d1_d2(asset_price);
        asset_price * self.carry_factor() * pdf(d1) * self.time_to_expiration.sqrt()
    }

    /// Sensitivity to the passage of time, `-dV/dT`.
    pub fn theta(&self, asset_price: f64) -> f64 {
        let (d1, d2) = self.d1_d2(asset_price);
        let forward = asset_price * self.carry_factor();
        let decay = -forward * pdf(d1) * self.vola / (2.0 * self.time_to_expiration.sqrt());
        let carry = self.cost_of_carry - self.rfr;
        let strike_pv = self.rfr * self.strike * self.discount_factor();
        match self.option_type {
            OptionType::Call => decay - carry * forward * cdf(d1) - strike_pv * cdf(d2),
            OptionType::Put => decay + carry * forward * cdf(-d1) + strike_pv * cdf(-d2),
        }
    }

    /// Sensitivity to the risk free rate at a fixed dividend yield.
    pub fn rho(&self, asset_price: f64) -> f64 {
        let (_, d2) = self.d1_d2(asset_price);
        let strike_pv = self.time_to_expiration * self.strike * self.discount_factor();
        match self.option_type {
            OptionType::Call => strike_pv * cdf(d2),
            OptionType::Put => -strike_pv * cdf(-d2),
        }
    }
}

impl OptionPrice for BlackScholesMerton {
    fn price(&self, asset_price: f64) -> f64 {
        let (d1, d2) = self.d1_d2(asset_price);
        let forward = asset_price * self.carry_factor();
        let strike_pv = self.strike * self.discount_factor();
        match self.option_type {
            OptionType::Call => cdf(d1) * forward - cdf(d2) * strike_pv,
            OptionType::Put => cdf(-d2) * strike_pv - cdf(-d1) * forward,
        }
    }

    fn delta(&self, asset_price: f64) -> f64 {
        let (d1, _) = self.d1_d2(asset_price);
        match self.option_type {
            OptionType::Call => self.carry_factor() * cdf(d1),
            OptionType::Put => self.carry_factor() * (cdf(d1) - 1.0),
        }
    }

    fn gamma(&self, asset_price: f64) -> f64 {
        let (d1, _) = self.d1_d2(asset_price);
        self.carry_factor() * pdf(d1) / (asset_price * self.vola * self.time_to_expiration.sqrt())
    }
}
