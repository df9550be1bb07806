use std::fmt;

use crate::error::{PricingError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

/// How the underlying's path is reduced to the price compared against the strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionStyle {
    /// terminal price
    European,
    /// arithmetic mean of the sampled prices
    ArithmeticAsian,
    /// geometric mean of the sampled prices
    GeometricAsian,
}

/// The closed set of priced instruments; payoffs and closed-form prices dispatch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instrument {
    EuropeanCall,
    EuropeanPut,
    AsianArithmeticCall,
    AsianArithmeticPut,
    AsianGeometricCall,
    AsianGeometricPut,
}

impl Instrument {
    pub fn new(option_type: OptionType, style: OptionStyle) -> Self {
        match (style, option_type) {
            (OptionStyle::European, OptionType::Call) => Instrument::EuropeanCall,
            (OptionStyle::European, OptionType::Put) => Instrument::EuropeanPut,
            (OptionStyle::ArithmeticAsian, OptionType::Call) => Instrument::AsianArithmeticCall,
            (OptionStyle::ArithmeticAsian, OptionType::Put) => Instrument::AsianArithmeticPut,
            (OptionStyle::GeometricAsian, OptionType::Call) => Instrument::AsianGeometricCall,
            (OptionStyle::GeometricAsian, OptionType::Put) => Instrument::AsianGeometricPut,
        }
    }

    pub fn option_type(&self) -> OptionType {
        match self {
            Instrument::EuropeanCall
            | Instrument::AsianArithmeticCall
            | Instrument::AsianGeometricCall => OptionType::Call,
            Instrument::EuropeanPut
            | Instrument::AsianArithmeticPut
            | Instrument::AsianGeometricPut => OptionType::Put,
        }
    }

    pub fn style(&self) -> OptionStyle {
        match self {
            Instrument::EuropeanCall | Instrument::EuropeanPut => OptionStyle::European,
            Instrument::AsianArithmeticCall | Instrument::AsianArithmeticPut => {
                OptionStyle::ArithmeticAsian
            }
            Instrument::AsianGeometricCall | Instrument::AsianGeometricPut => {
                OptionStyle::GeometricAsian
            }
        }
    }

    /// Exercise value for the (averaged or terminal) price of the underlying.
    #[inline]
    pub fn intrinsic_value(&self, underlying: f64, strike: f64) -> f64 {
        match self.option_type() {
            OptionType::Call => (underlying - strike).max(0.0),
            OptionType::Put => (strike - underlying).max(0.0),
        }
    }
}

/// Option data. Passed by value into the simulation, a changed contract is a new contract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionContract {
    /// the strike or exercise price of the asset
    pub strike: f64,
    /// (T - t) in years, where T is the time of the option's expiration and t is the current time
    pub time_to_expiration: f64,
    /// the annualized risk-free interest rate
    pub rfr: f64,
    /// the annualized standard deviation of the stock's returns
    pub vola: f64,
    /// the continuous dividend yield
    pub dividend_yield: f64,
    pub option_type: OptionType,
    pub style: OptionStyle,
}

impl OptionContract {
    pub fn new(
        strike: f64,
        time_to_expiration: f64,
        rfr: f64,
        vola: f64,
        dividend_yield: f64,
        option_type: OptionType,
        style: OptionStyle,
    ) -> Result<Self> {
        let contract = Self {
            strike,
            time_to_expiration,
            rfr,
            vola,
            dividend_yield,
            option_type,
            style,
        };
        contract.validate()?;
        Ok(contract)
    }

    pub fn validate(&self) -> Result<()> {
        positive("strike", self.strike)?;
        positive("time_to_expiration", self.time_to_expiration)?;
        positive("vola", self.vola)?;
        finite("rfr", self.rfr)?;
        finite("dividend_yield", self.dividend_yield)?;
        Ok(())
    }

    pub fn with_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    pub fn with_style(self, style: OptionStyle) -> Self {
        Self { style, ..self }
    }

    pub fn instrument(&self) -> Instrument {
        Instrument::new(self.option_type, self.style)
    }

    /// b = r - D
    pub fn cost_of_carry(&self) -> f64 {
        self.rfr - self.dividend_yield
    }

    pub fn discount_factor(&self) -> f64 {
        (-self.rfr * self.time_to_expiration).exp()
    }
}

/// `T, r, D, sigma` as used in the titles of the stored curves.
impl fmt::Display for OptionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.time_to_expiration, self.rfr, self.dividend_yield, self.vola
        )
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(name, format!("{value} must be positive")))
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(name, format!("{value} must be finite")))
    }
}
