use crate::analytic::asian::{ArithmeticAsian, GeometricAsian};
use crate::analytic::black_scholes::{BlackScholesMerton, OptionPrice};
use crate::common::{Curve, OptionContract, OptionStyle, PriceGrid};

/// The closed-form price matching the style of a contract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClosedForm {
    European(BlackScholesMerton),
    GeometricAsian(GeometricAsian),
    ArithmeticAsian(ArithmeticAsian),
}

impl ClosedForm {
    pub fn new(contract: &OptionContract) -> Self {
        match contract.style {
            OptionStyle::European => ClosedForm::European(BlackScholesMerton::from_contract(contract)),
            OptionStyle::GeometricAsian => {
                ClosedForm::GeometricAsian(GeometricAsian::from_contract(contract))
            }
            OptionStyle::ArithmeticAsian => {
                ClosedForm::ArithmeticAsian(ArithmeticAsian::from_contract(contract))
            }
        }
    }

    fn pricer(&self) -> &dyn OptionPrice {
        match self {
            ClosedForm::European(bsm) => bsm,
            ClosedForm::GeometricAsian(geometric) => geometric,
            ClosedForm::ArithmeticAsian(arithmetic) => arithmetic,
        }
    }
}

impl OptionPrice for ClosedForm {
    fn price(&self, asset_price: f64) -> f64 {
        self.pricer().price(asset_price)
    }

    fn delta(&self, asset_price: f64) -> f64 {
        self.pricer().delta(asset_price)
    }

    fn gamma(&self, asset_price: f64) -> f64 {
        self.pricer().gamma(asset_price)
    }
}

/// Sensitivities of the Black-Scholes-Merton price to time, volatility and rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Sensitivities {
    pub thetas: Curve,
    pub vegas: Curve,
    pub rhos: Curve,
}

impl Sensitivities {
    pub fn generate(bsm: &BlackScholesMerton, grid: &PriceGrid) -> Self {
        Self {
            thetas: Curve::from_fn(grid, |s| bsm.theta(s)),
            vegas: Curve::from_fn(grid, |s| bsm.vega(s)),
            rhos: Curve::from_fn(grid, |s| bsm.rho(s)),
        }
    }
}

/// Reference curves of the closed-form price and its greeks over a grid of initial
/// stock prices; the keys match the curves of a simulation on the same grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FairValue {
    pub prices: Curve,
    pub deltas: Curve,
    pub gammas: Curve,
    /// only for European options
    pub sensitivities: Option<Sensitivities>,
}

impl FairValue {
    pub fn generate(contract: &OptionContract, grid: &PriceGrid) -> Self {
        let closed_form = ClosedForm::new(contract);
        let sensitivities = match &closed_form {
            ClosedForm::European(bsm) => Some(Sensitivities::generate(bsm, grid)),
            ClosedForm::GeometricAsian(_) | ClosedForm::ArithmeticAsian(_) => None,
        };
        Self {
            prices: Curve::from_fn(grid, |s| closed_form.price(s)),
            deltas: Curve::from_fn(grid, |s| closed_form.delta(s)),
            gammas: Curve::from_fn(grid, |s| closed_form.gamma(s)),
            sensitivities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OptionType;
    use assert_approx_eq::assert_approx_eq;

    fn contract(style: OptionStyle) -> OptionContract {
        OptionContract::new(50.0, 1.0, 0.05, 0.25, 0.01, OptionType::Call, style).unwrap()
    }

    #[test]
    fn curves_over_grid() {
        let grid = PriceGrid::new(10.0, 100.0, 0.5).unwrap();
        let fair_value = FairValue::generate(&contract(OptionStyle::European), &grid);

        assert_eq!(fair_value.prices.len(), 180);
        assert!(fair_value.prices.same_domain(&fair_value.deltas));
        assert!(fair_value.prices.same_domain(&fair_value.gammas));
        assert_approx_eq!(fair_value.prices.get(50.0).unwrap(), 5.8596, 1e-4);
    }

    #[test]
    fn european_sensitivities() {
        let grid = PriceGrid::new(40.0, 60.0, 5.0).unwrap();
        let european = contract(OptionStyle::European);
        let fair_value = FairValue::generate(&european, &grid);
        let bsm = BlackScholesMerton::from_contract(&european);

        let sensitivities = fair_value.sensitivities.unwrap();
        assert!(sensitivities.thetas.same_domain(&fair_value.prices));
        assert_eq!(sensitivities.vegas.get(50.0).unwrap(), bsm.vega(50.0));
        assert_eq!(sensitivities.rhos.get(45.0).unwrap(), bsm.rho(45.0));
        // a long call loses value as time passes
        assert!(sensitivities.thetas.values().all(|theta| *theta < 0.0));

        let asian = FairValue::generate(&contract(OptionStyle::GeometricAsian), &grid);
        assert!(asian.sensitivities.is_none());
    }

    #[test]
    fn dispatch_on_style() {
        let grid = PriceGrid::new(45.0, 55.0, 5.0).unwrap();
        let price = |style| FairValue::generate(&contract(style), &grid).prices.get(50.0).unwrap();
        assert_approx_eq!(price(OptionStyle::European), 5.8596, 1e-4);
        assert_approx_eq!(price(OptionStyle::GeometricAsian), 3.1255, 1e-4);
        assert_approx_eq!(price(OptionStyle::ArithmeticAsian), 3.2935, 1e-4);
    }

    #[test]
    fn deltas_are_slopes_of_prices() {
        let grid = PriceGrid::new(30.0, 70.0, 0.5).unwrap();
        for style in [OptionStyle::European, OptionStyle::ArithmeticAsian] {
            let fair_value = FairValue::generate(&contract(style), &grid);
            let slope = crate::simulation::first_derivative(&fair_value.prices).unwrap();
            for (s, d) in &slope {
                assert_approx_eq!(*d, fair_value.deltas.get(*s).unwrap(), 1e-3);
            }
        }
    }
}
