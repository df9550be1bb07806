pub mod asian;
pub mod black_scholes;
pub mod fair_value;

pub use asian::{ArithmeticAsian, GeometricAsian};
pub use black_scholes::{BlackScholesMerton, OptionPrice};
pub use fair_value::{ClosedForm, FairValue, Sensitivities};
