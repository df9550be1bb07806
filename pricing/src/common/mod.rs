pub mod curve;
pub mod models;

pub use curve::{Curve, PriceGrid};
pub use models::{Instrument, OptionContract, OptionStyle, OptionType};
