use risk::RiskError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("curve keys are not evenly spaced: gap {gap} at {key} differs from step {step}")]
    NonUniformSpacing { key: f64, gap: f64, step: f64 },

    #[error("a centered difference needs at least 3 points, the curve has {0}")]
    InsufficientPoints(usize),

    #[error("curves do not share the same stock price domain")]
    DomainMismatch,

    #[error(transparent)]
    Risk(#[from] RiskError),
}

impl PricingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
