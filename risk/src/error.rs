use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("{name} = {value} is outside the domain {domain}")]
    Domain {
        name: &'static str,
        value: f64,
        domain: &'static str,
    },
}

impl RiskError {
    pub(crate) fn domain(name: &'static str, value: f64, domain: &'static str) -> Self {
        RiskError::Domain {
            name,
            value,
            domain,
        }
    }
}
