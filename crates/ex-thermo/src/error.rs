//! Thermodynamic property and exergy evaluation errors.

use ex_core::ExError;
use thiserror::Error;

/// Result type for thermo operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while resolving reference states or evaluating stream exergy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Non-physical values (negative pressure, temperature, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// No property model knows this substance.
    #[error("No property model for substance '{substance}'")]
    UnknownSubstance { substance: String },

    /// A property model was asked for something it cannot provide.
    #[error("Property model '{model}' cannot evaluate {substance} at T={t_k} K, p={p_pa} Pa")]
    MissingProperty {
        model: String,
        substance: String,
        t_k: f64,
        p_pa: f64,
    },

    /// Ambient state has no resolved reference for a substance.
    #[error("No ambient reference resolved for substance '{substance}'")]
    UnresolvedReference { substance: String },

    /// Chemical exergy lookup failed.
    #[error("Chemical exergy of '{substance}' not available in dataset {dataset}")]
    ReferenceData { substance: String, dataset: String },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<ThermoError> for ExError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::NonPhysical { what } => ExError::Invariant {
                what: format!("Non-physical thermo value: {what}"),
            },
            ThermoError::InvalidArg { what } => ExError::InvalidArg { what },
            other => ExError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
