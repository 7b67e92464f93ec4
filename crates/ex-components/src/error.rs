//! Error types for classification and component balances.

use ex_core::error::ExError;
use thiserror::Error;

/// Errors raised while classifying a component or closing its balance.
///
/// Every variant names the component and its archetype.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("No classification rule registered for archetype '{archetype}' (component '{component}')")]
    Unregistered { component: String, archetype: String },

    #[error("Component '{component}' ({archetype}) expects {expected}, found {inlets} inlet(s) and {outlets} outlet(s)")]
    Connectivity {
        component: String,
        archetype: String,
        expected: &'static str,
        inlets: usize,
        outlets: usize,
    },

    #[error("Streams of component '{component}' ({archetype}) cannot be partitioned: {reason}")]
    NotPartitionable {
        component: String,
        archetype: String,
        reason: String,
    },

    #[error("Component '{component}' ({archetype}) is missing {what}")]
    MissingData {
        component: String,
        archetype: String,
        what: String,
    },

    #[error(
        "Negative exergy destruction in '{component}' ({archetype}): F={fuel:.3} W, P={product:.3} W, L={loss:.3} W, D={destruction:.3} W"
    )]
    NegativeDestruction {
        component: String,
        archetype: String,
        fuel: f64,
        product: f64,
        loss: f64,
        destruction: f64,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    /// Name of the component the error refers to.
    pub fn component(&self) -> &str {
        match self {
            ComponentError::Unregistered { component, .. }
            | ComponentError::Connectivity { component, .. }
            | ComponentError::NotPartitionable { component, .. }
            | ComponentError::MissingData { component, .. }
            | ComponentError::NegativeDestruction { component, .. } => component,
        }
    }
}

impl From<ComponentError> for ExError {
    fn from(e: ComponentError) -> Self {
        ExError::Invariant {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_component() {
        let err = ComponentError::Unregistered {
            component: "HX-7".into(),
            archetype: "Regenerator".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("HX-7"));
        assert!(msg.contains("Regenerator"));
        assert_eq!(err.component(), "HX-7");
    }

    #[test]
    fn error_conversion() {
        let err: ExError = ComponentError::MissingData {
            component: "CC".into(),
            archetype: "CombustionChamber".into(),
            what: "chemical exergy".into(),
        }
        .into();
        assert!(matches!(err, ExError::Invariant { .. }));
    }
}
