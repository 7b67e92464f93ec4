//! Per-component exergy balance.

use std::fmt;

use ex_core::Tolerances;
use serde::{Serialize, Serializer};

use crate::context::ClassifyContext;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::ExergyFlows;

/// A ratio that is undefined when its denominator vanishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fraction {
    Value(f64),
    NotApplicable,
}

impl Fraction {
    /// `num / den`, or `NotApplicable` when `|den| <= zero`.
    pub fn of(num: f64, den: f64, zero: f64) -> Self {
        if den.abs() <= zero {
            Fraction::NotApplicable
        } else {
            Fraction::Value(num / den)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Fraction::Value(v) => Some(*v),
            Fraction::NotApplicable => None,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fraction::Value(v) => write!(f, "{:.4}", v),
            Fraction::NotApplicable => write!(f, "n/a"),
        }
    }
}

// Serialized as a number or null.
impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Closed exergy balance of one component [W].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentBalance {
    pub component: String,
    pub archetype: String,
    pub fuel: f64,
    pub product: f64,
    pub loss: f64,
    pub destruction: f64,
    pub efficiency: Fraction,
    pub flows: ExergyFlows,
}

/// Closes the balance D = F − P − L for classified flows.
///
/// Destruction below `−tol.allowed(F)` is an error; small negative values
/// within tolerance are kept as computed.
pub fn balance(
    ctx: &ClassifyContext<'_>,
    flows: ExergyFlows,
    tol: &Tolerances,
) -> ComponentResult<ComponentBalance> {
    let fuel = flows.fuel_total();
    let product = flows.product_total();
    let loss = flows.loss_total();
    let destruction = fuel - product - loss;

    if destruction < -tol.allowed(fuel) {
        return Err(ComponentError::NegativeDestruction {
            component: ctx.component.to_string(),
            archetype: ctx.archetype.to_string(),
            fuel,
            product,
            loss,
            destruction,
        });
    }

    Ok(ComponentBalance {
        component: ctx.component.to_string(),
        archetype: ctx.archetype.to_string(),
        fuel,
        product,
        loss,
        destruction,
        efficiency: Fraction::of(product, fuel, tol.abs),
        flows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::testing::ctx;

    #[test]
    fn zero_fuel_has_no_efficiency() {
        let a = Archetype::Dissipative;
        let c = ctx(&a, &[], &[], &[]);
        let b = balance(&c, ExergyFlows::new(), &Tolerances::default()).unwrap();
        assert_eq!(b.destruction, 0.0);
        assert_eq!(b.efficiency, Fraction::NotApplicable);
    }

    #[test]
    fn negative_destruction_is_rejected() {
        let a = Archetype::Turbine;
        let c = ctx(&a, &[], &[], &[]);
        let flows = ExergyFlows::new().fuel("F", 100.0).product("P", 101.0);
        let err = balance(&c, flows, &Tolerances::default()).unwrap_err();
        assert!(matches!(err, ComponentError::NegativeDestruction { .. }));
    }

    #[test]
    fn fraction_serializes_as_number_or_null() {
        assert_eq!(serde_json::to_string(&Fraction::Value(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&Fraction::NotApplicable).unwrap(), "null");
    }
}
