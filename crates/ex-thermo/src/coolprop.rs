//! CoolProp-based reference-state model (feature `coolprop`).

use crate::error::{ThermoError, ThermoResult};
use crate::model::{PropertyModel, validation};
use crate::substance::Substance;
use ex_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};
use rfluids::prelude::*;

/// CoolProp backend for pure species.
///
/// Thread-safe: rfluids Fluid instances are created per call.
#[derive(Debug, Default)]
pub struct CoolPropModel {}

impl CoolPropModel {
    pub fn new() -> Self {
        Self {}
    }

    fn pure_of(substance: &Substance) -> Option<Pure> {
        match substance {
            Substance::Pure(species) => Some(species.rfluids_pure()),
            Substance::Mixture(comp) => comp.is_pure().map(|s| s.rfluids_pure()),
            Substance::Named(_) => None,
        }
    }
}

impl PropertyModel for CoolPropModel {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, substance: &Substance) -> bool {
        Self::pure_of(substance).is_some()
    }

    fn hs_at(
        &self,
        substance: &Substance,
        t: Temperature,
        p: Pressure,
    ) -> ThermoResult<(SpecEnthalpy, SpecEntropy)> {
        validation::validate_tp(t, p)?;
        let pure = Self::pure_of(substance).ok_or(ThermoError::UnknownSubstance {
            substance: substance.key(),
        })?;

        let mut fluid = Fluid::from(pure)
            .in_state(FluidInput::pressure(p.value), FluidInput::temperature(t.value))
            .map_err(|e| ThermoError::Backend {
                message: format!("rfluids error at P={} Pa, T={} K: {}", p.value, t.value, e),
            })?;
        let h = fluid.enthalpy().map_err(|e| ThermoError::Backend {
            message: format!("rfluids error getting enthalpy: {}", e),
        })?;
        let s = fluid.entropy().map_err(|e| ThermoError::Backend {
            message: format!("rfluids error getting entropy: {}", e),
        })?;

        validation::validate_hs(self.name(), substance, t, p, h, s)
    }
}
