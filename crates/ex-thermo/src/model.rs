//! Property model trait and the built-in backends.
//!
//! The engine never solves an equation of state for the analysed streams.
//! It only needs (h, s) at reference sub-states: the ambient dead state,
//! the auxiliary state at (T0, p) for the thermal/mechanical split, and the
//! minimum fluid-phase state for substances that are not fluid at ambient.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use crate::substance::Substance;
use ex_core::units::constants::R_UNIVERSAL;
use ex_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature, k};

/// Datum shared by the analytic backends.
const T_DATUM: f64 = 298.15;
const P_DATUM: f64 = 101_325.0;

/// Trait for reference-state property providers.
///
/// Implementations must be thread-safe (Send + Sync); one instance is shared
/// read-only by all workers of an analysis run.
pub trait PropertyModel: Send + Sync {
    /// Model name (for logging and error messages).
    fn name(&self) -> &str;

    /// Whether this model can evaluate the substance.
    fn supports(&self, substance: &Substance) -> bool;

    /// Specific enthalpy [J/kg] and entropy [J/(kg·K)] at (t, p).
    fn hs_at(
        &self,
        substance: &Substance,
        t: Temperature,
        p: Pressure,
    ) -> ThermoResult<(SpecEnthalpy, SpecEntropy)>;

    /// Lowest temperature at which the substance is a valid fluid, if bounded.
    fn min_fluid_temperature(&self, _substance: &Substance) -> Option<Temperature> {
        None
    }
}

/// Ideal gas with constant heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    /// Isobaric heat capacity [J/(kg·K)].
    pub cp: f64,
    /// Specific gas constant [J/(kg·K)].
    pub r: f64,
}

impl IdealGas {
    /// Gas constant taken from the species molar mass.
    pub fn for_species(species: Species, cp: f64) -> Self {
        Self {
            cp,
            r: R_UNIVERSAL * 1000.0 / species.molar_mass(),
        }
    }
}

/// Incompressible liquid or solid with constant heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incompressible {
    /// Heat capacity [J/(kg·K)].
    pub c: f64,
    /// Specific volume [m³/kg].
    pub v: f64,
    /// Freezing or lower validity limit [K].
    pub t_min: Option<f64>,
}

/// Constant-cp ideal gases keyed by substance key.
#[derive(Debug, Clone, Default)]
pub struct IdealGasModel {
    gases: BTreeMap<String, IdealGas>,
}

impl IdealGasModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, gas: IdealGas) -> Self {
        self.insert(key, gas);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, gas: IdealGas) {
        self.gases.insert(key.into(), gas);
    }
}

impl PropertyModel for IdealGasModel {
    fn name(&self) -> &str {
        "IdealGas"
    }

    fn supports(&self, substance: &Substance) -> bool {
        self.gases.contains_key(&substance.key())
    }

    fn hs_at(
        &self,
        substance: &Substance,
        t: Temperature,
        p: Pressure,
    ) -> ThermoResult<(SpecEnthalpy, SpecEntropy)> {
        validation::validate_tp(t, p)?;
        let key = substance.key();
        let gas = self
            .gases
            .get(&key)
            .ok_or(ThermoError::UnknownSubstance { substance: key })?;
        let h = gas.cp * (t.value - T_DATUM);
        let s = gas.cp * (t.value / T_DATUM).ln() - gas.r * (p.value / P_DATUM).ln();
        validation::validate_hs(self.name(), substance, t, p, h, s)
    }
}

/// Incompressible substances keyed by substance key.
#[derive(Debug, Clone, Default)]
pub struct IncompressibleModel {
    substances: BTreeMap<String, Incompressible>,
}

impl IncompressibleModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, params: Incompressible) -> Self {
        self.insert(key, params);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, params: Incompressible) {
        self.substances.insert(key.into(), params);
    }
}

impl PropertyModel for IncompressibleModel {
    fn name(&self) -> &str {
        "Incompressible"
    }

    fn supports(&self, substance: &Substance) -> bool {
        self.substances.contains_key(&substance.key())
    }

    fn hs_at(
        &self,
        substance: &Substance,
        t: Temperature,
        p: Pressure,
    ) -> ThermoResult<(SpecEnthalpy, SpecEntropy)> {
        validation::validate_tp(t, p)?;
        let key = substance.key();
        let liq = self
            .substances
            .get(&key)
            .ok_or(ThermoError::UnknownSubstance { substance: key })?;
        let h = liq.c * (t.value - T_DATUM) + liq.v * (p.value - P_DATUM);
        let s = liq.c * (t.value / T_DATUM).ln();
        validation::validate_hs(self.name(), substance, t, p, h, s)
    }

    fn min_fluid_temperature(&self, substance: &Substance) -> Option<Temperature> {
        self.substances
            .get(&substance.key())
            .and_then(|liq| liq.t_min)
            .map(k)
    }
}

/// Ordered set of models; the first one supporting a substance answers.
#[derive(Clone, Default)]
pub struct PropertyModels {
    models: Vec<Arc<dyn PropertyModel>>,
}

impl PropertyModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, model: Arc<dyn PropertyModel>) {
        self.models.push(model);
    }

    pub fn with(mut self, model: Arc<dyn PropertyModel>) -> Self {
        self.push(model);
        self
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    fn find(&self, substance: &Substance) -> Option<&Arc<dyn PropertyModel>> {
        self.models.iter().find(|m| m.supports(substance))
    }
}

impl std::fmt::Debug for PropertyModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.models.iter().map(|m| m.name()))
            .finish()
    }
}

impl PropertyModel for PropertyModels {
    fn name(&self) -> &str {
        "PropertyModels"
    }

    fn supports(&self, substance: &Substance) -> bool {
        self.find(substance).is_some()
    }

    fn hs_at(
        &self,
        substance: &Substance,
        t: Temperature,
        p: Pressure,
    ) -> ThermoResult<(SpecEnthalpy, SpecEntropy)> {
        match self.find(substance) {
            Some(model) => model.hs_at(substance, t, p),
            None => Err(ThermoError::UnknownSubstance {
                substance: substance.key(),
            }),
        }
    }

    fn min_fluid_temperature(&self, substance: &Substance) -> Option<Temperature> {
        self.find(substance)
            .and_then(|m| m.min_fluid_temperature(substance))
    }
}

/// Validation helpers for model inputs and outputs.
pub(crate) mod validation {
    use super::*;

    pub fn validate_tp(t: Temperature, p: Pressure) -> ThermoResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn validate_hs(
        model: &str,
        substance: &Substance,
        t: Temperature,
        p: Pressure,
        h: f64,
        s: f64,
    ) -> ThermoResult<(SpecEnthalpy, SpecEntropy)> {
        if h.is_finite() && s.is_finite() {
            Ok((h, s))
        } else {
            Err(ThermoError::MissingProperty {
                model: model.to_string(),
                substance: substance.key(),
                t_k: t.value,
                p_pa: p.value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ex_core::units::pa;

    fn air_model() -> IdealGasModel {
        IdealGasModel::new().with("Air", IdealGas::for_species(Species::Air, 1005.0))
    }

    #[test]
    fn ideal_gas_datum_is_zero() {
        let (h, s) = air_model()
            .hs_at(&Species::Air.into(), k(T_DATUM), pa(P_DATUM))
            .unwrap();
        assert!(h.abs() < 1e-9);
        assert!(s.abs() < 1e-9);
    }

    #[test]
    fn ideal_gas_entropy_falls_with_pressure() {
        let model = air_model();
        let air = Substance::Pure(Species::Air);
        let (_, s1) = model.hs_at(&air, k(300.0), pa(1e5)).unwrap();
        let (_, s5) = model.hs_at(&air, k(300.0), pa(5e5)).unwrap();
        let r = IdealGas::for_species(Species::Air, 1005.0).r;
        assert!((r - 287.05).abs() < 0.1);
        assert!(((s1 - s5) - r * 5.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn unknown_substance_rejected() {
        let err = air_model()
            .hs_at(&Species::CH4.into(), k(300.0), pa(1e5))
            .unwrap_err();
        assert_eq!(
            err,
            ThermoError::UnknownSubstance {
                substance: "CH4".into()
            }
        );
    }

    #[test]
    fn incompressible_reports_min_temperature() {
        let salt = Substance::Named("solar_salt".into());
        let model = IncompressibleModel::new().with(
            "solar_salt",
            Incompressible {
                c: 1500.0,
                v: 5.0e-4,
                t_min: Some(500.0),
            },
        );
        assert_eq!(model.min_fluid_temperature(&salt), Some(k(500.0)));
        let (h1, s1) = model.hs_at(&salt, k(600.0), pa(1e5)).unwrap();
        let (h2, s2) = model.hs_at(&salt, k(600.0), pa(2e5)).unwrap();
        assert!(((h2 - h1) - 5.0e-4 * 1e5).abs() < 1e-9);
        assert_eq!(s1, s2);
    }

    #[test]
    fn model_set_routes_by_support() {
        let models = PropertyModels::new()
            .with(Arc::new(air_model()))
            .with(Arc::new(IncompressibleModel::new().with(
                "oil",
                Incompressible {
                    c: 2000.0,
                    v: 1.1e-3,
                    t_min: None,
                },
            )));
        assert_eq!(models.len(), 2);
        assert!(models.supports(&Substance::Named("oil".into())));
        assert!(models.supports(&Species::Air.into()));
        assert!(!models.supports(&Species::H2O.into()));
        assert!(models
            .hs_at(&Species::H2O.into(), k(300.0), pa(1e5))
            .is_err());
    }

    #[test]
    fn rejects_non_physical_inputs() {
        assert!(air_model()
            .hs_at(&Species::Air.into(), k(-1.0), pa(1e5))
            .is_err());
    }
}
