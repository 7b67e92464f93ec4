//! Stream exergy evaluator.

use serde::Serialize;

use crate::ambient::{AmbientReference, AmbientState};
use crate::chemical::{ChemicalExergyDataset, DatasetVariant, specific_chemical_exergy};
use crate::error::ThermoResult;
use crate::model::PropertyModel;
use crate::state::StreamState;
use crate::substance::Substance;
use ex_core::units::{Pressure, SpecEnthalpy, SpecEntropy, SpecExergy, Temperature};

/// Which sub-state the physical exergy of a stream is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceBasis {
    /// (T0, p0).
    Ambient,
    /// (T_min, p) for substances that are not fluid at ambient.
    MinimumFluidTemperature,
}

/// A reference sub-state: both terms always come from the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceState {
    pub basis: ReferenceBasis,
    pub t: Temperature,
    pub p: Pressure,
    pub h: SpecEnthalpy,
    pub s: SpecEntropy,
}

/// Exergy forms outside the engine's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExergyContribution {
    NotConsidered,
}

/// Chemical exergy tagged with the dataset that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChemicalExergy {
    pub value: SpecExergy,
    pub dataset: DatasetVariant,
}

/// Specific exergies of one material stream [J/kg].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamExergy {
    pub physical: SpecExergy,
    pub thermal: Option<SpecExergy>,
    pub mechanical: Option<SpecExergy>,
    pub chemical: Option<ChemicalExergy>,
    pub reference: ReferenceBasis,
}

impl StreamExergy {
    /// Kinetic exergy is never evaluated.
    pub fn kinetic(&self) -> ExergyContribution {
        ExergyContribution::NotConsidered
    }

    /// Potential exergy is never evaluated.
    pub fn potential(&self) -> ExergyContribution {
        ExergyContribution::NotConsidered
    }

    /// Physical plus chemical (when evaluated).
    pub fn total(&self) -> SpecExergy {
        self.physical + self.chemical.map_or(0.0, |c| c.value)
    }
}

/// Evaluates stream exergies against a resolved ambient state.
pub struct ExergyEvaluator<'a> {
    ambient: &'a AmbientState,
    properties: &'a dyn PropertyModel,
    chemical: Option<&'a dyn ChemicalExergyDataset>,
    split: bool,
}

impl<'a> ExergyEvaluator<'a> {
    pub fn new(ambient: &'a AmbientState, properties: &'a dyn PropertyModel) -> Self {
        Self {
            ambient,
            properties,
            chemical: None,
            split: false,
        }
    }

    /// Also compute the thermal/mechanical split.
    pub fn with_split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    /// Also compute chemical exergy from this dataset.
    pub fn with_chemical(mut self, dataset: &'a dyn ChemicalExergyDataset) -> Self {
        self.chemical = Some(dataset);
        self
    }

    pub fn ambient(&self) -> &AmbientState {
        self.ambient
    }

    /// Reference sub-state of a substance for a stream at pressure `p`.
    pub fn reference_state(&self, substance: &Substance, p: Pressure) -> ThermoResult<ReferenceState> {
        match self.ambient.reference(substance)? {
            AmbientReference::Fluid { h0, s0 } => Ok(ReferenceState {
                basis: ReferenceBasis::Ambient,
                t: self.ambient.t0(),
                p: self.ambient.p0(),
                h: h0,
                s: s0,
            }),
            AmbientReference::NonFluid { t_min } => {
                let (h, s) = self.properties.hs_at(substance, t_min, p)?;
                Ok(ReferenceState {
                    basis: ReferenceBasis::MinimumFluidTemperature,
                    t: t_min,
                    p,
                    h,
                    s,
                })
            }
        }
    }

    /// e^PH = h - h_ref - T0 (s - s_ref).
    pub fn physical(&self, substance: &Substance, state: &StreamState) -> ThermoResult<SpecExergy> {
        let reference = self.reference_state(substance, state.pressure())?;
        Ok(self.relative_to(state.enthalpy(), state.entropy(), &reference))
    }

    /// (e^T, e^M) via the auxiliary state A at (T0, p).
    ///
    /// For a minimum-temperature reference the sub-state already sits at
    /// the stream pressure, so the whole physical exergy is thermal.
    pub fn split(
        &self,
        substance: &Substance,
        state: &StreamState,
    ) -> ThermoResult<(SpecExergy, SpecExergy)> {
        let reference = self.reference_state(substance, state.pressure())?;
        match reference.basis {
            ReferenceBasis::MinimumFluidTemperature => Ok((
                self.relative_to(state.enthalpy(), state.entropy(), &reference),
                0.0,
            )),
            ReferenceBasis::Ambient => {
                let t0 = self.ambient.t0().value;
                let (h_a, s_a) =
                    self.properties
                        .hs_at(substance, self.ambient.t0(), state.pressure())?;
                let thermal = state.enthalpy() - h_a - t0 * (state.entropy() - s_a);
                let mechanical = h_a - reference.h - t0 * (s_a - reference.s);
                Ok((thermal, mechanical))
            }
        }
    }

    /// Full evaluation of one material stream.
    pub fn evaluate(&self, substance: &Substance, state: &StreamState) -> ThermoResult<StreamExergy> {
        let reference = self.reference_state(substance, state.pressure())?;
        let physical = self.relative_to(state.enthalpy(), state.entropy(), &reference);

        let (thermal, mechanical) = if self.split {
            let (t, m) = self.split(substance, state)?;
            (Some(t), Some(m))
        } else {
            (None, None)
        };

        let chemical = match self.chemical {
            Some(dataset) => Some(ChemicalExergy {
                value: specific_chemical_exergy(dataset, substance, self.ambient.t0().value)?,
                dataset: dataset.variant(),
            }),
            None => None,
        };

        Ok(StreamExergy {
            physical,
            thermal,
            mechanical,
            chemical,
            reference: reference.basis,
        })
    }

    fn relative_to(&self, h: SpecEnthalpy, s: SpecEntropy, reference: &ReferenceState) -> SpecExergy {
        h - reference.h - self.ambient.t0().value * (s - reference.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemical::TabulatedDataset;
    use crate::model::{IdealGas, IdealGasModel, Incompressible, IncompressibleModel};
    use crate::species::Species;
    use ex_core::units::{k, pa};
    use ex_core::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-6,
        rel: 1e-9,
    };

    fn air_setup() -> (AmbientState, IdealGasModel, Substance) {
        let air = Substance::Pure(Species::Air);
        let model = IdealGasModel::new().with("Air", IdealGas::for_species(Species::Air, 1005.0));
        let ambient = AmbientState::builder(k(298.15), pa(101_325.0))
            .unwrap()
            .resolve([&air], &model)
            .unwrap();
        (ambient, model, air)
    }

    #[test]
    fn ambient_stream_has_zero_exergy() {
        let (ambient, model, air) = air_setup();
        let (h0, s0) = model.hs_at(&air, k(298.15), pa(101_325.0)).unwrap();
        let state = StreamState::new(k(298.15), pa(101_325.0), h0, s0).unwrap();
        let e = ExergyEvaluator::new(&ambient, &model)
            .with_split(true)
            .evaluate(&air, &state)
            .unwrap();
        assert!(e.physical.abs() < 1e-9);
        assert!(e.thermal.unwrap().abs() < 1e-9);
        assert!(e.mechanical.unwrap().abs() < 1e-9);
        assert_eq!(e.reference, ReferenceBasis::Ambient);
    }

    #[test]
    fn hot_compressed_air_splits() {
        let (ambient, model, air) = air_setup();
        let (h, s) = model.hs_at(&air, k(450.0), pa(5e5)).unwrap();
        let state = StreamState::new(k(450.0), pa(5e5), h, s).unwrap();
        let e = ExergyEvaluator::new(&ambient, &model)
            .with_split(true)
            .evaluate(&air, &state)
            .unwrap();
        let (t, m) = (e.thermal.unwrap(), e.mechanical.unwrap());
        assert!(t > 0.0);
        assert!(m > 0.0);
        assert!(nearly_equal(t + m, e.physical, TOL));
    }

    #[test]
    fn no_split_by_default() {
        let (ambient, model, air) = air_setup();
        let state = StreamState::new(k(400.0), pa(2e5), 1.0e5, 300.0).unwrap();
        let e = ExergyEvaluator::new(&ambient, &model)
            .evaluate(&air, &state)
            .unwrap();
        assert!(e.thermal.is_none());
        assert!(e.mechanical.is_none());
        assert!(e.chemical.is_none());
        assert_eq!(e.kinetic(), ExergyContribution::NotConsidered);
        assert_eq!(e.potential(), ExergyContribution::NotConsidered);
    }

    #[test]
    fn chemical_exergy_is_tagged() {
        let (ambient, model, air) = air_setup();
        let dataset = TabulatedDataset::builtin(DatasetVariant::Szargut2007);
        let state = StreamState::new(k(298.15), pa(101_325.0), 0.0, 0.0).unwrap();
        let e = ExergyEvaluator::new(&ambient, &model)
            .with_chemical(&dataset)
            .evaluate(&air, &state)
            .unwrap();
        let ch = e.chemical.unwrap();
        assert_eq!(ch.dataset, DatasetVariant::Szargut2007);
        assert!(nearly_equal(e.total(), e.physical + ch.value, TOL));
    }

    #[test]
    fn non_fluid_uses_minimum_temperature_reference() {
        let salt = Substance::Named("solar_salt".into());
        let params = Incompressible {
            c: 1500.0,
            v: 5.0e-4,
            t_min: Some(533.15),
        };
        let model = IncompressibleModel::new().with("solar_salt", params);
        let ambient = AmbientState::builder(k(298.15), pa(1e5))
            .unwrap()
            .resolve([&salt], &model)
            .unwrap();

        let (h, s) = model.hs_at(&salt, k(838.15), pa(3e5)).unwrap();
        let state = StreamState::new(k(838.15), pa(3e5), h, s).unwrap();
        let e = ExergyEvaluator::new(&ambient, &model)
            .with_split(true)
            .evaluate(&salt, &state)
            .unwrap();

        assert_eq!(e.reference, ReferenceBasis::MinimumFluidTemperature);
        let expected = 1500.0 * (838.15 - 533.15) - 298.15 * 1500.0 * (838.15_f64 / 533.15).ln();
        assert!(nearly_equal(e.physical, expected, TOL));

        // The naive dead-state value differs.
        let (h0, s0) = model.hs_at(&salt, k(298.15), pa(1e5)).unwrap();
        let naive = h - h0 - 298.15 * (s - s0);
        assert!((naive - e.physical).abs() > 1.0);

        assert!(nearly_equal(e.thermal.unwrap(), e.physical, TOL));
        assert_eq!(e.mechanical, Some(0.0));
    }

    #[test]
    fn unresolved_substance_propagates() {
        let (ambient, model, _) = air_setup();
        let state = StreamState::new(k(300.0), pa(1e5), 0.0, 0.0).unwrap();
        assert!(ExergyEvaluator::new(&ambient, &model)
            .evaluate(&Species::CO2.into(), &state)
            .is_err());
    }
}
