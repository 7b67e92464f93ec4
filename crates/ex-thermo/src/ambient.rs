//! Ambient (dead) state.

use std::collections::BTreeMap;

use crate::error::{ThermoError, ThermoResult};
use crate::model::PropertyModel;
use crate::substance::Substance;
use ex_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};

/// Per-substance reference resolved at analysis start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmbientReference {
    /// Fluid at (T0, p0): h0 and s0 at the dead state.
    Fluid { h0: SpecEnthalpy, s0: SpecEntropy },
    /// Not fluid at ambient conditions. The reference sub-state sits at the
    /// minimum fluid-phase temperature and the stream's own pressure.
    NonFluid { t_min: Temperature },
}

/// T0, p0 and the resolved per-substance references.
///
/// Immutable once built; shared read-only by every evaluation of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientState {
    t0: Temperature,
    p0: Pressure,
    references: BTreeMap<String, AmbientReference>,
}

impl AmbientState {
    /// Start building an ambient state. T0 and p0 must be positive.
    pub fn builder(t0: Temperature, p0: Pressure) -> ThermoResult<AmbientBuilder> {
        if !t0.value.is_finite() || t0.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "ambient temperature must be positive and finite",
            });
        }
        if !p0.value.is_finite() || p0.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "ambient pressure must be positive and finite",
            });
        }
        Ok(AmbientBuilder {
            t0,
            p0,
            overrides: BTreeMap::new(),
            explicit: BTreeMap::new(),
        })
    }

    pub fn t0(&self) -> Temperature {
        self.t0
    }

    pub fn p0(&self) -> Pressure {
        self.p0
    }

    /// Resolved reference for a substance.
    pub fn reference(&self, substance: &Substance) -> ThermoResult<AmbientReference> {
        let key = substance.key();
        self.references
            .get(&key)
            .copied()
            .ok_or(ThermoError::UnresolvedReference { substance: key })
    }

    /// Keys of all substances with a resolved reference.
    pub fn substances(&self) -> impl Iterator<Item = &str> {
        self.references.keys().map(String::as_str)
    }
}

/// Collects overrides, then resolves references against a property model.
#[derive(Debug, Clone)]
pub struct AmbientBuilder {
    t0: Temperature,
    p0: Pressure,
    overrides: BTreeMap<String, Temperature>,
    explicit: BTreeMap<String, AmbientReference>,
}

impl AmbientBuilder {
    /// Override the minimum fluid-phase temperature of a substance.
    pub fn min_fluid_temperature(mut self, key: impl Into<String>, t_min: Temperature) -> Self {
        self.overrides.insert(key.into(), t_min);
        self
    }

    /// Supply a reference directly instead of asking the property model.
    pub fn reference(mut self, key: impl Into<String>, reference: AmbientReference) -> Self {
        self.explicit.insert(key.into(), reference);
        self
    }

    /// Resolve the reference of every substance.
    ///
    /// A substance is non-fluid at ambient iff its minimum fluid temperature
    /// (override first, then the model's) lies above T0.
    pub fn resolve<'a>(
        self,
        substances: impl IntoIterator<Item = &'a Substance>,
        model: &dyn PropertyModel,
    ) -> ThermoResult<AmbientState> {
        for t_min in self.overrides.values() {
            if !t_min.value.is_finite() || t_min.value <= 0.0 {
                return Err(ThermoError::NonPhysical {
                    what: "minimum fluid temperature must be positive and finite",
                });
            }
        }

        let mut references = self.explicit;
        for substance in substances {
            let key = substance.key();
            if references.contains_key(&key) {
                continue;
            }
            let t_min = self
                .overrides
                .get(&key)
                .copied()
                .or_else(|| model.min_fluid_temperature(substance));
            let reference = match t_min {
                Some(t_min) if t_min.value > self.t0.value => AmbientReference::NonFluid { t_min },
                _ => {
                    let (h0, s0) = model.hs_at(substance, self.t0, self.p0)?;
                    AmbientReference::Fluid { h0, s0 }
                }
            };
            references.insert(key, reference);
        }

        Ok(AmbientState {
            t0: self.t0,
            p0: self.p0,
            references,
        })
    }
}
