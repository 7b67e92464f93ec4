//! Resolved stream state.

use crate::error::{ThermoError, ThermoResult};
use ex_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};

/// Temperature, pressure, specific enthalpy and entropy of a material stream.
///
/// Values are supplied by the caller (typically a process simulator); the
/// engine never recomputes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamState {
    t: Temperature,
    p: Pressure,
    h: SpecEnthalpy,
    s: SpecEntropy,
}

impl StreamState {
    /// Validates that T and p are positive and h, s finite.
    pub fn new(t: Temperature, p: Pressure, h: SpecEnthalpy, s: SpecEntropy) -> ThermoResult<Self> {
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
        if !h.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        if !s.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "entropy must be finite",
            });
        }
        Ok(Self { t, p, h, s })
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.h
    }

    pub fn entropy(&self) -> SpecEntropy {
        self.s
    }
}
