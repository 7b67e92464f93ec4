//! Analysis configuration.

use ex_core::Tolerances;
use serde::{Deserialize, Serialize};

/// Tolerance for balance closure and system consistency checks.
///
/// A deviation is accepted when it is at most `max(abs, rel · |scale|)`,
/// where the scale is the fuel of the component or system being checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceTolerance {
    /// Absolute tolerance [W].
    pub abs: f64,
    /// Relative tolerance.
    pub rel: f64,
}

impl Default for BalanceTolerance {
    fn default() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-5,
        }
    }
}

impl BalanceTolerance {
    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            abs: self.abs,
            rel: self.rel,
        }
    }
}

impl From<BalanceTolerance> for Tolerances {
    fn from(t: BalanceTolerance) -> Self {
        t.tolerances()
    }
}

/// Switches for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Evaluate thermal and mechanical exergy for every material stream.
    pub split_physical_exergy: bool,
    /// Evaluate chemical exergy; requires a dataset.
    pub chemical_exergy: bool,
    pub tolerance: BalanceTolerance,
}

impl AnalysisOptions {
    pub fn with_split(mut self, split: bool) -> Self {
        self.split_physical_exergy = split;
        self
    }

    pub fn with_chemical(mut self, chemical: bool) -> Self {
        self.chemical_exergy = chemical;
        self
    }

    pub fn with_tolerance(mut self, tolerance: BalanceTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}
