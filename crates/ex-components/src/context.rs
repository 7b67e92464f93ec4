//! What a classification rule sees of its component.

use crate::archetype::Archetype;
use crate::error::{ComponentError, ComponentResult};
use crate::flow::{EnergyInteraction, Flow, MaterialFlow};
use crate::traits::ExergyTerm;

/// Read-only view of one component for classification.
#[derive(Debug, Clone)]
pub struct ClassifyContext<'a> {
    pub component: &'a str,
    pub archetype: &'a Archetype,
    /// Inlet flows in declaration order.
    pub inlets: Vec<&'a Flow>,
    /// Outlet flows in declaration order.
    pub outlets: Vec<&'a Flow>,
    pub interactions: &'a [EnergyInteraction],
    /// Ambient temperature [K].
    pub t0: f64,
    pub split: bool,
    pub chemical: bool,
    pub dissipative: bool,
}

impl<'a> ClassifyContext<'a> {
    pub fn material_inlets(&self) -> Vec<&'a MaterialFlow> {
        self.inlets.iter().filter_map(|f| f.as_material()).collect()
    }

    pub fn material_outlets(&self) -> Vec<&'a MaterialFlow> {
        self.outlets.iter().filter_map(|f| f.as_material()).collect()
    }

    /// Material inlets and outlets, checked against the expected counts.
    pub fn material_ports(
        &self,
        inlets: std::ops::RangeInclusive<usize>,
        outlets: std::ops::RangeInclusive<usize>,
        expected: &'static str,
    ) -> ComponentResult<(Vec<&'a MaterialFlow>, Vec<&'a MaterialFlow>)> {
        let ins = self.material_inlets();
        let outs = self.material_outlets();
        if !inlets.contains(&ins.len()) || !outlets.contains(&outs.len()) {
            return Err(ComponentError::Connectivity {
                component: self.component.to_string(),
                archetype: self.archetype.to_string(),
                expected,
                inlets: ins.len(),
                outlets: outs.len(),
            });
        }
        Ok((ins, outs))
    }

    /// Net power into the component from power streams and shaft
    /// interactions, or `None` when the component has neither.
    pub fn net_power_in(&self) -> Option<f64> {
        let mut seen = false;
        let mut net = 0.0;
        for flow in &self.inlets {
            if let Flow::Power { power, .. } = flow {
                seen = true;
                net += power;
            }
        }
        for flow in &self.outlets {
            if let Flow::Power { power, .. } = flow {
                seen = true;
                net -= power;
            }
        }
        for interaction in self.interactions {
            if let EnergyInteraction::Shaft { power, .. } = interaction {
                seen = true;
                net += power;
            }
        }
        seen.then_some(net)
    }

    /// Power entering and leaving, as (in, out) magnitudes.
    pub fn power_in_out(&self) -> (f64, f64) {
        let mut p_in = 0.0;
        let mut p_out = 0.0;
        for flow in &self.inlets {
            if let Flow::Power { power, .. } = flow {
                p_in += power;
            }
        }
        for flow in &self.outlets {
            if let Flow::Power { power, .. } = flow {
                p_out += power;
            }
        }
        for interaction in self.interactions {
            if let EnergyInteraction::Shaft { power, .. } = interaction {
                if *power >= 0.0 {
                    p_in += power;
                } else {
                    p_out -= power;
                }
            }
        }
        (p_in, p_out)
    }

    /// Σ m h out − Σ m h in over material streams [W].
    pub fn enthalpy_rise(&self) -> f64 {
        let h_out: f64 = self.material_outlets().iter().map(|m| m.enthalpy_flow()).sum();
        let h_in: f64 = self.material_inlets().iter().map(|m| m.enthalpy_flow()).sum();
        h_out - h_in
    }

    /// Net heat into the component from heat streams and interactions,
    /// or `None` when the component has neither.
    pub fn net_heat_in(&self) -> Option<f64> {
        let mut seen = false;
        let mut net = 0.0;
        for flow in &self.inlets {
            if let Flow::Heat { duty, .. } = flow {
                seen = true;
                net += duty;
            }
        }
        for flow in &self.outlets {
            if let Flow::Heat { duty, .. } = flow {
                seen = true;
                net -= duty;
            }
        }
        for interaction in self.interactions {
            if let EnergyInteraction::Heat { duty, .. } = interaction {
                seen = true;
                net += duty;
            }
        }
        seen.then_some(net)
    }

    /// Exergy of heat leaving the component across the system boundary.
    pub fn heat_loss_terms(&self) -> Vec<ExergyTerm> {
        let mut terms = Vec::new();
        for flow in &self.outlets {
            if let Flow::Heat { name, exergy, .. } = flow {
                terms.push(ExergyTerm::new(format!("E_Q[{name}]"), *exergy));
            }
        }
        for interaction in self.interactions {
            if let EnergyInteraction::Heat { name, duty, .. } = interaction
                && *duty < 0.0
            {
                terms.push(ExergyTerm::new(
                    format!("E_Q[{name}]"),
                    interaction.exergy(self.t0),
                ));
            }
        }
        terms
    }

    /// Thermal exergy rate of a stream; requires the split.
    pub fn thermal(&self, flow: &MaterialFlow) -> ComponentResult<f64> {
        flow.thermal().ok_or_else(|| self.missing("thermal/mechanical exergy split"))
    }

    /// Mechanical exergy rate of a stream; requires the split.
    pub fn mechanical(&self, flow: &MaterialFlow) -> ComponentResult<f64> {
        flow.mechanical()
            .ok_or_else(|| self.missing("thermal/mechanical exergy split"))
    }

    /// Chemical exergy rate of a stream; requires chemical exergy.
    pub fn chemical(&self, flow: &MaterialFlow) -> ComponentResult<f64> {
        flow.chemical().ok_or_else(|| self.missing("chemical exergy"))
    }

    pub fn missing(&self, what: &str) -> ComponentError {
        ComponentError::MissingData {
            component: self.component.to_string(),
            archetype: self.archetype.to_string(),
            what: what.to_string(),
        }
    }

    pub fn not_partitionable(&self, reason: impl Into<String>) -> ComponentError {
        ComponentError::NotPartitionable {
            component: self.component.to_string(),
            archetype: self.archetype.to_string(),
            reason: reason.into(),
        }
    }
}

/// Sum a per-stream rate over a set of flows.
pub(crate) fn sum_of(flows: &[&MaterialFlow], rate: impl Fn(&MaterialFlow) -> f64) -> f64 {
    flows.iter().map(|&f| rate(f)).sum()
}

/// Sum a fallible per-stream rate over a set of flows.
pub(crate) fn try_sum_of(
    flows: &[&MaterialFlow],
    rate: impl Fn(&MaterialFlow) -> ComponentResult<f64>,
) -> ComponentResult<f64> {
    flows.iter().map(|&f| rate(f)).sum()
}
