//! Rule for components whose only effect is exergy destruction.

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::error::ComponentResult;
use crate::flow::EnergyInteraction;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Fuel is everything flowing in minus everything flowing out; there is no
/// product.
#[derive(Debug, Default, Clone, Copy)]
pub struct DissipativeRule;

impl ClassificationRule for DissipativeRule {
    fn archetype(&self) -> Archetype {
        Archetype::Dissipative
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let inflow: f64 = ctx.inlets.iter().map(|f| f.exergy_rate()).sum();
        let outflow: f64 = ctx.outlets.iter().map(|f| f.exergy_rate()).sum();
        let interactions: f64 = ctx
            .interactions
            .iter()
            .map(|i| match i {
                EnergyInteraction::Shaft { power, .. } => *power,
                EnergyInteraction::Heat { duty, .. } => i.exergy(ctx.t0).copysign(*duty),
                EnergyInteraction::Solar { .. } => i.exergy(ctx.t0),
            })
            .sum();
        Ok(ExergyFlows::new()
            .fuel("ΣE[in]", inflow)
            .fuel("ΣE[out]", -outflow)
            .fuel("ΣE[interactions]", interactions))
    }
}
