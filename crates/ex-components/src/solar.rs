//! Solar collector rule.

use crate::archetype::Archetype;
use crate::context::{ClassifyContext, sum_of};
use crate::error::ComponentResult;
use crate::flow::EnergyInteraction;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Absorbs solar radiation into a heat-transfer fluid.
///
/// Fuel is the exergy of the absorbed radiation, product the physical
/// exergy gained by the fluid.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolarCollectorRule;

impl ClassificationRule for SolarCollectorRule {
    fn archetype(&self) -> Archetype {
        Archetype::SolarCollector
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let (ins, outs) = ctx.material_ports(1..=usize::MAX, 1..=usize::MAX, "material inlets and outlets")?;
        let solar: Vec<&EnergyInteraction> = ctx
            .interactions
            .iter()
            .filter(|i| matches!(i, EnergyInteraction::Solar { .. }))
            .collect();
        if solar.is_empty() {
            return Err(ctx.missing("solar irradiance interaction"));
        }

        let flows = solar.iter().fold(ExergyFlows::new(), |flows, i| {
            flows.fuel(format!("E_sun[{}]", i.name()), i.exergy(ctx.t0))
        });
        Ok(flows
            .product("ΣE_PH[out]", sum_of(&outs, |f| f.ph()))
            .product("ΣE_PH[in]", -sum_of(&ins, |f| f.ph()))
            .with_losses(ctx.heat_loss_terms()))
    }
}
