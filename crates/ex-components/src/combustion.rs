//! Combustion chamber rule.

use crate::archetype::Archetype;
use crate::context::{ClassifyContext, sum_of, try_sum_of};
use crate::error::ComponentResult;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Reactor converting chemical exergy of the reactants into physical
/// exergy of the products.
///
/// Fuel is the chemical exergy consumed, product the physical exergy
/// gained. Chemical exergy must be enabled for the analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombustionRule;

impl ClassificationRule for CombustionRule {
    fn archetype(&self) -> Archetype {
        Archetype::CombustionChamber
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        if !ctx.chemical {
            return Err(ctx.missing("chemical exergy (enable it for combustion chambers)"));
        }
        let (ins, outs) = ctx.material_ports(
            1..=usize::MAX,
            1..=usize::MAX,
            "at least one material inlet and one material outlet",
        )?;

        let ch_in = try_sum_of(&ins, |f| ctx.chemical(f))?;
        let ch_out = try_sum_of(&outs, |f| ctx.chemical(f))?;
        let ph_in = sum_of(&ins, |f| f.ph());
        let ph_out = sum_of(&outs, |f| f.ph());

        Ok(ExergyFlows::new()
            .fuel("ΣE_CH[in]", ch_in)
            .fuel("ΣE_CH[out]", -ch_out)
            .product("ΣE_PH[out]", ph_out)
            .product("ΣE_PH[in]", -ph_in)
            .with_losses(ctx.heat_loss_terms()))
    }
}
