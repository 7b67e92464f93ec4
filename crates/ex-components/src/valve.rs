//! Throttling valve rule.

use crate::archetype::Archetype;
use crate::common::{is_stagnant, same_state};
use crate::context::ClassifyContext;
use crate::error::ComponentResult;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Isenthalpic throttling of one material stream.
///
/// Above ambient a valve only destroys exergy. Below ambient the cooling
/// across the valve is a product, which needs the thermal/mechanical split.
/// Heat leaking through the valve body is booked as loss.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValveRule;

impl ClassificationRule for ValveRule {
    fn archetype(&self) -> Archetype {
        Archetype::Valve
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let flows = partition(ctx)?;
        Ok(flows.with_losses(ctx.heat_loss_terms()))
    }
}

fn partition(ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
    let (ins, outs) = ctx.material_ports(1..=1, 1..=1, "one material inlet and one material outlet")?;
    let (inlet, outlet) = (ins[0], outs[0]);
    let t0 = ctx.t0;

    if is_stagnant(inlet) || same_state(inlet, outlet) {
        tracing::debug!(component = ctx.component, "valve has no flow or no state change");
        return Ok(ExergyFlows::new());
    }

    let dissipative = || {
        ExergyFlows::new()
            .fuel(format!("E_PH[{}]", inlet.name), inlet.ph())
            .fuel(format!("E_PH[{}]", outlet.name), -outlet.ph())
    };

    // Outlet above ambient: throttling only destroys exergy.
    if outlet.t > t0 {
        return Ok(dissipative());
    }

    if !ctx.split {
        tracing::warn!(
            component = ctx.component,
            t_in = inlet.t,
            t_out = outlet.t,
            "valve outlet below ambient without the thermal/mechanical split; treated as dissipative"
        );
        return Ok(dissipative());
    }

    if inlet.t > t0 {
        Ok(ExergyFlows::new()
            .product(format!("E_T[{}]", outlet.name), ctx.thermal(outlet)?)
            .fuel(format!("E_T[{}]", inlet.name), ctx.thermal(inlet)?)
            .fuel(format!("E_M[{}]", inlet.name), ctx.mechanical(inlet)?)
            .fuel(format!("E_M[{}]", outlet.name), -ctx.mechanical(outlet)?))
    } else {
        Ok(ExergyFlows::new()
            .product(format!("E_T[{}]", outlet.name), ctx.thermal(outlet)?)
            .product(format!("E_T[{}]", inlet.name), -ctx.thermal(inlet)?)
            .fuel(format!("E_M[{}]", inlet.name), ctx.mechanical(inlet)?)
            .fuel(format!("E_M[{}]", outlet.name), -ctx.mechanical(outlet)?))
    }
}
