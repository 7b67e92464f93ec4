//! Compressor and pump rule.

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::error::ComponentResult;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Compression of one material stream with power input.
///
/// The power is the net power entering through power streams and shaft
/// interactions, or the enthalpy rise less the heat taken in when neither
/// is connected. Heat leaking out of the casing is booked as loss.
#[derive(Debug, Clone)]
pub struct CompressionRule {
    archetype: Archetype,
}

impl CompressionRule {
    pub fn compressor() -> Self {
        Self {
            archetype: Archetype::Compressor,
        }
    }

    pub fn pump() -> Self {
        Self {
            archetype: Archetype::Pump,
        }
    }
}

impl ClassificationRule for CompressionRule {
    fn archetype(&self) -> Archetype {
        self.archetype.clone()
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
    let work = ctx
        .net_power_in()
        .unwrap_or_else(|| ctx.enthalpy_rise() - ctx.net_heat_in().unwrap_or(0.0));

    if inlet.t >= t0 {
        return Ok(ExergyFlows::new()
            .product(format!("E_PH[{}]", outlet.name), outlet.ph())
            .product(format!("E_PH[{}]", inlet.name), -inlet.ph())
            .fuel("W", work));
    }

    if !ctx.split {
        return Err(ctx.not_partitionable(format!(
            "inlet below ambient ({} K < {} K) needs the thermal/mechanical split",
            inlet.t, t0
        )));
    }

    let e_m_rise = ctx.mechanical(outlet)? - ctx.mechanical(inlet)?;
    if outlet.t > t0 {
        Ok(ExergyFlows::new()
            .product(format!("E_T[{}]", outlet.name), ctx.thermal(outlet)?)
            .product("ΔE_M", e_m_rise)
            .fuel("W", work)
            .fuel(format!("E_T[{}]", inlet.name), ctx.thermal(inlet)?))
    } else {
        Ok(ExergyFlows::new()
            .product("ΔE_M", e_m_rise)
            .fuel("W", work)
            .fuel(
                "E_T[in] − E_T[out]",
                ctx.thermal(inlet)? - ctx.thermal(outlet)?,
            ))
    }
}
