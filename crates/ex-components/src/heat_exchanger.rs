//! Two-stream heat exchanger rule.

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::error::ComponentResult;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Counter/co-current exchanger between a hot and a cold stream.
///
/// Inlet and outlet 0 are the hot side, inlet and outlet 1 the cold side.
/// Heat crossing the component boundary through heat streams or
/// interactions is booked as loss.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeatExchangerRule;

impl ClassificationRule for HeatExchangerRule {
    fn archetype(&self) -> Archetype {
        Archetype::HeatExchanger
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let (ins, outs) = ctx.material_ports(
            2..=2,
            2..=2,
            "hot and cold material inlets and outlets (hot first)",
        )?;
        let (hot_in, cold_in) = (ins[0], ins[1]);
        let (hot_out, cold_out) = (outs[0], outs[1]);
        let t0 = ctx.t0;

        if hot_in.t < cold_in.t {
            return Err(ctx.not_partitionable(format!(
                "hot inlet {} ({} K) is colder than cold inlet {} ({} K)",
                hot_in.name, hot_in.t, cold_in.name, cold_in.t
            )));
        }

        let hot_drop = hot_in.ph() - hot_out.ph();
        if ctx.dissipative {
            return Ok(ExergyFlows::new()
                .fuel("ΔE_PH[hot]", hot_drop)
                .loss("ΔE_PH[cold]", cold_out.ph() - cold_in.ph())
                .with_losses(ctx.heat_loss_terms()));
        }

        let temps = [hot_in.t, hot_out.t, cold_in.t, cold_out.t];
        let flows = if temps.iter().all(|&t| t >= t0) {
            if ctx.split {
                let e_m_cold = ctx.mechanical(cold_in)? - ctx.mechanical(cold_out)?;
                ExergyFlows::new()
                    .product("ΔE_T[cold]", ctx.thermal(cold_out)? - ctx.thermal(cold_in)?)
                    .fuel("ΔE_PH[hot]", hot_drop)
                    .fuel("ΔE_M[cold]", e_m_cold)
            } else {
                ExergyFlows::new()
                    .product("ΔE_PH[cold]", cold_out.ph() - cold_in.ph())
                    .fuel("ΔE_PH[hot]", hot_drop)
            }
        } else if temps.iter().all(|&t| t <= t0) {
            if ctx.split {
                ExergyFlows::new()
                    .product("ΔE_T[hot]", ctx.thermal(hot_out)? - ctx.thermal(hot_in)?)
                    .fuel("ΔE_T[cold]", ctx.thermal(cold_in)? - ctx.thermal(cold_out)?)
                    .fuel("ΔE_M[hot]", ctx.mechanical(hot_in)? - ctx.mechanical(hot_out)?)
                    .fuel("ΔE_M[cold]", ctx.mechanical(cold_in)? - ctx.mechanical(cold_out)?)
            } else {
                ExergyFlows::new()
                    .product("ΔE_PH[hot]", hot_out.ph() - hot_in.ph())
                    .fuel("ΔE_PH[cold]", cold_in.ph() - cold_out.ph())
            }
        } else if hot_in.t > t0 && hot_out.t >= t0 && cold_in.t < t0 && cold_out.t >= t0 {
            if !ctx.split {
                return Err(ctx.not_partitionable(
                    "cold stream crossing ambient needs the thermal/mechanical split",
                ));
            }
            ExergyFlows::new()
                .product(format!("E_T[{}]", cold_out.name), ctx.thermal(cold_out)?)
                .fuel("ΔE_PH[hot]", hot_drop)
                .fuel(format!("E_T[{}]", cold_in.name), ctx.thermal(cold_in)?)
                .fuel("ΔE_M[cold]", ctx.mechanical(cold_in)? - ctx.mechanical(cold_out)?)
        } else {
            return Err(ctx.not_partitionable(format!(
                "no partition for temperatures hot {} K -> {} K, cold {} K -> {} K around T0 = {} K",
                hot_in.t, hot_out.t, cold_in.t, cold_out.t, t0
            )));
        };

        Ok(flows.with_losses(ctx.heat_loss_terms()))
    }
}
