//! Single-stream heater/cooler rule.

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::error::ComponentResult;
use crate::flow::{EnergyInteraction, Flow, MaterialFlow, heat_exergy};
use crate::traits::{ClassificationRule, ExergyFlows};

/// One material stream heated or cooled across the component boundary.
///
/// The heat duty comes from connected heat streams and heat interactions,
/// or from the enthalpy change of the stream. When the heat crosses at a
/// known boundary temperature its exergy is used directly; otherwise the
/// partition depends on where the stream sits relative to T0.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleHeatExchangerRule;

fn boundary_temperature(ctx: &ClassifyContext<'_>) -> Option<f64> {
    let from_streams = ctx.inlets.iter().chain(&ctx.outlets).find_map(|f| match f {
        Flow::Heat { temperature, .. } => *temperature,
        _ => None,
    });
    from_streams.or_else(|| {
        ctx.interactions.iter().find_map(|i| match i {
            EnergyInteraction::Heat { temperature, .. } => *temperature,
            _ => None,
        })
    })
}

fn ph_drop(inlet: &MaterialFlow, outlet: &MaterialFlow) -> f64 {
    inlet.ph() - outlet.ph()
}

impl ClassificationRule for SimpleHeatExchangerRule {
    fn archetype(&self) -> Archetype {
        Archetype::SimpleHeatExchanger
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let (ins, outs) = ctx.material_ports(1..=1, 1..=1, "one material inlet and one material outlet")?;
        let (inlet, outlet) = (ins[0], outs[0]);
        let t0 = ctx.t0;
        let q = ctx.net_heat_in().unwrap_or_else(|| ctx.enthalpy_rise());

        if ctx.dissipative || q == 0.0 {
            return Ok(ExergyFlows::new().fuel("ΔE_PH", ph_drop(inlet, outlet)));
        }

        if let Some(tb) = boundary_temperature(ctx) {
            let e_q = heat_exergy(q, Some(tb), t0);
            return Ok(if q < 0.0 {
                ExergyFlows::new().product("E_Q", e_q).fuel("ΔE_PH", ph_drop(inlet, outlet))
            } else {
                ExergyFlows::new().product("ΔE_PH", -ph_drop(inlet, outlet)).fuel("E_Q", e_q)
            });
        }

        let (t_in, t_out) = (inlet.t, outlet.t);
        let split = ctx.split;

        if q < 0.0 {
            if t_in >= t0 && t_out >= t0 {
                let fuel = ph_drop(inlet, outlet);
                let product = if split {
                    ctx.thermal(inlet)? - ctx.thermal(outlet)?
                } else {
                    fuel
                };
                return Ok(ExergyFlows::new().product("ΔE_T", product).fuel("ΔE_PH", fuel));
            }
            if t_in >= t0 && t_out < t0 {
                return Ok(if split {
                    let e_t_out = ctx.thermal(outlet)?;
                    ExergyFlows::new()
                        .product(format!("E_T[{}]", outlet.name), e_t_out)
                        .fuel(format!("E_T[{}]", inlet.name), ctx.thermal(inlet)?)
                        .fuel(format!("E_T[{}]", outlet.name), e_t_out)
                        .fuel("ΔE_M", ctx.mechanical(inlet)? - ctx.mechanical(outlet)?)
                } else {
                    ExergyFlows::new()
                        .product(format!("E_PH[{}]", outlet.name), outlet.ph())
                        .fuel(format!("E_PH[{}]", inlet.name), inlet.ph())
                });
            }
            if t_in <= t0 && t_out < t0 {
                return Ok(if split {
                    let product = ctx.thermal(outlet)? - ctx.thermal(inlet)?;
                    ExergyFlows::new()
                        .product("ΔE_T", product)
                        .fuel("ΔE_T", product)
                        .fuel("ΔE_M", ctx.mechanical(inlet)? - ctx.mechanical(outlet)?)
                } else {
                    let rise = -ph_drop(inlet, outlet);
                    ExergyFlows::new().product("ΔE_PH", rise).fuel("ΔE_PH", rise)
                });
            }
        } else {
            if t_in >= t0 && t_out >= t0 {
                let product = -ph_drop(inlet, outlet);
                let mut flows = ExergyFlows::new().product("ΔE_PH", product).fuel("ΔE_PH", product);
                if split {
                    flows = flows.fuel("ΔE_M", ctx.mechanical(inlet)? - ctx.mechanical(outlet)?);
                }
                return Ok(flows);
            }
            if t_in < t0 && t_out >= t0 {
                return Ok(if split {
                    let product = ctx.thermal(outlet)? + ctx.thermal(inlet)?;
                    ExergyFlows::new()
                        .product("E_T[out] + E_T[in]", product)
                        .fuel("E_T[out] + E_T[in]", product)
                        .fuel("ΔE_M", ctx.mechanical(inlet)? - ctx.mechanical(outlet)?)
                } else {
                    let rise = -ph_drop(inlet, outlet);
                    ExergyFlows::new().product("ΔE_PH", rise).fuel("ΔE_PH", rise)
                });
            }
            if t_in < t0 && t_out <= t0 {
                return Ok(if split {
                    let e_m_in = ctx.mechanical(inlet)?;
                    let e_m_out = ctx.mechanical(outlet)?;
                    let product = (ctx.thermal(inlet)? - ctx.thermal(outlet)?) + (e_m_out - e_m_in);
                    ExergyFlows::new()
                        .product("ΔE_T + ΔE_M", product)
                        .fuel("ΔE_T + ΔE_M", product)
                        .fuel("ΔE_M", e_m_in - e_m_out)
                } else {
                    let drop = ph_drop(inlet, outlet);
                    ExergyFlows::new().product("ΔE_PH", drop).fuel("ΔE_PH", drop)
                });
            }
        }

        Err(ctx.not_partitionable(format!(
            "heat duty {q} W with inlet {t_in} K and outlet {t_out} K around T0 = {t0} K"
        )))
    }
}
