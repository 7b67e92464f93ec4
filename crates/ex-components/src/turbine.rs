//! Turbine / expander rule.

use crate::archetype::Archetype;
use crate::context::{ClassifyContext, sum_of, try_sum_of};
use crate::error::ComponentResult;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Expansion machine delivering shaft work.
///
/// The work comes from connected power streams and shaft interactions;
/// without either it is taken from the energy balance over the streams
/// and any heat exchanged. Heat leaking out of the casing is booked as loss.
///
/// | temperatures | product | fuel |
/// |---|---|---|
/// | T_in ≥ T0, T0 ≤ T_out ≤ T_in | \|W\| | E^PH_in − ΣE^PH_out |
/// | T_in > T0 ≥ T_out (split) | \|W\| + ΣE^T_out | E^T_in + E^M_in − ΣE^M_out |
/// | T_in, T_out ≤ T0 (split) | \|W\| + ΣE^T_out − E^T_in | E^M_in − ΣE^M_out |
#[derive(Debug, Default, Clone, Copy)]
pub struct TurbineRule;

impl ClassificationRule for TurbineRule {
    fn archetype(&self) -> Archetype {
        Archetype::Turbine
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let flows = partition(ctx)?;
        Ok(flows.with_losses(ctx.heat_loss_terms()))
    }
}

fn partition(ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
    let (ins, outs) = ctx.material_ports(1..=1, 1..=usize::MAX, "one material inlet and at least one material outlet")?;
    let inlet = ins[0];
    let t0 = ctx.t0;

    let work = match ctx.net_power_in() {
        Some(net_in) if net_in != 0.0 => net_in.abs(),
        _ => (ctx.enthalpy_rise() - ctx.net_heat_in().unwrap_or(0.0)).abs(),
    };

    let t_in = inlet.t;
    let all_above = outs.iter().all(|o| o.t >= t0 && o.t <= t_in);
    let all_at_or_below = outs.iter().all(|o| o.t <= t0);

    if t_in >= t0 && all_above {
        return Ok(ExergyFlows::new()
            .product("W", work)
            .fuel(format!("E_PH[{}]", inlet.name), inlet.ph())
            .fuel("ΣE_PH[out]", -sum_of(&outs, |o| o.ph())));
    }

    if t_in > t0 && all_at_or_below {
        if !ctx.split {
            return Err(ctx.not_partitionable(
                "expansion across ambient temperature needs the thermal/mechanical split",
            ));
        }
        let e_t_out = try_sum_of(&outs, |o| ctx.thermal(o))?;
        let e_m_out = try_sum_of(&outs, |o| ctx.mechanical(o))?;
        return Ok(ExergyFlows::new()
            .product("W", work)
            .product("ΣE_T[out]", e_t_out)
            .fuel(format!("E_T[{}]", inlet.name), ctx.thermal(inlet)?)
            .fuel(format!("E_M[{}]", inlet.name), ctx.mechanical(inlet)?)
            .fuel("ΣE_M[out]", -e_m_out));
    }

    if t_in <= t0 && all_at_or_below {
        if !ctx.split {
            return Err(ctx.not_partitionable(
                "expansion below ambient temperature needs the thermal/mechanical split",
            ));
        }
        let e_t_out = try_sum_of(&outs, |o| ctx.thermal(o))?;
        let e_m_out = try_sum_of(&outs, |o| ctx.mechanical(o))?;
        return Ok(ExergyFlows::new()
            .product("W", work)
            .product("ΣE_T[out]", e_t_out)
            .product(format!("E_T[{}]", inlet.name), -ctx.thermal(inlet)?)
            .fuel(format!("E_M[{}]", inlet.name), ctx.mechanical(inlet)?)
            .fuel("ΣE_M[out]", -e_m_out));
    }

    Err(ctx.not_partitionable(format!(
        "outlet temperature above inlet ({} K) or outlets on both sides of T0",
        t_in
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::balance;
    use crate::flow::EnergyInteraction;
    use crate::testing::*;
    use ex_core::Tolerances;

    #[test]
    fn hot_expansion_work_is_product() {
        let a = Archetype::Turbine;
        let ins = [material("1", 10.0, 800.0, 900e3)];
        let outs = [material("2", 10.0, 500.0, 300e3), power("W", 5.0e6)];
        let flows = TurbineRule.classify(&ctx(&a, &ins, &outs, &[])).unwrap();
        assert!(close(flows.product_total(), 5.0e6));
        assert!(close(flows.fuel_total(), 6.0e6));
    }

    #[test]
    fn casing_heat_leak_is_loss() {
        let a = Archetype::Turbine;
        let ins = [material("1", 10.0, 800.0, 900e3)];
        let outs = [material("2", 10.0, 500.0, 300e3), power("W", 5.0e6)];
        let leak = [EnergyInteraction::Heat {
            name: "Q_casing".into(),
            duty: -40e3,
            temperature: Some(2.0 * T0),
        }];
        let ctx = ctx(&a, &ins, &outs, &leak);
        let flows = TurbineRule.classify(&ctx).unwrap();
        assert!(close(flows.loss_total(), 20e3));
        let b = balance(&ctx, flows, &Tolerances::default()).unwrap();
        assert!(close(b.destruction, 1.0e6 - 20e3));
    }

    #[test]
    fn work_falls_back_to_enthalpy_balance() {
        let a = Archetype::Turbine;
        let ins = [with_enthalpy(material("1", 2.0, 700.0, 500e3), 3.2e6)];
        let outs = [with_enthalpy(material("2", 2.0, 400.0, 100e3), 2.5e6)];
        let flows = TurbineRule.classify(&ctx(&a, &ins, &outs, &[])).unwrap();
        assert!(close(flows.product_total(), 1.4e6));
        assert!(close(flows.fuel_total(), 0.8e6));
    }

    #[test]
    fn crossing_ambient_uses_split() {
        let a = Archetype::Turbine;
        let ins = [split("1", 1.0, 320.0, 5e3, 80e3)];
        let outs = [split("2", 1.0, 280.0, 2e3, 10e3), power("W", 60e3)];
        let flows = TurbineRule.classify(&ctx(&a, &ins, &outs, &[])).unwrap();
        assert!(close(flows.product_total(), 62e3));
        assert!(close(flows.fuel_total(), 5e3 + 80e3 - 10e3));
    }

    #[test]
    fn crossing_without_split_is_rejected() {
        let a = Archetype::Turbine;
        let ins = [material("1", 1.0, 320.0, 85e3)];
        let outs = [material("2", 1.0, 280.0, 12e3), power("W", 60e3)];
        assert!(TurbineRule.classify(&ctx(&a, &ins, &outs, &[])).is_err());
    }

    #[test]
    fn outlet_hotter_than_inlet_is_rejected() {
        let a = Archetype::Turbine;
        let ins = [material("1", 1.0, 400.0, 85e3)];
        let outs = [material("2", 1.0, 450.0, 12e3)];
        assert!(TurbineRule.classify(&ctx(&a, &ins, &outs, &[])).is_err());
    }
}
