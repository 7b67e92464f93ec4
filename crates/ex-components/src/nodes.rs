//! Mixing, splitting and phase-separating nodes.

use crate::archetype::Archetype;
use crate::common::mass_conserved;
use crate::context::{ClassifyContext, sum_of};
use crate::error::ComponentResult;
use crate::flow::MaterialFlow;
use crate::traits::{ClassificationRule, ExergyFlows};

/// Relative mass imbalance tolerated across a node.
const MASS_BALANCE_REL: f64 = 1e-6;

fn check_mass(
    ctx: &ClassifyContext<'_>,
    ins: &[&MaterialFlow],
    outs: &[&MaterialFlow],
) -> ComponentResult<()> {
    if mass_conserved(ins, outs, MASS_BALANCE_REL) {
        Ok(())
    } else {
        Err(ctx.not_partitionable("inlet and outlet mass flows do not balance"))
    }
}

/// Books a signed exergy difference: exergy given up is fuel, exergy
/// received is product.
fn book(flows: ExergyFlows, label: String, delta: f64) -> ExergyFlows {
    if delta >= 0.0 {
        flows.fuel(label, delta)
    } else {
        flows.product(label, -delta)
    }
}

/// Several inlets merging into one outlet (`Mixer`, `CollectingHeader`).
///
/// Each inlet contributes m_i (e_i − e_out): inlets above the outlet
/// specific exergy are fuel, those below are product.
#[derive(Debug, Clone)]
pub struct MixerRule {
    archetype: Archetype,
}

impl MixerRule {
    pub fn mixer() -> Self {
        Self {
            archetype: Archetype::Mixer,
        }
    }

    pub fn collecting_header() -> Self {
        Self {
            archetype: Archetype::CollectingHeader,
        }
    }
}

impl ClassificationRule for MixerRule {
    fn archetype(&self) -> Archetype {
        self.archetype.clone()
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let (ins, outs) = ctx.material_ports(1..=usize::MAX, 1..=1, "material inlets and one material outlet")?;
        check_mass(ctx, &ins, &outs)?;
        let e_out = outs[0].exergy.total();
        Ok(ins.iter().fold(ExergyFlows::new(), |flows, inlet| {
            let delta = inlet.mass_flow * (inlet.exergy.total() - e_out);
            book(flows, format!("m(e[{}] − e_out)", inlet.name), delta)
        }))
    }
}

/// One inlet divided into several outlets (`Splitter`, `DistributingHeader`).
#[derive(Debug, Clone)]
pub struct SplitterRule {
    archetype: Archetype,
}

impl SplitterRule {
    pub fn splitter() -> Self {
        Self {
            archetype: Archetype::Splitter,
        }
    }

    pub fn distributing_header() -> Self {
        Self {
            archetype: Archetype::DistributingHeader,
        }
    }
}

impl ClassificationRule for SplitterRule {
    fn archetype(&self) -> Archetype {
        self.archetype.clone()
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let (ins, outs) = ctx.material_ports(1..=1, 1..=usize::MAX, "one material inlet and material outlets")?;
        check_mass(ctx, &ins, &outs)?;
        let e_in = ins[0].exergy.total();
        Ok(outs.iter().fold(ExergyFlows::new(), |flows, outlet| {
            let delta = outlet.mass_flow * (e_in - outlet.exergy.total());
            book(flows, format!("m(e_in − e[{}])", outlet.name), delta)
        }))
    }
}

/// Separation of a two-phase inlet into vapour and liquid outlets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlashTankRule;

impl ClassificationRule for FlashTankRule {
    fn archetype(&self) -> Archetype {
        Archetype::FlashTank
    }

    fn classify(&self, ctx: &ClassifyContext<'_>) -> ComponentResult<ExergyFlows> {
        let (ins, outs) = ctx.material_ports(1..=usize::MAX, 1..=usize::MAX, "material inlets and outlets")?;
        check_mass(ctx, &ins, &outs)?;
        if ctx.split {
            let rate = |f: &MaterialFlow| f.thermal().unwrap_or_else(|| f.ph());
            Ok(ExergyFlows::new()
                .fuel("ΣE_T[in]", sum_of(&ins, rate))
                .product("ΣE_T[out]", sum_of(&outs, rate)))
        } else {
            Ok(ExergyFlows::new()
                .fuel("ΣE_PH[in]", sum_of(&ins, |f| f.ph()))
                .product("ΣE_PH[out]", sum_of(&outs, |f| f.ph())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComponentError;
    use crate::testing::*;

    #[test]
    fn mixer_hot_inlet_is_fuel_cold_inlet_is_product() {
        let a = Archetype::Mixer;
        let ins = [material("hot", 1.0, 400.0, 50e3), material("cold", 1.0, 300.0, 10e3)];
        let outs = [material("mix", 2.0, 350.0, 20e3)];
        let flows = MixerRule::mixer().classify(&ctx(&a, &ins, &outs, &[])).unwrap();
        assert!(close(flows.fuel_total(), 30e3));
        assert!(close(flows.product_total(), 10e3));
    }

    #[test]
    fn mixer_rejects_mass_imbalance() {
        let a = Archetype::CollectingHeader;
        let ins = [material("a", 1.0, 400.0, 50e3), material("b", 1.0, 300.0, 10e3)];
        let outs = [material("mix", 1.5, 350.0, 20e3)];
        assert!(matches!(
            MixerRule::collecting_header().classify(&ctx(&a, &ins, &outs, &[])),
            Err(ComponentError::NotPartitionable { .. })
        ));
    }

    #[test]
    fn ideal_splitter_balances_to_zero() {
        let a = Archetype::Splitter;
        let ins = [material("in", 3.0, 400.0, 50e3)];
        let outs = [material("a", 1.0, 400.0, 50e3), material("b", 2.0, 400.0, 50e3)];
        let flows = SplitterRule::splitter().classify(&ctx(&a, &ins, &outs, &[])).unwrap();
        assert_eq!(flows.fuel_total(), 0.0);
        assert_eq!(flows.product_total(), 0.0);
    }

    #[test]
    fn flash_tank_sums_physical_exergy() {
        let a = Archetype::FlashTank;
        let ins = [material("in", 2.0, 350.0, 40e3)];
        let outs = [material("vap", 0.5, 330.0, 90e3), material("liq", 1.5, 330.0, 15e3)];
        let flows = FlashTankRule.classify(&ctx(&a, &ins, &outs, &[])).unwrap();
        assert!(close(flows.fuel_total(), 80e3));
        assert!(close(flows.product_total(), 67.5e3));
    }
}
