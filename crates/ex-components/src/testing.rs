//! Builders shared by the rule unit tests.

use crate::archetype::Archetype;
use crate::context::ClassifyContext;
use crate::flow::{EnergyInteraction, Flow, MaterialFlow};
use ex_thermo::{ChemicalExergy, DatasetVariant, ReferenceBasis, StreamExergy};

pub const T0: f64 = 298.15;

pub fn material(name: &str, m: f64, t: f64, e_ph: f64) -> Flow {
    Flow::Material(MaterialFlow {
        name: name.into(),
        mass_flow: m,
        t,
        p: 1.0e5,
        h: 0.0,
        exergy: StreamExergy {
            physical: e_ph,
            thermal: None,
            mechanical: None,
            chemical: None,
            reference: ReferenceBasis::Ambient,
        },
    })
}

pub fn split(name: &str, m: f64, t: f64, e_t: f64, e_m: f64) -> Flow {
    Flow::Material(MaterialFlow {
        name: name.into(),
        mass_flow: m,
        t,
        p: 1.0e5,
        h: 0.0,
        exergy: StreamExergy {
            physical: e_t + e_m,
            thermal: Some(e_t),
            mechanical: Some(e_m),
            chemical: None,
            reference: ReferenceBasis::Ambient,
        },
    })
}

pub fn with_chemical(flow: Flow, e_ch: f64) -> Flow {
    match flow {
        Flow::Material(mut m) => {
            m.exergy.chemical = Some(ChemicalExergy {
                value: e_ch,
                dataset: DatasetVariant::Szargut1988,
            });
            Flow::Material(m)
        }
        other => other,
    }
}

pub fn with_enthalpy(flow: Flow, h: f64) -> Flow {
    match flow {
        Flow::Material(mut m) => {
            m.h = h;
            Flow::Material(m)
        }
        other => other,
    }
}

pub fn with_pressure(flow: Flow, p: f64) -> Flow {
    match flow {
        Flow::Material(mut m) => {
            m.p = p;
            Flow::Material(m)
        }
        other => other,
    }
}

pub fn power(name: &str, w: f64) -> Flow {
    Flow::Power {
        name: name.into(),
        power: w,
    }
}

pub fn ctx<'a>(
    archetype: &'a Archetype,
    inlets: &'a [Flow],
    outlets: &'a [Flow],
    interactions: &'a [EnergyInteraction],
) -> ClassifyContext<'a> {
    ClassifyContext {
        component: "unit",
        archetype,
        inlets: inlets.iter().collect(),
        outlets: outlets.iter().collect(),
        interactions,
        t0: T0,
        split: inlets
            .iter()
            .chain(outlets)
            .filter_map(|f| f.as_material())
            .any(|m| m.exergy.thermal.is_some()),
        chemical: false,
        dissipative: false,
    }
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
