//! Property tests over randomly generated valve/mixer networks.

use ex_analysis::{AnalysisOptions, Analyzer, BoundaryDesignation, Network, SystemBoundary};
use ex_components::ClassifierRegistry;
use ex_core::units::{k, pa};
use ex_core::{Tolerances, nearly_equal};
use ex_thermo::{
    AmbientState, IdealGas, IdealGasModel, PropertyModel, Species, StreamState, Substance,
};
use proptest::prelude::*;

const T0: f64 = 298.15;
const P0: f64 = 101_325.0;

fn models() -> IdealGasModel {
    IdealGasModel::new().with("N2", IdealGas::for_species(Species::N2, 1040.0))
}

fn state(models: &IdealGasModel, t: f64, p: f64) -> StreamState {
    let (h, s) = models
        .hs_at(&Substance::Pure(Species::N2), k(t), pa(p))
        .unwrap();
    StreamState::new(k(t), pa(p), h, s).unwrap()
}

/// Two hot streams mixed, then throttled.
fn network(models: &IdealGasModel, m1: f64, m2: f64, t1: f64, t2: f64, p: f64) -> Network {
    // Ideal-gas mixing at constant cp: mass-weighted temperature.
    let t_mix = (m1 * t1 + m2 * t2) / (m1 + m2);
    let mut b = Network::builder();
    let s1 = b.add_material("1", Species::N2, m1, state(models, t1, p));
    let s2 = b.add_material("2", Species::N2, m2, state(models, t2, p));
    let s3 = b.add_material("3", Species::N2, m1 + m2, state(models, t_mix, p));
    let s4 = b.add_material("4", Species::N2, m1 + m2, state(models, t_mix, P0));
    b.add_component("M", "Mixer", &[s1, s2], &[s3]);
    b.add_component("V", "Valve", &[s3], &[s4]);
    b.build().unwrap()
}

fn boundary() -> SystemBoundary {
    SystemBoundary {
        fuel: BoundaryDesignation::default().add("1").add("2"),
        product: BoundaryDesignation::default().add("4"),
        loss: BoundaryDesignation::default(),
    }
}

proptest! {
    #[test]
    fn balances_close_and_runs_repeat(
        m1 in 0.1..20.0f64,
        m2 in 0.1..20.0f64,
        t1 in 310.0..900.0f64,
        t2 in 310.0..900.0f64,
        p in 2.0e5..5.0e6f64,
        split in any::<bool>(),
    ) {
        let models = models();
        let net = network(&models, m1, m2, t1, t2, p);
        let ambient = AmbientState::builder(k(T0), pa(P0))
            .unwrap()
            .resolve(net.substances(), &models)
            .unwrap();
        let registry = ClassifierRegistry::with_defaults();
        let analyzer = Analyzer::new(&registry, &models)
            .with_options(AnalysisOptions::default().with_split(split));

        let report = analyzer.analyse(&net, &ambient, &boundary()).unwrap();
        for c in &report.components {
            let b = &c.balance;
            prop_assert_eq!(b.fuel - b.product - b.loss - b.destruction, 0.0);
            prop_assert!(b.destruction >= -1e-6);
        }
        let tol = Tolerances { abs: 1e-6, rel: 1e-9 };
        prop_assert!(nearly_equal(
            report.system.component_destruction,
            report.system.destruction,
            tol
        ));

        let again = analyzer.analyse(&net, &ambient, &boundary()).unwrap();
        prop_assert_eq!(report, again);
    }
}
