//! Error paths of an analysis run.

use ex_analysis::{
    AnalysisOptions, Analyzer, BoundaryDesignation, ErrorKind, Network, SystemBoundary,
};
use ex_components::ClassifierRegistry;
use ex_core::units::{k, pa};
use ex_thermo::{
    AmbientReference, AmbientState, DatasetVariant, IdealGasModel, Species, StreamState, Substance,
    TabulatedDataset,
};

fn ambient() -> AmbientState {
    AmbientState::builder(k(298.0), pa(1.0e5))
        .unwrap()
        .reference("N2", AmbientReference::Fluid { h0: 298.0, s0: 0.98 })
        .resolve(Vec::<&Substance>::new(), &IdealGasModel::new())
        .unwrap()
}

fn state(t: f64, p: f64, h: f64, s: f64) -> StreamState {
    StreamState::new(k(t), pa(p), h, s).unwrap()
}

fn compressor(archetype: &str, work: f64) -> Network {
    let mut b = Network::builder();
    let s1 = b.add_material("1", Species::N2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    let s2 = b.add_material("2", Species::N2, 1.0, state(450.0, 5.0e5, 460.0, 1.05));
    let w = b.add_power("W", work);
    b.add_component("unit", archetype, &[s1, w], &[s2]);
    b.build().unwrap()
}

fn boundary() -> SystemBoundary {
    SystemBoundary {
        fuel: BoundaryDesignation::default().add("W"),
        product: BoundaryDesignation::default().add("2").subtract("1"),
        loss: BoundaryDesignation::default(),
    }
}

fn kind_of(network: &Network, boundary: &SystemBoundary, options: AnalysisOptions) -> ErrorKind {
    let registry = ClassifierRegistry::with_defaults();
    let models = IdealGasModel::new();
    let dataset = TabulatedDataset::builtin(DatasetVariant::Ahrendts);
    Analyzer::new(&registry, &models)
        .with_dataset(&dataset)
        .with_options(options)
        .analyse(network, &ambient(), boundary)
        .unwrap_err()
        .kind()
}

#[test]
fn unregistered_archetype_is_a_classification_error() {
    let net = compressor("Regenerator", 165.0);
    let registry = ClassifierRegistry::with_defaults();
    let models = IdealGasModel::new();
    let err = Analyzer::new(&registry, &models)
        .analyse(&net, &ambient(), &boundary())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Classification);
    let msg = err.to_string();
    assert!(msg.contains("unit") && msg.contains("Regenerator"), "{msg}");
}

#[test]
fn work_below_product_is_negative_destruction() {
    let net = compressor("Compressor", 100.0);
    assert_eq!(
        kind_of(&net, &boundary(), AnalysisOptions::default()),
        ErrorKind::BalanceConsistency
    );
}

#[test]
fn missing_fuel_designation_fails_fast() {
    let net = compressor("Compressor", 165.0);
    let boundary = SystemBoundary {
        product: BoundaryDesignation::default().add("2"),
        ..Default::default()
    };
    assert_eq!(
        kind_of(&net, &boundary, AnalysisOptions::default()),
        ErrorKind::Boundary
    );
}

#[test]
fn inconsistent_designation_is_detected() {
    let net = compressor("Compressor", 165.0);
    // Forgets to subtract the inlet exergy.
    let boundary = SystemBoundary {
        fuel: BoundaryDesignation::default().add("W"),
        product: BoundaryDesignation::default().add("2"),
        loss: BoundaryDesignation::default(),
    };
    assert_eq!(
        kind_of(&net, &boundary, AnalysisOptions::default()),
        ErrorKind::BalanceConsistency
    );
}

#[test]
fn unknown_substance_reference_is_a_data_error() {
    let mut b = Network::builder();
    let s1 = b.add_material("1", Species::CO2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    let s2 = b.add_material("2", Species::CO2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    b.add_component("v", "Valve", &[s1], &[s2]);
    let net = b.build().unwrap();
    let boundary = SystemBoundary {
        fuel: BoundaryDesignation::default().add("1"),
        product: BoundaryDesignation::default().add("2"),
        loss: BoundaryDesignation::default(),
    };
    assert_eq!(
        kind_of(&net, &boundary, AnalysisOptions::default()),
        ErrorKind::Data
    );
}

#[test]
fn substance_missing_from_dataset_is_a_reference_data_error() {
    let mut b = Network::builder();
    let s1 = b.add_material(
        "1",
        Substance::Named("therminol".into()),
        1.0,
        state(300.0, 1.0e5, 300.0, 1.0),
    );
    let s2 = b.add_material(
        "2",
        Substance::Named("therminol".into()),
        1.0,
        state(299.0, 0.9e5, 300.0, 1.0),
    );
    b.add_component("v", "Valve", &[s1], &[s2]);
    let net = b.build().unwrap();
    let ambient = AmbientState::builder(k(298.0), pa(1.0e5))
        .unwrap()
        .reference("therminol", AmbientReference::Fluid { h0: 298.0, s0: 0.98 })
        .resolve(Vec::<&Substance>::new(), &IdealGasModel::new())
        .unwrap();
    let registry = ClassifierRegistry::with_defaults();
    let models = IdealGasModel::new();
    let dataset = TabulatedDataset::builtin(DatasetVariant::Szargut1988);
    let boundary = SystemBoundary {
        fuel: BoundaryDesignation::default().add("1"),
        product: BoundaryDesignation::default().add("2"),
        loss: BoundaryDesignation::default(),
    };
    let err = Analyzer::new(&registry, &models)
        .with_dataset(&dataset)
        .with_options(AnalysisOptions::default().with_chemical(true))
        .analyse(&net, &ambient, &boundary)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReferenceData);
    assert!(err.to_string().contains("'1'"));
}

#[test]
fn combustion_without_chemical_exergy_is_a_data_error() {
    let mut b = Network::builder();
    let s1 = b.add_material("1", Species::N2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    let s2 = b.add_material("2", Species::N2, 1.0, state(450.0, 5.0e5, 460.0, 1.05));
    b.add_component("cc", "CombustionChamber", &[s1], &[s2]);
    let net = b.build().unwrap();
    let boundary = SystemBoundary {
        fuel: BoundaryDesignation::default().add("1"),
        product: BoundaryDesignation::default().add("2"),
        loss: BoundaryDesignation::default(),
    };
    assert_eq!(
        kind_of(&net, &boundary, AnalysisOptions::default()),
        ErrorKind::Data
    );
}

#[test]
fn every_failing_stream_is_reported() {
    let mut b = Network::builder();
    let a = b.add_material("A", Species::CO2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    let good = b.add_material("mid", Species::N2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    let c = b.add_material("B", Species::CO2, 1.0, state(299.0, 0.9e5, 300.0, 1.0));
    b.add_component("v1", "Valve", &[a], &[good]);
    let out = b.add_material("out", Species::N2, 1.0, state(299.0, 0.9e5, 300.0, 1.0));
    b.add_component("v2", "Valve", &[c], &[out]);
    let net = b.build().unwrap();
    let boundary = SystemBoundary {
        fuel: BoundaryDesignation::default().add("A").add("B"),
        product: BoundaryDesignation::default().add("out"),
        loss: BoundaryDesignation::default(),
    };
    let registry = ClassifierRegistry::with_defaults();
    let models = IdealGasModel::new();
    let err = Analyzer::new(&registry, &models)
        .analyse(&net, &ambient(), &boundary)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
    assert_eq!(err.failures().len(), 2);
    let msg = err.to_string();
    assert!(msg.contains("'A'") && msg.contains("'B'"), "{msg}");
}

#[test]
fn every_failing_component_is_reported() {
    let mut b = Network::builder();
    let s1 = b.add_material("1", Species::N2, 1.0, state(300.0, 1.0e5, 300.0, 1.0));
    let s2 = b.add_material("2", Species::N2, 1.0, state(450.0, 5.0e5, 460.0, 1.05));
    let s3 = b.add_material("3", Species::N2, 1.0, state(500.0, 5.0e5, 520.0, 1.08));
    b.add_component("cc1", "CombustionChamber", &[s1], &[s2]);
    b.add_component("cc2", "CombustionChamber", &[s2], &[s3]);
    let net = b.build().unwrap();
    let boundary = SystemBoundary {
        fuel: BoundaryDesignation::default().add("1"),
        product: BoundaryDesignation::default().add("3"),
        loss: BoundaryDesignation::default(),
    };
    let registry = ClassifierRegistry::with_defaults();
    let models = IdealGasModel::new();
    let err = Analyzer::new(&registry, &models)
        .analyse(&net, &ambient(), &boundary)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
    let names: Vec<String> = err.failures().iter().map(|e| e.to_string()).collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].contains("cc1") && names[1].contains("cc2"), "{names:?}");
}
