use std::collections::BTreeMap;

use ex_project::schema::*;
use ex_project::{load, load_json, load_yaml, save_json, save_yaml, validate_case};

fn valve_case() -> Case {
    Case {
        version: CASE_VERSION,
        name: "Throttle".to_string(),
        ambient: AmbientDef {
            temperature_k: 298.15,
            pressure_pa: 101_325.0,
            min_fluid_temperatures: BTreeMap::new(),
            references: BTreeMap::new(),
        },
        options: OptionsDef {
            split_physical_exergy: true,
            chemical_exergy: false,
            tolerance: Some(ToleranceDef {
                abs: 1e-3,
                rel: 1e-6,
            }),
        },
        chemical_dataset: None,
        substances: vec![SubstanceDef {
            id: "n2".to_string(),
            composition: Some(CompositionDef::Pure {
                species: "N2".to_string(),
            }),
            model: PropertyModelDef::IdealGas {
                cp: 1040.0,
                r: None,
            },
        }],
        streams: vec![
            StreamDef {
                id: "in".to_string(),
                kind: StreamKindDef::Material {
                    substance: "n2".to_string(),
                    mass_flow_kg_s: 2.0,
                    temperature_k: 400.0,
                    pressure_pa: 8.0e5,
                    enthalpy_j_kg: None,
                    entropy_j_kg_k: None,
                },
            },
            StreamDef {
                id: "out".to_string(),
                kind: StreamKindDef::Material {
                    substance: "n2".to_string(),
                    mass_flow_kg_s: 2.0,
                    temperature_k: 400.0,
                    pressure_pa: 2.0e5,
                    enthalpy_j_kg: None,
                    entropy_j_kg_k: None,
                },
            },
        ],
        components: vec![ComponentDef {
            id: "v1".to_string(),
            archetype: "Valve".to_string(),
            inlets: vec!["in".to_string()],
            outlets: vec!["out".to_string()],
            interactions: vec![],
            dissipative: false,
        }],
        boundary: BoundaryDef {
            fuel: DesignationDef {
                add: vec!["in".to_string()],
                subtract: vec![],
            },
            product: DesignationDef {
                add: vec!["out".to_string()],
                subtract: vec![],
            },
            loss: DesignationDef::default(),
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let case = valve_case();
    validate_case(&case).unwrap();

    let path = std::env::temp_dir().join("ex_project_roundtrip_valve.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(case, loaded);

    let by_extension = load(&path).unwrap();
    assert_eq!(case, by_extension);
}

#[test]
fn roundtrip_json() {
    let case = valve_case();
    let path = std::env::temp_dir().join("ex_project_roundtrip_valve.json");
    save_json(&path, &case).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(case, loaded);
}

#[test]
fn save_rejects_invalid_case() {
    let mut case = valve_case();
    case.boundary.product = DesignationDef::default();
    let path = std::env::temp_dir().join("ex_project_roundtrip_invalid.yaml");
    assert!(save_yaml(&path, &case).is_err());
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("ex_project_case.toml");
    assert!(matches!(
        load(&path),
        Err(ex_project::ProjectError::UnknownFormat { .. })
    ));
}

#[test]
fn minimal_yaml_uses_defaults() {
    let yaml = r#"
version: 1
name: Minimal
ambient:
  temperature_k: 298.15
  pressure_pa: 101325.0
streams:
  - id: W
    kind: { type: Power, power_w: 10.0 }
  - id: Q
    kind: { type: Heat, duty_w: -10.0 }
components:
  - id: sink
    archetype: Dissipative
    inlets: [W]
    outlets: [Q]
boundary:
  fuel: { add: [W] }
  product: { add: [Q] }
"#;
    let case: Case = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(case.options, OptionsDef::default());
    assert!(case.chemical_dataset.is_none());
    assert!(case.substances.is_empty());
    assert!(case.boundary.loss.is_empty());
    assert!(!case.components[0].dissipative);
    assert!(matches!(
        case.streams[1].kind,
        StreamKindDef::Heat {
            temperature_k: None,
            ..
        }
    ));
    validate_case(&case).unwrap();
}
