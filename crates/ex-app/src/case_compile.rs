//! Compilation of a validated case into a network and its collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use ex_analysis::{
    AnalysisOptions, BalanceTolerance, BoundaryDesignation, Network, SystemBoundary,
};
use ex_components::EnergyInteraction;
use ex_core::units::constants::R_UNIVERSAL;
use ex_core::units::{k, pa};
use ex_core::{CompId, StreamId};
use ex_project::schema::{
    BoundaryDef, Case, CompositionDef, DesignationDef, InteractionDef, PropertyModelDef,
    StreamKindDef, SubstanceDef,
};
use ex_thermo::{
    AmbientReference, AmbientState, Composition, DatasetVariant, IdealGas, IdealGasModel,
    Incompressible, IncompressibleModel, PropertyModel, PropertyModels, Species, StreamState,
    Substance, TabulatedDataset,
};

use crate::error::{AppError, AppResult};

/// Everything an analysis run needs, built from one case.
pub struct CompiledCase {
    pub name: String,
    pub network: Network,
    pub models: PropertyModels,
    pub ambient: AmbientState,
    pub boundary: SystemBoundary,
    pub options: AnalysisOptions,
    pub dataset: Option<TabulatedDataset>,
    pub stream_ids: HashMap<String, StreamId>,
    pub comp_ids: HashMap<String, CompId>,
}

/// Validate and compile a case.
///
/// Material streams without explicit (h, s) are completed from the
/// substance's property model at the stream temperature and pressure.
pub fn compile_case(case: &Case) -> AppResult<CompiledCase> {
    crate::project_service::validate_case(case)?;

    let mut substances = HashMap::new();
    for def in &case.substances {
        substances.insert(def.id.as_str(), build_substance(def)?);
    }
    let models = build_models(case, &substances)?;

    let mut builder = Network::builder();
    let mut stream_ids = HashMap::new();
    for stream in &case.streams {
        let id = match &stream.kind {
            StreamKindDef::Material {
                substance,
                mass_flow_kg_s,
                temperature_k,
                pressure_pa,
                enthalpy_j_kg,
                entropy_j_kg_k,
            } => {
                let substance = substances.get(substance.as_str()).ok_or_else(|| {
                    AppError::Compile(format!("Substance not found: {substance}"))
                })?;
                let (t, p) = (k(*temperature_k), pa(*pressure_pa));
                let (h, s) = match (enthalpy_j_kg, entropy_j_kg_k) {
                    (Some(h), Some(s)) => (*h, *s),
                    _ => models.hs_at(substance, t, p)?,
                };
                let state = StreamState::new(t, p, h, s)?;
                builder.add_material(&stream.id, substance.clone(), *mass_flow_kg_s, state)
            }
            StreamKindDef::Power { power_w } => builder.add_power(&stream.id, *power_w),
            StreamKindDef::Heat {
                duty_w,
                temperature_k,
            } => builder.add_heat(&stream.id, *duty_w, *temperature_k),
        };
        stream_ids.insert(stream.id.clone(), id);
    }

    let mut comp_ids = HashMap::new();
    for component in &case.components {
        let inlets = lookup_streams(&stream_ids, &component.inlets)?;
        let outlets = lookup_streams(&stream_ids, &component.outlets)?;
        let id = builder.add_component(
            &component.id,
            component.archetype.as_str(),
            &inlets,
            &outlets,
        );
        for interaction in &component.interactions {
            builder.interaction(id, build_interaction(interaction));
        }
        builder.dissipative(id, component.dissipative);
        comp_ids.insert(component.id.clone(), id);
    }
    let network = builder.build()?;

    let mut ambient = AmbientState::builder(
        k(case.ambient.temperature_k),
        pa(case.ambient.pressure_pa),
    )?;
    for (id, t_min) in &case.ambient.min_fluid_temperatures {
        ambient = ambient.min_fluid_temperature(substance_key(&substances, id)?, k(*t_min));
    }
    for (id, reference) in &case.ambient.references {
        ambient = ambient.reference(
            substance_key(&substances, id)?,
            AmbientReference::Fluid {
                h0: reference.h0,
                s0: reference.s0,
            },
        );
    }
    let ambient = ambient.resolve(network.substances(), &models)?;

    let options = AnalysisOptions {
        split_physical_exergy: case.options.split_physical_exergy,
        chemical_exergy: case.options.chemical_exergy,
        tolerance: case
            .options
            .tolerance
            .map(|t| BalanceTolerance {
                abs: t.abs,
                rel: t.rel,
            })
            .unwrap_or_default(),
    };

    let dataset = match &case.chemical_dataset {
        Some(name) => {
            let variant: DatasetVariant = name
                .parse()
                .map_err(|e: &str| AppError::Compile(format!("{e}: {name}")))?;
            Some(TabulatedDataset::builtin(variant))
        }
        None => None,
    };

    tracing::debug!(
        case = %case.name,
        streams = stream_ids.len(),
        components = comp_ids.len(),
        "compiled case"
    );

    Ok(CompiledCase {
        name: case.name.clone(),
        network,
        models,
        ambient,
        boundary: build_boundary(&case.boundary),
        options,
        dataset,
        stream_ids,
        comp_ids,
    })
}

/// Identity of a substance definition.
pub fn build_substance(def: &SubstanceDef) -> AppResult<Substance> {
    match &def.composition {
        Some(CompositionDef::Pure { species }) => Ok(Substance::Pure(parse_species(species)?)),
        Some(CompositionDef::MoleFractions { fractions }) => {
            let mut parsed = Vec::with_capacity(fractions.len());
            for (species, x) in fractions {
                parsed.push((parse_species(species)?, *x));
            }
            Ok(Composition::new_mole_fractions(parsed)?.into())
        }
        None => Ok(Substance::Named(def.id.clone())),
    }
}

/// One backend per model family, each keyed by substance key.
fn build_models(case: &Case, substances: &HashMap<&str, Substance>) -> AppResult<PropertyModels> {
    let mut ideal = IdealGasModel::new();
    let mut incompressible = IncompressibleModel::new();
    let mut needs_coolprop = false;

    for def in &case.substances {
        let substance = substances
            .get(def.id.as_str())
            .ok_or_else(|| AppError::Compile(format!("Substance not found: {}", def.id)))?;
        match &def.model {
            PropertyModelDef::IdealGas { cp, r } => {
                let r = match r {
                    Some(r) => *r,
                    None => {
                        let molar_mass = substance
                            .composition()
                            .map(|c| c.molar_mass())
                            .ok_or_else(|| {
                                AppError::Compile(format!(
                                    "Substance '{}' needs a gas constant",
                                    def.id
                                ))
                            })?;
                        R_UNIVERSAL * 1000.0 / molar_mass
                    }
                };
                ideal.insert(substance.key(), IdealGas { cp: *cp, r });
            }
            PropertyModelDef::Incompressible { c, v } => {
                incompressible.insert(
                    substance.key(),
                    Incompressible {
                        c: *c,
                        v: *v,
                        t_min: None,
                    },
                );
            }
            PropertyModelDef::CoolProp => needs_coolprop = true,
        }
    }

    let mut models = PropertyModels::new()
        .with(Arc::new(ideal))
        .with(Arc::new(incompressible));
    if needs_coolprop {
        models = with_coolprop(models)?;
    }
    Ok(models)
}

#[cfg(feature = "coolprop")]
fn with_coolprop(models: PropertyModels) -> AppResult<PropertyModels> {
    Ok(models.with(Arc::new(ex_thermo::CoolPropModel::new())))
}

#[cfg(not(feature = "coolprop"))]
fn with_coolprop(_models: PropertyModels) -> AppResult<PropertyModels> {
    Err(AppError::Unsupported {
        message: "CoolProp substances need the `coolprop` feature".to_string(),
    })
}

fn build_interaction(def: &InteractionDef) -> EnergyInteraction {
    match def {
        InteractionDef::Shaft { name, power_w } => EnergyInteraction::Shaft {
            name: name.clone(),
            power: *power_w,
        },
        InteractionDef::Heat {
            name,
            duty_w,
            temperature_k,
        } => EnergyInteraction::Heat {
            name: name.clone(),
            duty: *duty_w,
            temperature: *temperature_k,
        },
        InteractionDef::Solar { name, irradiance_w } => EnergyInteraction::Solar {
            name: name.clone(),
            irradiance: *irradiance_w,
        },
    }
}

fn build_boundary(def: &BoundaryDef) -> SystemBoundary {
    let designation = |d: &DesignationDef| BoundaryDesignation {
        add: d.add.clone(),
        subtract: d.subtract.clone(),
    };
    SystemBoundary {
        fuel: designation(&def.fuel),
        product: designation(&def.product),
        loss: designation(&def.loss),
    }
}

fn lookup_streams(ids: &HashMap<String, StreamId>, names: &[String]) -> AppResult<Vec<StreamId>> {
    names
        .iter()
        .map(|name| {
            ids.get(name)
                .copied()
                .ok_or_else(|| AppError::Compile(format!("Stream not found: {name}")))
        })
        .collect()
}

fn substance_key(substances: &HashMap<&str, Substance>, id: &str) -> AppResult<String> {
    substances
        .get(id)
        .map(Substance::key)
        .ok_or_else(|| AppError::Compile(format!("Substance not found: {id}")))
}

fn parse_species(s: &str) -> AppResult<Species> {
    s.parse()
        .map_err(|e: &str| AppError::Compile(format!("{e}: {s}")))
}
