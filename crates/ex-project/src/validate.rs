//! Case validation logic.
//!
//! Checks what can be checked without property models: ids, references,
//! positivity of state values and the system boundary designation. Topology
//! rules (one producer and one consumer per stream) are left to the graph
//! builder.

use crate::schema::{
    AmbientDef, BoundaryDef, CASE_VERSION, Case, ComponentDef, CompositionDef, InteractionDef,
    PropertyModelDef, StreamDef, StreamKindDef, SubstanceDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing {role} designation in the system boundary")]
    MissingDesignation { role: &'static str },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version != CASE_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    let mut substance_ids = HashSet::new();
    for substance in &case.substances {
        if !substance_ids.insert(substance.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: substance.id.clone(),
                context: "substances".to_string(),
            });
        }
        validate_substance(substance)?;
    }

    validate_ambient(&case.ambient, &substance_ids)?;

    if let Some(tol) = &case.options.tolerance {
        non_negative("options tolerance abs", tol.abs)?;
        non_negative("options tolerance rel", tol.rel)?;
    }
    match &case.chemical_dataset {
        Some(name) => {
            if name.parse::<ex_thermo::DatasetVariant>().is_err() {
                return Err(ValidationError::InvalidValue {
                    field: "chemical_dataset".to_string(),
                    value: name.clone(),
                    reason: "expected Ahrendts, Szargut1988 or Szargut2007".to_string(),
                });
            }
        }
        None if case.options.chemical_exergy => {
            return Err(ValidationError::InvalidValue {
                field: "options chemical_exergy".to_string(),
                value: "true".to_string(),
                reason: "requires a chemical_dataset".to_string(),
            });
        }
        None => {}
    }

    let mut stream_ids = HashSet::new();
    for stream in &case.streams {
        if !stream_ids.insert(stream.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: stream.id.clone(),
                context: "streams".to_string(),
            });
        }
        validate_stream(stream, &substance_ids)?;
    }

    let mut component_ids = HashSet::new();
    let mut interaction_names = HashSet::new();
    for component in &case.components {
        if !component_ids.insert(component.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: component.id.clone(),
                context: "components".to_string(),
            });
        }
        validate_component(component, &stream_ids)?;
        for interaction in &component.interactions {
            interaction_names.insert(interaction.name());
        }
    }

    validate_boundary(&case.boundary, &stream_ids, &interaction_names)
}

fn validate_substance(substance: &SubstanceDef) -> Result<(), ValidationError> {
    match &substance.composition {
        Some(CompositionDef::Pure { species }) => {
            parse_species(&substance.id, species)?;
        }
        Some(CompositionDef::MoleFractions { fractions }) => {
            if fractions.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("substance '{}' fractions", substance.id),
                    value: "{}".to_string(),
                    reason: "at least one species required".to_string(),
                });
            }
            for (species, x) in fractions {
                parse_species(&substance.id, species)?;
                if !x.is_finite() || *x <= 0.0 {
                    return Err(ValidationError::InvalidValue {
                        field: format!("substance '{}' fraction of {}", substance.id, species),
                        value: x.to_string(),
                        reason: "must be positive and finite".to_string(),
                    });
                }
            }
        }
        None => {}
    }

    match &substance.model {
        PropertyModelDef::IdealGas { cp, r } => {
            positive(&format!("substance '{}' cp", substance.id), *cp)?;
            match r {
                Some(r) => positive(&format!("substance '{}' r", substance.id), *r)?,
                None if substance.composition.is_none() => {
                    return Err(ValidationError::InvalidValue {
                        field: format!("substance '{}' r", substance.id),
                        value: "none".to_string(),
                        reason: "a named substance needs an explicit gas constant".to_string(),
                    });
                }
                None => {}
            }
        }
        PropertyModelDef::Incompressible { c, v } => {
            positive(&format!("substance '{}' c", substance.id), *c)?;
            non_negative(&format!("substance '{}' v", substance.id), *v)?;
        }
        PropertyModelDef::CoolProp => {
            if !matches!(substance.composition, Some(CompositionDef::Pure { .. })) {
                return Err(ValidationError::InvalidValue {
                    field: format!("substance '{}' model", substance.id),
                    value: "CoolProp".to_string(),
                    reason: "only pure species are supported".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_ambient(
    ambient: &AmbientDef,
    substance_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    positive("ambient temperature_k", ambient.temperature_k)?;
    positive("ambient pressure_pa", ambient.pressure_pa)?;

    for (id, t_min) in &ambient.min_fluid_temperatures {
        if !substance_ids.contains(id.as_str()) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: "ambient min_fluid_temperatures".to_string(),
            });
        }
        positive(&format!("ambient min_fluid_temperatures {id}"), *t_min)?;
    }
    for (id, reference) in &ambient.references {
        if !substance_ids.contains(id.as_str()) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: "ambient references".to_string(),
            });
        }
        finite(&format!("ambient references {id} h0"), reference.h0)?;
        finite(&format!("ambient references {id} s0"), reference.s0)?;
    }
    Ok(())
}

fn validate_stream(stream: &StreamDef, substance_ids: &HashSet<&str>) -> Result<(), ValidationError> {
    match &stream.kind {
        StreamKindDef::Material {
            substance,
            mass_flow_kg_s,
            temperature_k,
            pressure_pa,
            enthalpy_j_kg,
            entropy_j_kg_k,
        } => {
            if !substance_ids.contains(substance.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: substance.clone(),
                    context: format!("stream '{}' substance", stream.id),
                });
            }
            non_negative(&format!("stream '{}' mass_flow_kg_s", stream.id), *mass_flow_kg_s)?;
            positive(&format!("stream '{}' temperature_k", stream.id), *temperature_k)?;
            positive(&format!("stream '{}' pressure_pa", stream.id), *pressure_pa)?;
            if enthalpy_j_kg.is_some() != entropy_j_kg_k.is_some() {
                return Err(ValidationError::InvalidValue {
                    field: format!("stream '{}' enthalpy/entropy", stream.id),
                    value: format!("{enthalpy_j_kg:?}/{entropy_j_kg_k:?}"),
                    reason: "give both or neither".to_string(),
                });
            }
            if let (Some(h), Some(s)) = (enthalpy_j_kg, entropy_j_kg_k) {
                finite(&format!("stream '{}' enthalpy_j_kg", stream.id), *h)?;
                finite(&format!("stream '{}' entropy_j_kg_k", stream.id), *s)?;
            }
        }
        StreamKindDef::Power { power_w } => {
            finite(&format!("stream '{}' power_w", stream.id), *power_w)?;
        }
        StreamKindDef::Heat {
            duty_w,
            temperature_k,
        } => {
            finite(&format!("stream '{}' duty_w", stream.id), *duty_w)?;
            if let Some(t) = temperature_k {
                positive(&format!("stream '{}' temperature_k", stream.id), *t)?;
            }
        }
    }
    Ok(())
}

fn validate_component(
    component: &ComponentDef,
    stream_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    if component.archetype.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("component '{}' archetype", component.id),
            value: String::new(),
            reason: "must not be empty".to_string(),
        });
    }

    for (context, ids) in [("inlets", &component.inlets), ("outlets", &component.outlets)] {
        let mut seen = HashSet::new();
        for id in ids {
            if !stream_ids.contains(id.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: id.clone(),
                    context: format!("component '{}' {context}", component.id),
                });
            }
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateId {
                    id: id.clone(),
                    context: format!("component '{}' {context}", component.id),
                });
            }
        }
    }

    let mut names = HashSet::new();
    for interaction in &component.interactions {
        if !names.insert(interaction.name()) {
            return Err(ValidationError::DuplicateId {
                id: interaction.name().to_string(),
                context: format!("component '{}' interactions", component.id),
            });
        }
        match interaction {
            InteractionDef::Shaft { name, power_w } => {
                finite(&format!("interaction '{name}' power_w"), *power_w)?
            }
            InteractionDef::Heat {
                name,
                duty_w,
                temperature_k,
            } => {
                finite(&format!("interaction '{name}' duty_w"), *duty_w)?;
                if let Some(t) = temperature_k {
                    positive(&format!("interaction '{name}' temperature_k"), *t)?;
                }
            }
            InteractionDef::Solar { name, irradiance_w } => {
                non_negative(&format!("interaction '{name}' irradiance_w"), *irradiance_w)?
            }
        }
    }
    Ok(())
}

fn validate_boundary(
    boundary: &BoundaryDef,
    stream_ids: &HashSet<&str>,
    interaction_names: &HashSet<&str>,
) -> Result<(), ValidationError> {
    if boundary.fuel.is_empty() {
        return Err(ValidationError::MissingDesignation { role: "fuel" });
    }
    if boundary.product.is_empty() {
        return Err(ValidationError::MissingDesignation { role: "product" });
    }

    let roles = [
        ("fuel", &boundary.fuel),
        ("product", &boundary.product),
        ("loss", &boundary.loss),
    ];
    let mut designated = HashSet::new();
    for (role, designation) in roles {
        for name in designation.names() {
            if !stream_ids.contains(name.as_str()) && !interaction_names.contains(name.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: name.clone(),
                    context: format!("boundary {role}"),
                });
            }
            if !designated.insert(name.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: name.clone(),
                    context: format!("boundary {role}"),
                });
            }
        }
    }
    Ok(())
}

fn parse_species(substance: &str, species: &str) -> Result<ex_thermo::Species, ValidationError> {
    species
        .parse::<ex_thermo::Species>()
        .map_err(|reason| ValidationError::InvalidValue {
            field: format!("substance '{substance}' species"),
            value: species.to_string(),
            reason: reason.to_string(),
        })
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
