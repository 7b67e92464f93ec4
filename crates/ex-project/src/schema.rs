//! Case file schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current case file format version.
pub const CASE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    pub ambient: AmbientDef,
    #[serde(default)]
    pub options: OptionsDef,
    /// One of `Ahrendts`, `Szargut1988`, `Szargut2007`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_dataset: Option<String>,
    #[serde(default)]
    pub substances: Vec<SubstanceDef>,
    #[serde(default)]
    pub streams: Vec<StreamDef>,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    pub boundary: BoundaryDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmbientDef {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    /// Substances that are not fluid at ambient temperature, by substance id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub min_fluid_temperatures: BTreeMap<String, f64>,
    /// Explicit dead-state (h0, s0) per substance id, overriding the model.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub references: BTreeMap<String, ReferenceDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceDef {
    /// J/kg
    pub h0: f64,
    /// J/(kg·K)
    pub s0: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptionsDef {
    #[serde(default)]
    pub split_physical_exergy: bool,
    #[serde(default)]
    pub chemical_exergy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<ToleranceDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ToleranceDef {
    pub abs: f64,
    pub rel: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstanceDef {
    pub id: String,
    /// Absent for substances known only by name (thermal oils, salts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<CompositionDef>,
    pub model: PropertyModelDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CompositionDef {
    Pure {
        species: String,
    },
    MoleFractions {
        fractions: BTreeMap<String, f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PropertyModelDef {
    IdealGas {
        cp: f64,
        /// Specific gas constant; taken from the molar mass when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        r: Option<f64>,
    },
    Incompressible {
        c: f64,
        #[serde(default)]
        v: f64,
    },
    CoolProp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamDef {
    pub id: String,
    pub kind: StreamKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StreamKindDef {
    Material {
        substance: String,
        mass_flow_kg_s: f64,
        temperature_k: f64,
        pressure_pa: f64,
        /// Computed from the substance model when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enthalpy_j_kg: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entropy_j_kg_k: Option<f64>,
    },
    Power {
        power_w: f64,
    },
    Heat {
        duty_w: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature_k: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub id: String,
    /// Archetype name, e.g. `Turbine` or `HeatExchanger`.
    pub archetype: String,
    #[serde(default)]
    pub inlets: Vec<String>,
    #[serde(default)]
    pub outlets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<InteractionDef>,
    #[serde(default)]
    pub dissipative: bool,
}

/// Energy crossing a component boundary without a stream. Positive into
/// the component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InteractionDef {
    Shaft {
        name: String,
        power_w: f64,
    },
    Heat {
        name: String,
        duty_w: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature_k: Option<f64>,
    },
    Solar {
        name: String,
        irradiance_w: f64,
    },
}

impl InteractionDef {
    pub fn name(&self) -> &str {
        match self {
            InteractionDef::Shaft { name, .. }
            | InteractionDef::Heat { name, .. }
            | InteractionDef::Solar { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryDef {
    pub fuel: DesignationDef,
    pub product: DesignationDef,
    #[serde(default)]
    pub loss: DesignationDef,
}

/// Stream ids or interaction names counted positively (`add`) and
/// negatively (`subtract`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DesignationDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtract: Vec<String>,
}

impl DesignationDef {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.subtract.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.add.iter().chain(self.subtract.iter())
    }
}
