//! Chemical exergy datasets.
//!
//! Standard molar chemical exergies are an external collaborator: the
//! engine only looks values up by species and tags every result with the
//! dataset variant that produced it. Three reference environments ship
//! built in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use crate::substance::Substance;
use ex_core::units::SpecExergy;
use ex_core::units::constants::R_UNIVERSAL;

/// Named reference environments for standard chemical exergy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetVariant {
    Ahrendts,
    Szargut1988,
    Szargut2007,
}

impl DatasetVariant {
    pub const ALL: [DatasetVariant; 3] = [
        DatasetVariant::Ahrendts,
        DatasetVariant::Szargut1988,
        DatasetVariant::Szargut2007,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DatasetVariant::Ahrendts => "Ahrendts",
            DatasetVariant::Szargut1988 => "Szargut1988",
            DatasetVariant::Szargut2007 => "Szargut2007",
        }
    }
}

impl std::fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for DatasetVariant {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AHRENDTS" => Ok(DatasetVariant::Ahrendts),
            "SZARGUT1988" | "SZARGUT 1988" => Ok(DatasetVariant::Szargut1988),
            "SZARGUT2007" | "SZARGUT 2007" => Ok(DatasetVariant::Szargut2007),
            _ => Err("unknown chemical exergy dataset"),
        }
    }
}

/// Read-only source of standard molar chemical exergies.
pub trait ChemicalExergyDataset: Send + Sync {
    fn variant(&self) -> DatasetVariant;

    /// Standard molar chemical exergy [J/mol], if tabulated.
    fn standard_molar_exergy(&self, species: Species) -> Option<f64>;
}

/// A dataset backed by a table of kJ/mol values keyed by species key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabulatedDataset {
    pub variant: DatasetVariant,
    /// Standard molar chemical exergy [kJ/mol] keyed by species key.
    pub entries: BTreeMap<String, f64>,
}

impl TabulatedDataset {
    pub fn new(variant: DatasetVariant) -> Self {
        Self {
            variant,
            entries: BTreeMap::new(),
        }
    }

    /// Built-in table for a reference environment.
    pub fn builtin(variant: DatasetVariant) -> Self {
        let table: &[(Species, f64)] = match variant {
            DatasetVariant::Ahrendts => &AHRENDTS,
            DatasetVariant::Szargut1988 => &SZARGUT_1988,
            DatasetVariant::Szargut2007 => &SZARGUT_2007,
        };
        Self {
            variant,
            entries: table
                .iter()
                .map(|(s, e)| (s.key().to_string(), *e))
                .collect(),
        }
    }

    pub fn insert(&mut self, species: Species, kj_per_mol: f64) {
        self.entries.insert(species.key().to_string(), kj_per_mol);
    }
}

impl ChemicalExergyDataset for TabulatedDataset {
    fn variant(&self) -> DatasetVariant {
        self.variant
    }

    fn standard_molar_exergy(&self, species: Species) -> Option<f64> {
        self.entries.get(species.key()).map(|kj| kj * 1000.0)
    }
}

// kJ/mol, gaseous water.
const AHRENDTS: [(Species, f64); 12] = [
    (Species::N2, 0.639),
    (Species::O2, 3.951),
    (Species::Ar, 11.627),
    (Species::CO2, 14.176),
    (Species::H2O, 8.636),
    (Species::CO, 269.412),
    (Species::H2, 235.249),
    (Species::CH4, 824.348),
    (Species::Ethane, 1482.033),
    (Species::Ammonia, 336.684),
    (Species::SulfurDioxide, 303.5),
    (Species::He, 30.124),
];

const SZARGUT_1988: [(Species, f64); 14] = [
    (Species::N2, 0.72),
    (Species::O2, 3.97),
    (Species::Ar, 11.69),
    (Species::CO2, 19.87),
    (Species::H2O, 9.50),
    (Species::CO, 275.10),
    (Species::H2, 236.09),
    (Species::CH4, 831.65),
    (Species::Ethane, 1495.84),
    (Species::Propane, 2154.0),
    (Species::NButane, 2805.8),
    (Species::SulfurDioxide, 313.4),
    (Species::Ammonia, 337.9),
    (Species::He, 30.37),
];

const SZARGUT_2007: [(Species, f64); 12] = [
    (Species::N2, 0.72),
    (Species::O2, 3.97),
    (Species::Ar, 11.69),
    (Species::CO2, 19.48),
    (Species::H2O, 9.5),
    (Species::CO, 274.71),
    (Species::H2, 236.09),
    (Species::CH4, 831.2),
    (Species::Ethane, 1495.0),
    (Species::Ammonia, 337.9),
    (Species::SulfurDioxide, 313.4),
    (Species::He, 30.37),
];

/// Specific chemical exergy [J/kg] of a substance at ambient temperature `t0_k`.
///
/// e_ch = (Σ x_i e_i + R T0 Σ x_i ln x_i) / M_mix, with air expanded into
/// its constituents first.
pub fn specific_chemical_exergy(
    dataset: &dyn ChemicalExergyDataset,
    substance: &Substance,
    t0_k: f64,
) -> ThermoResult<SpecExergy> {
    let missing = || ThermoError::ReferenceData {
        substance: substance.key(),
        dataset: dataset.variant().to_string(),
    };
    let comp: Composition = substance.composition().ok_or_else(missing)?.expanded();

    let mut molar = 0.0;
    for (species, x) in comp.iter() {
        let e = dataset.standard_molar_exergy(species).ok_or_else(missing)?;
        molar += x * e + R_UNIVERSAL * t0_k * x * x.ln();
    }

    // kg/kmol == g/mol; J/mol divided by kg/mol.
    Ok(molar / (comp.molar_mass() / 1000.0))
}
