//! Case loading, saving, validation and introspection.

use std::path::Path;

use ex_project::schema::{Case, StreamKindDef};

use crate::error::AppResult;

/// Summary of a case for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSummary {
    pub name: String,
    pub substance_count: usize,
    pub material_stream_count: usize,
    pub energy_stream_count: usize,
    pub component_count: usize,
    pub split_physical_exergy: bool,
    pub chemical_dataset: Option<String>,
}

/// Load and validate a case; the format follows the file extension.
pub fn load_case(path: &Path) -> AppResult<Case> {
    Ok(ex_project::load(path)?)
}

/// Save a case as YAML or JSON depending on the extension (YAML otherwise).
pub fn save_case(path: &Path, case: &Case) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ex_project::save_json(path, case)?,
        _ => ex_project::save_yaml(path, case)?,
    }
    Ok(())
}

pub fn validate_case(case: &Case) -> AppResult<()> {
    ex_project::validate_case(case).map_err(ex_project::ProjectError::from)?;
    Ok(())
}

pub fn summarize(case: &Case) -> CaseSummary {
    let material_stream_count = case
        .streams
        .iter()
        .filter(|s| matches!(s.kind, StreamKindDef::Material { .. }))
        .count();
    CaseSummary {
        name: case.name.clone(),
        substance_count: case.substances.len(),
        material_stream_count,
        energy_stream_count: case.streams.len() - material_stream_count,
        component_count: case.components.len(),
        split_physical_exergy: case.options.split_physical_exergy,
        chemical_dataset: case.chemical_dataset.clone(),
    }
}
