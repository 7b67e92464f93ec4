//! Analysis execution service.

use std::path::Path;
use std::time::Instant;

use ex_analysis::{AnalysisReport, Analyzer};
use ex_components::ClassifierRegistry;
use ex_project::schema::Case;

use crate::case_compile::{CompiledCase, compile_case};
use crate::error::{AppError, AppResult};
use crate::project_service;

/// Request to analyse a case file.
pub struct AnalysisRequest<'a> {
    pub case_path: &'a Path,
    /// Write the report as JSON here when set.
    pub report_path: Option<&'a Path>,
}

/// Wall-clock timing of one run [s].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisTiming {
    pub load_time_s: f64,
    pub compile_time_s: f64,
    pub analyse_time_s: f64,
    pub total_time_s: f64,
}

pub struct AnalysisResponse {
    pub case_name: String,
    pub report: AnalysisReport,
    pub timing: AnalysisTiming,
}

/// Analyse a compiled case with the given rule registry.
pub fn analyse_compiled(
    compiled: &CompiledCase,
    registry: &ClassifierRegistry,
) -> AppResult<AnalysisReport> {
    let mut analyzer = Analyzer::new(registry, &compiled.models).with_options(compiled.options);
    if let Some(dataset) = &compiled.dataset {
        analyzer = analyzer.with_dataset(dataset);
    }
    Ok(analyzer.analyse(&compiled.network, &compiled.ambient, &compiled.boundary)?)
}

/// Compile and analyse a case with the built-in rules.
pub fn analyse_case(case: &Case) -> AppResult<AnalysisReport> {
    let compiled = compile_case(case)?;
    analyse_compiled(&compiled, &ClassifierRegistry::with_defaults())
}

/// Load, compile and analyse a case file, optionally writing the report.
pub fn run_analysis(request: &AnalysisRequest<'_>) -> AppResult<AnalysisResponse> {
    let total_start = Instant::now();

    let load_start = Instant::now();
    let case = project_service::load_case(request.case_path)?;
    let load_time_s = load_start.elapsed().as_secs_f64();

    let compile_start = Instant::now();
    let compiled = compile_case(&case)?;
    let compile_time_s = compile_start.elapsed().as_secs_f64();

    let analyse_start = Instant::now();
    let report = analyse_compiled(&compiled, &ClassifierRegistry::with_defaults())?;
    let analyse_time_s = analyse_start.elapsed().as_secs_f64();

    if let Some(path) = request.report_path {
        write_report(path, &report)?;
    }

    let timing = AnalysisTiming {
        load_time_s,
        compile_time_s,
        analyse_time_s,
        total_time_s: total_start.elapsed().as_secs_f64(),
    };
    tracing::info!(
        case = %case.name,
        total_s = timing.total_time_s,
        "analysis finished"
    );

    Ok(AnalysisResponse {
        case_name: case.name,
        report,
        timing,
    })
}

/// Write a report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &AnalysisReport) -> AppResult<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content).map_err(|e| AppError::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
