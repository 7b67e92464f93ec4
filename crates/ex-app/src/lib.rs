//! Application service layer for exflow.
//!
//! Loads case files, compiles them into a network with property models,
//! ambient state and chemical dataset, and runs the analysis for the CLI.

pub mod analysis_service;
pub mod case_compile;
pub mod error;
pub mod project_service;

// Re-export key types for convenience
pub use analysis_service::{
    AnalysisRequest, AnalysisResponse, AnalysisTiming, analyse_case, analyse_compiled,
    run_analysis, write_report,
};
pub use case_compile::{CompiledCase, build_substance, compile_case};
pub use error::{AppError, AppResult};
pub use project_service::{CaseSummary, load_case, save_case, summarize, validate_case};
