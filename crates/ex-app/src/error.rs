//! Error types for the ex-app service layer.

use std::path::PathBuf;

use ex_analysis::AnalysisError;
use ex_project::ProjectError;
use ex_thermo::ThermoError;

/// Application error type wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Project(#[from] ProjectError),

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case compilation failed: {0}")]
    Compile(String),

    #[error("Unsupported in this build: {message}")]
    Unsupported { message: String },

    #[error("Property model error: {0}")]
    Thermo(#[from] ThermoError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for ex-app operations.
pub type AppResult<T> = Result<T, AppError>;
