//! Error types for network analysis.

use ex_components::ComponentError;
use ex_core::error::ExError;
use ex_graph::GraphError;
use ex_thermo::ThermoError;
use thiserror::Error;

/// Coarse category of an analysis failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Data,
    Classification,
    BalanceConsistency,
    ReferenceData,
    Topology,
    Boundary,
}

/// Errors that abort an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Missing or inconsistent state of a stream or component.
    #[error("Data error at '{at}': {what}")]
    Data { at: String, what: String },

    /// No rule for the archetype, or streams that cannot be partitioned.
    #[error("Classification error: {0}")]
    Classification(ComponentError),

    /// Closure or system consistency violated.
    #[error("Balance consistency error at '{at}': {what}")]
    BalanceConsistency { at: String, what: String },

    /// Chemical exergy dataset lookup failed.
    #[error("Reference data error for stream '{stream}': {source}")]
    ReferenceData {
        stream: String,
        #[source]
        source: ThermoError,
    },

    #[error("Topology error: {0}")]
    Topology(#[from] GraphError),

    /// System fuel/product/loss designation is missing or inconsistent.
    #[error("Boundary designation error: {what}")]
    Boundary { what: String },

    /// Data or reference-data failures of several streams or components,
    /// in network order.
    #[error("{} streams or components failed: {}", .0.len(), join(.0))]
    Multiple(Vec<AnalysisError>),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Data { .. } => ErrorKind::Data,
            AnalysisError::Classification(_) => ErrorKind::Classification,
            AnalysisError::BalanceConsistency { .. } => ErrorKind::BalanceConsistency,
            AnalysisError::ReferenceData { .. } => ErrorKind::ReferenceData,
            AnalysisError::Topology(_) => ErrorKind::Topology,
            AnalysisError::Boundary { .. } => ErrorKind::Boundary,
            AnalysisError::Multiple(errors) => {
                if errors.iter().all(|e| e.kind() == ErrorKind::ReferenceData) {
                    ErrorKind::ReferenceData
                } else {
                    ErrorKind::Data
                }
            }
        }
    }

    /// Data and reference-data failures only affect the stream or component
    /// they name.
    pub fn is_local(&self) -> bool {
        matches!(self.kind(), ErrorKind::Data | ErrorKind::ReferenceData)
    }

    /// The individual failures behind this error.
    pub fn failures(&self) -> &[AnalysisError] {
        match self {
            AnalysisError::Multiple(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }

    /// Wraps a property or dataset failure for one stream.
    pub fn stream(stream: &str, err: ThermoError) -> Self {
        match err {
            ThermoError::ReferenceData { .. } => AnalysisError::ReferenceData {
                stream: stream.to_string(),
                source: err,
            },
            other => AnalysisError::Data {
                at: stream.to_string(),
                what: other.to_string(),
            },
        }
    }
}

fn join(errors: &[AnalysisError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ComponentError> for AnalysisError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::MissingData { .. } => AnalysisError::Data {
                at: e.component().to_string(),
                what: e.to_string(),
            },
            ComponentError::NegativeDestruction { .. } => AnalysisError::BalanceConsistency {
                at: e.component().to_string(),
                what: e.to_string(),
            },
            ComponentError::Unregistered { .. }
            | ComponentError::Connectivity { .. }
            | ComponentError::NotPartitionable { .. } => AnalysisError::Classification(e),
        }
    }
}

impl From<AnalysisError> for ExError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Data { .. }
            | AnalysisError::Boundary { .. }
            | AnalysisError::Multiple(_) => ExError::InvalidArg {
                what: e.to_string(),
            },
            _ => ExError::Invariant {
                what: e.to_string(),
            },
        }
    }
}
