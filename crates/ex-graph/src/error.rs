//! Graph-specific error types.

use ex_core::{CompId, ExError, StreamId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Topology construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A component lists a stream that was never added.
    UnknownStream { comp: CompId, stream: StreamId },

    /// Two streams share a name.
    DuplicateStreamName { name: String },

    /// Two components share a name.
    DuplicateComponentName { name: String },

    /// A stream enters more than one component.
    MultipleTargets {
        stream: String,
        first: String,
        second: String,
    },

    /// A stream leaves more than one component.
    MultipleSources {
        stream: String,
        first: String,
        second: String,
    },

    /// A component lists the same stream as inlet and outlet.
    SelfLoop { comp: String, stream: String },

    /// A stream is not attached to any component.
    DanglingStream { stream: String },

    /// A component has no streams at all.
    EmptyComponent { comp: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownStream { comp, stream } => {
                write!(f, "Component {} refers to non-existent stream {}", comp, stream)
            }
            GraphError::DuplicateStreamName { name } => {
                write!(f, "Stream name '{}' is used more than once", name)
            }
            GraphError::DuplicateComponentName { name } => {
                write!(f, "Component name '{}' is used more than once", name)
            }
            GraphError::MultipleTargets {
                stream,
                first,
                second,
            } => {
                write!(
                    f,
                    "Stream '{}' enters both '{}' and '{}'",
                    stream, first, second
                )
            }
            GraphError::MultipleSources {
                stream,
                first,
                second,
            } => {
                write!(
                    f,
                    "Stream '{}' leaves both '{}' and '{}'",
                    stream, first, second
                )
            }
            GraphError::SelfLoop { comp, stream } => {
                write!(
                    f,
                    "Component '{}' lists stream '{}' as inlet and outlet",
                    comp, stream
                )
            }
            GraphError::DanglingStream { stream } => {
                write!(f, "Stream '{}' is not connected to any component", stream)
            }
            GraphError::EmptyComponent { comp } => {
                write!(f, "Component '{}' has no connected streams", comp)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for ExError {
    fn from(err: GraphError) -> Self {
        ExError::Invariant {
            what: err.to_string(),
        }
    }
}
