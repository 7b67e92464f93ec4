//! ex-graph: topology layer for exflow.
//!
//! Provides:
//! - Streams (edges) and components (nodes with ordered inlet/outlet lists)
//! - Incremental graph builder with validation
//! - Boundary queries (streams entering or leaving the network)
//!
//! # Example
//!
//! ```
//! use ex_graph::{GraphBuilder, StreamKind};
//!
//! let mut builder = GraphBuilder::new();
//! let s1 = builder.add_stream("1", StreamKind::Material);
//! let s2 = builder.add_stream("2", StreamKind::Material);
//! let w = builder.add_stream("W", StreamKind::Power);
//! builder.add_component("compressor", &[s1, w], &[s2]);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.streams().len(), 3);
//! assert_eq!(graph.boundary_streams().count(), 3);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Graph, Stream, StreamKind};
