//! ex-analysis: network-level exergy analysis.
//!
//! A [`Network`] combines the stream/component topology with resolved
//! stream data. The [`Analyzer`] evaluates stream exergies, classifies and
//! balances each component, and aggregates the system totals designated by
//! a [`SystemBoundary`] into an [`AnalysisReport`].
//!
//! # Example
//!
//! ```
//! use ex_analysis::{Analyzer, BoundaryDesignation, Network, SystemBoundary};
//! use ex_components::ClassifierRegistry;
//! use ex_core::units::{k, pa};
//! use ex_thermo::{AmbientReference, AmbientState, IdealGasModel, Species, StreamState};
//!
//! let ambient = AmbientState::builder(k(298.0), pa(1.0e5))
//!     .unwrap()
//!     .reference("N2", AmbientReference::Fluid { h0: 298.0, s0: 0.98 })
//!     .resolve(Vec::<&ex_thermo::Substance>::new(), &IdealGasModel::new())
//!     .unwrap();
//!
//! let mut b = Network::builder();
//! let s1 = b.add_material("1", Species::N2, 1.0, StreamState::new(k(300.0), pa(1.0e5), 300.0, 1.0).unwrap());
//! let s2 = b.add_material("2", Species::N2, 1.0, StreamState::new(k(450.0), pa(5.0e5), 460.0, 1.05).unwrap());
//! let w = b.add_power("W", 165.0);
//! b.add_component("compressor", "Compressor", &[s1, w], &[s2]);
//! let network = b.build().unwrap();
//!
//! let boundary = SystemBoundary {
//!     fuel: BoundaryDesignation::default().add("W"),
//!     product: BoundaryDesignation::default().add("2").subtract("1"),
//!     loss: BoundaryDesignation::default(),
//! };
//! let registry = ClassifierRegistry::with_defaults();
//! let models = IdealGasModel::new();
//! let report = Analyzer::new(&registry, &models)
//!     .analyse(&network, &ambient, &boundary)
//!     .unwrap();
//! assert!((report.system.destruction - 19.9).abs() < 1e-9);
//! ```

pub mod boundary;
pub mod engine;
pub mod error;
pub mod network;
pub mod options;
pub mod results;

// Re-exports
pub use boundary::{BoundaryDesignation, BoundaryTotals, ResolvedBoundary, SystemBoundary};
pub use engine::Analyzer;
pub use error::{AnalysisError, AnalysisResult, ErrorKind};
pub use network::{ComponentSpec, Network, NetworkBuilder, StreamData};
pub use options::{AnalysisOptions, BalanceTolerance};
pub use results::{AnalysisReport, ComponentReport, RankEntry, StreamReport, SystemReport};
