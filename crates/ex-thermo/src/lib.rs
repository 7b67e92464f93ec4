//! ex-thermo: substances, reference states and stream exergy for exflow.
//!
//! Provides:
//! - Chemical species, compositions and substance identity
//! - Resolved stream states (T, p, h, s)
//! - `PropertyModel` trait for reference-state properties, with ideal-gas
//!   and incompressible backends, plus CoolProp behind the `coolprop` feature
//! - Ambient state with per-substance references and minimum fluid
//!   temperature handling
//! - Stream exergy evaluator (physical, thermal/mechanical split, chemical)
//! - Chemical exergy datasets (Ahrendts, Szargut 1988, Szargut 2007)
//!
//! # Example
//!
//! ```
//! use ex_core::units::{k, pa};
//! use ex_thermo::{
//!     AmbientState, ExergyEvaluator, IdealGas, IdealGasModel, PropertyModel, Species,
//!     StreamState, Substance,
//! };
//!
//! let air = Substance::Pure(Species::Air);
//! let model = IdealGasModel::new().with("Air", IdealGas::for_species(Species::Air, 1005.0));
//! let ambient = AmbientState::builder(k(298.15), pa(101_325.0))
//!     .unwrap()
//!     .resolve([&air], &model)
//!     .unwrap();
//!
//! let (h, s) = model.hs_at(&air, k(500.0), pa(4e5)).unwrap();
//! let state = StreamState::new(k(500.0), pa(4e5), h, s).unwrap();
//! let e = ExergyEvaluator::new(&ambient, &model)
//!     .with_split(true)
//!     .evaluate(&air, &state)
//!     .unwrap();
//! assert!(e.physical > 0.0);
//! ```

pub mod ambient;
pub mod chemical;
pub mod composition;
#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod error;
pub mod exergy;
pub mod model;
pub mod species;
pub mod state;
pub mod substance;

// Re-exports for ergonomics
pub use ambient::{AmbientBuilder, AmbientReference, AmbientState};
pub use chemical::{
    ChemicalExergyDataset, DatasetVariant, TabulatedDataset, specific_chemical_exergy,
};
pub use composition::Composition;
#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropModel;
pub use error::{ThermoError, ThermoResult};
pub use exergy::{
    ChemicalExergy, ExergyContribution, ExergyEvaluator, ReferenceBasis, ReferenceState,
    StreamExergy,
};
pub use model::{
    IdealGas, IdealGasModel, Incompressible, IncompressibleModel, PropertyModel, PropertyModels,
};
pub use species::Species;
pub use state::StreamState;
pub use substance::Substance;
