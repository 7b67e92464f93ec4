//! ex-core: stable foundation for exflow.
//!
//! Contains:
//! - units (uom SI types + constructors, physical constants)
//! - numeric (Real + tolerances + float helpers)
//! - ids (typed compact IDs for streams and components)
//! - error (shared error type)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{ExError, ExResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
