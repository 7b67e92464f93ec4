//! ex-components: fuel/product/loss classification per component archetype.
//!
//! Each archetype has a [`ClassificationRule`] that maps the component's
//! material, power and heat streams onto exergy fuel, product and loss.
//! [`ClassifierRegistry`] selects the rule for a component and
//! [`balance`] closes D = F − P − L.
//!
//! # Example
//!
//! ```
//! use ex_components::{Archetype, ClassifierRegistry, ClassifyContext, Flow, balance};
//! use ex_core::Tolerances;
//!
//! let registry = ClassifierRegistry::with_defaults();
//! let archetype = Archetype::Generator;
//! let shaft = Flow::Power { name: "shaft".into(), power: 1.0e6 };
//! let grid = Flow::Power { name: "grid".into(), power: 0.98e6 };
//! let ctx = ClassifyContext {
//!     component: "GEN",
//!     archetype: &archetype,
//!     inlets: vec![&shaft],
//!     outlets: vec![&grid],
//!     interactions: &[],
//!     t0: 298.15,
//!     split: false,
//!     chemical: false,
//!     dissipative: false,
//! };
//! let flows = registry.classify(&ctx).unwrap();
//! let b = balance(&ctx, flows, &Tolerances::default()).unwrap();
//! assert!((b.destruction - 0.02e6).abs() < 1e-6);
//! ```

pub mod archetype;
pub mod balance;
pub mod combustion;
pub mod common;
pub mod context;
pub mod dissipative;
pub mod error;
pub mod flow;
pub mod heat_exchanger;
pub mod machines;
pub mod nodes;
pub mod pump;
pub mod registry;
pub mod simple_heat_exchanger;
pub mod solar;
pub mod traits;
pub mod turbine;
pub mod valve;

#[cfg(test)]
mod testing;

// Re-exports
pub use archetype::Archetype;
pub use balance::{ComponentBalance, Fraction, balance};
pub use combustion::CombustionRule;
pub use context::ClassifyContext;
pub use dissipative::DissipativeRule;
pub use error::{ComponentError, ComponentResult};
pub use flow::{EnergyInteraction, Flow, MaterialFlow, heat_exergy, solar_exergy};
pub use heat_exchanger::HeatExchangerRule;
pub use machines::PowerConversionRule;
pub use nodes::{FlashTankRule, MixerRule, SplitterRule};
pub use pump::CompressionRule;
pub use registry::ClassifierRegistry;
pub use simple_heat_exchanger::SimpleHeatExchangerRule;
pub use solar::SolarCollectorRule;
pub use traits::{ClassificationRule, ExergyFlows, ExergyTerm};
pub use turbine::TurbineRule;
pub use valve::ValveRule;
