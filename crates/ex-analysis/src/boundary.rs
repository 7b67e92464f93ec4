//! System fuel, product and loss designation.

use std::collections::BTreeSet;

use ex_core::{CompId, StreamId};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::network::Network;

/// Flows counted positively (`add`) and negatively (`subtract`) in one
/// system total. Names refer to streams or to named energy interactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryDesignation {
    pub add: Vec<String>,
    pub subtract: Vec<String>,
}

impl BoundaryDesignation {
    pub fn add(mut self, name: impl Into<String>) -> Self {
        self.add.push(name.into());
        self
    }

    pub fn subtract(mut self, name: impl Into<String>) -> Self {
        self.subtract.push(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.subtract.is_empty()
    }
}

/// Caller-supplied designation of the system's fuel, product and loss.
///
/// Fuel and product are mandatory; loss may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemBoundary {
    pub fuel: BoundaryDesignation,
    pub product: BoundaryDesignation,
    #[serde(default)]
    pub loss: BoundaryDesignation,
}

/// Which system total a boundary entry contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Fuel,
    Product,
    Loss,
}

/// What a designated name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySource {
    Stream(StreamId),
    /// Interaction `index` of component `comp`.
    Interaction(CompId, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryEntry {
    pub name: String,
    pub role: Role,
    pub sign: f64,
    pub source: BoundarySource,
}

/// Designation with every name resolved against a network.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBoundary {
    pub entries: Vec<BoundaryEntry>,
}

/// System fuel, product and loss [W].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryTotals {
    pub fuel: f64,
    pub product: f64,
    pub loss: f64,
}

impl SystemBoundary {
    /// Resolves every name, rejecting unknown, ambiguous and doubly counted
    /// flows as well as a missing fuel or product.
    pub fn resolve(&self, network: &Network) -> AnalysisResult<ResolvedBoundary> {
        if self.fuel.add.is_empty() {
            return Err(AnalysisError::Boundary {
                what: "no flow designated as system fuel".into(),
            });
        }
        if self.product.add.is_empty() {
            return Err(AnalysisError::Boundary {
                what: "no flow designated as system product".into(),
            });
        }

        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();
        for (role, designation) in [
            (Role::Fuel, &self.fuel),
            (Role::Product, &self.product),
            (Role::Loss, &self.loss),
        ] {
            let signed = designation
                .add
                .iter()
                .map(|n| (n, 1.0))
                .chain(designation.subtract.iter().map(|n| (n, -1.0)));
            for (name, sign) in signed {
                if !seen.insert(name.as_str()) {
                    return Err(AnalysisError::Boundary {
                        what: format!("flow '{name}' is designated more than once"),
                    });
                }
                entries.push(BoundaryEntry {
                    name: name.clone(),
                    role,
                    sign,
                    source: lookup(network, name)?,
                });
            }
        }
        Ok(ResolvedBoundary { entries })
    }
}

fn lookup(network: &Network, name: &str) -> AnalysisResult<BoundarySource> {
    let mut found = Vec::new();
    if let Some(stream) = network.graph().stream_by_name(name) {
        found.push(BoundarySource::Stream(stream.id));
    }
    for comp in network.graph().components() {
        if let Some(spec) = network.component_spec(comp.id) {
            for (index, interaction) in spec.interactions.iter().enumerate() {
                if interaction.name() == name {
                    found.push(BoundarySource::Interaction(comp.id, index));
                }
            }
        }
    }
    match found.as_slice() {
        [single] => Ok(*single),
        [] => Err(AnalysisError::Boundary {
            what: format!("'{name}' is neither a stream nor an energy interaction"),
        }),
        _ => Err(AnalysisError::Boundary {
            what: format!("'{name}' names more than one stream or energy interaction"),
        }),
    }
}

impl ResolvedBoundary {
    /// Sums the designated flows. `stream_exergy` gives the exergy rate of a
    /// stream [W].
    pub fn totals(
        &self,
        network: &Network,
        stream_exergy: impl Fn(StreamId) -> f64,
        t0: f64,
    ) -> BoundaryTotals {
        let mut totals = BoundaryTotals::default();
        for entry in &self.entries {
            let value = match entry.source {
                BoundarySource::Stream(id) => stream_exergy(id),
                BoundarySource::Interaction(comp, index) => network
                    .component_spec(comp)
                    .and_then(|spec| spec.interactions.get(index))
                    .map_or(0.0, |i| i.exergy(t0)),
            };
            let slot = match entry.role {
                Role::Fuel => &mut totals.fuel,
                Role::Product => &mut totals.product,
                Role::Loss => &mut totals.loss,
            };
            *slot += entry.sign * value;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ex_components::EnergyInteraction;
    use ex_core::units::{k, pa};
    use ex_thermo::{Species, StreamState};

    fn network() -> Network {
        let state = StreamState::new(k(300.0), pa(1.0e5), 0.0, 0.0).unwrap();
        let mut b = Network::builder();
        let s1 = b.add_material("1", Species::N2, 1.0, state);
        let s2 = b.add_material("2", Species::N2, 1.0, state);
        let w = b.add_power("W", 100.0);
        let c = b.add_component("C", "Compressor", &[s1, w], &[s2]);
        b.interaction(
            c,
            EnergyInteraction::Heat {
                name: "Q_loss".into(),
                duty: -10.0,
                temperature: Some(600.0),
            },
        );
        b.build().unwrap()
    }

    #[test]
    fn resolves_streams_and_interactions() {
        let net = network();
        let boundary = SystemBoundary {
            fuel: BoundaryDesignation::default().add("W"),
            product: BoundaryDesignation::default().add("2").subtract("1"),
            loss: BoundaryDesignation::default().add("Q_loss"),
        };
        let resolved = boundary.resolve(&net).unwrap();
        assert_eq!(resolved.entries.len(), 4);

        let rates = [5.0, 80.0, 100.0];
        let totals = resolved.totals(&net, |id| rates[id.slot()], 300.0);
        assert_eq!(totals.fuel, 100.0);
        assert_eq!(totals.product, 75.0);
        assert_eq!(totals.loss, 5.0);
    }

    #[test]
    fn missing_product_fails_fast() {
        let net = network();
        let boundary = SystemBoundary {
            fuel: BoundaryDesignation::default().add("W"),
            ..Default::default()
        };
        assert_eq!(boundary.resolve(&net).unwrap_err().kind(), ErrorKind::Boundary);
    }

    #[test]
    fn double_counting_is_rejected() {
        let net = network();
        let boundary = SystemBoundary {
            fuel: BoundaryDesignation::default().add("W"),
            product: BoundaryDesignation::default().add("2").add("W"),
            loss: BoundaryDesignation::default(),
        };
        let err = boundary.resolve(&net).unwrap_err();
        assert!(err.to_string().contains("'W'"));
    }

    #[test]
    fn interaction_named_like_a_stream_is_ambiguous() {
        let state = StreamState::new(k(300.0), pa(1.0e5), 0.0, 0.0).unwrap();
        let mut b = Network::builder();
        let s1 = b.add_material("1", Species::N2, 1.0, state);
        let s2 = b.add_material("2", Species::N2, 1.0, state);
        let w = b.add_power("W", 100.0);
        let c = b.add_component("C", "Compressor", &[s1, w], &[s2]);
        b.interaction(
            c,
            EnergyInteraction::Shaft {
                name: "W".into(),
                power: 100.0,
            },
        );
        let net = b.build().unwrap();
        let boundary = SystemBoundary {
            fuel: BoundaryDesignation::default().add("W"),
            product: BoundaryDesignation::default().add("2").subtract("1"),
            loss: BoundaryDesignation::default(),
        };
        let err = boundary.resolve(&net).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Boundary);
        assert!(err.to_string().contains("'W'"));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let net = network();
        let boundary = SystemBoundary {
            fuel: BoundaryDesignation::default().add("fuel gas"),
            product: BoundaryDesignation::default().add("2"),
            loss: BoundaryDesignation::default(),
        };
        assert_eq!(boundary.resolve(&net).unwrap_err().kind(), ErrorKind::Boundary);
    }
}
