//! Network assembly: topology plus per-stream data and per-component specs.

use ex_components::{Archetype, EnergyInteraction};
use ex_core::{CompId, StreamId};
use ex_graph::{Graph, GraphBuilder, StreamKind};
use ex_thermo::{StreamState, Substance};

use crate::error::{AnalysisError, AnalysisResult};

/// Resolved input data of one stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamData {
    Material {
        substance: Substance,
        /// [kg/s]
        mass_flow: f64,
        state: StreamState,
    },
    /// [W] along the stream direction.
    Power { power: f64 },
    /// [W] along the stream direction, crossing at `temperature` [K] if known.
    Heat {
        duty: f64,
        temperature: Option<f64>,
    },
}

impl StreamData {
    fn kind(&self) -> StreamKind {
        match self {
            StreamData::Material { .. } => StreamKind::Material,
            StreamData::Power { .. } => StreamKind::Power,
            StreamData::Heat { .. } => StreamKind::Heat,
        }
    }
}

/// Classification inputs of a component beyond its streams.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub archetype: Archetype,
    pub interactions: Vec<EnergyInteraction>,
    pub dissipative: bool,
}

/// Immutable network ready for analysis.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    streams: Vec<StreamData>,
    components: Vec<ComponentSpec>,
}

impl Network {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn stream_data(&self, id: StreamId) -> Option<&StreamData> {
        self.streams.get(id.slot())
    }

    pub fn component_spec(&self, id: CompId) -> Option<&ComponentSpec> {
        self.components.get(id.slot())
    }

    /// Distinct substances carried by material streams, in first-use order.
    pub fn substances(&self) -> Vec<&Substance> {
        let mut seen: Vec<&Substance> = Vec::new();
        for data in &self.streams {
            if let StreamData::Material { substance, .. } = data
                && !seen.iter().any(|s| s.key() == substance.key())
            {
                seen.push(substance);
            }
        }
        seen
    }
}

/// Collects streams and components, then validates them into a [`Network`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: GraphBuilder,
    streams: Vec<(String, StreamData)>,
    components: Vec<ComponentSpec>,
    /// First id passed to `interaction`/`dissipative` that names no component.
    unknown_component: Option<CompId>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stream(&mut self, name: impl Into<String>, data: StreamData) -> StreamId {
        let name = name.into();
        let id = self.graph.add_stream(name.clone(), data.kind());
        self.streams.push((name, data));
        id
    }

    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        substance: impl Into<Substance>,
        mass_flow: f64,
        state: StreamState,
    ) -> StreamId {
        self.add_stream(
            name,
            StreamData::Material {
                substance: substance.into(),
                mass_flow,
                state,
            },
        )
    }

    pub fn add_power(&mut self, name: impl Into<String>, power: f64) -> StreamId {
        self.add_stream(name, StreamData::Power { power })
    }

    pub fn add_heat(
        &mut self,
        name: impl Into<String>,
        duty: f64,
        temperature: Option<f64>,
    ) -> StreamId {
        self.add_stream(name, StreamData::Heat { duty, temperature })
    }

    /// Add a component with ordered inlet and outlet streams.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        archetype: impl Into<Archetype>,
        inlets: &[StreamId],
        outlets: &[StreamId],
    ) -> CompId {
        let id = self.graph.add_component(name, inlets, outlets);
        self.components.push(ComponentSpec {
            archetype: archetype.into(),
            interactions: Vec::new(),
            dissipative: false,
        });
        id
    }

    /// Attach an energy interaction to a component. An unknown id fails
    /// [`build`](Self::build).
    pub fn interaction(&mut self, comp: CompId, interaction: EnergyInteraction) -> &mut Self {
        match self.components.get_mut(comp.slot()) {
            Some(spec) => spec.interactions.push(interaction),
            None => {
                self.unknown_component.get_or_insert(comp);
            }
        }
        self
    }

    pub fn dissipative(&mut self, comp: CompId, dissipative: bool) -> &mut Self {
        match self.components.get_mut(comp.slot()) {
            Some(spec) => spec.dissipative = dissipative,
            None => {
                self.unknown_component.get_or_insert(comp);
            }
        }
        self
    }

    /// Validate topology and stream data.
    pub fn build(self) -> AnalysisResult<Network> {
        if let Some(comp) = self.unknown_component {
            return Err(AnalysisError::Data {
                at: comp.to_string(),
                what: "component id is not part of this network".into(),
            });
        }
        let graph = self.graph.build()?;
        for (name, data) in &self.streams {
            validate_stream(name, data)?;
        }
        Ok(Network {
            graph,
            streams: self.streams.into_iter().map(|(_, data)| data).collect(),
            components: self.components,
        })
    }
}

fn validate_stream(name: &str, data: &StreamData) -> AnalysisResult<()> {
    let bad = |what: &str| AnalysisError::Data {
        at: name.to_string(),
        what: what.to_string(),
    };
    match data {
        StreamData::Material { mass_flow, .. } => {
            if !mass_flow.is_finite() || *mass_flow < 0.0 {
                return Err(bad("mass flow must be finite and non-negative"));
            }
        }
        StreamData::Power { power } => {
            if !power.is_finite() {
                return Err(bad("power must be finite"));
            }
        }
        StreamData::Heat { duty, temperature } => {
            if !duty.is_finite() {
                return Err(bad("heat duty must be finite"));
            }
            if let Some(t) = temperature
                && (!t.is_finite() || *t <= 0.0)
            {
                return Err(bad("heat boundary temperature must be positive"));
            }
        }
    }
    Ok(())
}
