//! Core topology data structures.

use ex_core::{CompId, StreamId};

/// What a stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Mass flow with a thermodynamic state.
    Material,
    /// Mechanical or electrical power.
    Power,
    /// Heat flow, optionally at a known boundary temperature.
    Heat,
}

impl StreamKind {
    pub fn is_material(self) -> bool {
        matches!(self, StreamKind::Material)
    }
}

/// An edge of the network.
///
/// `source` is the component the stream leaves, `target` the component it
/// enters. `None` on either side means the stream crosses the system boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub id: StreamId,
    pub name: String,
    pub kind: StreamKind,
    pub source: Option<CompId>,
    pub target: Option<CompId>,
}

impl Stream {
    pub fn is_boundary(&self) -> bool {
        self.source.is_none() || self.target.is_none()
    }
}

/// A node of the network with ordered inlet and outlet streams.
///
/// Order matters to classification rules (for example a heat exchanger's
/// first inlet/outlet pair is the hot side).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: CompId,
    pub name: String,
    pub inlets: Vec<StreamId>,
    pub outlets: Vec<StreamId>,
}

/// The validated, immutable topology.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) streams: Vec<Stream>,
    pub(crate) components: Vec<Component>,
}

impl Graph {
    /// Return all streams, ordered by id.
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Return all components, ordered by id.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn stream(&self, id: StreamId) -> Option<&Stream> {
        self.streams.get(id.slot())
    }

    pub fn component(&self, id: CompId) -> Option<&Component> {
        self.components.get(id.slot())
    }

    pub fn stream_by_name(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }

    pub fn component_by_name(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Streams that enter or leave the network from outside.
    pub fn boundary_streams(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter().filter(|s| s.is_boundary())
    }

    /// Streams entering a component, in declaration order.
    pub fn inlets_of(&self, comp: CompId) -> impl Iterator<Item = &Stream> {
        self.component(comp)
            .into_iter()
            .flat_map(|c| c.inlets.iter())
            .filter_map(|id| self.stream(*id))
    }

    /// Streams leaving a component, in declaration order.
    pub fn outlets_of(&self, comp: CompId) -> impl Iterator<Item = &Stream> {
        self.component(comp)
            .into_iter()
            .flat_map(|c| c.outlets.iter())
            .filter_map(|id| self.stream(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_material() {
        assert!(StreamKind::Material.is_material());
        assert!(!StreamKind::Power.is_material());
        assert!(!StreamKind::Heat.is_material());
    }

    #[test]
    fn boundary_detection() {
        let inner = Stream {
            id: StreamId::from_index(0),
            name: "2".into(),
            kind: StreamKind::Material,
            source: Some(CompId::from_index(0)),
            target: Some(CompId::from_index(1)),
        };
        assert!(!inner.is_boundary());

        let feed = Stream {
            source: None,
            ..inner.clone()
        };
        assert!(feed.is_boundary());
    }
}
