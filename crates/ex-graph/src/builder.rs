//! Incremental graph builder.

use ex_core::{CompId, StreamId};

use crate::error::GraphResult;
use crate::graph::{Component, Graph, Stream, StreamKind};
use crate::validate;

/// Builder for constructing a topology incrementally.
///
/// Add streams first, then components referencing them. `build()` checks
/// the connections and fills in each stream's source and target.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    streams: Vec<Stream>,
    components: Vec<Component>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream and return its ID.
    pub fn add_stream(&mut self, name: impl Into<String>, kind: StreamKind) -> StreamId {
        let id = StreamId::from_index(self.streams.len() as u32);
        self.streams.push(Stream {
            id,
            name: name.into(),
            kind,
            source: None,
            target: None,
        });
        id
    }

    /// Add a component with ordered inlet and outlet streams.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        inlets: &[StreamId],
        outlets: &[StreamId],
    ) -> CompId {
        let id = CompId::from_index(self.components.len() as u32);
        self.components.push(Component {
            id,
            name: name.into(),
            inlets: inlets.to_vec(),
            outlets: outlets.to_vec(),
        });
        id
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    pub fn build(mut self) -> GraphResult<Graph> {
        validate::validate_names(&self.streams, &self.components)?;
        let ends = validate::resolve_endpoints(&self.streams, &self.components)?;

        for (stream, (source, target)) in self.streams.iter_mut().zip(ends) {
            stream.source = source;
            stream.target = target;
        }

        Ok(Graph {
            streams: self.streams,
            components: self.components,
        })
    }
}
