//! Topology validation logic.

use std::collections::HashSet;

use ex_core::CompId;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Component, Stream};

type Endpoints = (Option<CompId>, Option<CompId>);

/// Stream and component names must be unique within their kind.
pub(crate) fn validate_names(streams: &[Stream], components: &[Component]) -> GraphResult<()> {
    let mut seen = HashSet::new();
    for stream in streams {
        if !seen.insert(stream.name.as_str()) {
            return Err(GraphError::DuplicateStreamName {
                name: stream.name.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for comp in components {
        if !seen.insert(comp.name.as_str()) {
            return Err(GraphError::DuplicateComponentName {
                name: comp.name.clone(),
            });
        }
    }
    Ok(())
}

/// Resolve (source, target) for every stream from the component lists.
///
/// Each stream has at most one source and one target and must touch at
/// least one component.
pub(crate) fn resolve_endpoints(
    streams: &[Stream],
    components: &[Component],
) -> GraphResult<Vec<Endpoints>> {
    let mut ends: Vec<Endpoints> = vec![(None, None); streams.len()];

    for comp in components {
        if comp.inlets.is_empty() && comp.outlets.is_empty() {
            return Err(GraphError::EmptyComponent {
                comp: comp.name.clone(),
            });
        }

        for &sid in &comp.inlets {
            let slot = ends
                .get_mut(sid.slot())
                .ok_or(GraphError::UnknownStream {
                    comp: comp.id,
                    stream: sid,
                })?;
            if let Some(prev) = slot.1 {
                return Err(GraphError::MultipleTargets {
                    stream: streams[sid.slot()].name.clone(),
                    first: components[prev.slot()].name.clone(),
                    second: comp.name.clone(),
                });
            }
            slot.1 = Some(comp.id);
        }

        for &sid in &comp.outlets {
            let slot = ends
                .get_mut(sid.slot())
                .ok_or(GraphError::UnknownStream {
                    comp: comp.id,
                    stream: sid,
                })?;
            if let Some(prev) = slot.0 {
                return Err(GraphError::MultipleSources {
                    stream: streams[sid.slot()].name.clone(),
                    first: components[prev.slot()].name.clone(),
                    second: comp.name.clone(),
                });
            }
            if slot.1 == Some(comp.id) {
                return Err(GraphError::SelfLoop {
                    comp: comp.name.clone(),
                    stream: streams[sid.slot()].name.clone(),
                });
            }
            slot.0 = Some(comp.id);
        }
    }

    for (stream, (source, target)) in streams.iter().zip(&ends) {
        if source.is_none() && target.is_none() {
            return Err(GraphError::DanglingStream {
                stream: stream.name.clone(),
            });
        }
    }

    Ok(ends)
}
