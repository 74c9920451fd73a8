//! Immutable directed-graph container keyed by integer vertex identifiers.
//!
//! # Overview
//!
//! A [`Graph`] owns an ordered collection of vertices and their outgoing
//! adjacency. Vertices are numbered `1..=N` in the order their adjacency
//! entries were supplied, and each vertex's out-neighbours keep the order
//! they were listed in. Both orders are load-bearing downstream: traversal
//! visits vertices and edges exactly in these orders, which pins the
//! discovery order of the decomposition (see [`crate::scc`]).
//!
//! ## Validation
//!
//! Every listed target must name an existing vertex. Construction rejects
//! anything outside `1..=N` with a [`GraphError`] before the graph exists,
//! so later stages never see a dangling edge. Self-loops and duplicate
//! edges are ordinary input.
//!
//! Once built, a `Graph` never changes; it can be shared and re-analyzed
//! across independent runs.

#![allow(clippy::module_name_repetitions)]

use tracing::instrument;

/// A vertex identifier: an integer in `1..=N` for a graph of `N` vertices.
pub type VertexId = usize;

// ---------------------------------------------------------------------------
// GraphError
// ---------------------------------------------------------------------------

/// Validation failure raised while constructing a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An adjacency entry lists a target identifier outside `1..=N`.
    #[error("vertex {vertex} lists out-neighbour {target}, but valid identifiers are 1..={vertex_count}")]
    TargetOutOfRange {
        /// The vertex whose adjacency entry is invalid.
        vertex: VertexId,
        /// The out-of-range identifier it listed.
        target: VertexId,
        /// Number of vertices in the graph being built.
        vertex_count: usize,
    },
    /// An edge pair names a source identifier outside `1..=N`.
    #[error("edge ({from} -> {to}) starts at {from}, but valid identifiers are 1..={vertex_count}")]
    SourceOutOfRange {
        /// The out-of-range source identifier.
        from: VertexId,
        /// The target the edge pointed at.
        to: VertexId,
        /// Number of vertices in the graph being built.
        vertex_count: usize,
    },
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An immutable directed graph over vertices `1..=N`.
///
/// Entry `i` of the underlying adjacency holds the out-neighbours of vertex
/// `i + 1`, in listed order. Lookup by identifier is constant time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<VertexId>>,
}

impl Graph {
    /// Build a graph from one adjacency entry per vertex.
    ///
    /// Entry `i` (0-based) lists the out-neighbours of vertex `i + 1`
    /// (1-based). Vertex numbering follows entry order; out-neighbour order
    /// is preserved as listed. An empty list is a valid (empty) graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TargetOutOfRange`] if any listed target is not
    /// in `1..=N`. No partially-built graph is exposed.
    #[instrument(skip(adjacency), fields(vertex_count = adjacency.len()))]
    pub fn from_adjacency(adjacency: Vec<Vec<VertexId>>) -> Result<Self, GraphError> {
        let vertex_count = adjacency.len();
        for (index, targets) in adjacency.iter().enumerate() {
            for &target in targets {
                if target == 0 || target > vertex_count {
                    return Err(GraphError::TargetOutOfRange {
                        vertex: index + 1,
                        target,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self { adjacency })
    }

    /// Build a graph over `vertex_count` vertices from `(from, to)` pairs.
    ///
    /// Edges are attached to their source vertex in the order they appear
    /// in `edges`, so two graphs built from the same pair list are
    /// identical, including traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SourceOutOfRange`] or
    /// [`GraphError::TargetOutOfRange`] if either endpoint is not in
    /// `1..=vertex_count`.
    #[instrument(skip(edges), fields(edge_count = edges.len()))]
    pub fn from_edges(
        vertex_count: usize,
        edges: &[(VertexId, VertexId)],
    ) -> Result<Self, GraphError> {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for &(from, to) in edges {
            if from == 0 || from > vertex_count {
                return Err(GraphError::SourceOutOfRange {
                    from,
                    to,
                    vertex_count,
                });
            }
            if to == 0 || to > vertex_count {
                return Err(GraphError::TargetOutOfRange {
                    vertex: from,
                    target: to,
                    vertex_count,
                });
            }
            adjacency[from - 1].push(to);
        }
        Ok(Self { adjacency })
    }

    /// Return the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Return the number of listed edges, duplicates and self-loops
    /// included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Return `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Return `true` if `vertex` names a vertex of this graph.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        (1..=self.adjacency.len()).contains(&vertex)
    }

    /// Iterate over all vertex identifiers in insertion order (`1..=N`).
    #[must_use]
    pub fn vertices(&self) -> std::ops::RangeInclusive<VertexId> {
        1..=self.adjacency.len()
    }

    /// Return the out-neighbours of `vertex` in listed order, or `None` if
    /// `vertex` is not in this graph.
    #[must_use]
    pub fn out_neighbours(&self, vertex: VertexId) -> Option<&[VertexId]> {
        if self.contains(vertex) {
            Some(&self.adjacency[vertex - 1])
        } else {
            None
        }
    }

    /// Adjacency storage, indexed at `id - 1`. Internal fast path for the
    /// traversal and condensation stages.
    pub(crate) fn adjacency(&self) -> &[Vec<VertexId>] {
        &self.adjacency
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
