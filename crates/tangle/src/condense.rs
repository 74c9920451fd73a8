//! Condensation adjacency: which components neighbour which.
//!
//! # Overview
//!
//! Contracting every SCC of a directed graph to a single node yields the
//! condensation, which is always a DAG. This module builds, per component,
//! a [`SccSummary`] record listing its members and boundary-edge targets
//! plus the set of neighbouring components, and ranks components by how
//! many *distinct* neighbours they touch.
//!
//! The neighbour relation is deliberately symmetric: an edge from a member
//! of A into B makes each a neighbour of the other, whatever the edge
//! direction. Multiple edges between the same pair collapse to one entry,
//! and edges that stay inside a component never produce a neighbour.
//!
//! # Output
//!
//! [`Condensation`] exposes the summary records (indexed by [`SccId`]), the
//! ranking ([`most_connected`]/[`most_connected_all`]; ties are kept, the
//! first component in decomposition order leads), and two petgraph views:
//! the condensed DAG and its transitive reduction.
//!
//! [`most_connected`]: Condensation::most_connected
//! [`most_connected_all`]: Condensation::most_connected_all

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeSet;

use fixedbitset::FixedBitSet;
use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::graph::{Graph, VertexId};
use crate::scc::{Decomposition, SccId};

// ---------------------------------------------------------------------------
// SccSummary
// ---------------------------------------------------------------------------

/// Per-component condensation record.
///
/// Serializes with the field names downstream consumers expect:
/// `members`, `boundaryTargets`, `neighbourSCCs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SccSummary {
    /// Member vertex identifiers, in decomposition pop order (root last).
    pub members: Vec<VertexId>,
    /// Every out-neighbour identifier listed by any member, deduplicated
    /// preserving first occurrence (member order, then listed edge order).
    /// Intra-component targets are included.
    pub boundary_targets: Vec<VertexId>,
    /// Identifiers of neighbouring components. Symmetric and self-free:
    /// `a ∈ neighbour_sccs(b)` iff `b ∈ neighbour_sccs(a)`, never `a` of
    /// `a` itself.
    #[serde(rename = "neighbourSCCs")]
    pub neighbour_sccs: BTreeSet<SccId>,
}

impl SccSummary {
    /// Number of distinct neighbouring components.
    #[must_use]
    pub fn neighbour_count(&self) -> usize {
        self.neighbour_sccs.len()
    }
}

// ---------------------------------------------------------------------------
// Condensation
// ---------------------------------------------------------------------------

/// The condensation summary of one decomposition.
///
/// Built by [`Condensation::from_decomposition`] in three passes:
/// boundary extraction, symmetric neighbour linking, ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condensation {
    entries: Vec<SccSummary>,
    dag_edges: Vec<(SccId, SccId)>,
    most_connected: Vec<SccId>,
}

impl Condensation {
    /// Build the condensation summary for `decomposition` over `graph`.
    ///
    /// `graph` must be the graph the decomposition was computed from; the
    /// entry at index `i` describes `decomposition.sccs()[i]`. Pure: no
    /// state is retained between calls.
    #[must_use]
    #[instrument(skip(graph, decomposition), fields(scc_count = decomposition.len()))]
    pub fn from_decomposition(graph: &Graph, decomposition: &Decomposition) -> Self {
        let adjacency = graph.adjacency();

        // Pass 1: per component, members plus deduplicated boundary
        // targets. `seen` is 1-based like the identifiers and reset after
        // each component.
        let mut entries: Vec<SccSummary> = Vec::with_capacity(decomposition.len());
        let mut seen = vec![false; graph.vertex_count() + 1];
        for scc in decomposition {
            let members = scc.members().to_vec();
            let mut boundary_targets = Vec::new();
            for &member in &members {
                for &target in &adjacency[member - 1] {
                    if !seen[target] {
                        seen[target] = true;
                        boundary_targets.push(target);
                    }
                }
            }
            for &target in &boundary_targets {
                seen[target] = false;
            }
            entries.push(SccSummary {
                members,
                boundary_targets,
                neighbour_sccs: BTreeSet::new(),
            });
        }

        // Pass 2: resolve each boundary target to its component and link
        // the pair symmetrically. The set collapses duplicate edges; the
        // `other != id` guard drops intra-component targets.
        let mut directed = BTreeSet::new();
        for (id, entry) in entries.iter().enumerate() {
            for &target in &entry.boundary_targets {
                if let Some(other) = decomposition.scc_of(target)
                    && other != id
                {
                    directed.insert((id, other));
                }
            }
        }
        for &(from, to) in &directed {
            entries[from].neighbour_sccs.insert(to);
            entries[to].neighbour_sccs.insert(from);
        }

        // Pass 3: rank by neighbour-set cardinality. All co-maximal
        // components are kept, in decomposition order.
        let most_connected = entries
            .iter()
            .map(SccSummary::neighbour_count)
            .max()
            .map_or_else(Vec::new, |max| {
                entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.neighbour_count() == max)
                    .map(|(id, _)| id)
                    .collect()
            });

        Self {
            entries,
            dag_edges: directed.into_iter().collect(),
            most_connected,
        }
    }

    /// Summary records, indexed by [`SccId`].
    #[must_use]
    pub fn entries(&self) -> &[SccSummary] {
        &self.entries
    }

    /// The record for one component, or `None` for an unknown identifier.
    #[must_use]
    pub fn entry(&self, id: SccId) -> Option<&SccSummary> {
        self.entries.get(id)
    }

    /// Number of components summarized.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the summary is empty (empty graph).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The component with the most distinct neighbours; ties go to the
    /// first in decomposition order. `None` only for an empty graph; a
    /// lone component with zero neighbours still wins.
    #[must_use]
    pub fn most_connected(&self) -> Option<SccId> {
        self.most_connected.first().copied()
    }

    /// Every component achieving the maximum neighbour count, in
    /// decomposition order.
    #[must_use]
    pub fn most_connected_all(&self) -> &[SccId] {
        &self.most_connected
    }

    /// The maximum neighbour-set cardinality, or `None` for an empty
    /// graph.
    #[must_use]
    pub fn max_neighbour_count(&self) -> Option<usize> {
        self.most_connected
            .first()
            .and_then(|&id| self.entries.get(id))
            .map(SccSummary::neighbour_count)
    }

    /// Distinct directed inter-component edges, sorted ascending. An entry
    /// `(a, b)` means some member of component `a` lists a member of
    /// component `b`.
    #[must_use]
    pub fn dag_edges(&self) -> &[(SccId, SccId)] {
        &self.dag_edges
    }

    /// The condensed graph as a petgraph DAG.
    ///
    /// Node weights are the component member lists; node index order
    /// matches [`SccId`] order. Acyclic by construction.
    #[must_use]
    pub fn to_dag(&self) -> DiGraph<Vec<VertexId>, ()> {
        let mut dag = DiGraph::with_capacity(self.entries.len(), self.dag_edges.len());
        for entry in &self.entries {
            dag.add_node(entry.members.clone());
        }
        for &(from, to) in &self.dag_edges {
            dag.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        dag
    }

    /// The condensed DAG with redundant edges removed (transitive
    /// reduction).
    #[must_use]
    pub fn reduced_dag(&self) -> DiGraph<Vec<VertexId>, ()> {
        transitive_reduction(&self.to_dag())
    }
}

// ---------------------------------------------------------------------------
// Transitive reduction
// ---------------------------------------------------------------------------

/// Compute the transitive reduction of a DAG: the minimal edge set with the
/// same reachability. An edge `(u, v)` is dropped when `v` is reachable
/// from another direct successor of `u`.
///
/// Nodes are processed in reverse topological order, sinks first, each
/// accumulating a reachability bitset from its successors. Cyclic input is
/// returned unreduced rather than panicking; the condensed graphs this is
/// built for are DAGs by construction.
#[must_use]
pub fn transitive_reduction<N: Clone>(dag: &DiGraph<N, ()>) -> DiGraph<N, ()> {
    let order = toposort(dag, None).unwrap_or_else(|_| dag.node_indices().collect());

    // reachable[u] = every node reachable from u in one or more steps.
    let n = dag.node_count();
    let mut reachable = vec![FixedBitSet::with_capacity(n); n];
    for &u in order.iter().rev() {
        let mut row = FixedBitSet::with_capacity(n);
        for v in dag.neighbors_directed(u, Direction::Outgoing) {
            row.insert(v.index());
            row.union_with(&reachable[v.index()]);
        }
        reachable[u.index()] = row;
    }

    let mut reduced = dag.map(|_, weight| weight.clone(), |_, _| ());
    let redundant: Vec<(NodeIndex, NodeIndex)> = dag
        .edge_references()
        .filter(|edge| {
            let (u, v) = (edge.source(), edge.target());
            dag.neighbors_directed(u, Direction::Outgoing)
                .filter(|&w| w != v)
                .any(|w| reachable[w.index()].contains(v.index()))
        })
        .map(|edge| (edge.source(), edge.target()))
        .collect();
    for (from, to) in redundant {
        if let Some(edge) = reduced.find_edge(from, to) {
            reduced.remove_edge(edge);
        }
    }
    reduced
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
