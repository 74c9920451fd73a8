//! Summary statistics for a decomposed graph.
//!
//! # Statistics Provided
//!
//! - **vertex_count / edge_count**: Raw sizes; edges are counted as
//!   listed, duplicates and self-loops included.
//! - **density**: Ratio of listed edges to the maximum for a simple
//!   directed graph: `edge_count / (vertex_count * (vertex_count - 1))`.
//!   Zero for graphs with fewer than two vertices; can exceed 1.0 when
//!   duplicate edges are present.
//! - **scc_count**: Number of strongly connected components. Equals
//!   `vertex_count` in an acyclic graph.
//! - **cycle_count**: Components that contain a cycle, i.e. more than one
//!   member, or a lone vertex with a self-loop.
//! - **largest_scc_size**: Member count of the biggest component.
//! - **weakly_connected_component_count**: Connected components when edge
//!   direction is ignored. Greater than 1 means disjoint subgraphs.
//! - **isolated_vertex_count**: Vertices with no edges at all.
//! - **max_in_degree / max_out_degree**: Highest listed in/out degree.
//! - **condensed_edge_count**: Distinct directed edges between components.
//! - **reduced_edge_count**: Edges left after transitive reduction of the
//!   condensed DAG.
//! - **condensation_depth**: Components on the longest directed chain of
//!   the condensed DAG.

use petgraph::{
    Direction,
    algo::{connected_components, toposort},
    graph::{DiGraph, NodeIndex},
};

use crate::condense::{Condensation, SccSummary};
use crate::graph::{Graph, VertexId};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for one graph and its condensation.
///
/// Computed by [`GraphStats::from_condensation`]. All counts refer to the
/// original graph unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of listed edges, duplicates and self-loops included.
    pub edge_count: usize,
    /// `edge_count / (vertex_count * (vertex_count - 1))`; zero for fewer
    /// than two vertices.
    pub density: f64,
    /// Number of strongly connected components.
    pub scc_count: usize,
    /// Components containing a cycle (multi-member, or self-looped
    /// singleton).
    pub cycle_count: usize,
    /// Member count of the largest component.
    pub largest_scc_size: usize,
    /// Connected components ignoring edge direction.
    pub weakly_connected_component_count: usize,
    /// Vertices with neither in- nor out-edges.
    pub isolated_vertex_count: usize,
    /// Highest in-degree over all vertices.
    pub max_in_degree: usize,
    /// Highest out-degree over all vertices.
    pub max_out_degree: usize,
    /// Distinct directed inter-component edges.
    pub condensed_edge_count: usize,
    /// Inter-component edges surviving transitive reduction.
    pub reduced_edge_count: usize,
    /// Components on the longest directed chain of the condensation.
    pub condensation_depth: usize,
}

impl GraphStats {
    /// Compute statistics from a graph and its condensation summary.
    ///
    /// `condensation` must describe `graph`; degree and component figures
    /// come from a petgraph mirror of the raw adjacency.
    #[must_use]
    pub fn from_condensation(graph: &Graph, condensation: &Condensation) -> Self {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();
        let density = compute_density(vertex_count, edge_count);

        let scc_count = condensation.len();
        let cycle_count = condensation
            .entries()
            .iter()
            .filter(|entry| is_cyclic(entry))
            .count();
        let largest_scc_size = condensation
            .entries()
            .iter()
            .map(|entry| entry.members.len())
            .max()
            .unwrap_or(0);

        let mirror = petgraph_mirror(graph);
        let weakly_connected_component_count = connected_components(&mirror);

        let isolated_vertex_count = mirror
            .node_indices()
            .filter(|&idx| {
                mirror
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
                    && mirror
                        .neighbors_directed(idx, Direction::Outgoing)
                        .next()
                        .is_none()
            })
            .count();

        let max_in_degree = mirror
            .node_indices()
            .map(|idx| mirror.neighbors_directed(idx, Direction::Incoming).count())
            .max()
            .unwrap_or(0);

        let max_out_degree = mirror
            .node_indices()
            .map(|idx| mirror.neighbors_directed(idx, Direction::Outgoing).count())
            .max()
            .unwrap_or(0);

        let condensed_edge_count = condensation.dag_edges().len();
        let reduced_edge_count = condensation.reduced_dag().edge_count();
        let condensation_depth = longest_chain(&condensation.to_dag());

        Self {
            vertex_count,
            edge_count,
            density,
            scc_count,
            cycle_count,
            largest_scc_size,
            weakly_connected_component_count,
            isolated_vertex_count,
            max_in_degree,
            max_out_degree,
            condensed_edge_count,
            reduced_edge_count,
            condensation_depth,
        }
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.edge_count == 0
    }

    /// Return `true` if the graph contains at least one cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }

    /// Share of inter-component edges removed by transitive reduction.
    ///
    /// Returns 0.0 when the condensation has no edges.
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        compute_ratio(self.condensed_edge_count, self.reduced_edge_count)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// A component is cyclic if it has several members, or one member listing
/// itself (a singleton's boundary contains the member iff it self-loops).
fn is_cyclic(entry: &SccSummary) -> bool {
    entry.members.len() > 1
        || entry
            .members
            .first()
            .is_some_and(|member| entry.boundary_targets.contains(member))
}

/// Mirror the adjacency into a petgraph graph for component/degree scans.
/// Node index `i` carries vertex `i + 1`; listed edges are kept verbatim,
/// parallel edges included.
fn petgraph_mirror(graph: &Graph) -> DiGraph<VertexId, ()> {
    let mut mirror = DiGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    let nodes: Vec<NodeIndex> = graph.vertices().map(|id| mirror.add_node(id)).collect();
    for vertex in graph.vertices() {
        for &target in graph.out_neighbours(vertex).unwrap_or_default() {
            mirror.add_edge(nodes[vertex - 1], nodes[target - 1], ());
        }
    }
    mirror
}

/// Number of nodes on the longest directed chain of a DAG; zero when
/// empty. Cyclic input degrades to the node-index order rather than
/// panicking.
fn longest_chain(dag: &DiGraph<Vec<VertexId>, ()>) -> usize {
    let order = toposort(dag, None).unwrap_or_else(|_| dag.node_indices().collect());

    let mut depth = vec![1_usize; dag.node_count()];
    for &node in order.iter().rev() {
        let deepest_successor = dag
            .neighbors_directed(node, Direction::Outgoing)
            .map(|successor| depth[successor.index()])
            .max();
        if let Some(deepest) = deepest_successor {
            depth[node.index()] = deepest + 1;
        }
    }
    depth.into_iter().max().unwrap_or(0)
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (vertex_count * (vertex_count - 1)) as f64;
    edge_count as f64 / max_edges
}

#[allow(clippy::cast_precision_loss)]
fn compute_ratio(condensed: usize, reduced: usize) -> f64 {
    if condensed == 0 {
        return 0.0_f64;
    }
    let removed = (condensed as f64 - reduced as f64).max(0.0_f64);
    removed / condensed as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::Decomposition;

    fn stats_for(adjacency: Vec<Vec<VertexId>>) -> GraphStats {
        let graph = Graph::from_adjacency(adjacency).expect("valid adjacency");
        let decomposition = Decomposition::from_graph(&graph);
        let condensation = Condensation::from_decomposition(&graph, &decomposition);
        GraphStats::from_condensation(&graph, &condensation)
    }

    #[test]
    fn empty_graph_stats() {
        let stats = stats_for(vec![]);
        assert_eq!(stats.vertex_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!((stats.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.scc_count, 0);
        assert_eq!(stats.cycle_count, 0);
        assert_eq!(stats.weakly_connected_component_count, 0);
        assert_eq!(stats.isolated_vertex_count, 0);
        assert_eq!(stats.max_in_degree, 0);
        assert_eq!(stats.max_out_degree, 0);
        assert_eq!(stats.condensation_depth, 0);
        assert!(stats.is_flat());
        assert!(!stats.has_cycles());
    }

    #[test]
    fn linear_chain_stats() {
        // 1 → 2 → 3
        let stats = stats_for(vec![vec![2], vec![3], vec![]]);
        assert_eq!(stats.vertex_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.scc_count, 3);
        assert_eq!(stats.cycle_count, 0);
        assert_eq!(stats.largest_scc_size, 1);
        assert_eq!(stats.max_in_degree, 1);
        assert_eq!(stats.max_out_degree, 1);
        assert_eq!(stats.condensation_depth, 3);
        assert!(!stats.has_cycles());
        assert!(!stats.is_flat());
    }

    #[test]
    fn bridged_cycles_stats() {
        // 1 ↔ 2 and 3 ↔ 4 bridged by 2 → 3.
        let stats = stats_for(vec![vec![2], vec![1, 3], vec![4], vec![3]]);
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.edge_count, 5);
        assert_eq!(stats.scc_count, 2);
        assert_eq!(stats.cycle_count, 2);
        assert_eq!(stats.largest_scc_size, 2);
        assert_eq!(stats.weakly_connected_component_count, 1);
        assert_eq!(stats.isolated_vertex_count, 0);
        assert_eq!(stats.max_in_degree, 2, "vertex 3 receives 2 → 3 and 4 → 3");
        assert_eq!(stats.max_out_degree, 2, "vertex 2 lists 1 and 3");
        assert_eq!(stats.condensed_edge_count, 1);
        assert_eq!(stats.reduced_edge_count, 1);
        assert_eq!(stats.condensation_depth, 2);
        assert!(stats.has_cycles());
    }

    #[test]
    fn self_loop_counts_as_cycle_but_not_isolated() {
        let stats = stats_for(vec![vec![1]]);
        assert_eq!(stats.scc_count, 1);
        assert_eq!(stats.cycle_count, 1);
        assert_eq!(stats.isolated_vertex_count, 0);
        assert_eq!(stats.weakly_connected_component_count, 1);
        assert!(stats.has_cycles());
    }

    #[test]
    fn vertices_without_edges_are_isolated() {
        let stats = stats_for(vec![vec![], vec![], vec![]]);
        assert_eq!(stats.isolated_vertex_count, 3);
        assert_eq!(stats.weakly_connected_component_count, 3);
        assert!((stats.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.condensation_depth, 1);
    }

    #[test]
    fn density_two_vertices_one_edge() {
        // 1 → 2: density = 1 / (2 * 1) = 0.5.
        let stats = stats_for(vec![vec![2], vec![]]);
        assert!((stats.density - 0.5).abs() < 1e-10);
    }

    #[test]
    fn shortcut_edge_removed_by_reduction() {
        // 1 → 2 → 3 plus 1 → 3: one of three inter-component edges goes.
        let stats = stats_for(vec![vec![2, 3], vec![3], vec![]]);
        assert_eq!(stats.condensed_edge_count, 3);
        assert_eq!(stats.reduced_edge_count, 2);
        assert!((stats.reduction_ratio() - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn disjoint_subgraphs_counted_separately() {
        // 1 → 2 and 3 → 4, no connection between the pairs.
        let stats = stats_for(vec![vec![2], vec![], vec![4], vec![]]);
        assert_eq!(stats.weakly_connected_component_count, 2);
        assert_eq!(stats.isolated_vertex_count, 0);
        assert_eq!(stats.condensation_depth, 2);
    }
}
