//! Strongly-connected-component decomposition via Tarjan's algorithm.
//!
//! # Overview
//!
//! [`Decomposition::from_graph`] partitions a [`Graph`]'s vertex set into
//! [`Scc`]s: maximal groups in which every vertex reaches every other via
//! directed edges. Components are emitted in completion order (a component
//! closes only after everything it can reach has closed), and members are
//! recorded in the order they pop off the traversal stack, root last.
//!
//! # Algorithm
//!
//! Single-pass Tarjan: each vertex gets a discovery index and a lowlink
//! (the smallest discovery index reachable through its subtree plus
//! back-edges to vertices still open on the traversal stack). A vertex
//! whose lowlink equals its own discovery index is the root of a finished
//! component and collapses the stack down to itself.
//!
//! Descent uses an explicit heap-allocated stack of [`Frame`]s (a vertex
//! plus a cursor into its out-neighbour list) rather than call-stack
//! recursion, so the deepest path a graph can offer costs heap memory, not
//! native stack. Lowlink folds into the parent when a frame is popped.
//!
//! Vertices are scanned in insertion order and out-neighbours in listed
//! order, so the full output (component order and member order) is
//! deterministic for a given graph.
//!
//! # Edge Cases
//!
//! - Empty graph: no components.
//! - Self-loop: an ordinary back-edge to an open vertex; a lone vertex
//!   with a self-loop is a singleton component.
//! - Duplicate edges: the second visit finds the target open or closed and
//!   folds the same value again; membership is unaffected.
//! - Disconnected graphs: the insertion-order scan restarts the traversal
//!   in each unvisited region.
//!
//! All per-run state (discovery, lowlink, stack membership) lives in side
//! arrays owned by the engine, so a `Graph` can be decomposed repeatedly
//! with identical results.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::graph::{Graph, VertexId};

/// A component identifier: the component's position in decomposition
/// output order.
pub type SccId = usize;

/// Discovery-index sentinel for vertices the traversal has not reached.
const UNVISITED: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Scc
// ---------------------------------------------------------------------------

/// One strongly connected component.
///
/// Members appear in traversal-stack pop order; the root (the vertex that
/// announced the component) is always last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scc {
    members: Vec<VertexId>,
}

impl Scc {
    /// Member vertex identifiers in pop order, root last.
    #[must_use]
    pub fn members(&self) -> &[VertexId] {
        &self.members
    }

    /// The root vertex: the member whose lowlink matched its discovery
    /// index and closed the component.
    ///
    /// Components are never empty, so the default fallback is unreachable
    /// for any value produced by [`Decomposition::from_graph`].
    #[must_use]
    pub fn root(&self) -> VertexId {
        self.members.last().copied().unwrap_or_default()
    }

    /// Number of member vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for engine output; provided to pair with [`len`].
    ///
    /// [`len`]: Scc::len
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Return `true` if this component has more than one member.
    ///
    /// A lone vertex with a self-loop is also cyclic but is not detected
    /// here; that check needs the adjacency (see
    /// [`crate::stats::GraphStats`]).
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        self.members.len() > 1
    }

    /// Return `true` if `vertex` belongs to this component.
    ///
    /// Linear in component size; use [`Decomposition::scc_of`] for
    /// constant-time membership lookup.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.members.contains(&vertex)
    }
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

/// The full SCC decomposition of one graph.
///
/// Holds the ordered component list plus a reverse index from vertex to
/// component, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    sccs: Vec<Scc>,
    vertex_to_scc: Vec<SccId>,
}

impl Decomposition {
    /// Decompose `graph` into strongly connected components.
    ///
    /// Runs in time linear in vertices plus edges. Infallible: `graph` is
    /// valid by construction, so every listed target resolves.
    #[must_use]
    #[instrument(skip(graph), fields(vertex_count = graph.vertex_count()))]
    pub fn from_graph(graph: &Graph) -> Self {
        let sccs = Tarjan::new(graph).run();

        let mut vertex_to_scc = vec![0; graph.vertex_count()];
        for (id, scc) in sccs.iter().enumerate() {
            for &member in scc.members() {
                vertex_to_scc[member - 1] = id;
            }
        }

        Self {
            sccs,
            vertex_to_scc,
        }
    }

    /// Components in output order.
    #[must_use]
    pub fn sccs(&self) -> &[Scc] {
        &self.sccs
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sccs.len()
    }

    /// Return `true` if the decomposition has no components (empty graph).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sccs.is_empty()
    }

    /// Iterate over components in output order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Scc> {
        self.sccs.iter()
    }

    /// Return the component containing `vertex`, or `None` if `vertex` is
    /// not in the decomposed graph. Constant time.
    #[must_use]
    pub fn scc_of(&self, vertex: VertexId) -> Option<SccId> {
        let index = vertex.checked_sub(1)?;
        self.vertex_to_scc.get(index).copied()
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Scc;
    type IntoIter = std::slice::Iter<'a, Scc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tarjan engine
// ---------------------------------------------------------------------------

/// One explicit-stack frame: a vertex (0-based index) and a cursor into
/// its out-neighbour list.
struct Frame {
    vertex: usize,
    cursor: usize,
}

/// Per-run traversal state. Dropped when the run finishes; nothing leaks
/// back into the [`Graph`].
struct Tarjan<'g> {
    adjacency: &'g [Vec<VertexId>],
    discovery: Vec<usize>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    counter: usize,
    sccs: Vec<Scc>,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            adjacency: graph.adjacency(),
            discovery: vec![UNVISITED; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            counter: 0,
            sccs: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Scc> {
        for vertex in 0..self.discovery.len() {
            if self.discovery[vertex] == UNVISITED {
                self.visit(vertex);
            }
        }
        self.sccs
    }

    /// Assign discovery/lowlink and open the vertex on the traversal stack.
    fn open(&mut self, vertex: usize) {
        self.discovery[vertex] = self.counter;
        self.lowlink[vertex] = self.counter;
        self.counter += 1;
        self.stack.push(vertex);
        self.on_stack[vertex] = true;
    }

    /// Depth-first traversal from `start` over an explicit frame stack.
    fn visit(&mut self, start: usize) {
        self.open(start);
        let mut frames = vec![Frame {
            vertex: start,
            cursor: 0,
        }];

        while let Some(frame) = frames.last_mut() {
            let vertex = frame.vertex;
            let Some(&target) = self.adjacency[vertex].get(frame.cursor) else {
                // Out-neighbours exhausted: close the frame, collapse if
                // this vertex is a root, fold lowlink into the parent.
                frames.pop();
                if self.lowlink[vertex] == self.discovery[vertex] {
                    self.collapse(vertex);
                }
                if let Some(parent) = frames.last() {
                    let parent = parent.vertex;
                    self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[vertex]);
                }
                continue;
            };

            frame.cursor += 1;
            // Targets are 1-based and validated at graph construction.
            let next = target - 1;
            if self.discovery[next] == UNVISITED {
                self.open(next);
                frames.push(Frame {
                    vertex: next,
                    cursor: 0,
                });
            } else if self.on_stack[next] {
                self.lowlink[vertex] = self.lowlink[vertex].min(self.discovery[next]);
            }
            // Off-stack targets sit in an already-closed component.
        }
    }

    /// Pop the traversal stack down to `root` (inclusive) into a new
    /// component. Pop order is preserved, so the root lands last.
    fn collapse(&mut self, root: usize) {
        let mut members = Vec::new();
        while let Some(vertex) = self.stack.pop() {
            self.on_stack[vertex] = false;
            members.push(vertex + 1);
            if vertex == root {
                break;
            }
        }
        self.sccs.push(Scc { members });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn decompose(adjacency: Vec<Vec<VertexId>>) -> Decomposition {
        let graph = Graph::from_adjacency(adjacency).expect("valid adjacency");
        Decomposition::from_graph(&graph)
    }

    fn member_lists(decomposition: &Decomposition) -> Vec<Vec<VertexId>> {
        decomposition
            .iter()
            .map(|scc| scc.members().to_vec())
            .collect()
    }

    #[test]
    fn empty_graph_has_no_components() {
        let decomposition = decompose(vec![]);
        assert!(decomposition.is_empty());
        assert_eq!(decomposition.len(), 0);
    }

    #[test]
    fn triangle_pops_root_last() {
        // 1 → 2 → 3 → 1: one component, popped 3, 2, then root 1.
        let decomposition = decompose(vec![vec![2], vec![3], vec![1]]);
        assert_eq!(member_lists(&decomposition), vec![vec![3, 2, 1]]);
        assert_eq!(decomposition.sccs()[0].root(), 1);
        assert!(decomposition.sccs()[0].is_cycle());
    }

    #[test]
    fn dag_chain_yields_singletons_in_completion_order() {
        // 1 → 2 → 3: deepest vertex closes first.
        let decomposition = decompose(vec![vec![2], vec![3], vec![]]);
        assert_eq!(
            member_lists(&decomposition),
            vec![vec![3], vec![2], vec![1]]
        );
        assert!(decomposition.iter().all(|scc| !scc.is_cycle()));
    }

    #[test]
    fn self_loop_is_a_singleton_component() {
        let decomposition = decompose(vec![vec![1]]);
        assert_eq!(member_lists(&decomposition), vec![vec![1]]);
        assert!(!decomposition.sccs()[0].is_cycle());
    }

    #[test]
    fn duplicate_edges_do_not_change_membership() {
        // 1 lists 2 twice; 2 points back. Still one two-vertex component.
        let decomposition = decompose(vec![vec![2, 2], vec![1]]);
        assert_eq!(member_lists(&decomposition), vec![vec![2, 1]]);
    }

    #[test]
    fn disconnected_vertices_scanned_in_insertion_order() {
        let decomposition = decompose(vec![vec![], vec![], vec![]]);
        assert_eq!(
            member_lists(&decomposition),
            vec![vec![1], vec![2], vec![3]]
        );
    }

    #[test]
    fn two_cycles_bridged_by_one_edge() {
        // 1 ↔ 2, 3 ↔ 4, bridge 2 → 3. The downstream cycle closes first.
        let decomposition = decompose(vec![vec![2], vec![1, 3], vec![4], vec![3]]);
        assert_eq!(
            member_lists(&decomposition),
            vec![vec![4, 3], vec![2, 1]]
        );
    }

    #[test]
    fn scc_of_maps_every_vertex() {
        let decomposition = decompose(vec![vec![2], vec![1], vec![]]);
        assert_eq!(decomposition.scc_of(1), Some(0));
        assert_eq!(decomposition.scc_of(2), Some(0));
        assert_eq!(decomposition.scc_of(3), Some(1));
    }

    #[test]
    fn scc_of_rejects_identifiers_outside_the_graph() {
        let decomposition = decompose(vec![vec![1]]);
        assert_eq!(decomposition.scc_of(0), None);
        assert_eq!(decomposition.scc_of(2), None);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let graph =
            Graph::from_adjacency(vec![vec![2], vec![3], vec![1], vec![1]]).unwrap();
        let first = Decomposition::from_graph(&graph);
        let second = Decomposition::from_graph(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn contains_checks_membership() {
        let decomposition = decompose(vec![vec![2], vec![1]]);
        let scc = &decomposition.sccs()[0];
        assert!(scc.contains(1));
        assert!(scc.contains(2));
        assert!(!scc.contains(3));
    }
}
