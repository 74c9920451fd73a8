#![forbid(unsafe_code)]
//! Strongly connected components and condensation adjacency for directed
//! graphs.
//!
//! # Overview
//!
//! This crate decomposes a directed graph, given as 1-based out-neighbour
//! lists, into its strongly connected components with Tarjan's algorithm on
//! an explicit stack, then condenses the components and reports which of
//! them touch which. Output order is fully determined by the input: vertices
//! are scanned in numbering order and out-neighbours in listed order, so the
//! same adjacency always yields the same component list.
//!
//! ## Pipeline
//!
//! ```text
//! Vec<Vec<VertexId>> (1-based out-neighbour lists)
//!        ↓  Graph::from_adjacency()           validates every target
//! Graph
//!        ↓  Decomposition::from_graph()       Tarjan on an explicit stack
//! Decomposition (components in pop order)
//!        ↓  Condensation::from_decomposition()
//! Condensation
//!   ├─ per-component members, boundary targets, neighbour sets
//!   ├─ condensed DAG (petgraph) and its transitive reduction
//!   └─ most-connected ranking
//!        ↓  GraphStats::from_condensation()
//! GraphStats (density, cycle count, condensation depth, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use tangle::{Graph, analyze};
//!
//! # fn main() -> Result<(), tangle::GraphError> {
//! // A 3-cycle feeding a lone sink.
//! let graph = Graph::from_adjacency(vec![
//!     vec![2],    // 1 → 2
//!     vec![3],    // 2 → 3
//!     vec![1, 4], // 3 → 1, 3 → 4
//!     vec![],     // 4
//! ])?;
//!
//! let analysis = analyze(&graph);
//! assert_eq!(analysis.decomposition.len(), 2);
//! assert_eq!(analysis.stats.cycle_count, 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Conventions
//!
//! - **Errors**: fallible constructors return [`GraphError`]; traversal over
//!   a validated [`Graph`] is total.
//! - **Logging**: `tracing` spans on the builders (`instrument`), `debug!`
//!   for pipeline milestones. No subscriber is installed by the library.
//! - **Identifiers**: vertices are `1..=N`; component ids index the
//!   decomposition's output list.

pub mod condense;
pub mod graph;
pub mod scc;
pub mod stats;

// Re-export primary types at crate level for convenience.
pub use condense::{Condensation, SccSummary, transitive_reduction};
pub use graph::{Graph, GraphError, VertexId};
pub use scc::{Decomposition, Scc, SccId};
pub use stats::GraphStats;

use tracing::{debug, instrument};

/// Everything the pipeline derives from one graph.
///
/// Produced by [`analyze`]. The parts can also be built separately when only
/// one of them is needed.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Strongly connected components in pop order.
    pub decomposition: Decomposition,
    /// Per-component adjacency summaries and the condensed DAG.
    pub condensation: Condensation,
    /// Aggregate figures for the graph and its condensation.
    pub stats: GraphStats,
}

/// Run the whole pipeline over `graph`.
#[must_use]
#[instrument(skip(graph), fields(vertex_count = graph.vertex_count()))]
pub fn analyze(graph: &Graph) -> Analysis {
    let decomposition = Decomposition::from_graph(graph);
    let condensation = Condensation::from_decomposition(graph, &decomposition);
    let stats = GraphStats::from_condensation(graph, &condensation);
    debug!(
        scc_count = decomposition.len(),
        condensed_edge_count = condensation.dag_edges().len(),
        "analysis complete"
    );
    Analysis {
        decomposition,
        condensation,
        stats,
    }
}
