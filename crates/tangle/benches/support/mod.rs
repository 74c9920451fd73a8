#![allow(dead_code)]

use tangle::{Graph, VertexId};

#[derive(Clone, Copy, Debug)]
pub struct BenchmarkTier {
    pub name: &'static str,
    pub vertex_count: usize,
}

pub const TIER_S: BenchmarkTier = BenchmarkTier {
    name: "S",
    vertex_count: 1_000,
};

pub const TIER_M: BenchmarkTier = BenchmarkTier {
    name: "M",
    vertex_count: 10_000,
};

pub const TIER_L: BenchmarkTier = BenchmarkTier {
    name: "L",
    vertex_count: 100_000,
};

pub const TIERS: [BenchmarkTier; 3] = [TIER_S, TIER_M, TIER_L];

/// Tier size, clamped by `TANGLE_BENCH_MAX_VERTICES` when set.
pub fn effective_vertex_count(tier: BenchmarkTier) -> usize {
    let cap = std::env::var("TANGLE_BENCH_MAX_VERTICES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(TIER_L.vertex_count);
    tier.vertex_count.min(cap)
}

/// 1 → 2 → … → n. Maximum traversal depth, every component a singleton.
pub fn chain(vertex_count: usize) -> Graph {
    let adjacency: Vec<Vec<VertexId>> = (1..=vertex_count)
        .map(|vertex| {
            if vertex < vertex_count {
                vec![vertex + 1]
            } else {
                vec![]
            }
        })
        .collect();
    Graph::from_adjacency(adjacency).expect("generated adjacency is valid")
}

/// Single n-cycle: one component holding every vertex, collapsed in one
/// stack pop at the end of the traversal.
pub fn ring(vertex_count: usize) -> Graph {
    let adjacency: Vec<Vec<VertexId>> = (1..=vertex_count)
        .map(|vertex| vec![vertex % vertex_count + 1])
        .collect();
    Graph::from_adjacency(adjacency).expect("generated adjacency is valid")
}

/// Fixed-size rings bridged in sequence: a directed cycle per block plus
/// one edge from each block's first vertex into the next block. Many
/// components and a long condensation chain.
pub fn braided(vertex_count: usize) -> Graph {
    const RING_SIZE: usize = 8;

    let mut adjacency: Vec<Vec<VertexId>> = vec![Vec::new(); vertex_count];
    for (index, targets) in adjacency.iter_mut().enumerate() {
        let vertex = index + 1;
        let block_start = (index / RING_SIZE) * RING_SIZE + 1;
        let block_len = RING_SIZE.min(vertex_count - block_start + 1);

        let position = vertex - block_start;
        targets.push(block_start + (position + 1) % block_len);

        if vertex == block_start && block_start + block_len <= vertex_count {
            targets.push(block_start + block_len);
        }
    }
    Graph::from_adjacency(adjacency).expect("generated adjacency is valid")
}
