//! Random graphs and naive reference implementations shared by the test modules.

use rand::{Rng, seq::SliceRandom};

use crate::{ops::*, repr::*, *};

/// Undirected graph with keys `0..n` and `m` uniformly drawn edges.
/// Self-loops and parallel edges may occur.
pub(crate) fn random_undirected_graph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
) -> UndirectedGraph<u32> {
    let mut graph = UndirectedGraph::with_capacity(n as usize);
    graph.add_vertices(0..n);
    for _ in 0..m {
        graph.add_edge_between(rng.random_range(0..n), rng.random_range(0..n));
    }
    graph
}

/// Directed graph with keys `0..n` and `m` uniformly drawn arcs.
/// Self-loops and parallel arcs may occur.
pub(crate) fn random_directed_graph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
) -> DirectedGraph<u32> {
    let mut graph = DirectedGraph::with_capacity(n as usize);
    graph.add_vertices(0..n);
    for _ in 0..m {
        graph.add_edge_between(rng.random_range(0..n), rng.random_range(0..n));
    }
    graph
}

/// Acyclic directed graph with keys `0..n`: arcs only go from smaller to larger keys,
/// but keys are inserted in random order so that insertion order is not a topological order.
pub(crate) fn random_dag<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> DirectedGraph<u32> {
    let mut keys: Vec<u32> = (0..n).collect();
    keys.shuffle(rng);

    let mut graph = DirectedGraph::with_capacity(n as usize);
    graph.add_vertices(keys);
    if n < 2 {
        return graph;
    }

    for _ in 0..m {
        let u = rng.random_range(0..n - 1);
        let v = rng.random_range(u + 1..n);
        graph.add_edge(u, v).unwrap();
    }
    graph
}

/// Fixed-point closure over the edge list; `O(n * m)` but obviously correct
pub(crate) fn reachable_from<G: AdjacencyList>(graph: &G, start: Node) -> NodeBitSet {
    closure(graph, start, false)
}

/// Like [`reachable_from`] but ignores edge orientation
pub(crate) fn weakly_reachable_from<G: AdjacencyList>(graph: &G, start: Node) -> NodeBitSet {
    closure(graph, start, true)
}

fn closure<G: AdjacencyList>(graph: &G, start: Node, both_ways: bool) -> NodeBitSet {
    let mut reached = graph.vertex_bitset_unset();
    reached.set_bit(start);

    loop {
        let mut changed = false;
        for Edge(u, v) in graph.edges(false) {
            if reached.get_bit(u) && !reached.set_bit(v) {
                changed = true;
            }
            if both_ways && reached.get_bit(v) && !reached.set_bit(u) {
                changed = true;
            }
        }

        if !changed {
            return reached;
        }
    }
}
