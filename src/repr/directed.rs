/*!
# Directed Graph Representation

[`DirectedGraph`] stores **both outgoing and incoming neighborhoods**, so in-degrees
(topological ordering) and the undirected closure (weak connectivity) are available without
scanning the whole graph.
*/

use super::{macros::impl_common_graph_ops, *};

/// A directed graph over caller keys `K`.
///
/// - Outgoing adjacency is stored in `out_nbs`, incoming adjacency in `in_nbs`.
/// - `multiplicity` counts parallel arcs per `(u, v)`.
#[derive(Clone, Debug)]
pub struct DirectedGraph<K> {
    vertices: VertexTable<K>,
    out_nbs: Vec<ArrNeighborhood>,
    in_nbs: Vec<ArrNeighborhood>,
    multiplicity: FxHashMap<Edge, NumEdges>,
    num_edges: NumEdges,
}

impl_common_graph_ops!(DirectedGraph<out_nbs, in_nbs> => Directed);

impl<K> DirectedAdjacencyList for DirectedGraph<K> {
    fn in_neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_ {
        self.in_nbs[v as usize].neighbors()
    }

    fn in_degree_of(&self, v: Node) -> NumNodes {
        self.in_nbs[v as usize].num_of_neighbors()
    }
}

impl<K> UndirectedClosure for DirectedGraph<K> {
    fn closure_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out_nbs[u as usize]
            .neighbors()
            .chain(self.in_nbs[u as usize].neighbors())
    }
}

impl<K> AdjacencyTest for DirectedGraph<K> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_multiplicity(u, v) > 0
    }

    fn edge_multiplicity(&self, u: Node, v: Node) -> NumEdges {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.multiplicity.get(&Edge(u, v)).copied().unwrap_or(0)
    }
}

impl<K> GraphEdgeEditing for DirectedGraph<K>
where
    K: Clone + Eq + Hash + Debug,
{
    fn add_edge_between(&mut self, u: Node, v: Node) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        assert!(self.num_edges < NumEdges::MAX);

        self.out_nbs[u as usize].add_neighbor(v);
        self.in_nbs[v as usize].add_neighbor(u);
        *self.multiplicity.entry(Edge(u, v)).or_default() += 1;
        self.num_edges += 1;
    }
}
