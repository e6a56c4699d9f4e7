use super::{macros::impl_common_graph_ops, *};

/// An undirected graph over caller keys `K`.
///
/// Every edge `{u, v}` appears in the neighborhoods of both endpoints; a self-loop `{u, u}`
/// appears once in the neighborhood of `u`. `multiplicity` is keyed by the normalized edge.
#[derive(Clone, Debug)]
pub struct UndirectedGraph<K> {
    vertices: VertexTable<K>,
    nbs: Vec<ArrNeighborhood>,
    multiplicity: FxHashMap<Edge, NumEdges>,
    num_edges: NumEdges,
}

impl_common_graph_ops!(UndirectedGraph<nbs> => Undirected);

impl<K> UndirectedClosure for UndirectedGraph<K> {
    fn closure_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.nbs[u as usize].neighbors()
    }
}

impl<K> AdjacencyTest for UndirectedGraph<K> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_multiplicity(u, v) > 0
    }

    fn edge_multiplicity(&self, u: Node, v: Node) -> NumEdges {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.multiplicity
            .get(&Edge(u, v).normalized())
            .copied()
            .unwrap_or(0)
    }
}

impl<K> GraphEdgeEditing for UndirectedGraph<K>
where
    K: Clone + Eq + Hash + Debug,
{
    fn add_edge_between(&mut self, u: Node, v: Node) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        assert!(self.num_edges < NumEdges::MAX);

        let edge = Edge(u, v);
        self.nbs[u as usize].add_neighbor(v);
        if !edge.is_loop() {
            self.nbs[v as usize].add_neighbor(u);
        }
        *self.multiplicity.entry(edge.normalized()).or_default() += 1;
        self.num_edges += 1;
    }
}
