/*!
# Cycle Detection in Undirected Graphs

A depth-first search that remembers the parent each node was reached from. Walking back along
the tree edge to the parent is not a cycle; any other edge to an already visited node is.

Precisely one occurrence of the parent is skipped in a node's adjacency. A second occurrence
stems from a parallel edge and closes a cycle of length 2. A self-loop `{u, u}` closes a cycle
of length 1.

The search uses an explicit call stack, so deep graphs cannot overflow the thread's stack.
*/

use tracing::debug;

use super::*;

/// Cycle queries on undirected graphs.
/// Directed graphs use [`TopologicalSort::is_acyclic`] instead.
pub trait CycleDetection: NeighborsSlice + VertexKeys + GraphType<Dir = Undirected> {
    /// Returns the edge that closed the first cycle found, exploring components in
    /// insertion order of their first vertex. Returns `None` iff the graph is a forest.
    fn find_cycle_edge(&self) -> Option<Edge>;

    /// Like [`CycleDetection::find_cycle_edge`] but reports the endpoints as keys
    fn find_cycle_edge_keys(&self) -> Option<(Self::Key, Self::Key)> {
        self.find_cycle_edge()
            .map(|Edge(u, v)| (self.key_of(u).clone(), self.key_of(v).clone()))
    }

    /// Returns *true* if any component contains a cycle, including self-loops and parallel edges.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let mut g = UndirectedGraph::from_edges([1, 2, 3], [(1, 2), (2, 3)]).unwrap();
    /// assert!(!g.has_cycle());
    ///
    /// g.add_edge(3, 1).unwrap();
    /// assert!(g.has_cycle());
    /// ```
    fn has_cycle(&self) -> bool {
        self.find_cycle_edge().is_some()
    }
}

impl<G> CycleDetection for G
where
    G: AdjacencyList + NeighborsSlice + VertexKeys + GraphType<Dir = Undirected>,
{
    fn find_cycle_edge(&self) -> Option<Edge> {
        let edge = CycleSearch::new(self).find();
        if let Some(Edge(u, v)) = edge {
            debug!(
                from = ?self.key_of(u),
                to = ?self.key_of(v),
                "undirected cycle detected"
            );
        }
        edge
    }
}

struct StackFrame {
    node: Node,
    parent: Node,
    next_neighbor: usize,
    skipped_parent: bool,
}

impl StackFrame {
    fn new(node: Node, parent: Node) -> Self {
        Self {
            node,
            parent,
            next_neighbor: 0,
            skipped_parent: false,
        }
    }
}

struct CycleSearch<'a, G> {
    graph: &'a G,
    visited: NodeBitSet,
    call_stack: Vec<StackFrame>,
}

impl<'a, G> CycleSearch<'a, G>
where
    G: AdjacencyList + NeighborsSlice,
{
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            call_stack: Vec::with_capacity(32),
        }
    }

    fn find(mut self) -> Option<Edge> {
        for root in self.graph.vertices() {
            if self.visited.set_bit(root) {
                continue;
            }

            // roots have no parent to skip
            self.call_stack.push(StackFrame::new(root, INVALID_NODE));
            if let Some(edge) = self.search() {
                return Some(edge);
            }
        }

        None
    }

    fn search(&mut self) -> Option<Edge> {
        while let Some(frame) = self.call_stack.last_mut() {
            let u = frame.node;
            let Some(&v) = self
                .graph
                .as_neighbors_slice(u)
                .get(frame.next_neighbor)
            else {
                self.call_stack.pop();
                continue;
            };
            frame.next_neighbor += 1;

            if v == frame.parent && !frame.skipped_parent {
                frame.skipped_parent = true;
                continue;
            }

            if self.visited.set_bit(v) {
                self.call_stack.clear();
                return Some(Edge(u, v));
            }

            self.call_stack.push(StackFrame::new(v, u));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn path_has_no_cycle() {
        let graph = UndirectedGraph::from_edges([1, 2, 3], [(1, 2), (2, 3)]).unwrap();
        assert!(!graph.has_cycle());
        assert_eq!(graph.find_cycle_edge_keys(), None);
    }

    #[test]
    fn triangle_has_cycle() {
        let graph = UndirectedGraph::from_edges([1, 2, 3], [(1, 2), (2, 3), (3, 1)]).unwrap();
        assert!(graph.has_cycle());
        assert_eq!(graph.find_cycle_edge_keys(), Some((3, 1)));
    }

    #[test]
    fn parallel_edge_is_a_cycle() {
        let mut graph = UndirectedGraph::from_edges(['a', 'b', 'c'], [('a', 'b'), ('b', 'c')]).unwrap();
        assert!(!graph.has_cycle());

        graph.add_edge('c', 'b').unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut graph = UndirectedGraph::from_edges([1, 2], [(1, 2)]).unwrap();
        graph.add_edge(2, 2).unwrap();
        assert!(graph.has_cycle());
        assert_eq!(graph.find_cycle_edge_keys(), Some((2, 2)));

        let mut single = UndirectedGraph::new();
        single.add_vertex(0);
        assert!(!single.has_cycle());
        single.add_edge(0, 0).unwrap();
        assert!(single.has_cycle());
    }

    #[test]
    fn cycle_in_later_component() {
        let graph = UndirectedGraph::from_edges(
            0..7,
            [(0, 1), (1, 2), (3, 4), (4, 5), (5, 6), (6, 4)],
        )
        .unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn forests_and_empty_graphs() {
        assert!(!UndirectedGraph::<u32>::new().has_cycle());

        // star plus a path in a second component
        let graph = UndirectedGraph::from_edges(
            0..8,
            [(0, 1), (0, 2), (0, 3), (4, 5), (5, 6), (6, 7)],
        )
        .unwrap();
        assert!(!graph.has_cycle());
    }

    #[test]
    fn long_path_does_not_overflow() {
        let n = 200_000;
        let mut graph = UndirectedGraph::with_capacity(n as usize);
        graph.add_vertices(0..n);
        for u in 1..n {
            graph.add_edge(u - 1, u).unwrap();
        }
        assert!(!graph.has_cycle());

        graph.add_edge(n - 1, 0).unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn cycle_iff_more_edges_than_forest() {
        // A multigraph is a forest iff m == n - c
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for n in [1, 5, 10, 30] {
            for m in [0, 1, n / 2, n - 1, n, 2 * n] {
                for _ in 0..10 {
                    let graph = random_undirected_graph(rng, n, m);
                    let forest_edges = graph.vertex_count() - graph.count_connected_components();

                    assert_eq!(graph.has_cycle(), graph.edge_count() > forest_edges);
                }
            }
        }
    }
}
