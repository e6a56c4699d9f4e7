/*!
# Connected Components

Components are flooded from the first unvisited node in insertion order by a restartable
[`Bfs`] or [`Dfs`] over the undirected closure of the graph. For directed graphs this yields
the weakly connected components.
*/

use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::debug;

use super::*;

/// Counting and partitioning a graph into its connected components.
///
/// Components are always taken over the undirected closure: in a directed graph two vertices
/// share a component iff they are connected when arc directions are ignored (weak connectivity).
pub trait Connectivity: UndirectedClosure + VertexKeys {
    /// Returns the number of connected components. The empty graph has none.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (3, 4)]).unwrap();
    /// assert_eq!(g.count_connected_components(), 2);
    /// ```
    fn count_connected_components(&self) -> usize {
        ComponentSearch::new(self).count()
    }

    /// Returns the keys of every component. Components are ordered by their first vertex in
    /// insertion order, vertices within a component in BFS order from that first vertex.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = DirectedGraph::from_edges(['a', 'b', 'c', 'd'], [('b', 'a'), ('c', 'd')]).unwrap();
    /// assert_eq!(g.connected_components(), vec![vec!['a', 'b'], vec!['c', 'd']]);
    /// ```
    fn connected_components(&self) -> Vec<Vec<Self::Key>> {
        ComponentSearch::new(self)
            .iter()
            .map(|cc| self.keys_of(cc))
            .collect_vec()
    }
}

impl<G> Connectivity for G where G: UndirectedClosure + VertexKeys {}

/// Frontier discipline used to flood a component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalStrategy {
    #[default]
    Bfs,
    Dfs,
}

/// A graph seen through [`UndirectedClosure::closure_neighbors_of`]
#[derive(Clone, Copy)]
pub struct UndirectedView<'a, G>(&'a G);

impl<'a, G> UndirectedView<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self(graph)
    }
}

impl<G> GraphNodeOrder for UndirectedView<'_, G>
where
    G: GraphNodeOrder,
{
    fn number_of_nodes(&self) -> NumNodes {
        self.0.number_of_nodes()
    }
}

impl<G> AdjacencyList for UndirectedView<'_, G>
where
    G: UndirectedClosure,
{
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.0.closure_neighbors_of(u)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.0.closure_neighbors_of(u).count() as NumNodes
    }
}

/// Configurable component search.
///
/// ```
/// use adjgraph::{prelude::*, algo::*};
///
/// let g = UndirectedGraph::from_edges(0..5, [(0, 1), (2, 3)]).unwrap();
///
/// let search = ComponentSearch::new(&g).strategy(TraversalStrategy::Dfs);
/// assert_eq!(search.count(), 3);
/// assert_eq!(search.iter().map(|cc| cc.len()).collect::<Vec<_>>(), vec![2, 2, 1]);
/// ```
pub struct ComponentSearch<'a, G> {
    view: UndirectedView<'a, G>,
    strategy: TraversalStrategy,
}

impl<'a, G> ComponentSearch<'a, G>
where
    G: UndirectedClosure,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            view: UndirectedView::new(graph),
            strategy: TraversalStrategy::default(),
        }
    }

    pub fn set_strategy(&mut self, strategy: TraversalStrategy) {
        self.strategy = strategy;
    }

    pub fn strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.set_strategy(strategy);
        self
    }

    /// Returns an iterator emitting the nodes of one component at a time
    pub fn iter(&self) -> ConnectedComponents<'_, UndirectedView<'a, G>> {
        ConnectedComponents::new(&self.view, self.strategy)
    }

    /// Counts components: every still-unvisited node in insertion order opens a new component
    /// that is flooded completely before the scan continues.
    pub fn count(&self) -> usize {
        let components = self.iter().count();
        debug!(
            components,
            nodes = self.view.number_of_nodes(),
            strategy = ?self.strategy,
            "connected components counted"
        );
        components
    }
}

enum Frontier<'a, G>
where
    G: AdjacencyList,
{
    Bfs(Bfs<'a, G>),
    Dfs(Dfs<'a, G>),
}

/// Iterator over the components of a graph, each as a `Vec<Node>`.
/// Restarts at the first unvisited node in insertion order whenever a component is exhausted.
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    frontier: Frontier<'a, G>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G, strategy: TraversalStrategy) -> Self {
        let frontier = match strategy {
            TraversalStrategy::Bfs => Frontier::Bfs(Bfs::new_idle(graph)),
            TraversalStrategy::Dfs => Frontier::Dfs(Dfs::new_idle(graph)),
        };
        Self { frontier }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.frontier {
            Frontier::Bfs(bfs) => bfs
                .try_restart_at_unvisited()
                .then(|| bfs.by_ref().collect_vec()),
            Frontier::Dfs(dfs) => dfs
                .try_restart_at_unvisited()
                .then(|| dfs.by_ref().collect_vec()),
        }
    }
}

impl<G> FusedIterator for ConnectedComponents<'_, G> where G: AdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn single_component() {
        let graph = UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (1, 3), (2, 4)]).unwrap();
        assert_eq!(graph.count_connected_components(), 1);
        assert_eq!(graph.connected_components(), vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn two_components() {
        let graph = UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (3, 4)]).unwrap();
        assert_eq!(graph.count_connected_components(), 2);
        assert_eq!(graph.connected_components(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn isolated_vertices_and_empty_graph() {
        assert_eq!(UndirectedGraph::<u32>::new().count_connected_components(), 0);
        assert_eq!(DirectedGraph::<u32>::new().count_connected_components(), 0);

        let mut graph = UndirectedGraph::new();
        graph.add_vertices(["x", "y", "z"]);
        assert_eq!(graph.count_connected_components(), 3);

        graph.add_edge("z", "z").unwrap();
        assert_eq!(graph.count_connected_components(), 3);
    }

    #[test]
    fn directed_graphs_use_weak_connectivity() {
        // 0 -> 1 <- 2    3 -> 4
        let graph = DirectedGraph::from_edges(0..5, [(0, 1), (2, 1), (3, 4)]).unwrap();
        assert_eq!(graph.count_connected_components(), 2);
        assert_eq!(
            graph.connected_components(),
            vec![vec![0, 1, 2], vec![3, 4]]
        );
    }

    #[test]
    fn components_follow_insertion_order() {
        let graph = UndirectedGraph::from_edges([5, 1, 9, 3], [(3, 1)]).unwrap();
        assert_eq!(
            graph.connected_components(),
            vec![vec![5], vec![1, 3], vec![9]]
        );
    }

    #[test]
    fn strategies_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [1, 10, 40] {
            for m in [0, n / 3, n, 2 * n] {
                let graph = random_undirected_graph(rng, n, m);

                let bfs = ComponentSearch::new(&graph);
                let dfs = ComponentSearch::new(&graph).strategy(TraversalStrategy::Dfs);

                assert_eq!(bfs.count(), dfs.count());
                for (a, b) in bfs.iter().zip(dfs.iter()) {
                    assert_eq!(a[0], b[0]);
                    assert_eq!(a.iter().sorted().collect_vec(), b.iter().sorted().collect_vec());
                }
            }
        }
    }

    #[test]
    fn components_partition_the_vertices() {
        let rng = &mut Pcg64Mcg::seed_from_u64(12);

        for n in [1, 10, 40] {
            for m in [0, n / 3, n, 2 * n] {
                let graph = random_directed_graph(rng, n, m);
                let components = ComponentSearch::new(&graph).iter().collect_vec();

                assert_eq!(components.len(), graph.count_connected_components());
                assert_eq!(
                    components.iter().map(|cc| cc.len()).sum::<usize>(),
                    graph.vertex_count()
                );

                for cc in &components {
                    let reference = weakly_reachable_from(&graph, cc[0]);
                    assert_eq!(cc.len(), reference.cardinality() as usize);
                    assert!(cc.iter().all(|&u| reference.get_bit(u)));
                }
            }
        }
    }
}
