/*!
# Reachability and Shortest Paths

Both queries run a BFS from the source that stops as soon as the destination is dequeued.
Shortest paths are reconstructed from the predecessors recorded by [`BfsWithPredecessor`],
so they minimize the number of edges.
*/

use tracing::trace;

use super::*;

/// Reachability and unweighted shortest paths, built on [`Traversal`].
///
/// Queries follow arcs in directed graphs; a directed graph is never symmetrized.
/// Both keys are resolved before any search starts, so an unknown key always yields
/// [`GraphError::UnknownVertex`].
pub trait PathFinder: Traversal {
    /// Returns *true* if `source == destination` or a traversal from `source`
    /// reaches `destination`.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = DirectedGraph::from_edges(['a', 'b', 'c'], [('a', 'b')]).unwrap();
    /// assert!(g.path_exists(&'a', &'b').unwrap());
    /// assert!(!g.path_exists(&'b', &'a').unwrap());
    /// assert!(g.path_exists(&'c', &'c').unwrap());
    /// ```
    fn path_exists(&self, source: &Self::Key, destination: &Self::Key) -> Result<bool, Self::Key> {
        let s = self.try_node_of(source)?;
        let d = self.try_node_of(destination)?;
        trace!(?source, ?destination, "reachability query");

        Ok(s == d || self.bfs_from(s).stop_at(d).any(|u| u == d))
    }

    /// Same as [`PathFinder::path_exists`]
    fn is_connected(&self, source: &Self::Key, destination: &Self::Key) -> Result<bool, Self::Key> {
        self.path_exists(source, destination)
    }

    /// Returns a path with the fewest edges from `source` to `destination`, including both
    /// endpoints, or `None` if `destination` is unreachable. Among equally short paths the one
    /// found first by [`Traversal::bfs`] is returned. `shortest_path(s, s) == Some(vec![s])`.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges([1, 2, 3, 4, 5], [(1, 2), (2, 3), (3, 4)]).unwrap();
    /// assert_eq!(g.shortest_path(&1, &4).unwrap(), Some(vec![1, 2, 3, 4]));
    /// assert_eq!(g.shortest_path(&1, &5).unwrap(), None);
    /// ```
    fn shortest_path(
        &self,
        source: &Self::Key,
        destination: &Self::Key,
    ) -> Result<Option<Vec<Self::Key>>, Self::Key> {
        let s = self.try_node_of(source)?;
        let d = self.try_node_of(destination)?;
        trace!(?source, ?destination, "shortest path query");

        if s == d {
            return Ok(Some(vec![source.clone()]));
        }

        let mut parent: Vec<Option<OptionalNode>> = vec![None; self.len()];
        for item in self.bfs_with_predecessor_from(s).stop_at(d) {
            let (pred, u) = item.predecessor_with_item();
            if let Some(p) = pred {
                parent[u as usize] = OptionalNode::new(p);
            }

            if u == d {
                let mut path = vec![d];
                let mut node = d;
                while let Some(p) = parent[node as usize] {
                    node = p.get();
                    path.push(node);
                }

                path.reverse();
                return Ok(Some(self.keys_of(path)));
            }
        }

        Ok(None)
    }

    /// Returns the number of edges on a shortest path, or `None` if `destination` is unreachable
    fn distance(
        &self,
        source: &Self::Key,
        destination: &Self::Key,
    ) -> Result<Option<usize>, Self::Key> {
        Ok(self
            .shortest_path(source, destination)?
            .map(|path| path.len() - 1))
    }
}

impl<G> PathFinder for G where G: Traversal {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn direct_edge_beats_detour() {
        let graph =
            UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (2, 3), (3, 4), (1, 4)]).unwrap();

        assert_eq!(graph.shortest_path(&1, &4).unwrap(), Some(vec![1, 4]));
        assert_eq!(graph.distance(&1, &4).unwrap(), Some(1));
        assert_eq!(graph.shortest_path(&2, &4).unwrap(), Some(vec![2, 1, 4]));
    }

    #[test]
    fn connected_along_a_path() {
        let graph = UndirectedGraph::from_edges([1, 2, 3], [(1, 2), (2, 3)]).unwrap();
        assert!(graph.is_connected(&1, &3).unwrap());
        assert!(graph.is_connected(&3, &1).unwrap());
        assert_eq!(graph.distance(&3, &1).unwrap(), Some(2));
    }

    #[test]
    fn not_connected_across_components() {
        let graph = UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (3, 4)]).unwrap();
        assert!(!graph.is_connected(&1, &3).unwrap());
        assert_eq!(graph.shortest_path(&1, &3).unwrap(), None);
        assert_eq!(graph.distance(&4, &2).unwrap(), None);
    }

    #[test]
    fn trivial_path() {
        let mut graph = UndirectedGraph::new();
        graph.add_vertex("solo");

        assert!(graph.path_exists(&"solo", &"solo").unwrap());
        assert_eq!(graph.shortest_path(&"solo", &"solo").unwrap(), Some(vec!["solo"]));
        assert_eq!(graph.distance(&"solo", &"solo").unwrap(), Some(0));
    }

    #[test]
    fn directed_graphs_are_not_symmetrized() {
        let graph = DirectedGraph::from_edges(['a', 'b', 'c'], [('a', 'b'), ('b', 'c')]).unwrap();

        assert_eq!(graph.shortest_path(&'a', &'c').unwrap(), Some(vec!['a', 'b', 'c']));
        assert_eq!(graph.shortest_path(&'c', &'a').unwrap(), None);
        assert!(!graph.path_exists(&'b', &'a').unwrap());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let graph = UndirectedGraph::from_edges([1, 2], [(1, 2)]).unwrap();

        assert_eq!(graph.path_exists(&9, &1), Err(GraphError::UnknownVertex(9)));
        assert_eq!(graph.path_exists(&1, &9), Err(GraphError::UnknownVertex(9)));
        assert_eq!(graph.is_connected(&7, &7), Err(GraphError::UnknownVertex(7)));
        assert_eq!(graph.shortest_path(&1, &8), Err(GraphError::UnknownVertex(8)));
        assert_eq!(graph.distance(&0, &1), Err(GraphError::UnknownVertex(0)));
    }

    fn check_paths<G>(graph: &G)
    where
        G: PathFinder + AdjacencyTest + VertexKeys<Key = u32>,
    {
        for s in graph.vertices() {
            let depths = graph.bfs_with_predecessor_from(s).depths();
            let reachable = reachable_from(graph, s);

            for d in graph.vertices() {
                let path = graph.shortest_path(&s, &d).unwrap();
                assert_eq!(graph.path_exists(&s, &d).unwrap(), reachable.get_bit(d));

                match path {
                    None => assert_eq!(depths[d as usize], INVALID_NODE),
                    Some(path) => {
                        assert_eq!(path.len() - 1, depths[d as usize] as usize);
                        assert_eq!((path[0], *path.last().unwrap()), (s, d));
                        assert!(path.iter().tuple_windows().all(|(&u, &v)| graph.has_edge(u, v)));
                    }
                }
            }
        }
    }

    #[test]
    fn shortest_paths_match_bfs_depths() {
        let rng = &mut Pcg64Mcg::seed_from_u64(9);

        for n in [1, 5, 15, 30] {
            for m in [0, n / 2, n, 3 * n] {
                check_paths(&random_undirected_graph(rng, n, m));
                check_paths(&random_directed_graph(rng, n, m));
            }
        }
    }

    fn arb_edges() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
        (1u32..20).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..50)))
    }

    proptest! {
        #[test]
        fn traversals_visit_exactly_the_reachable_set((n, edges) in arb_edges(), start in any::<prop::sample::Index>()) {
            let graph = UndirectedGraph::from_edges(0..n, edges).unwrap();
            let s = start.index(n as usize) as u32;
            let reachable = reachable_from(&graph, s);

            let bfs = graph.bfs(&s).unwrap().into_iter().sorted().collect_vec();
            let dfs = graph.dfs(&s).unwrap().into_iter().sorted().collect_vec();
            let expected = graph.vertices().filter(|&u| reachable.get_bit(u)).collect_vec();

            prop_assert_eq!(&bfs, &expected);
            prop_assert_eq!(&dfs, &expected);
        }

        #[test]
        fn no_path_is_shorter_than_the_shortest((n, edges) in arb_edges()) {
            let graph = DirectedGraph::from_edges(0..n, edges).unwrap();
            let d = n - 1;

            if let Some(path) = graph.shortest_path(&0, &d).unwrap() {
                // every node on a shortest path is exactly one step further from the source
                for (i, u) in path.iter().enumerate() {
                    prop_assert_eq!(graph.distance(&0, u).unwrap(), Some(i));
                }
            } else {
                prop_assert!(!graph.path_exists(&0, &d).unwrap());
            }
        }
    }
}
