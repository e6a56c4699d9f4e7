use std::{collections::VecDeque, iter::FusedIterator};

use itertools::Itertools;
use tracing::debug;

use super::*;

/// Iterator implementing topological ordering over a directed graph (Kahn's algorithm):
/// - Starts with all nodes of in-degree 0 in insertion order.
/// - Repeatedly dequeues a node, decreases the in-degrees of its successors (once per arc)
///   and enqueues successors whose in-degree drops to 0.
/// - Stops once the queue runs dry. Nodes on or behind a directed cycle are never emitted.
pub struct TopoSearch<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    queue: VecDeque<Node>,
    emitted: NumNodes,
}

impl<'a, G> TopoSearch<'a, G>
where
    G: DirectedAdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        let in_degs = graph.in_degrees().collect_vec();
        let queue = graph
            .vertices()
            .filter(|&u| in_degs[u as usize] == 0)
            .collect();

        Self {
            graph,
            in_degs,
            queue,
            emitted: 0,
        }
    }

    /// Returns *true* if every node has been emitted.
    /// Only meaningful after the iterator was exhausted.
    pub fn is_complete(&self) -> bool {
        self.emitted == self.graph.number_of_nodes()
    }
}

impl<G> Iterator for TopoSearch<'_, G>
where
    G: DirectedAdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.neighbors_of(u) {
            self.in_degs[v as usize] -= 1;
            if self.in_degs[v as usize] == 0 {
                self.queue.push_back(v);
            }
        }

        self.emitted += 1;
        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.graph.number_of_nodes() - self.emitted) as usize;
        (self.queue.len(), Some(remaining))
    }
}

impl<G> FusedIterator for TopoSearch<'_, G> where G: DirectedAdjacencyList {}

/// Topological ordering of directed graphs
pub trait TopologicalSort: DirectedAdjacencyList + VertexKeys {
    /// Returns a lazy Kahn search over nodes.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = DirectedGraph::from_edges([0, 1, 2], [(0, 1), (1, 2)]).unwrap();
    /// let order: Vec<_> = g.topo_search().collect();
    /// assert_eq!(order, vec![0, 1, 2]);
    /// ```
    fn topo_search(&self) -> TopoSearch<'_, Self> {
        TopoSearch::new(self)
    }

    /// Returns the keys in topological order, or `None` if the graph contains a directed cycle.
    /// A partial order is never returned.
    fn try_topological_sort(&self) -> Option<Vec<Self::Key>> {
        let mut search = self.topo_search();
        let order = search.by_ref().collect_vec();

        if !search.is_complete() {
            debug!(
                sorted = order.len(),
                nodes = self.number_of_nodes(),
                "topological sort aborted by a directed cycle"
            );
            return None;
        }

        Some(self.keys_of(order))
    }

    /// Returns the keys in topological order. If the graph contains a directed cycle the result
    /// is empty, so it has fewer entries than [`GraphStore::vertex_count`] whenever `n > 0`.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let mut g = DirectedGraph::from_edges(["x", "y", "z"], [("x", "y"), ("x", "z"), ("y", "z")]).unwrap();
    /// assert_eq!(g.topological_sort(), vec!["x", "y", "z"]);
    ///
    /// g.add_edge("z", "x").unwrap();
    /// assert!(g.topological_sort().is_empty());
    /// ```
    fn topological_sort(&self) -> Vec<Self::Key> {
        self.try_topological_sort().unwrap_or_default()
    }

    /// Returns *true* if the graph contains no directed cycle (self-loops are cycles)
    fn is_acyclic(&self) -> bool {
        let mut search = self.topo_search();
        search.by_ref().for_each(drop);
        search.is_complete()
    }

    /// Returns *true* if the graph contains a directed cycle
    fn has_directed_cycle(&self) -> bool {
        !self.is_acyclic()
    }
}

impl<G> TopologicalSort for G where G: DirectedAdjacencyList + VertexKeys {}
