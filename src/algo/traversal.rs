/*!
Graph traversal algorithms.

This module provides:
- Lazy traversal iterators over nodes: [`Bfs`] (with and without predecessor tracking) and the
  explicit-stack [`Dfs`].
- A recursive depth-first traversal for graphs of bounded size.
- [`TraversalTree`] to turn a predecessor-tracking traversal into parent or depth arrays.
- A high-level [`Traversal`] trait that exposes traversals on keys directly as methods on graphs.

Every traversal owns a fresh visited-bitset; nothing is shared between two calls.
Traversals follow [`AdjacencyList::neighbors_of`], i.e. out-neighbors in directed graphs.
*/

use super::*;
use std::collections::VecDeque;
use tracing::trace;

/// Common interface for querying visited-states during a traversal.
pub trait TraversalState {
    /// Returns a reference to the set of visited nodes.
    fn visited(&self) -> &NodeBitSet;

    /// Checks if a given node `u` has already been visited.
    fn did_visit_node(&self, u: Node) -> bool {
        self.visited().get_bit(u)
    }
}

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
///
/// Two implementations are provided:
/// - [`Node`]: stores only the node (no predecessor information).
/// - [`PredecessorOfNode`]: stores `(predecessor, node)` pairs.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without a predecessor.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)` where the predecessor
    /// may be `None` if not tracked.
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// Internally, the absence of a predecessor is encoded by
/// setting both tuple entries to the same node value.
/// A node reached through its own self-loop is never yielded this way,
/// as it is visited before the loop is inspected.
pub type PredecessorOfNode = (Node, Node);
impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Breadth-first traversal iterator.
///
/// Nodes are yielded in non-decreasing distance from the start; ties are broken by the
/// adjacency order of the node they were discovered from. A node is marked visited when it is
/// enqueued, so it enters the queue at most once.
pub struct BreadthFirstSearch<'a, G, I>
where
    G: AdjacencyList,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    queue: VecDeque<I>,
    stop_at: Option<Node>,
    restart_lb: Node,
}

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type Bfs<'a, G> = BreadthFirstSearch<'a, G, Node>;

/// A BFS traversal iterator that records predecessor information,
/// producing a shortest-path tree of the search.
pub type BfsWithPredecessor<'a, G> = BreadthFirstSearch<'a, G, PredecessorOfNode>;

impl<G, I> TraversalState for BreadthFirstSearch<'_, G, I>
where
    G: AdjacencyList,
    I: SequencedItem,
{
    fn visited(&self) -> &NodeBitSet {
        &self.visited
    }
}

impl<G, I> Iterator for BreadthFirstSearch<'_, G, I>
where
    G: AdjacencyList,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.queue.pop_front()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            self.queue.clear();
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    self.queue.push_back(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unvisited = self.graph.len() - self.visited.cardinality() as usize;
        (self.queue.len(), Some(self.queue.len() + unvisited))
    }
}

impl<'a, G, I> BreadthFirstSearch<'a, G, I>
where
    G: AdjacencyList,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        assert!(start < graph.number_of_nodes());
        let mut search = Self::new_idle(graph);
        search.visited.set_bit(start);
        search.queue.push_back(I::new_without_predecessor(start));
        search
    }

    /// Creates a search that yields nothing until [`BreadthFirstSearch::try_restart_at_unvisited`] is called.
    pub fn new_idle(graph: &'a G) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            queue: VecDeque::new(),
            stop_at: None,
            restart_lb: 0,
        }
    }

    /// Tries to restart the search at the first unvisited node in insertion order and returns
    /// true iff successful. Requires that search came to a hold earlier, i.e. self.next() returned None.
    ///
    /// Restart candidates are scanned once in total over all calls.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        assert!(self.queue.is_empty());
        while self.restart_lb < self.graph.number_of_nodes() {
            let u = self.restart_lb;
            self.restart_lb += 1;

            if !self.visited.set_bit(u) {
                self.queue.push_back(I::new_without_predecessor(u));
                return true;
            }
        }
        false
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }
}

/// Depth-first traversal iterator using an explicit stack.
///
/// Pops a node, skips it if already visited, otherwise marks and yields it and pushes all its
/// unvisited neighbors in adjacency order. Consequently siblings are explored in *reverse*
/// adjacency order compared to [`Traversal::dfs_recursive_from`]; both visit the same nodes.
pub struct DepthFirstSearch<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    visited: NodeBitSet,
    stack: Vec<Node>,
    restart_lb: Node,
}

/// A DFS traversal iterator over the graph, visiting nodes in
/// depth-first pre-order from a given starting node.
pub type Dfs<'a, G> = DepthFirstSearch<'a, G>;

impl<G> TraversalState for DepthFirstSearch<'_, G>
where
    G: AdjacencyList,
{
    fn visited(&self) -> &NodeBitSet {
        &self.visited
    }
}

impl<G> Iterator for DepthFirstSearch<'_, G>
where
    G: AdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.stack.pop() {
            if self.visited.set_bit(u) {
                continue;
            }

            for v in self.graph.neighbors_of(u) {
                if !self.visited.get_bit(v) {
                    self.stack.push(v);
                }
            }

            return Some(u);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unvisited = self.graph.len() - self.visited.cardinality() as usize;
        (0, Some(unvisited))
    }
}

impl<'a, G> DepthFirstSearch<'a, G>
where
    G: AdjacencyList,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        assert!(start < graph.number_of_nodes());
        let mut search = Self::new_idle(graph);
        search.stack.push(start);
        search
    }

    /// Creates a search that yields nothing until [`DepthFirstSearch::try_restart_at_unvisited`] is called.
    pub fn new_idle(graph: &'a G) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            stack: Vec::new(),
            restart_lb: 0,
        }
    }

    /// Tries to restart the search at the first unvisited node in insertion order and returns
    /// true iff successful. Requires that search came to a hold earlier, i.e. self.next() returned None.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        assert!(self.stack.is_empty());
        while self.restart_lb < self.graph.number_of_nodes() {
            let u = self.restart_lb;
            self.restart_lb += 1;

            if !self.visited.get_bit(u) {
                self.stack.push(u);
                return true;
            }
        }
        false
    }
}

fn recursive_dfs_into<G: AdjacencyList>(
    graph: &G,
    u: Node,
    visited: &mut NodeBitSet,
    order: &mut Vec<Node>,
) {
    visited.set_bit(u);
    order.push(u);

    for v in graph.neighbors_of(u) {
        if !visited.get_bit(v) {
            recursive_dfs_into(graph, v, visited, order);
        }
    }
}

/// Extension trait for traversal iterators that return `PredecessorOfNode`,
/// enabling extraction of the implied spanning tree structure (parents, depths).
pub trait TraversalTree<'a, G>: Iterator<Item = PredecessorOfNode> + Sized
where
    G: 'a + AdjacencyList,
{
    /// Returns the traversed graph
    fn graph_ref(&self) -> &G;

    /// Consumes the iterator and records the parent of each node in the implied
    /// traversal tree into the provided slice `tree`.
    ///
    /// - For each visited node `v`, `tree[v]` is set to its predecessor.
    /// - Unvisited entries remain unchanged.
    fn parent_array_into(&mut self, tree: &mut [Node]) {
        for pred_with_item in self.by_ref() {
            if let Some(p) = pred_with_item.predecessor() {
                tree[pred_with_item.item() as usize] = p;
            }
        }
    }

    /// Constructs a fresh parent array where each node is initially its own parent.
    /// Then fills in the traversal tree structure using `parent_array_into`.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges([0, 1, 2], [(0, 1), (1, 2)]).unwrap();
    ///
    /// let parents = g.bfs_with_predecessor_from(0).parent_array();
    /// assert_eq!(parents, vec![0, 0, 1]);
    /// ```
    fn parent_array(&mut self) -> Vec<Node> {
        let mut tree: Vec<_> = self.graph_ref().vertices().collect();
        self.parent_array_into(&mut tree);
        tree
    }

    /// Consumes the iterator and computes the depth of each node in the traversal tree
    /// (root depth = 0). Unreached nodes get [`INVALID_NODE`].
    ///
    /// For a BFS tree these are the distances from the start in edges.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges([0, 1, 2, 3], [(0, 1), (1, 2)]).unwrap();
    ///
    /// let depths = g.bfs_with_predecessor_from(0).depths();
    /// assert_eq!(depths, vec![0, 1, 2, INVALID_NODE]);
    /// ```
    fn depths(&mut self) -> Vec<Node> {
        let mut depths = vec![INVALID_NODE; self.graph_ref().len()];
        for pred_with_item in self.by_ref() {
            depths[pred_with_item.item() as usize] = pred_with_item
                .predecessor()
                .map_or(0, |p| depths[p as usize] + 1);
        }
        depths
    }
}

impl<'a, G> TraversalTree<'a, G> for BfsWithPredecessor<'a, G>
where
    G: AdjacencyList,
{
    fn graph_ref(&self) -> &G {
        self.graph
    }
}

/// Selects how [`Traversal::dfs_with`] walks the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DfsVariant {
    /// [`DepthFirstSearch`]; bounded only by heap memory
    #[default]
    ExplicitStack,
    /// Recursion depth grows with the longest explored path.
    /// Only use on graphs whose size is known to be small.
    Recursive,
}

/// Provides convenient traversal methods (BFS, DFS) on nodes and on keys
pub trait Traversal: AdjacencyList + VertexKeys {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    /// ** Panics if `start >= n` **
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges(["a", "b"], [("a", "b")]).unwrap();
    ///
    /// let order: Vec<_> = g.bfs_from(0).collect();
    /// assert_eq!(order, vec![0, 1]);
    /// ```
    fn bfs_from(&self, start: Node) -> Bfs<'_, Self> {
        Bfs::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    /// ** Panics if `start >= n` **
    fn bfs_with_predecessor_from(&self, start: Node) -> BfsWithPredecessor<'_, Self> {
        BfsWithPredecessor::new(self, start)
    }

    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **explicit-stack depth-first pre-order**.
    /// ** Panics if `start >= n` **
    fn dfs_from(&self, start: Node) -> Dfs<'_, Self> {
        Dfs::new(self, start)
    }

    /// Returns the nodes reachable from `start` in recursive depth-first pre-order:
    /// visit a node, then recurse into each unvisited neighbor in adjacency order.
    /// ** Panics if `start >= n` **
    fn dfs_recursive_from(&self, start: Node) -> Vec<Node> {
        assert!(start < self.number_of_nodes());
        let mut visited = self.vertex_bitset_unset();
        let mut order = Vec::new();
        recursive_dfs_into(self, start, &mut visited, &mut order);
        order
    }

    /// Returns the keys reachable from `start` in BFS order, starting with `start`.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (1, 3), (2, 4)]).unwrap();
    /// assert_eq!(g.bfs(&1).unwrap(), vec![1, 2, 3, 4]);
    /// assert!(g.bfs(&5).is_err());
    /// ```
    fn bfs(&self, start: &Self::Key) -> Result<Vec<Self::Key>, Self::Key> {
        let s = self.try_node_of(start)?;
        trace!(start = ?start, "breadth-first traversal");
        Ok(self.keys_of(self.bfs_from(s)))
    }

    /// Returns the keys reachable from `start` in explicit-stack DFS pre-order, starting with `start`.
    fn dfs(&self, start: &Self::Key) -> Result<Vec<Self::Key>, Self::Key> {
        self.dfs_with(start, DfsVariant::default())
    }

    /// Returns the keys reachable from `start` in recursive DFS pre-order, starting with `start`.
    fn dfs_recursive(&self, start: &Self::Key) -> Result<Vec<Self::Key>, Self::Key> {
        self.dfs_with(start, DfsVariant::Recursive)
    }

    /// Returns the keys reachable from `start` in DFS pre-order using the selected variant.
    ///
    /// # Examples
    /// ```
    /// use adjgraph::{prelude::*, algo::*};
    ///
    /// let g = UndirectedGraph::from_edges([1, 2, 3, 4], [(1, 2), (1, 3), (2, 4)]).unwrap();
    /// assert_eq!(g.dfs_with(&1, DfsVariant::Recursive).unwrap(), vec![1, 2, 4, 3]);
    /// assert_eq!(g.dfs_with(&1, DfsVariant::ExplicitStack).unwrap(), vec![1, 3, 2, 4]);
    /// ```
    fn dfs_with(
        &self,
        start: &Self::Key,
        variant: DfsVariant,
    ) -> Result<Vec<Self::Key>, Self::Key> {
        let s = self.try_node_of(start)?;
        trace!(start = ?start, ?variant, "depth-first traversal");
        Ok(match variant {
            DfsVariant::ExplicitStack => self.keys_of(self.dfs_from(s)),
            DfsVariant::Recursive => self.keys_of(self.dfs_recursive_from(s)),
        })
    }
}

impl<G> Traversal for G where G: AdjacencyList + VertexKeys {}
