use std::{fmt::Debug, hash::Hash, ops::Range};

use itertools::Itertools;
use tracing::debug;

use crate::*;

/// Marker for the orientation of a graph's edges
pub trait GraphDirection {
    /// *true* if an edge `(u, v)` is only traversable from `u` to `v`
    const DIRECTED: bool;
}

/// Edges are arcs `u -> v`
#[derive(Debug, Clone, Copy, Default)]
pub struct Directed;

/// Edges `{u, v}` can be traversed in both directions
#[derive(Debug, Clone, Copy, Default)]
pub struct Undirected;

impl GraphDirection for Directed {
    const DIRECTED: bool = true;
}

impl GraphDirection for Undirected {
    const DIRECTED: bool = false;
}

/// Ties a graph representation to its orientation at the type level so that
/// orientation-specific algorithms can only be called on graphs where they make sense
pub trait GraphType {
    type Dir: GraphDirection;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        <Self::Dir as GraphDirection>::DIRECTED
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V in insertion order.
    /// As nodes are dense, this is always `0..n`.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// Undirected edges are counted once, parallel edges are counted individually.
    fn number_of_edges(&self) -> NumEdges;
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex in edge-insertion order.
    /// Parallel edges yield the neighbor once per edge.
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed graphs, this is the out-neighborhood
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }
}

/// Trait for accessing the neighborhood of nodes as slices
pub trait NeighborsSlice {
    /// Returns a slice-reference of the neighborhood of a given vertex
    /// ** Panics if `u >= n` **
    fn as_neighbors_slice(&self, u: Node) -> &[Node];
}

pub trait DirectedAdjacencyList: AdjacencyList + GraphType<Dir = Directed> {
    /// Returns an iterator over nodes `u` with arcs `(u, v)`
    /// ** Panics if `v >= n` **
    fn in_neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of incoming arcs of a given vertex
    /// ** Panics if `v >= n` **
    fn in_degree_of(&self, v: Node) -> NumNodes;

    /// Returns an iterator over the in-degrees of all nodes in insertion order
    fn in_degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.in_degree_of(u))
    }
}

/// Neighborhoods of the undirected closure of a graph: every edge can be walked both ways.
/// For undirected graphs this coincides with [`AdjacencyList::neighbors_of`].
pub trait UndirectedClosure: AdjacencyList {
    /// ** Panics if `u >= n` **
    fn closure_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns the number of parallel edges (u,v)
    /// ** Panics if `u >= n || v >= n` **
    fn edge_multiplicity(&self, u: Node, v: Node) -> NumEdges;

    /// Returns *true* if a self-loop (u,u) exists.
    /// ** Panics if `u >= n` **
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Translation between caller keys and dense node indices
pub trait VertexKeys {
    type Key: Clone + Eq + Hash + Debug;

    /// Returns the node assigned to `key`, if `key` was added
    fn node_of(&self, key: &Self::Key) -> Option<Node>;

    /// Returns the key of a node
    /// ** Panics if `u >= n` **
    fn key_of(&self, u: Node) -> &Self::Key;

    /// Like [`VertexKeys::node_of`] but reports absent keys as [`GraphError::UnknownVertex`]
    fn try_node_of(&self, key: &Self::Key) -> Result<Node, Self::Key> {
        self.node_of(key).ok_or_else(|| {
            debug!(vertex = ?key, "unknown vertex rejected");
            GraphError::UnknownVertex(key.clone())
        })
    }

    /// Maps a sequence of nodes back to their keys
    fn keys_of<I>(&self, nodes: I) -> Vec<Self::Key>
    where
        I: IntoIterator<Item = Node>,
    {
        nodes
            .into_iter()
            .map(|u| self.key_of(u).clone())
            .collect_vec()
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph without any vertices
    fn new() -> Self;

    /// Creates an empty graph with room for `vertices` vertices
    fn with_capacity(vertices: usize) -> Self;
}

/// Provides functions to insert vertices
pub trait GraphVertexEditing: VertexKeys {
    /// Inserts `key` if absent and returns its node. Adding an existing key is a non-op.
    /// Fails with [`GraphError::InvalidArgument`] if the node index space is exhausted.
    fn try_add_vertex(&mut self, key: Self::Key) -> Result<Node, Self::Key>;

    /// Inserts `key` if absent and returns its node. Adding an existing key is a non-op.
    /// ** Panics if the graph already holds `Node::MAX - 1` vertices **
    fn add_vertex(&mut self, key: Self::Key) -> Node {
        match self.try_add_vertex(key) {
            Ok(u) => u,
            Err(err) => panic!("{err}"),
        }
    }

    /// Adds all keys in the collection
    fn add_vertices<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Self::Key>,
    {
        for key in keys {
            self.add_vertex(key);
        }
    }
}

/// Provides functions to insert edges
pub trait GraphEdgeEditing: VertexKeys + GraphEdgeOrder {
    /// Adds the edge *(u,v)* between two existing nodes. Parallel edges are recorded individually.
    /// ** Panics if `u >= n || v >= n` or if the graph already holds `NumEdges::MAX` edges **
    fn add_edge_between(&mut self, u: Node, v: Node);

    /// Adds the edge between two previously added keys.
    /// Fails with [`GraphError::UnknownVertex`] if either key is absent and with
    /// [`GraphError::InvalidArgument`] if the edge limit is reached; the graph is untouched then.
    fn add_edge(&mut self, u: Self::Key, v: Self::Key) -> Result<(), Self::Key> {
        let u = self.try_node_of(&u)?;
        let v = self.try_node_of(&v)?;
        self.reserve_edges(1)?;
        self.add_edge_between(u, v);
        Ok(())
    }

    /// Adds all edges in the collection. Every endpoint is resolved before the first insertion,
    /// so on failure no edge of the batch has been added.
    fn add_edges<I>(&mut self, edges: I) -> Result<(), Self::Key>
    where
        I: IntoIterator<Item = (Self::Key, Self::Key)>,
    {
        let resolved: Vec<(Node, Node)> = edges
            .into_iter()
            .map(|(u, v)| -> Result<(Node, Node), Self::Key> {
                Ok((self.try_node_of(&u)?, self.try_node_of(&v)?))
            })
            .collect::<Result<_, Self::Key>>()?;
        self.reserve_edges(resolved.len())?;

        for (u, v) in resolved {
            self.add_edge_between(u, v);
        }
        Ok(())
    }

    /// Fails with [`GraphError::InvalidArgument`] if `additional` more edges would exceed `NumEdges::MAX`
    fn reserve_edges(&self, additional: usize) -> Result<(), Self::Key> {
        let total = self.number_of_edges() as usize + additional;
        if total > NumEdges::MAX as usize {
            debug!(edges = self.number_of_edges(), additional, "edge limit exceeded");
            return Err(GraphError::InvalidArgument(format!(
                "cannot add {additional} edges: graph already holds {} edges",
                self.number_of_edges()
            )));
        }
        Ok(())
    }
}

/// A super trait for creating a graph from scratch from a set of keys and a set of edges
pub trait GraphFromScratch: VertexKeys + Sized {
    /// Adds all `vertices` in order, then all `edges`
    fn from_edges<V, E>(vertices: V, edges: E) -> Result<Self, Self::Key>
    where
        V: IntoIterator<Item = Self::Key>,
        E: IntoIterator<Item = (Self::Key, Self::Key)>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphVertexEditing + GraphEdgeEditing,
{
    fn from_edges<V, E>(vertices: V, edges: E) -> Result<Self, Self::Key>
    where
        V: IntoIterator<Item = Self::Key>,
        E: IntoIterator<Item = (Self::Key, Self::Key)>,
    {
        let mut graph = Self::new();
        for key in vertices {
            graph.try_add_vertex(key)?;
        }
        graph.add_edges(edges)?;
        Ok(graph)
    }
}

/// The keyed vertex/edge store every analysis reads from.
///
/// All queries take keys; absent keys either answer *false* (membership tests)
/// or fail with [`GraphError::UnknownVertex`].
pub trait GraphStore:
    AdjacencyList
    + AdjacencyTest
    + GraphEdgeOrder
    + GraphType
    + GraphVertexEditing
    + GraphEdgeEditing
{
    /// Returns *true* if `key` was added
    fn has_vertex(&self, key: &Self::Key) -> bool {
        self.node_of(key).is_some()
    }

    /// Returns *true* if the edge exists. Unknown keys answer *false*.
    /// For undirected graphs `has_edge_between(u, v) == has_edge_between(v, u)`.
    fn has_edge_between(&self, u: &Self::Key, v: &Self::Key) -> bool {
        match (self.node_of(u), self.node_of(v)) {
            (Some(u), Some(v)) => self.has_edge(u, v),
            _ => false,
        }
    }

    /// Returns the neighbors of `key` in edge-insertion order
    fn adjacent_vertices(&self, key: &Self::Key) -> Result<Vec<Self::Key>, Self::Key> {
        let u = self.try_node_of(key)?;
        Ok(self.keys_of(self.neighbors_of(u)))
    }

    /// Returns the number of vertices
    fn vertex_count(&self) -> usize {
        self.len()
    }

    /// Returns the number of edges (undirected edges once, parallel edges individually)
    fn edge_count(&self) -> usize {
        self.number_of_edges() as usize
    }

    /// Returns an iterator over all keys in insertion order
    fn vertex_keys(&self) -> impl Iterator<Item = &Self::Key> + '_ {
        self.vertices().map(|u| self.key_of(u))
    }

    /// Returns all edges as key pairs.
    /// Undirected edges are reported once, in the orientation of their normalized node indices.
    fn edge_keys(&self) -> Vec<(Self::Key, Self::Key)> {
        self.edges(!self.is_directed())
            .map(|Edge(u, v)| (self.key_of(u).clone(), self.key_of(v).clone()))
            .collect_vec()
    }
}

impl<G> GraphStore for G where
    G: AdjacencyList
        + AdjacencyTest
        + GraphEdgeOrder
        + GraphType
        + GraphVertexEditing
        + GraphEdgeEditing
{
}
