/*!
# Graph Representations

Both representations store caller keys in a [`VertexTable`] that hands out dense nodes in
insertion order, and one [`ArrNeighborhood`] per node that keeps neighbors in edge-insertion
order (parallel edges are stored once per edge).

- [`DirectedGraph`] stores every arc `u -> v` once in the out-neighborhood of `u` and once
  in the in-neighborhood of `v`.
- [`UndirectedGraph`] stores `{u, v}` symmetrically; a self-loop `{u, u}` is stored once.

Both additionally count edges per (normalized) endpoint pair so that `has_edge` is `O(1)`.
*/

use std::{fmt::Debug, hash::Hash};

use fxhash::FxHashMap;

use crate::{ops::*, *};

mod directed;
mod neighborhood;
mod undirected;

pub use directed::*;
pub use neighborhood::*;
pub use undirected::*;

/// Insertion-ordered bijection between caller keys and dense nodes `0..n`
#[derive(Clone, Debug)]
pub struct VertexTable<K> {
    keys: Vec<K>,
    nodes: FxHashMap<K, Node>,
}

impl<K> Default for VertexTable<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            nodes: FxHashMap::default(),
        }
    }
}

impl<K> VertexTable<K>
where
    K: Clone + Eq + Hash + Debug,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the node of `key`, assigning the next free node if `key` is new.
    /// The second entry is *true* if `key` was inserted by this call.
    pub fn insert(&mut self, key: K) -> Result<(Node, bool), K> {
        if let Some(&u) = self.nodes.get(&key) {
            return Ok((u, false));
        }

        // `INVALID_NODE` must never be handed out
        if self.keys.len() >= INVALID_NODE as usize {
            return Err(GraphError::InvalidArgument(format!(
                "cannot add vertex {key:?}: graph already holds {} vertices",
                self.keys.len()
            )));
        }

        let u = self.keys.len() as Node;
        self.keys.push(key.clone());
        self.nodes.insert(key, u);
        Ok((u, true))
    }

    pub fn get(&self, key: &K) -> Option<Node> {
        self.nodes.get(key).copied()
    }

    /// ** Panics if `u >= n` **
    pub fn key(&self, u: Node) -> &K {
        &self.keys[u as usize]
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub(crate) mod macros {
    /// Implements all traits that only depend on the vertex table, the primary neighborhoods
    /// and the edge counter. Further neighborhood vectors are grown alongside the primary one.
    macro_rules! impl_common_graph_ops {
        ($struct:ident<$nbs:ident $(, $field:ident)*> => $directed:ident) => {
            impl<K> Default for $struct<K> {
                fn default() -> Self {
                    Self {
                        vertices: VertexTable::default(),
                        $nbs: Vec::new(),
                        $($field: Vec::new(),)*
                        multiplicity: FxHashMap::default(),
                        num_edges: 0,
                    }
                }
            }

            impl<K> GraphNew for $struct<K>
            where
                K: Clone + Eq + Hash + Debug,
            {
                fn new() -> Self {
                    Self::default()
                }

                fn with_capacity(vertices: usize) -> Self {
                    Self {
                        vertices: VertexTable::with_capacity(vertices),
                        $nbs: Vec::with_capacity(vertices),
                        $($field: Vec::with_capacity(vertices),)*
                        multiplicity: FxHashMap::default(),
                        num_edges: 0,
                    }
                }
            }

            impl<K> GraphType for $struct<K> {
                type Dir = $directed;
            }

            impl<K> GraphNodeOrder for $struct<K> {
                fn number_of_nodes(&self) -> NumNodes {
                    self.$nbs.len() as NumNodes
                }
            }

            impl<K> GraphEdgeOrder for $struct<K> {
                fn number_of_edges(&self) -> NumEdges {
                    self.num_edges
                }
            }

            impl<K> AdjacencyList for $struct<K> {
                fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
                    self.$nbs[u as usize].neighbors()
                }

                fn degree_of(&self, u: Node) -> NumNodes {
                    self.$nbs[u as usize].num_of_neighbors()
                }
            }

            impl<K> NeighborsSlice for $struct<K> {
                fn as_neighbors_slice(&self, u: Node) -> &[Node] {
                    self.$nbs[u as usize].as_slice()
                }
            }

            impl<K> VertexKeys for $struct<K>
            where
                K: Clone + Eq + Hash + Debug,
            {
                type Key = K;

                fn node_of(&self, key: &K) -> Option<Node> {
                    self.vertices.get(key)
                }

                fn key_of(&self, u: Node) -> &K {
                    self.vertices.key(u)
                }
            }

            impl<K> GraphVertexEditing for $struct<K>
            where
                K: Clone + Eq + Hash + Debug,
            {
                fn try_add_vertex(&mut self, key: K) -> Result<Node, K> {
                    let (u, inserted) = self.vertices.insert(key)?;
                    if inserted {
                        self.$nbs.push(ArrNeighborhood::default());
                        $(self.$field.push(ArrNeighborhood::default());)*
                    }
                    Ok(u)
                }
            }
        };
    }

    pub(super) use impl_common_graph_ops;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_table_assigns_in_insertion_order() {
        let mut table = VertexTable::default();
        assert_eq!(table.insert("c").unwrap(), (0, true));
        assert_eq!(table.insert("a").unwrap(), (1, true));
        assert_eq!(table.insert("c").unwrap(), (0, false));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"a"), Some(1));
        assert_eq!(table.get(&"b"), None);
        assert_eq!(*table.key(0), "c");
    }
}
