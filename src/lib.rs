/*!
`adjgraph` is a small graph library for graphs whose vertices are caller-chosen keys and whose
edges carry no weight. A graph is built incrementally (`add_vertex`, `add_edge`) and then
queried any number of times by the analyses in [`algo`]:

- breadth-first and depth-first traversal (explicit-stack and recursive),
- connected-component counting and partitioning,
- cycle detection for undirected graphs,
- topological ordering (Kahn's algorithm) for directed graphs,
- reachability and shortest paths by edge count.

# Representation

Every key is assigned a dense **node** index `Node = u32` on first insertion, in insertion order.
Algorithms run on these indices and keep their visitation state in a [`NodeBitSet`] that is
created per call and dropped when the call returns; results are translated back to keys.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`.

### Directed vs Undirected

Orientation is part of the type:

- [`DirectedGraph`](crate::repr::DirectedGraph) stores arcs `u -> v`. Traversals and path queries
  follow arcs; connectivity uses the undirected closure; topological ordering is available.
- [`UndirectedGraph`](crate::repr::UndirectedGraph) stores `{u, v}` symmetrically. Cycle detection
  is available.

Asking for a topological order of an undirected graph or for an undirected cycle in a directed
graph does not compile.

# Usage

```
use adjgraph::{prelude::*, algo::*};

let mut g = UndirectedGraph::new();
g.add_vertices([1, 2, 3, 4]);
g.add_edges([(1, 2), (2, 3), (3, 4), (1, 4)]).unwrap();

assert_eq!(g.bfs(&1).unwrap(), vec![1, 2, 4, 3]);
assert_eq!(g.shortest_path(&1, &4).unwrap(), Some(vec![1, 4]));
assert_eq!(g.count_connected_components(), 1);
assert!(g.has_cycle());
```

# Concurrency

Queries take `&self` and never mutate the graph, so any number of analyses may run concurrently
on a shared reference. Mutation requires `&mut self`.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;

pub use edge::*;
pub use error::*;
pub use node::*;

/// `adjgraph::prelude` includes definitions for nodes, edges, errors, all graph operation traits as well as both representations.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, node::*, ops::*, repr::*};
}
