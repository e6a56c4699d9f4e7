/*!
# Graph Algorithms

This module provides the analyses that run on top of the graph representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use adjgraph::algo::*;
```
and gain access to traversal, connectivity, cycle detection, topological ordering and path queries.
Most of them are implemented as traits on the graphs themselves; where it helps, they are also
provided as **iterators**, making it easy to consume results lazily.

No algorithm mutates the graph or keeps state between calls.
*/

mod connectivity;
mod cycles;
mod paths;
mod topological;
pub mod traversal;

use crate::{prelude::*, *};

pub use connectivity::*;
pub use cycles::*;
pub use paths::*;
pub use topological::*;
pub use traversal::*;
