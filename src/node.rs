/*!
# Node Representation

Callers identify vertices by arbitrary keys, but every graph assigns each key a dense
`Node = u32` index in insertion order. All algorithms run on these indices, which lets
visitation state live in a flat bitset instead of a hashed set.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Dense vertex index from `0` to `Node::MAX - 1`, assigned in insertion order
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>` (e.g. for predecessor arrays).
/// This instead uses the `NonZero`-Wrapper to assign a constant value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_packs_into_node_size() {
        assert_eq!(
            std::mem::size_of::<Option<OptionalNode>>(),
            std::mem::size_of::<Node>()
        );
    }

    #[test]
    fn optional_node_roundtrip() {
        assert_eq!(OptionalNode::new(0).map(|x| x.get()), Some(0));
        assert_eq!(OptionalNode::new(17).map(|x| x.get()), Some(17));
        assert!(OptionalNode::new(INVALID_NODE).is_none());
    }
}
