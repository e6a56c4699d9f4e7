use std::{iter::Copied, slice::Iter};

use super::*;

/// Neighborhood stored as an array in edge-insertion order.
/// Adding a neighbor twice records a parallel edge.
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<Node>);

impl ArrNeighborhood {
    /// Returns the number of neighbors in the Neighborhood
    pub fn num_of_neighbors(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    /// Returns an iterator over all neighbors in the Neighborhood
    pub fn neighbors(&self) -> Copied<Iter<'_, Node>> {
        self.0.iter().copied()
    }

    /// Returns *true* if `v` is in the Neighborhood. Runs in `O(deg)`.
    pub fn has_neighbor(&self, v: Node) -> bool {
        self.0.contains(&v)
    }

    /// Appends a neighbor without checking if it exists beforehand
    pub fn add_neighbor(&mut self, u: Node) {
        self.0.push(u);
    }

    /// Returns a slice-reference of the neighborhood
    pub fn as_slice(&self) -> &[Node] {
        &self.0
    }
}
