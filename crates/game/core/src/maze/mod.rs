//! Maze construction and graph queries.
//!
//! [`generator`] carves perfect mazes and decorates them with dead ends and
//! coins; [`path`] answers shortest-distance queries over the walkable
//! subgraph. Both treat every non-wall cell as a node and orthogonal
//! adjacency as the only edges.
pub mod generator;
pub mod path;

pub use generator::{MazeGenerator, MazeLayout, carve};
pub use path::shortest_distance;

/// Fixed-size bitset over row-major cell indices.
#[derive(Clone, Debug)]
pub(crate) struct VisitedSet {
    words: Vec<u64>,
}

impl VisitedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
        }
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    /// Marks `index`; returns false if it was already present.
    pub(crate) fn insert(&mut self, index: usize) -> bool {
        let was_present = self.contains(index);
        self.words[index / 64] |= 1 << (index % 64);
        !was_present
    }
}
