//! Random spanning tree of passages (randomized Kruskal)
//!
//! The passages of a freshly filled maze sit on every odd row and odd
//! column, separated by single wall squares:
//!
//! ```text
//! ██████████
//! ██  ██  ██
//! ██████████
//! ██  ██  ██
//! ██████████
//! ```
//!
//! Each of those passages is one cell of a grid of half the size. Opening the
//! wall between two neighbouring passages corresponds to an edge between two
//! cells of the half-size grid, so a spanning tree of that grid is a maze
//! where every passage is reachable in exactly one way:
//!
//! ```text
//! ██████████
//! ██      ██
//! ██████  ██
//! ██      ██
//! ██████████
//! ```

use itertools::iproduct;
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::cell::{Cell, CellType};
use crate::disjoint_set::DisjointSet;

/// Edge between two neighbouring cells of the half-size grid
///
/// Cells are identified by their index `row * width + column`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
struct Edge {
    first_cell: usize,
    second_cell: usize,
}

/// Generator for the passages that connect the isolated passage squares
#[derive(Debug)]
pub struct PassageTree {
    /// Height of the half-size grid
    height: usize,
    /// Width of the half-size grid
    width: usize,
}

impl PassageTree {
    /// Set up the half-size grid for a maze of `height` × `width` squares.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height: height.saturating_sub(1) / 2,
            width: width.saturating_sub(1) / 2,
        }
    }

    /// Number of cells in the half-size grid
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Generate the passage squares to carve into the full-size maze.
    ///
    /// Exactly `cell_count() - 1` passages are returned (none for an empty
    /// or single-cell grid), and together with the odd/odd squares they form
    /// a tree.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Cell> {
        let mut edges = self.create_edges();
        edges.shuffle(rng);

        let tree = self.build_spanning_tree(&edges);
        debug!(
            "Spanning tree over {}x{} cells keeps {} of {} edges",
            self.height,
            self.width,
            tree.len(),
            edges.len()
        );

        tree.into_iter()
            .map(|edge| self.to_passage(edge))
            .collect()
    }

    /// All edges of the half-size grid, each neighbour pair once.
    fn create_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(2 * self.cell_count());
        for (row, column) in iproduct!(0..self.height, 0..self.width) {
            let cell = self.index_of(row, column);
            if column > 0 {
                edges.push(Edge {
                    first_cell: cell,
                    second_cell: self.index_of(row, column - 1),
                });
            }
            if row > 0 {
                edges.push(Edge {
                    first_cell: cell,
                    second_cell: self.index_of(row - 1, column),
                });
            }
        }
        edges
    }

    /// Keep the edges that join two so far disconnected components.
    fn build_spanning_tree(&self, edges: &[Edge]) -> Vec<Edge> {
        let mut components = DisjointSet::new(self.cell_count());
        edges
            .iter()
            .filter(|edge| components.union(edge.first_cell, edge.second_cell))
            .copied()
            .collect()
    }

    fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.width + column
    }

    fn position_of(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Scale an edge back to the wall square it opens in the full-size maze.
    fn to_passage(&self, edge: Edge) -> Cell {
        let (first_row, first_column) = self.position_of(edge.first_cell);
        let (second_row, second_column) = self.position_of(edge.second_cell);
        Cell::new(
            first_row + second_row + 1,
            first_column + second_column + 1,
            CellType::Passage,
        )
    }
}
