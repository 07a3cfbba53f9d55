//! Shortest way out of the maze with A* search
//!
//! See more: [Wikipedia](https://en.wikipedia.org/wiki/A*_search_algorithm)

use log::debug;

use crate::cell::{Cell, CellType};
use crate::path_node::PathNode;

/// Priority queue of node indices ordered by ascending final cost
///
/// Binary min-heap that also remembers where each node sits in the heap, so
/// that membership checks are O(1) and the key of a queued node can be
/// lowered in place. Order among equal keys is unspecified.
#[derive(Debug)]
struct OpenSet {
    /// (final cost, node index)
    heap: Vec<(usize, usize)>,
    /// Slot of each node in `heap`, if queued
    position: Vec<Option<usize>>,
}

impl OpenSet {
    fn new(node_count: usize) -> Self {
        Self {
            heap: Vec::new(),
            position: vec![None; node_count],
        }
    }

    fn contains(&self, node: usize) -> bool {
        self.position[node].is_some()
    }

    /// Queue `node` with `cost`, or re-key it if it is already queued.
    fn push(&mut self, node: usize, cost: usize) {
        match self.position[node] {
            Some(slot) => {
                self.heap[slot].0 = cost;
                self.sift_up(slot);
                if let Some(slot) = self.position[node] {
                    self.sift_down(slot);
                }
            }
            None => {
                self.heap.push((cost, node));
                let slot = self.heap.len() - 1;
                self.position[node] = Some(slot);
                self.sift_up(slot);
            }
        }
    }

    /// Remove and return the node with the lowest cost.
    fn pop(&mut self) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (_, node) = self.heap.pop()?;
        self.position[node] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(node)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a].1] = Some(a);
        self.position[self.heap[b].1] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.heap.len() && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

/// A* search from an entrance square to an exit square
///
/// The solver keeps its own grid of [PathNode]s, stored row by row in a
/// flat arena. Parent links are indices into that arena.
#[derive(Debug)]
pub struct EscapeSolver {
    height: usize,
    width: usize,
    nodes: Vec<PathNode>,
    start: usize,
    end: usize,
    open: OpenSet,
    closed: Vec<bool>,
}

impl EscapeSolver {
    /// Moves up, left, right and down
    const DELTAS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

    /// Create the node grid for `grid`, with heuristics towards `end`.
    ///
    /// ## Arguments
    /// - `grid`: Rectangular grid of squares, indexed `[row][column]`.
    /// - `start`: Square to start from; must be inside `grid` and passable.
    /// - `end`: Square to reach; must be inside `grid` and passable.
    pub fn new(grid: &[Vec<Cell>], start: &Cell, end: &Cell) -> Self {
        let height = grid.len();
        let width = grid.first().map_or(0, Vec::len);

        let nodes: Vec<PathNode> = grid
            .iter()
            .flatten()
            .map(|cell| {
                let mut node = PathNode::new(cell.row(), cell.column(), cell.is_wall());
                node.calc_heuristic_to(end.row(), end.column());
                node
            })
            .collect();
        let node_count = nodes.len();

        Self {
            height,
            width,
            nodes,
            start: start.row() * width + start.column(),
            end: end.row() * width + end.column(),
            open: OpenSet::new(node_count),
            closed: vec![false; node_count],
        }
    }

    /// Find the path from the start to the end.
    ///
    /// Returns the squares of the path as [CellType::Escape] cells, start
    /// and end included, or an empty vector if the end cannot be reached.
    pub fn find_escape(mut self) -> Vec<Cell> {
        let start_cost = self.nodes[self.start].final_cost();
        self.open.push(self.start, start_cost);

        let mut expanded = 0;
        while let Some(current) = self.open.pop() {
            if self.is_end(current) {
                let path = self.reconstruct_path(current);
                debug!(
                    "Escape of {} squares found after expanding {} nodes",
                    path.len(),
                    expanded
                );
                return path;
            }
            self.closed[current] = true;
            expanded += 1;
            self.update_neighbors(current);
        }

        debug!("No escape after expanding {} nodes", expanded);
        Vec::new()
    }

    fn is_end(&self, node: usize) -> bool {
        self.nodes[node] == self.nodes[self.end]
    }

    /// Walk the parent links back to the root; returns start -> ... -> `node`.
    fn reconstruct_path(&self, node: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(index) = current {
            let node = &self.nodes[index];
            path.push(Cell::new(node.row(), node.column(), CellType::Escape));
            current = node.parent();
        }
        path.reverse();
        path
    }

    /// Relax the costs of the neighbours of `current`.
    fn update_neighbors(&mut self, current: usize) {
        let current_node = self.nodes[current].clone();

        for (d_row, d_column) in Self::DELTAS {
            let Some(neighbor) =
                self.neighbor_index(current_node.row(), current_node.column(), d_row, d_column)
            else {
                continue;
            };
            if self.nodes[neighbor].is_wall() || self.closed[neighbor] {
                continue;
            }
            if self.open.contains(neighbor) && !self.nodes[neighbor].has_better_path(&current_node)
            {
                continue;
            }

            let node = &mut self.nodes[neighbor];
            node.update_path(&current_node, current);
            let cost = node.final_cost();
            self.open.push(neighbor, cost);
        }
    }

    /// Arena index of the square at the given offset, if it is in bounds.
    fn neighbor_index(
        &self,
        row: usize,
        column: usize,
        d_row: isize,
        d_column: isize,
    ) -> Option<usize> {
        let row = row.checked_add_signed(d_row)?;
        let column = column.checked_add_signed(d_column)?;
        (row < self.height && column < self.width).then_some(row * self.width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::{EscapeSolver, OpenSet};
    use crate::cell::{Cell, CellType};

    /// Build a grid from lines where `#` is a wall and anything else a passage
    fn grid_from(lines: &[&str]) -> Vec<Vec<Cell>> {
        lines
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(column, c)| {
                        let kind = if c == '#' {
                            CellType::Wall
                        } else {
                            CellType::Passage
                        };
                        Cell::new(row, column, kind)
                    })
                    .collect()
            })
            .collect()
    }

    fn coordinates(path: &[Cell]) -> Vec<(usize, usize)> {
        path.iter().map(|c| (c.row(), c.column())).collect()
    }

    #[test]
    fn open_set_pops_in_cost_order() {
        let mut open = OpenSet::new(6);
        for (node, cost) in [(0, 5), (1, 3), (2, 8), (3, 1), (4, 3), (5, 0)] {
            open.push(node, cost);
        }
        assert!(open.contains(2));

        let mut costs = Vec::new();
        while let Some(node) = open.pop() {
            costs.push([5, 3, 8, 1, 3, 0][node]);
            assert!(!open.contains(node));
        }
        assert_eq!(costs, vec![0, 1, 3, 3, 5, 8]);
        assert!(open.heap.is_empty());
    }

    #[test]
    fn open_set_lowers_key_in_place() {
        let mut open = OpenSet::new(3);
        open.push(0, 4);
        open.push(1, 6);
        open.push(2, 9);
        open.push(2, 1);
        assert_eq!(open.heap.len(), 3);
        assert_eq!(open.pop(), Some(2));
        assert_eq!(open.pop(), Some(0));
        assert_eq!(open.pop(), Some(1));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn straight_corridor() {
        let grid = grid_from(&["# #", "# #", "# #"]);
        let path = EscapeSolver::new(&grid, &grid[0][1], &grid[2][1]).find_escape();
        assert_eq!(coordinates(&path), vec![(0, 1), (1, 1), (2, 1)]);
        assert!(path.iter().all(Cell::is_escape));
    }

    #[test]
    fn start_equals_end() {
        let grid = grid_from(&["# #", "# #", "# #"]);
        let path = EscapeSolver::new(&grid, &grid[1][1], &grid[1][1]).find_escape();
        assert_eq!(coordinates(&path), vec![(1, 1)]);
    }

    #[test]
    fn takes_the_shorter_branch() {
        let grid = grid_from(&[
            "# #####", //
            "#     #", //
            "# ### #", //
            "#     #", //
            "# #####",
        ]);
        let path = EscapeSolver::new(&grid, &grid[0][1], &grid[4][1]).find_escape();
        assert_eq!(
            coordinates(&path),
            vec![(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]
        );
    }

    #[test]
    fn detour_around_walls() {
        let grid = grid_from(&[
            "# ###", //
            "#   #", //
            "### #", //
            "#   #", //
            "# ###",
        ]);
        let path = EscapeSolver::new(&grid, &grid[0][1], &grid[4][1]).find_escape();
        assert_eq!(
            coordinates(&path),
            vec![
                (0, 1),
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 3),
                (3, 3),
                (3, 2),
                (3, 1),
                (4, 1)
            ]
        );
    }

    #[test]
    fn unreachable_end_gives_empty_path() {
        let grid = grid_from(&["# #", "###", "# #"]);
        let path = EscapeSolver::new(&grid, &grid[0][1], &grid[2][1]).find_escape();
        assert!(path.is_empty());
    }
}
