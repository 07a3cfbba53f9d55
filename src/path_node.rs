//! Search bookkeeping for a single square

/// Node of the A* search grid
///
/// A node knows the cost of the best path found so far from the start to
/// it (`g`), the estimated cost from it to the end (`h`) and the total cost
/// of a path through it (`f`).
///
/// Two nodes are equal if they are on the same square and agree on being
/// a wall; costs and parents do not take part.
#[derive(Clone, Debug)]
pub struct PathNode {
    row: usize,
    column: usize,
    is_wall: bool,
    g: usize,
    h: usize,
    f: usize,
    /// Index of the previous node on the path, `None` for the path root
    parent: Option<usize>,
}

impl PathNode {
    /// Cost of moving to a neighbouring node
    pub const EDGE_COST: usize = 1;

    pub fn new(row: usize, column: usize, is_wall: bool) -> Self {
        Self {
            row,
            column,
            is_wall,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn path_cost(&self) -> usize {
        self.g
    }

    pub fn heuristic(&self) -> usize {
        self.h
    }

    pub fn final_cost(&self) -> usize {
        self.f
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Estimate the cost to `(row, column)` as the Manhattan distance.
    pub fn calc_heuristic_to(&mut self, row: usize, column: usize) {
        self.h = self.row.abs_diff(row) + self.column.abs_diff(column);
        self.f = self.g + self.h;
    }

    /// Would the path through `node` be cheaper than the current one?
    pub fn has_better_path(&self, node: &PathNode) -> bool {
        node.g + Self::EDGE_COST < self.g
    }

    /// Route the path through `node`, stored at index `node_index`.
    pub fn update_path(&mut self, node: &PathNode, node_index: usize) {
        self.parent = Some(node_index);
        self.g = node.g + Self::EDGE_COST;
        self.f = self.g + self.h;
    }
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.column == other.column && self.is_wall == other.is_wall
    }
}

impl Eq for PathNode {}
