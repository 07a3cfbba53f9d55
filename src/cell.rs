//! Grid cells

/// What occupies a square of the maze
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum CellType {
    /// Impassable square
    Wall,
    /// Square that can be walked through
    Passage,
    /// Passage that lies on the path from the entrance to the exit
    Escape,
}

/// One square of the maze, located at (`row`, `column`)
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Cell {
    row: usize,
    column: usize,
    kind: CellType,
}

impl Cell {
    pub fn new(row: usize, column: usize, kind: CellType) -> Self {
        Self { row, column, kind }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn kind(&self) -> CellType {
        self.kind
    }

    pub fn is_wall(&self) -> bool {
        self.kind == CellType::Wall
    }

    pub fn is_escape(&self) -> bool {
        self.kind == CellType::Escape
    }

    /// Change the type of the square, keeping its location.
    ///
    /// Only the owning grid does this, so it stays crate-private.
    pub(crate) fn set_kind(&mut self, kind: CellType) {
        self.kind = kind;
    }
}
