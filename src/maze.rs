//! The maze and its generation pipeline

use std::fmt;

use itertools::Itertools;
use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

use crate::cell::{Cell, CellType};
use crate::escape_solver::EscapeSolver;
use crate::passage_tree::PassageTree;

/// Errors raised when building a maze
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The maze is too small to hold an entrance, an exit and a passage.
    #[error(
        "Both the height and the width of the maze must be at least {min}, got {height}x{width}",
        min = Maze::MIN_SIZE
    )]
    InvalidDimension { height: usize, width: usize },
}

/// Path from the entrance to the exit, found on demand
#[derive(Debug, Clone)]
struct Escape {
    path: Vec<Cell>,
    rendering: String,
}

/// Rectangular maze with exactly one way between any two passages
///
/// The entrance is on the top row, the exit on the bottom row:
///
/// ```text
/// ██  ██████████
/// ██      ██  ██
/// ██████  ██  ██
/// ██          ██
/// ██████  ██████
/// ██          ██
/// ██████████  ██
/// ```
#[derive(Debug, Clone)]
pub struct Maze {
    height: usize,
    width: usize,
    /// Squares of the maze, indexed `[row][column]`
    grid: Vec<Vec<Cell>>,
    /// Cached result of [Self::find_escape]
    escape: Option<Escape>,
}

impl Maze {
    /// Smallest allowed height and width
    pub const MIN_SIZE: usize = 3;

    const S_WALL: &'static str = "██";
    const S_ESCAPE: &'static str = "▓▓";
    const S_PASSAGE: &'static str = "  ";

    /// Generate a new maze of `height` × `width` squares.
    ///
    /// Returns [MazeError::InvalidDimension], if either is less than
    /// [Self::MIN_SIZE].
    ///
    /// # Examples
    /// ```
    /// use maze_escape::Maze;
    ///
    /// let maze = Maze::new(7, 9).unwrap();
    /// assert_eq!(maze.to_string().lines().count(), 7);
    /// assert!(Maze::new(2, 9).is_err());
    /// ```
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        Self::with_seed(height, width, None)
    }

    /// Generate a new square maze.
    pub fn square(size: usize) -> Result<Self, MazeError> {
        Self::new(size, size)
    }

    /// Generate a new maze, reproducibly if `seed` is given.
    pub fn with_seed(height: usize, width: usize, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut random = if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        };
        Self::generate(height, width, &mut random)
    }

    /// Generate a new maze, drawing the passage layout from `rng`.
    pub fn generate<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        if height < Self::MIN_SIZE || width < Self::MIN_SIZE {
            return Err(MazeError::InvalidDimension { height, width });
        }

        let mut maze = Maze {
            height,
            width,
            grid: Self::fill_alternately(height, width),
            escape: None,
        };
        maze.fill_gaps();
        maze.make_entrance_and_exit();
        maze.generate_passages(rng);

        debug!("Generated {}x{} maze", height, width);
        Ok(maze)
    }

    /// Walls on every even row and column, passages elsewhere.
    ///
    /// ```text
    /// ██████████
    /// ██  ██  ██
    /// ██████████
    /// ██  ██  ██
    /// ██████████
    /// ```
    fn fill_alternately(height: usize, width: usize) -> Vec<Vec<Cell>> {
        (0..height)
            .map(|row| {
                (0..width)
                    .map(|column| {
                        let kind = if row % 2 == 0 || column % 2 == 0 {
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

    /// Wall off the last row or column when the size is even, so that no
    /// passage touches the outer border.
    fn fill_gaps(&mut self) {
        if self.height % 2 == 0 {
            for column in 0..self.width {
                self.put_cell(self.height - 1, column, CellType::Wall);
            }
        }
        if self.width % 2 == 0 {
            for row in 0..self.height {
                self.put_cell(row, self.width - 1, CellType::Wall);
            }
        }
    }

    /// Column of the exit on the bottom row.
    ///
    /// It is the last passage column: `width - 2` for odd widths, and
    /// `width - 3` for even widths, where the last column is a wall.
    fn exit_column(&self) -> usize {
        self.width - 3 + self.width % 2
    }

    /// Open the entrance at the top left and the exit at the bottom right.
    ///
    /// With an even height the last row is a wall, so the square above the
    /// exit is opened as well.
    fn make_entrance_and_exit(&mut self) {
        let exit_column = self.exit_column();
        self.put_cell(0, 1, CellType::Passage);
        self.put_cell(self.height - 1, exit_column, CellType::Passage);
        if self.height % 2 == 0 {
            self.put_cell(self.height - 2, exit_column, CellType::Passage);
        }
    }

    /// Connect the isolated passages into a tree.
    fn generate_passages<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in PassageTree::new(self.height, self.width).generate(rng) {
            self.put_cell(cell.row(), cell.column(), cell.kind());
        }
    }

    fn put_cell(&mut self, row: usize, column: usize, kind: CellType) {
        self.grid[row][column].set_kind(kind);
    }

    /// Find the path from the entrance to the exit.
    ///
    /// The path is searched only on the first call and stored in the
    /// maze; later calls return the same rendering.
    ///
    /// Returns the maze rendering with the path marked:
    ///
    /// ```text
    /// ██▓▓██████████
    /// ██▓▓▓▓▓▓██  ██
    /// ██████▓▓██  ██
    /// ██    ▓▓    ██
    /// ██████▓▓██████
    /// ██    ▓▓▓▓▓▓██
    /// ██████████▓▓██
    /// ```
    pub fn find_escape(&mut self) -> &str {
        let escape = match self.escape.take() {
            Some(escape) => escape,
            None => self.solve(),
        };
        &self.escape.insert(escape).rendering
    }

    fn solve(&mut self) -> Escape {
        let path = EscapeSolver::new(&self.grid, self.entrance(), self.exit()).find_escape();
        if path.is_empty() {
            warn!("No escape found in {}x{} maze", self.height, self.width);
        }
        for cell in &path {
            self.put_cell(cell.row(), cell.column(), cell.kind());
        }
        Escape {
            rendering: self.render(true),
            path,
        }
    }

    /// Render the maze as text, one line per row.
    ///
    /// ## Arguments
    /// - `show_escape`: Mark the squares of the escape path, if it has
    ///   already been found.
    pub fn render(&self, show_escape: bool) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| Self::glyph(cell, show_escape))
                    .join("")
                    + "\n"
            })
            .collect()
    }

    fn glyph(cell: &Cell, show_escape: bool) -> &'static str {
        if cell.is_wall() {
            Self::S_WALL
        } else if show_escape && cell.is_escape() {
            Self::S_ESCAPE
        } else {
            Self::S_PASSAGE
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Square at (`row`, `column`), if inside the maze
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.grid.get(row)?.get(column)
    }

    /// Rows of the maze, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }

    pub fn entrance(&self) -> &Cell {
        &self.grid[0][1]
    }

    pub fn exit(&self) -> &Cell {
        &self.grid[self.height - 1][self.exit_column()]
    }

    /// Has [Self::find_escape] been called?
    pub fn is_solved(&self) -> bool {
        self.escape.is_some()
    }

    /// The escape path from the entrance to the exit, once found
    ///
    /// Empty if the exit could not be reached.
    pub fn escape_path(&self) -> Option<&[Cell]> {
        self.escape.as_ref().map(|escape| escape.path.as_slice())
    }
}

impl fmt::Display for Maze {
    /// Rendering without the escape path
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
