//! Generate a perfect maze and find the way out of it
//!
//! Mazes are carved with randomized Kruskal's algorithm: the passages form a
//! spanning tree, so there is exactly one way between any two of them. The
//! escape from the entrance (top row) to the exit (bottom row) is searched
//! with A*.
//!
//! # Examples
//! ## The smallest maze
//! ```
//! use maze_escape::Maze;
//!
//! let mut maze = Maze::new(3, 3).unwrap();
//! assert_eq!(maze.to_string(), "██  ██\n██  ██\n██  ██\n");
//! assert_eq!(maze.find_escape(), "██▓▓██\n██▓▓██\n██▓▓██\n");
//! ```
//!
//! ## A reproducible maze
//! ```
//! use maze_escape::Maze;
//!
//! let mut maze = Maze::with_seed(11, 21, Some(2024)).unwrap();
//! println!("{}", maze);
//!
//! let solved = maze.find_escape().to_owned();
//! println!("{}", solved);
//!
//! let path = maze.escape_path().unwrap();
//! assert_eq!(path.first(), Some(maze.entrance()));
//! assert_eq!(path.last(), Some(maze.exit()));
//! ```

pub mod cell;
pub mod disjoint_set;
pub mod escape_solver;
pub mod maze;
pub mod passage_tree;
pub mod path_node;

pub use cell::{Cell, CellType};
pub use maze::{Maze, MazeError};
