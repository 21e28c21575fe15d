pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use error::MazeError;
pub use generators::{Generator, MazeGenerator, generate_maze};
pub use maze::{Direction, Maze, Topology};
pub use solvers::{MazeSolver, Solver, solve_maze, solve_maze_with};
