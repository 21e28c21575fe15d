mod bi_backtrack;
mod wall_follower;

pub use bi_backtrack::BidirectionalBacktracker;
pub use wall_follower::{WallFollower, WallFollowerConfig};

use crate::error::MazeError;
use crate::maze::{CellId, Maze};

/// Finds its way from a maze's entrance to its exit, leaving footprints along the way.
pub trait MazeSolver {
    fn solve(&mut self, maze: &mut Maze) -> Result<(), MazeError>;

    /// Whether the last call to [`MazeSolver::solve`] reached the exit.
    fn is_solved(&self) -> bool;

    /// Distinct cells the last call to [`MazeSolver::solve`] stepped on.
    fn cells_explored(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    BiBacktrack,
    WallFollower,
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::BiBacktrack, Solver::WallFollower];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::BiBacktrack => write!(f, "Bidirectional Recursive Backtracker"),
            Solver::WallFollower => write!(f, "Wall Follower"),
        }
    }
}

/// Solve a maze with the chosen algorithm and return how many cells it explored.
///
/// The wall follower runs without a step limit here, and some tunnel layouts can keep it
/// walking forever. Use [`solve_maze_with`] to bound it.
pub fn solve_maze(maze: &mut Maze, solver: Solver, seed: Option<u64>) -> Result<usize, MazeError> {
    solve_maze_with(maze, solver, seed, WallFollowerConfig::default())
}

/// Like [`solve_maze`], with `wall_follower` settings used when `solver` is the wall follower.
pub fn solve_maze_with(
    maze: &mut Maze,
    solver: Solver,
    seed: Option<u64>,
    wall_follower: WallFollowerConfig,
) -> Result<usize, MazeError> {
    let mut solver: Box<dyn MazeSolver> = match solver {
        Solver::BiBacktrack => Box::new(BidirectionalBacktracker::new(seed)),
        Solver::WallFollower => Box::new(WallFollower::with_config(wall_follower)),
    };
    solver.solve(maze)?;
    Ok(solver.cells_explored())
}

/// Entrance and exit of a maze that can be solved at all.
fn endpoints(maze: &Maze) -> Result<(CellId, CellId), MazeError> {
    if maze.is_empty() {
        return Err(MazeError::EmptyGrid);
    }
    let entrance = maze.entrance().ok_or(MazeError::MissingEntrance)?;
    let exit = maze.exit().ok_or(MazeError::MissingExit)?;
    Ok((entrance, exit))
}
