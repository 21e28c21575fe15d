use bit_set::BitSet;
use rand::{SeedableRng, rngs::StdRng};

mod growing_tree;
mod prim;
mod recur_backtrack;

pub use growing_tree::{GrowingTree, GrowingTreeConfig};
pub use prim::ModifiedPrim;
pub use recur_backtrack::RecursiveBacktracker;

use crate::error::MazeError;
use crate::maze::{CellId, Direction, Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Turns an all-walls maze into a perfect one by carving walls in place.
pub trait MazeGenerator {
    fn generate(&mut self, maze: &mut Maze) -> Result<(), MazeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    GrowingTree,
    Prim,
    RecurBacktrack,
}

impl Generator {
    pub const ALL: [Generator; 3] = [
        Generator::GrowingTree,
        Generator::Prim,
        Generator::RecurBacktrack,
    ];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::GrowingTree => write!(f, "Growing Tree"),
            Generator::Prim => write!(f, "Modified Prim's Algorithm"),
            Generator::RecurBacktrack => write!(f, "Recursive Backtracker"),
        }
    }
}

/// Generate a maze with the chosen algorithm and its default settings.
pub fn generate_maze(
    maze: &mut Maze,
    generator: Generator,
    seed: Option<u64>,
) -> Result<(), MazeError> {
    match generator {
        Generator::GrowingTree => GrowingTree::new(seed).generate(maze),
        Generator::Prim => ModifiedPrim::new(seed).generate(maze),
        Generator::RecurBacktrack => RecursiveBacktracker::new(seed).generate(maze),
    }
}

/// Neighbours of `cell` that are not in `visited`, walls ignored.
fn unvisited_neighbors(maze: &Maze, cell: CellId, visited: &BitSet) -> Vec<(Direction, CellId)> {
    maze.neighbors(cell)
        .filter(|&(_, n)| !visited.contains(n))
        .collect()
}
