use bit_set::BitSet;
use rand::{Rng, rngs::StdRng};

use super::{MazeGenerator, get_rng};
use crate::error::MazeError;
use crate::maze::Maze;

/// Randomized Prim's generator growing the maze from a frontier of cells next to it.
pub struct ModifiedPrim {
    rng: StdRng,
}

impl ModifiedPrim {
    pub fn new(seed: Option<u64>) -> Self {
        ModifiedPrim { rng: get_rng(seed) }
    }
}

impl MazeGenerator for ModifiedPrim {
    fn generate(&mut self, maze: &mut Maze) -> Result<(), MazeError> {
        let start = maze.random_cell(&mut self.rng).ok_or(MazeError::EmptyGrid)?;
        tracing::debug!("[prim] starting at {:?}", maze.coord(start));

        let mut in_maze = BitSet::with_capacity(maze.len());
        in_maze.insert(start);

        // Frontier cells are kept in a vector for uniform picking and mirrored in a bit set
        // for membership tests
        let mut frontiers = maze.neighbors(start).map(|(_, n)| n).collect::<Vec<_>>();
        let mut in_frontier = frontiers.iter().copied().collect::<BitSet>();

        while !frontiers.is_empty() {
            let frontier = frontiers.swap_remove(self.rng.random_range(0..frontiers.len()));
            in_frontier.remove(frontier);

            // Neighbours of the frontier cell that are already part of the maze
            let maze_neighbors = maze
                .neighbors(frontier)
                .filter(|&(_, n)| in_maze.contains(n))
                .collect::<Vec<_>>();

            if !maze_neighbors.is_empty() {
                let (direction, _) = maze_neighbors[self.rng.random_range(0..maze_neighbors.len())];
                maze.carve(frontier, direction);
                in_maze.insert(frontier);

                for (_, n) in maze.neighbors(frontier) {
                    if !in_maze.contains(n) && in_frontier.insert(n) {
                        frontiers.push(n);
                    }
                }
            } else {
                tracing::warn!(
                    "[prim] frontier cell {:?} has no neighbour in the maze",
                    maze.coord(frontier)
                );
            }
        }

        tracing::debug!(
            "[prim] finished, {} passages carved",
            maze.open_wall_count()
        );
        Ok(())
    }
}
