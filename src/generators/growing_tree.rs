use bit_set::BitSet;
use rand::{Rng, rngs::StdRng};

use super::{MazeGenerator, get_rng, unvisited_neighbors};
use crate::error::MazeError;
use crate::maze::Maze;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowingTreeConfig {
    /// Chance of growing from a random active cell instead of the newest one.
    /// `0.0` behaves like a recursive backtracker, `1.0` like randomized Prim's.
    pub random_pick_probability: f64,
}

impl Default for GrowingTreeConfig {
    fn default() -> Self {
        GrowingTreeConfig {
            random_pick_probability: 0.1,
        }
    }
}

/// Growing-tree generator that mostly grows from the newest cell and occasionally from a
/// random one.
pub struct GrowingTree {
    rng: StdRng,
    config: GrowingTreeConfig,
}

impl GrowingTree {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_config(GrowingTreeConfig::default(), seed)
    }

    pub fn with_config(config: GrowingTreeConfig, seed: Option<u64>) -> Self {
        GrowingTree {
            rng: get_rng(seed),
            config,
        }
    }

    /// Index into the active list to grow from next.
    fn pick(&mut self, active_len: usize) -> usize {
        if self.rng.random::<f64>() < self.config.random_pick_probability {
            self.rng.random_range(0..active_len)
        } else {
            active_len - 1
        }
    }
}

impl MazeGenerator for GrowingTree {
    fn generate(&mut self, maze: &mut Maze) -> Result<(), MazeError> {
        let start = maze.random_cell(&mut self.rng).ok_or(MazeError::EmptyGrid)?;
        tracing::debug!("[growing tree] starting at {:?}", maze.coord(start));

        let mut visited = BitSet::with_capacity(maze.len());
        visited.insert(start);
        let mut active = vec![start];

        while !active.is_empty() {
            let idx = self.pick(active.len());
            let cell = active[idx];

            let neighbors = unvisited_neighbors(maze, cell, &visited);
            if neighbors.is_empty() {
                // Exhausted cells leave the list; order of the rest is kept
                active.remove(idx);
                continue;
            }
            let (direction, next) = neighbors[self.rng.random_range(0..neighbors.len())];
            maze.carve(cell, direction);
            visited.insert(next);
            active.push(next);
        }

        tracing::debug!(
            "[growing tree] finished, {} passages carved",
            maze.open_wall_count()
        );
        Ok(())
    }
}
