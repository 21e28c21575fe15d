use bit_set::BitSet;
use rand::{Rng, rngs::StdRng};

use super::{MazeGenerator, get_rng, unvisited_neighbors};
use crate::error::MazeError;
use crate::maze::{CellId, Maze};

/// Depth-first generator. Arriving at a tunnel mouth whose partner is unvisited continues
/// the walk from the partner.
pub struct RecursiveBacktracker {
    rng: StdRng,
}

impl RecursiveBacktracker {
    pub fn new(seed: Option<u64>) -> Self {
        RecursiveBacktracker { rng: get_rng(seed) }
    }
}

/// Mark `cell` visited and put it on the path.
fn visit(cell: CellId, visited: &mut BitSet, path: &mut Vec<CellId>, count: &mut usize) {
    if visited.insert(cell) {
        *count += 1;
    }
    path.push(cell);
}

impl MazeGenerator for RecursiveBacktracker {
    fn generate(&mut self, maze: &mut Maze) -> Result<(), MazeError> {
        let start = maze.random_cell(&mut self.rng).ok_or(MazeError::EmptyGrid)?;
        tracing::debug!("[recursive backtracker] starting at {:?}", maze.coord(start));

        let mut visited = BitSet::with_capacity(maze.len());
        let mut path = Vec::new();
        let mut visited_count = 0;
        visit(start, &mut visited, &mut path, &mut visited_count);
        if let Some(partner) = maze.tunnel(start) {
            visit(partner, &mut visited, &mut path, &mut visited_count);
        }

        while visited_count < maze.len() {
            let Some(&cell) = path.last() else {
                tracing::warn!(
                    "[recursive backtracker] path emptied after visiting {} of {} cells",
                    visited_count,
                    maze.len()
                );
                break;
            };

            let neighbors = unvisited_neighbors(maze, cell, &visited);
            if neighbors.is_empty() {
                // Backtrack
                path.pop();
                continue;
            }

            let (direction, next) = neighbors[self.rng.random_range(0..neighbors.len())];
            maze.carve(cell, direction);
            visit(next, &mut visited, &mut path, &mut visited_count);

            if let Some(partner) = maze.tunnel(next).filter(|&p| !visited.contains(p)) {
                tracing::debug!(
                    "[recursive backtracker] through tunnel {:?} -> {:?}",
                    maze.coord(next),
                    maze.coord(partner)
                );
                visit(partner, &mut visited, &mut path, &mut visited_count);
            }
        }

        tracing::debug!(
            "[recursive backtracker] finished, {} passages carved",
            maze.open_wall_count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_opens_three_walls() {
        for seed in 0..10 {
            let mut maze = Maze::rectangular(2, 2);
            RecursiveBacktracker::new(Some(seed))
                .generate(&mut maze)
                .unwrap();
            assert_eq!(maze.open_wall_count(), 3);
            assert!(maze.is_perfect());
        }
    }

    #[test]
    fn test_tunnel_replaces_a_passage() {
        // With a tunnel the walk can skip carving into the far mouth, so the carved walls
        // form a forest joined by the tunnel
        for seed in 0..20 {
            let mut maze = Maze::with_tunnels(5, 5);
            maze.add_tunnel((0, 0), (4, 4)).unwrap();
            RecursiveBacktracker::new(Some(seed))
                .generate(&mut maze)
                .unwrap();
            let carved = maze.open_wall_count();
            assert!(carved == maze.len() - 1 || carved == maze.len() - 2);
            assert!(maze.is_perfect());
        }
    }

    #[test]
    fn test_start_on_tunnel_mouth() {
        for seed in 0..10 {
            let mut maze = Maze::with_tunnels(1, 3);
            maze.add_tunnel((0, 0), (0, 2)).unwrap();
            RecursiveBacktracker::new(Some(seed))
                .generate(&mut maze)
                .unwrap();
            assert!(maze.is_perfect());
        }
    }
}
