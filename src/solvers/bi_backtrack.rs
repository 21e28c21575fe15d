use bit_set::BitSet;
use rand::{Rng, rngs::StdRng};

use super::{MazeSolver, endpoints};
use crate::error::MazeError;
use crate::generators::get_rng;
use crate::maze::{CellId, Maze};

/// One of the two depth-first walks.
struct Walker {
    path: Vec<CellId>,
    visited: BitSet,
}

impl Walker {
    fn new(capacity: usize) -> Self {
        Walker {
            path: Vec::new(),
            visited: BitSet::with_capacity(capacity),
        }
    }

    /// Step onto `cell`. Returns whether the other walk has already been there.
    fn visit(&mut self, maze: &Maze, cell: CellId, other: &BitSet, explored: &mut BitSet) -> bool {
        self.path.push(cell);
        self.visited.insert(cell);
        explored.insert(cell);
        maze.draw_footprint(cell);
        other.contains(cell)
    }

    /// Step onto `cell`, and through its tunnel if the far mouth is new to this walk.
    fn enter(&mut self, maze: &Maze, cell: CellId, other: &BitSet, explored: &mut BitSet) -> bool {
        let mut met = self.visit(maze, cell, other, explored);
        if let Some(partner) = maze.tunnel(cell).filter(|&p| !self.visited.contains(p)) {
            met |= self.visit(maze, partner, other, explored);
        }
        met
    }

    /// Dive through open passages until stuck, then back off one step.
    fn advance(
        &mut self,
        maze: &Maze,
        other: &BitSet,
        explored: &mut BitSet,
        rng: &mut StdRng,
    ) -> bool {
        let mut met = false;
        while let Some(&cell) = self.path.last() {
            let unvisited = maze
                .open_neighbors(cell)
                .map(|(_, n)| n)
                .filter(|&n| !self.visited.contains(n))
                .collect::<Vec<_>>();
            if unvisited.is_empty() {
                break;
            }
            let next = unvisited[rng.random_range(0..unvisited.len())];
            met |= self.enter(maze, next, other, explored);
        }
        self.path.pop();
        met
    }
}

/// Two randomized depth-first walks, one from the entrance and one from the exit, that stop
/// once they share a cell.
pub struct BidirectionalBacktracker {
    rng: StdRng,
    solved: bool,
    explored: usize,
}

impl BidirectionalBacktracker {
    pub fn new(seed: Option<u64>) -> Self {
        BidirectionalBacktracker {
            rng: get_rng(seed),
            solved: false,
            explored: 0,
        }
    }
}

impl MazeSolver for BidirectionalBacktracker {
    fn solve(&mut self, maze: &mut Maze) -> Result<(), MazeError> {
        self.solved = false;
        self.explored = 0;
        let (entrance, exit) = endpoints(maze)?;
        tracing::debug!(
            "[bidirectional] from {:?} and {:?}",
            maze.coord(entrance),
            maze.coord(exit)
        );

        let mut explored = BitSet::with_capacity(maze.len());
        let mut from_entrance = Walker::new(maze.len());
        let mut from_exit = Walker::new(maze.len());
        let mut met = from_entrance.enter(maze, entrance, &from_exit.visited, &mut explored);
        met |= from_exit.enter(maze, exit, &from_entrance.visited, &mut explored);

        while !met {
            if from_entrance.path.is_empty() && from_exit.path.is_empty() {
                self.explored = explored.len();
                tracing::warn!(
                    "[bidirectional] both walks exhausted after {} cells",
                    self.explored
                );
                return Err(MazeError::Unreachable);
            }
            met |= from_entrance.advance(maze, &from_exit.visited, &mut explored, &mut self.rng);
            met |= from_exit.advance(maze, &from_entrance.visited, &mut explored, &mut self.rng);
        }

        self.solved = true;
        self.explored = explored.len();
        tracing::debug!("[bidirectional] walks met after {} cells", self.explored);
        Ok(())
    }

    fn is_solved(&self) -> bool {
        self.solved
    }

    fn cells_explored(&self) -> usize {
        self.explored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze};
    use crate::maze::Direction;

    fn corridor(cols: usize) -> Maze {
        let mut maze = Maze::rectangular(1, cols);
        (0..cols - 1).for_each(|c| {
            maze.carve(c, Direction::East);
        });
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((0, cols - 1)).unwrap();
        maze
    }

    #[test]
    fn test_corridor_is_fully_explored() {
        let mut maze = corridor(6);
        let mut solver = BidirectionalBacktracker::new(Some(0));
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 6);
    }

    #[test]
    fn test_entrance_is_exit() {
        let mut maze = Maze::rectangular(4, 4);
        maze.set_entrance((2, 2)).unwrap();
        maze.set_exit((2, 2)).unwrap();
        let mut solver = BidirectionalBacktracker::new(None);
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 1);
    }

    #[test]
    fn test_walled_off_exit_is_unreachable() {
        let mut maze = Maze::rectangular(2, 2);
        maze.carve(0, Direction::East);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((1, 1)).unwrap();
        let mut solver = BidirectionalBacktracker::new(Some(1));
        assert_eq!(solver.solve(&mut maze), Err(MazeError::Unreachable));
        assert!(!solver.is_solved());
        assert_eq!(solver.cells_explored(), 3);
    }

    #[test]
    fn test_walks_through_tunnels() {
        let mut maze = Maze::with_tunnels(1, 4);
        maze.add_tunnel((0, 1), (0, 2)).unwrap();
        maze.carve(0, Direction::East);
        maze.carve(2, Direction::East);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((0, 3)).unwrap();
        let mut solver = BidirectionalBacktracker::new(Some(4));
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 4);
    }

    #[test]
    fn test_generated_tunnel_mazes() {
        for seed in 0..20 {
            let mut maze = Maze::with_tunnels(9, 9);
            maze.add_tunnel((0, 8), (8, 0)).unwrap();
            maze.add_tunnel((4, 4), (0, 1)).unwrap();
            maze.set_entrance((0, 0)).unwrap();
            maze.set_exit((8, 8)).unwrap();
            generate_maze(&mut maze, Generator::RecurBacktrack, Some(seed)).unwrap();
            let mut solver = BidirectionalBacktracker::new(Some(seed));
            solver.solve(&mut maze).unwrap();
            assert!(solver.cells_explored() <= maze.len());
        }
    }

    #[test]
    fn test_results_reset_between_calls() {
        let mut solver = BidirectionalBacktracker::new(Some(2));
        let mut maze = corridor(3);
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());

        let mut blocked = Maze::rectangular(1, 3);
        blocked.set_entrance((0, 0)).unwrap();
        blocked.set_exit((0, 2)).unwrap();
        assert!(solver.solve(&mut blocked).is_err());
        assert!(!solver.is_solved());
        assert_eq!(solver.cells_explored(), 2);
    }
}
