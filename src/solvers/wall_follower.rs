use bit_set::BitSet;

use super::{MazeSolver, endpoints};
use crate::error::MazeError;
use crate::maze::{CellId, Compass, Direction, Maze};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallFollowerConfig {
    /// Crossings after which a tunnel is closed for the rest of the walk.
    pub tunnel_access_budget: usize,
    /// Right turns tried for an unexplored passage on returning to a tunnel mouth, after
    /// the current facing. Three covers every side of a square cell.
    pub recovery_turns: usize,
    /// Give up after this many steps. Tunnels can trap the walk in a loop.
    pub max_steps: Option<usize>,
}

impl Default for WallFollowerConfig {
    fn default() -> Self {
        WallFollowerConfig {
            tunnel_access_budget: 8,
            recovery_turns: 3,
            max_steps: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TunnelState {
    disabled: bool,
    crossings: usize,
    /// Facing when the tunnel was first taken.
    entry_facing: Option<Direction>,
}

/// Keeps its right hand on the wall from the entrance until it reaches the exit.
pub struct WallFollower {
    config: WallFollowerConfig,
    solved: bool,
    explored: usize,
}

impl Default for WallFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl WallFollower {
    pub fn new() -> Self {
        Self::with_config(WallFollowerConfig::default())
    }

    pub fn with_config(config: WallFollowerConfig) -> Self {
        WallFollower {
            config,
            solved: false,
            explored: 0,
        }
    }

    /// An open side leading somewhere new, trying `facing` and then each right turn.
    fn recover(
        &self,
        maze: &Maze,
        compass: &Compass,
        cell: CellId,
        facing: Direction,
        visited: &BitSet,
    ) -> Option<(Direction, CellId)> {
        let mut direction = facing;
        for _ in 0..=self.config.recovery_turns {
            if let Some(next) = maze
                .neighbor(cell, direction)
                .filter(|&n| !maze.has_wall(cell, direction) && !visited.contains(n))
            {
                return Some((direction, next));
            }
            direction = compass.turn_right(direction);
        }
        None
    }
}

/// Facing away from the first boundary side of `entrance`, so the walk starts inward.
fn initial_facing(maze: &Maze, entrance: CellId) -> Direction {
    let directions = maze.compass().directions;
    directions
        .iter()
        .find(|&&d| maze.neighbor(entrance, d).is_none())
        .map(|d| d.opposite())
        .unwrap_or(directions[0])
}

/// First open side sweeping counter-clockwise from the rightmost turn.
fn scan(
    maze: &Maze,
    compass: &Compass,
    cell: CellId,
    facing: Direction,
) -> Option<(Direction, CellId)> {
    let mut direction = compass.rightmost(facing);
    for _ in 0..compass.len() {
        if let Some(next) = maze
            .neighbor(cell, direction)
            .filter(|_| !maze.has_wall(cell, direction))
        {
            return Some((direction, next));
        }
        direction = compass.turn_left(direction);
    }
    None
}

fn fully_walled(maze: &Maze, compass: &Compass, cell: CellId) -> bool {
    compass.directions.iter().all(|&d| maze.has_wall(cell, d))
}

fn step_onto(maze: &Maze, cell: CellId, visited: &mut BitSet) {
    maze.draw_footprint(cell);
    visited.insert(cell);
}

impl MazeSolver for WallFollower {
    fn solve(&mut self, maze: &mut Maze) -> Result<(), MazeError> {
        self.solved = false;
        self.explored = 0;
        let (entrance, exit) = endpoints(maze)?;
        let compass = maze.compass();

        let mut visited = BitSet::with_capacity(maze.len());
        let mut tunnels = vec![TunnelState::default(); maze.tunnel_count()];
        let mut current = entrance;
        let mut facing = initial_facing(maze, entrance);
        let mut steps = 0;
        tracing::debug!(
            "[wall follower] entering at {:?} facing {}",
            maze.coord(entrance),
            facing
        );
        step_onto(maze, current, &mut visited);

        while current != exit {
            if self.config.max_steps.is_some_and(|limit| steps >= limit) {
                self.explored = visited.len();
                return Err(MazeError::StepBudgetExhausted { steps });
            }
            steps += 1;

            let tunnel = maze
                .tunnel(current)
                .zip(maze.tunnel_index(current))
                .filter(|&(_, idx)| !tunnels[idx].disabled);
            if let Some((partner, idx)) = tunnel {
                let mouth = current;
                let state = &mut tunnels[idx];
                if fully_walled(maze, compass, current) {
                    tracing::debug!(
                        "[wall follower] dead-end tunnel mouth at {:?}, closing it",
                        maze.coord(current)
                    );
                    state.disabled = true;
                    current = partner;
                    step_onto(maze, current, &mut visited);
                } else if let Some(entry_facing) = state.entry_facing {
                    if let Some((direction, next)) =
                        self.recover(maze, compass, current, facing, &visited)
                    {
                        current = next;
                        facing = direction;
                        step_onto(maze, current, &mut visited);
                        continue;
                    }
                    current = partner;
                    facing = entry_facing;
                    state.crossings += 1;
                    step_onto(maze, current, &mut visited);
                } else {
                    state.entry_facing = Some(facing);
                    state.crossings += 1;
                    current = partner;
                    step_onto(maze, current, &mut visited);
                }

                if state.crossings >= self.config.tunnel_access_budget {
                    tracing::debug!(
                        "[wall follower] tunnel at {:?} crossed {} times, closing it",
                        maze.coord(current),
                        state.crossings
                    );
                    state.disabled = true;
                }
                if current == exit {
                    continue;
                }
                // Sealed far mouth: go back and close the pair
                if fully_walled(maze, compass, current) {
                    tracing::debug!(
                        "[wall follower] landed in sealed tunnel mouth at {:?}, going back",
                        maze.coord(current)
                    );
                    state.disabled = true;
                    current = mouth;
                    step_onto(maze, current, &mut visited);
                }
            }

            let Some((direction, next)) = scan(maze, compass, current, facing) else {
                let (row, col) = maze.coord(current);
                self.explored = visited.len();
                return Err(MazeError::Stuck { row, col });
            };
            current = next;
            facing = direction;
            step_onto(maze, current, &mut visited);
        }

        self.solved = true;
        self.explored = visited.len();
        tracing::debug!(
            "[wall follower] reached the exit after {} steps, {} cells explored",
            steps,
            self.explored
        );
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
    use crate::generators::{Generator, MazeGenerator, RecursiveBacktracker, generate_maze};
    use crate::maze::Topology;

    fn with_budget(max_steps: usize) -> WallFollower {
        WallFollower::with_config(WallFollowerConfig {
            max_steps: Some(max_steps),
            ..Default::default()
        })
    }

    #[test]
    fn test_initial_facing() {
        let maze = Maze::rectangular(3, 3);
        assert_eq!(initial_facing(&maze, 0), Direction::East);
        assert_eq!(initial_facing(&maze, 6), Direction::SOUTH);
        assert_eq!(initial_facing(&maze, 8), Direction::West);
        // Interior cells face the first direction
        assert_eq!(initial_facing(&maze, 4), Direction::East);
    }

    #[test]
    fn test_scan_prefers_right() {
        let mut maze = Maze::rectangular(3, 3);
        let center = 4;
        for d in [Direction::East, Direction::NORTH, Direction::SOUTH] {
            maze.carve(center, d);
        }
        let compass = maze.compass();
        assert_eq!(
            scan(&maze, compass, center, Direction::NORTH).map(|(d, _)| d),
            Some(Direction::East)
        );
        assert_eq!(
            scan(&maze, compass, center, Direction::East).map(|(d, _)| d),
            Some(Direction::SOUTH)
        );
        // West is walled, so straight on
        assert_eq!(
            scan(&maze, compass, center, Direction::SOUTH).map(|(d, _)| d),
            Some(Direction::SOUTH)
        );
    }

    #[test]
    fn test_hex_scan_starts_two_turns_right() {
        let mut maze = Maze::hexagonal(3, 3);
        let center = maze.cell_at((1, 1)).unwrap();
        maze.carve(center, Direction::SouthEast);
        maze.carve(center, Direction::SouthWest);
        let compass = maze.compass();
        assert_eq!(
            scan(&maze, compass, center, Direction::East).map(|(d, _)| d),
            Some(Direction::SouthWest)
        );
    }

    #[test]
    fn test_two_by_two() {
        for seed in 0..10 {
            let mut maze = Maze::rectangular(2, 2);
            maze.set_entrance((0, 0)).unwrap();
            maze.set_exit((1, 1)).unwrap();
            RecursiveBacktracker::new(Some(seed))
                .generate(&mut maze)
                .unwrap();
            let mut solver = with_budget(4 * maze.len());
            solver.solve(&mut maze).unwrap();
            assert!(solver.is_solved());
        }
    }

    #[test]
    fn test_hex_maze() {
        for generator in Generator::ALL {
            let mut maze = Maze::new(Topology::Hexagonal, 9, 7);
            maze.set_entrance((0, 3)).unwrap();
            maze.set_exit((8, 0)).unwrap();
            generate_maze(&mut maze, generator, Some(11)).unwrap();
            let mut solver = WallFollower::new();
            solver.solve(&mut maze).unwrap();
            assert!(solver.is_solved());
            assert!(solver.cells_explored() <= maze.len());
        }
    }

    #[test]
    fn test_crosses_tunnel() {
        let mut maze = Maze::with_tunnels(1, 4);
        maze.add_tunnel((0, 1), (0, 2)).unwrap();
        maze.carve(0, Direction::East);
        maze.carve(2, Direction::East);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((0, 3)).unwrap();
        let mut solver = with_budget(16);
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 4);
    }

    #[test]
    fn test_dead_end_tunnel_mouth() {
        let mut maze = Maze::with_tunnels(1, 3);
        maze.add_tunnel((0, 0), (0, 2)).unwrap();
        maze.carve(1, Direction::East);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((0, 1)).unwrap();
        let mut solver = with_budget(16);
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 3);
    }

    #[test]
    fn test_stuck_without_open_side() {
        let mut maze = Maze::rectangular(2, 2);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((1, 1)).unwrap();
        let mut solver = WallFollower::new();
        assert_eq!(
            solver.solve(&mut maze),
            Err(MazeError::Stuck { row: 0, col: 0 })
        );
        assert!(!solver.is_solved());
        assert_eq!(solver.cells_explored(), 1);
    }

    #[test]
    fn test_step_budget() {
        // Disconnected halves: the walk circles its own half forever
        let mut maze = Maze::rectangular(1, 4);
        maze.carve(0, Direction::East);
        maze.carve(2, Direction::East);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((0, 3)).unwrap();
        let mut solver = with_budget(10);
        assert_eq!(
            solver.solve(&mut maze),
            Err(MazeError::StepBudgetExhausted { steps: 10 })
        );
        assert_eq!(solver.cells_explored(), 2);
    }

    #[test]
    fn test_turns_back_from_sealed_tunnel_mouth() {
        // The far mouth (0, 3) has no open side
        let mut maze = Maze::with_tunnels(1, 4);
        maze.add_tunnel((0, 1), (0, 3)).unwrap();
        maze.carve(0, Direction::East);
        maze.carve(1, Direction::East);
        maze.set_entrance((0, 0)).unwrap();
        maze.set_exit((0, 2)).unwrap();
        assert!(maze.is_perfect());
        let mut solver = with_budget(16);
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 4);
    }

    #[test]
    fn test_recovery_checks_every_side() {
        // Back at mouth (2, 0) facing west, the only unexplored passage is south
        let mut maze = Maze::with_tunnels(3, 2);
        maze.add_tunnel((1, 1), (2, 0)).unwrap();
        for (cell, direction) in [
            (0, Direction::NORTH),
            (1, Direction::NORTH),
            (2, Direction::NORTH),
            (4, Direction::East),
        ] {
            maze.carve(cell, direction);
        }
        maze.set_entrance((0, 1)).unwrap();
        maze.set_exit((0, 0)).unwrap();
        assert!(maze.is_perfect());
        let mut solver = with_budget(100);
        solver.solve(&mut maze).unwrap();
        assert!(solver.is_solved());
        assert_eq!(solver.cells_explored(), 6);
    }

    #[test]
    fn test_generated_tunnel_mazes() {
        for size in [3, 5, 8, 12] {
            for seed in 0..50 {
                let mut maze = Maze::with_tunnels(size, size);
                maze.add_tunnel((0, size - 1), (size - 1, 0)).unwrap();
                maze.add_tunnel((size / 2, size / 2), (size - 1, size / 2))
                    .unwrap();
                maze.set_entrance((0, 0)).unwrap();
                maze.set_exit((size - 1, size - 1)).unwrap();
                generate_maze(&mut maze, Generator::RecurBacktrack, Some(seed)).unwrap();
                assert!(maze.is_perfect());
                let mut solver = with_budget(200 * maze.len());
                assert_eq!(solver.solve(&mut maze), Ok(()), "size {size}, seed {seed}");
                assert!(solver.is_solved());
            }
        }
    }
}
