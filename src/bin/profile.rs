use std::str::FromStr;
use std::time::Instant;

use mazekit::solvers::WallFollowerConfig;
use mazekit::{Generator, Maze, MazeError, Solver, Topology, generate_maze, solve_maze_with};
use tracing::Level;

/// Tunnels can trap the wall follower, so it gets a generous step budget.
const STEPS_PER_CELL: usize = 16;

fn build(topology: Topology, size: usize) -> Result<Maze, MazeError> {
    let mut maze = Maze::new(topology, size, size);
    maze.set_entrance((0, 0))?;
    maze.set_exit((size - 1, size - 1))?;
    if topology == Topology::Tunnel && size > 2 {
        maze.add_tunnel((0, size - 1), (size - 1, 0))?;
        maze.add_tunnel((size / 2, size / 2), (size - 1, size / 2))?;
    }
    Ok(maze)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("MAZEKIT_LOG")
        .ok()
        .and_then(|s| Level::from_str(&s).ok())
        .unwrap_or(Level::INFO);
    let file_appender = tracing_appender::rolling::never(".", "mazekit-profile.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
    let size = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&s| s > 0)
        .unwrap_or(u8::MAX as usize);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    tracing::info!(
        "[profile] {} iterations on {}x{} mazes, seed {:?}",
        num_iters,
        size,
        size,
        seed
    );
    for iteration in 0..num_iters {
        for topology in [Topology::Rectangular, Topology::Tunnel, Topology::Hexagonal] {
            for generator in Generator::ALL {
                let mut maze = build(topology, size)?;
                let started = Instant::now();
                generate_maze(&mut maze, generator, seed)?;
                tracing::info!(
                    "[profile] #{} {} {} generated in {:?}",
                    iteration,
                    topology,
                    generator,
                    started.elapsed()
                );

                for solver in Solver::ALL {
                    let budget = WallFollowerConfig {
                        max_steps: Some(maze.len() * STEPS_PER_CELL),
                        ..Default::default()
                    };
                    let started = Instant::now();
                    match solve_maze_with(&mut maze, solver, seed, budget) {
                        Ok(explored) => tracing::info!(
                            "[profile] #{} {} solved in {:?}, {} cells explored",
                            iteration,
                            solver,
                            started.elapsed(),
                            explored
                        ),
                        Err(e) => tracing::warn!(
                            "[profile] #{} {} on {} {} maze failed: {}",
                            iteration,
                            solver,
                            generator,
                            topology,
                            e
                        ),
                    }
                }
            }
        }
    }
    Ok(())
}
