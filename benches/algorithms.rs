use criterion::{Criterion, criterion_group, criterion_main};
use mazekit::{Generator, Maze, Solver, Topology, generate_maze, solve_maze};

const SIZE: usize = 32;

fn fresh(topology: Topology) -> Maze {
    let mut maze = Maze::new(topology, SIZE, SIZE);
    maze.set_entrance((0, 0)).unwrap();
    maze.set_exit((SIZE - 1, SIZE - 1)).unwrap();
    maze
}

fn bench_generators(c: &mut Criterion) {
    for topology in [Topology::Rectangular, Topology::Hexagonal] {
        for generator in Generator::ALL {
            c.bench_function(&format!("{generator} {topology} {SIZE}"), |b| {
                b.iter(|| {
                    let mut maze = fresh(topology);
                    generate_maze(&mut maze, generator, Some(0)).unwrap();
                    maze
                })
            });
        }
    }
}

fn bench_solvers(c: &mut Criterion) {
    for topology in [Topology::Rectangular, Topology::Hexagonal] {
        let mut maze = fresh(topology);
        generate_maze(&mut maze, Generator::RecurBacktrack, Some(0)).unwrap();
        for solver in Solver::ALL {
            c.bench_function(&format!("{solver} {topology} {SIZE}"), |b| {
                b.iter(|| solve_maze(&mut maze, solver, Some(0)).unwrap())
            });
        }
    }
}

criterion_group!(benches, bench_generators, bench_solvers);
criterion_main!(benches);
