pub mod cell;
pub mod grid;
pub mod topology;

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use bit_set::BitSet;
use rand::Rng;

use crate::error::MazeError;
pub use cell::{Cell, CellId, Coord, Direction, Wall};
pub use grid::{Grid, GridEvent};
pub use topology::{Compass, Topology};

/// A grid of cells separated by removable walls, with optional entrance, exit and tunnels.
pub struct Maze {
    grid: Grid,
    entrance: Option<CellId>,
    exit: Option<CellId>,
    tunnels: Vec<(CellId, CellId)>,
}

impl Maze {
    /// Creates a maze of the given shape with every wall standing.
    /// Zero rows or columns give an empty maze.
    pub fn new(topology: Topology, rows: usize, cols: usize) -> Self {
        Maze {
            grid: Grid::new(rows, cols, topology, None),
            entrance: None,
            exit: None,
            tunnels: Vec::new(),
        }
    }

    pub fn rectangular(rows: usize, cols: usize) -> Self {
        Self::new(Topology::Rectangular, rows, cols)
    }

    pub fn hexagonal(rows: usize, cols: usize) -> Self {
        Self::new(Topology::Hexagonal, rows, cols)
    }

    /// A rectangular maze that accepts tunnels through [`Maze::add_tunnel`].
    pub fn with_tunnels(rows: usize, cols: usize) -> Self {
        Self::new(Topology::Tunnel, rows, cols)
    }

    /// Report wall removals and footprints to `sender`.
    pub fn with_events(mut self, sender: Sender<GridEvent>) -> Self {
        self.grid.set_sender(sender);
        self
    }

    fn checked_cell(&self, (row, col): Coord) -> Result<CellId, MazeError> {
        self.grid
            .cell_at((row, col))
            .ok_or(MazeError::OutOfBounds { row, col })
    }

    pub fn set_entrance(&mut self, coord: Coord) -> Result<CellId, MazeError> {
        let cell = self.checked_cell(coord)?;
        self.entrance = Some(cell);
        Ok(cell)
    }

    pub fn set_exit(&mut self, coord: Coord) -> Result<CellId, MazeError> {
        let cell = self.checked_cell(coord)?;
        self.exit = Some(cell);
        Ok(cell)
    }

    /// Link two cells with a tunnel. Walking into either mouth comes out of the other.
    ///
    /// Only tunnel mazes accept tunnels, and a cell can be the mouth of at most one.
    pub fn add_tunnel(&mut self, from: Coord, to: Coord) -> Result<(), MazeError> {
        if self.topology() != Topology::Tunnel {
            return Err(MazeError::TopologyMismatch(self.topology()));
        }
        let a = self.checked_cell(from)?;
        let b = self.checked_cell(to)?;
        if a == b || self.tunnel(a).is_some() || self.tunnel(b).is_some() {
            return Err(MazeError::InvalidTunnel {
                from_row: from.0,
                from_col: from.1,
                to_row: to.0,
                to_col: to.1,
            });
        }
        self.grid.cells[a].tunnel = Some(b);
        self.grid.cells[b].tunnel = Some(a);
        self.tunnels.push((a, b));
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn topology(&self) -> Topology {
        self.grid.topology()
    }

    pub fn compass(&self) -> &'static Compass {
        self.topology().compass()
    }

    pub fn direction_count(&self) -> usize {
        self.topology().direction_count()
    }

    pub fn cell_at(&self, coord: Coord) -> Option<CellId> {
        self.grid.cell_at(coord)
    }

    pub fn cell(&self, cell: CellId) -> &Cell {
        &self.grid[cell]
    }

    pub fn coord(&self, cell: CellId) -> Coord {
        self.grid[cell].coord()
    }

    pub fn neighbor(&self, cell: CellId, direction: Direction) -> Option<CellId> {
        self.grid[cell].neighbor(direction)
    }

    /// Neighbours of `cell` in the topology's direction order, regardless of walls.
    pub fn neighbors(&self, cell: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        self.topology()
            .directions()
            .iter()
            .filter_map(move |&d| self.neighbor(cell, d).map(|n| (d, n)))
    }

    /// Neighbours reachable from `cell` without crossing a wall.
    pub fn open_neighbors(&self, cell: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        self.neighbors(cell)
            .filter(move |&(d, _)| !self.grid.has_wall(cell, d))
    }

    pub fn has_wall(&self, cell: CellId, direction: Direction) -> bool {
        self.grid.has_wall(cell, direction)
    }

    /// Whether there is a neighbour in `direction` and no wall in between.
    pub fn is_open(&self, cell: CellId, direction: Direction) -> bool {
        self.neighbor(cell, direction).is_some() && !self.has_wall(cell, direction)
    }

    pub fn tunnel(&self, cell: CellId) -> Option<CellId> {
        self.grid[cell].tunnel()
    }

    pub fn tunnel_pairs(&self) -> &[(CellId, CellId)] {
        &self.tunnels
    }

    pub fn tunnel_count(&self) -> usize {
        self.tunnels.len()
    }

    /// Index of the pair `cell` is a mouth of, in [`Maze::tunnel_pairs`] order.
    pub fn tunnel_index(&self, cell: CellId) -> Option<usize> {
        self.tunnels.iter().position(|&(a, b)| a == cell || b == cell)
    }

    pub fn entrance(&self) -> Option<CellId> {
        self.entrance
    }

    pub fn exit(&self) -> Option<CellId> {
        self.exit
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<CellId> {
        (!self.is_empty()).then(|| rng.random_range(0..self.len()))
    }

    /// Knock down the wall between `cell` and its neighbour in `direction`.
    /// Returns `false` on the boundary or when the wall is already gone.
    pub fn carve(&mut self, cell: CellId, direction: Direction) -> bool {
        self.grid.remove_wall(cell, direction)
    }

    pub fn draw_footprint(&self, cell: CellId) {
        self.grid.footprint(cell);
    }

    /// Number of walls that have been carved away.
    pub fn open_wall_count(&self) -> usize {
        self.grid.walls.iter().filter(|w| !w.present).count()
    }

    /// Cells reachable from `start` through open walls, and through tunnels if asked.
    fn reachable(&self, start: CellId, through_tunnels: bool, seen: &mut BitSet) {
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(cell) = queue.pop_front() {
            let tunnel = self.tunnel(cell).filter(|_| through_tunnels);
            for next in self.open_neighbors(cell).map(|(_, n)| n).chain(tunnel) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    /// Whether the carved passages form a perfect maze: no cycles through walls, and every
    /// cell reachable from every other one.
    ///
    /// Tunnels count as passages for reachability only, so a generator may use them to join
    /// otherwise separate parts of the maze.
    pub fn is_perfect(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut seen = BitSet::with_capacity(self.len());
        let mut components = 0;
        for cell in 0..self.len() {
            if !seen.contains(cell) {
                components += 1;
                self.reachable(cell, false, &mut seen);
            }
        }
        let acyclic = self.open_wall_count() + components == self.len();

        let mut seen = BitSet::with_capacity(self.len());
        self.reachable(0, true, &mut seen);
        acyclic && seen.len() == self.len()
    }
}
