use std::sync::mpsc::Sender;

use super::cell::{Cell, CellId, Coord, Direction, Wall};
use super::topology::Topology;

/// Changes a grid reports to whoever listens on its channel, e.g. a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    Initial {
        rows: usize,
        cols: usize,
        topology: Topology,
    },
    WallRemoved {
        coord: Coord,
        direction: Direction,
    },
    Footprint {
        coord: Coord,
    },
}

/// Cell and wall arenas of a maze, with neighbour links already wired.
pub struct Grid {
    pub(crate) cells: Box<[Cell]>,
    pub(crate) walls: Vec<Wall>,
    rows: usize,
    cols: usize,
    topology: Topology,
    sender: Option<Sender<GridEvent>>,
}

impl Grid {
    pub fn new(
        rows: usize,
        cols: usize,
        topology: Topology,
        sender: Option<Sender<GridEvent>>,
    ) -> Self {
        let mut cells = (0..rows * cols)
            .map(|idx| Cell::new((idx / cols, idx % cols)))
            .collect::<Box<[_]>>();
        let mut walls = Vec::new();

        for idx in 0..cells.len() {
            let (row, col) = cells[idx].coord;
            for &direction in topology.directions() {
                let (dr, dc) = topology.offset(row, direction);
                let neighbor = row
                    .checked_add_signed(dr)
                    .zip(col.checked_add_signed(dc))
                    .filter(|&(r, c)| r < rows && c < cols)
                    .map(|(r, c)| r * cols + c);
                cells[idx].neighbors[direction.index()] = neighbor;

                // The neighbour may already own the wall on its side of this edge
                if cells[idx].walls[direction.index()].is_none() {
                    let wall = walls.len();
                    walls.push(Wall::default());
                    cells[idx].walls[direction.index()] = Some(wall);
                    if let Some(n) = neighbor {
                        cells[n].walls[direction.opposite().index()] = Some(wall);
                    }
                }
            }
        }

        let mut grid = Grid {
            cells,
            walls,
            rows,
            cols,
            topology,
            sender: None,
        };
        if let Some(sender) = sender {
            grid.set_sender(sender);
        }
        grid
    }

    /// Start reporting changes to `sender`, beginning with an `Initial` event.
    pub fn set_sender(&mut self, sender: Sender<GridEvent>) {
        let _ = sender.send(GridEvent::Initial {
            rows: self.rows,
            cols: self.cols,
            topology: self.topology,
        });
        self.sender = Some(sender);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn ravel_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn cell_at(&self, (row, col): Coord) -> Option<CellId> {
        (row < self.rows && col < self.cols).then(|| self.ravel_index(row, col))
    }

    /// Whether the wall on `direction` side of `cell` is standing. A side without a wall
    /// slot counts as walled.
    pub fn has_wall(&self, cell: CellId, direction: Direction) -> bool {
        self.cells[cell]
            .wall(direction)
            .is_none_or(|wall| self.walls[wall].present)
    }

    /// Knock down the wall between `cell` and its neighbour in `direction`.
    ///
    /// Returns `true` if a wall was removed, `false` if it was already open or the side is
    /// on the boundary.
    pub fn remove_wall(&mut self, cell: CellId, direction: Direction) -> bool {
        let target = &self.cells[cell];
        let (Some(wall), Some(_)) = (target.wall(direction), target.neighbor(direction)) else {
            return false;
        };
        if !self.walls[wall].present {
            return false;
        }
        self.walls[wall].present = false;
        if let Some(sender) = &self.sender {
            let _ = sender.send(GridEvent::WallRemoved {
                coord: target.coord,
                direction,
            });
        }
        true
    }

    pub fn footprint(&self, cell: CellId) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(GridEvent::Footprint {
                coord: self.cells[cell].coord,
            });
        }
    }
}

impl std::ops::Index<CellId> for Grid {
    type Output = Cell;

    fn index(&self, index: CellId) -> &Self::Output {
        &self.cells[index]
    }
}
