use std::fmt;

/// Index of a cell in the maze's row-major arena.
pub type CellId = usize;

/// Index of a wall in the maze's wall arena.
pub type WallId = usize;

/// Row and column of a cell.
pub type Coord = (usize, usize);

/// The six neighbour slots every cell carries, in counter-clockwise order.
///
/// Rectangular mazes only use four of them: `East`, `NorthWest` (north), `West` and
/// `SouthEast` (south). Sharing one layout keeps the per-cell arrays the same size for
/// both topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    NorthWest = 2,
    West = 3,
    SouthWest = 4,
    SouthEast = 5,
}

impl Direction {
    pub const COUNT: usize = 6;
    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];
    /// North on a rectangular grid.
    pub const NORTH: Direction = Direction::NorthWest;
    /// South on a rectangular grid.
    pub const SOUTH: Direction = Direction::SouthEast;

    const OPPOSITE: [Direction; Direction::COUNT] = [
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        Self::OPPOSITE[self.index()]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::East => write!(f, "east"),
            Direction::NorthEast => write!(f, "north-east"),
            Direction::NorthWest => write!(f, "north-west"),
            Direction::West => write!(f, "west"),
            Direction::SouthWest => write!(f, "south-west"),
            Direction::SouthEast => write!(f, "south-east"),
        }
    }
}

/// A wall between two cells, or on the outer boundary of the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub present: bool,
}

impl Default for Wall {
    fn default() -> Self {
        Wall { present: true }
    }
}

/// A single maze cell. Links to neighbours, walls and the tunnel partner are arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) coord: Coord,
    pub(crate) neighbors: [Option<CellId>; Direction::COUNT],
    pub(crate) walls: [Option<WallId>; Direction::COUNT],
    pub(crate) tunnel: Option<CellId>,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Cell {
            coord,
            neighbors: [None; Direction::COUNT],
            walls: [None; Direction::COUNT],
            tunnel: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    pub fn wall(&self, direction: Direction) -> Option<WallId> {
        self.walls[direction.index()]
    }

    pub fn tunnel(&self) -> Option<CellId> {
        self.tunnel
    }
}
