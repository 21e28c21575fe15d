use std::fmt;

use super::cell::Direction;
use Direction::*;

/// Shape of the cell graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    Rectangular,
    /// Rectangular, plus symmetric teleport links between pairs of cells.
    Tunnel,
    Hexagonal,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Rectangular => write!(f, "rectangular"),
            Topology::Tunnel => write!(f, "tunnel"),
            Topology::Hexagonal => write!(f, "hexagonal"),
        }
    }
}

/// Direction alphabet and rotation tables of one topology.
///
/// Tables are indexed by [`Direction::index`]. Slots outside the alphabet map to themselves
/// and are never looked up.
#[derive(Debug)]
pub struct Compass {
    pub directions: &'static [Direction],
    right: [Direction; Direction::COUNT],
    left: [Direction; Direction::COUNT],
    rightmost: [Direction; Direction::COUNT],
}

const SQUARE: Compass = Compass {
    directions: &[East, NorthWest, West, SouthEast],
    right: [SouthEast, NorthEast, East, NorthWest, SouthWest, West],
    left: [NorthWest, NorthEast, West, SouthEast, SouthWest, East],
    rightmost: [SouthEast, NorthEast, East, NorthWest, SouthWest, West],
};

const HEX: Compass = Compass {
    directions: &[East, NorthEast, NorthWest, West, SouthWest, SouthEast],
    right: [SouthEast, East, NorthEast, NorthWest, West, SouthWest],
    left: [NorthEast, NorthWest, West, SouthWest, SouthEast, East],
    // Two clockwise steps: the sharpest turn that is not a reversal.
    rightmost: [SouthWest, SouthEast, East, NorthEast, NorthWest, West],
};

impl Compass {
    /// One step clockwise.
    pub fn turn_right(&self, direction: Direction) -> Direction {
        self.right[direction.index()]
    }

    /// One step counter-clockwise.
    pub fn turn_left(&self, direction: Direction) -> Direction {
        self.left[direction.index()]
    }

    /// Where a right-hand scan starts when facing `direction`.
    pub fn rightmost(&self, direction: Direction) -> Direction {
        self.rightmost[direction.index()]
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.directions.contains(&direction)
    }
}

impl Topology {
    pub fn compass(self) -> &'static Compass {
        match self {
            Topology::Rectangular | Topology::Tunnel => &SQUARE,
            Topology::Hexagonal => &HEX,
        }
    }

    pub fn directions(self) -> &'static [Direction] {
        self.compass().directions
    }

    pub fn direction_count(self) -> usize {
        self.compass().len()
    }

    /// Row and column offset of the neighbour in `direction` of a cell on `row`, before
    /// bounds checking.
    ///
    /// Hex grids use odd-row offset layout, with north toward increasing rows.
    pub(crate) fn offset(self, row: usize, direction: Direction) -> (isize, isize) {
        match self {
            Topology::Rectangular | Topology::Tunnel => match direction {
                East => (0, 1),
                NorthWest => (1, 0),
                West => (0, -1),
                SouthEast => (-1, 0),
                NorthEast | SouthWest => (0, 0),
            },
            Topology::Hexagonal => {
                let shift = if row % 2 == 0 { 0 } else { 1 };
                match direction {
                    East => (0, 1),
                    West => (0, -1),
                    NorthEast => (1, shift),
                    NorthWest => (1, shift - 1),
                    SouthWest => (-1, shift - 1),
                    SouthEast => (-1, shift),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_are_inverse() {
        for topology in [Topology::Rectangular, Topology::Hexagonal] {
            let compass = topology.compass();
            for &d in compass.directions {
                assert_eq!(compass.turn_left(compass.turn_right(d)), d);
                assert_eq!(compass.turn_right(compass.turn_left(d)), d);
                assert!(compass.contains(compass.turn_right(d)));
            }
        }
    }

    #[test]
    fn test_full_rotation_returns_home() {
        for topology in [Topology::Tunnel, Topology::Hexagonal] {
            let compass = topology.compass();
            for &d in compass.directions {
                let mut turned = d;
                for _ in 0..compass.len() {
                    turned = compass.turn_right(turned);
                }
                assert_eq!(turned, d);
            }
        }
    }

    #[test]
    fn test_square_rightmost_is_a_right_turn() {
        let compass = Topology::Rectangular.compass();
        assert_eq!(compass.rightmost(East), Direction::SOUTH);
        assert_eq!(compass.rightmost(Direction::NORTH), East);
        assert_eq!(compass.rightmost(West), Direction::NORTH);
        assert_eq!(compass.rightmost(Direction::SOUTH), West);
    }

    #[test]
    fn test_hex_rightmost_is_two_right_turns() {
        let compass = Topology::Hexagonal.compass();
        for &d in compass.directions {
            assert_eq!(compass.rightmost(d), compass.turn_right(compass.turn_right(d)));
        }
    }

    #[test]
    fn test_hex_offsets_are_symmetric() {
        for row in 1..5 {
            for &d in Topology::Hexagonal.directions() {
                let (dr, dc) = Topology::Hexagonal.offset(row, d);
                let there = (row as isize + dr) as usize;
                let (br, bc) = Topology::Hexagonal.offset(there, d.opposite());
                assert_eq!((dr + br, dc + bc), (0, 0), "{d} from row {row}");
            }
        }
    }
}
