use thiserror::Error;

use crate::maze::Topology;

/// Everything that can stop a generator or solver from running to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("the maze has no cells")]
    EmptyGrid,
    #[error("the maze has no entrance")]
    MissingEntrance,
    #[error("the maze has no exit")]
    MissingExit,
    #[error("cell ({row}, {col}) is outside the maze")]
    OutOfBounds { row: usize, col: usize },
    #[error("cannot link ({from_row}, {from_col}) and ({to_row}, {to_col}) with a tunnel")]
    InvalidTunnel {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },
    #[error("operation not supported on a {0} maze")]
    TopologyMismatch(Topology),
    #[error("no open side to move through at ({row}, {col})")]
    Stuck { row: usize, col: usize },
    #[error("gave up after {steps} steps without reaching the exit")]
    StepBudgetExhausted { steps: usize },
    #[error("the exit cannot be reached from the entrance")]
    Unreachable,
}
