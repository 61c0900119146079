//! Error types for the checkers engine
//!
//! Every rule violation and every malformed request surfaces as a
//! [`CheckersError`]; none of them are fatal to a game in progress.

use crate::types::{Color, Direction, Position, StepKind};
use thiserror::Error;

/// Broad classes of failure, as seen by whoever drives the turn loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The direction is not one the piece may move in.
    InvalidDirection,
    /// A destination or captured cell lies off the board.
    OutOfBounds,
    /// The step is geometrically fine but blocked or has nothing to capture.
    IllegalMove,
    /// The request itself is malformed or names the wrong piece.
    Input,
    /// The game cannot accept further moves or undo requests.
    Game,
}

/// Errors that can occur while validating or applying moves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    /// Direction not available to a piece of this color and rank
    #[error("Invalid direction: {direction} is not available to a {color} {rank}")]
    InvalidDirection {
        direction: Direction,
        color: Color,
        rank: &'static str,
    },

    /// Slide or jump would leave the board
    #[error("Out of bounds: {kind:?} {direction} from {from}")]
    OutOfBounds {
        from: Position,
        direction: Direction,
        kind: StepKind,
    },

    /// Slide blocked and no capture possible, or a jump-chain step failed
    #[error("Illegal move: step {step} ({direction} from {from}) {reason}")]
    IllegalMove {
        from: Position,
        direction: Direction,
        step: usize,
        reason: &'static str,
    },

    /// Raw row/column outside the board
    #[error("Invalid coordinate ({row}, {col}) (must be 0-7)")]
    InvalidCoordinate { row: i32, col: i32 },

    #[error("Malformed coordinate: {0:?} (expected a letter a-h followed by a digit 1-8)")]
    MalformedCoordinate(String),

    #[error("Unknown direction: {0:?} (expected ur, ul, dr or dl)")]
    UnknownDirection(String),

    #[error("No moves given")]
    EmptyMoveSequence,

    #[error("No piece at {0}")]
    NoPiece(Position),

    #[error("Piece at {position} is not {expected}")]
    WrongColor { position: Position, expected: Color },

    /// Move attempted after a winner was decided
    #[error("Game is over: {winner} won")]
    GameOver { winner: Color },

    #[error("Nothing to undo")]
    NothingToUndo,
}

impl CheckersError {
    /// Maps this error onto its broad class.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            CheckersError::InvalidDirection { .. } => ErrorKind::InvalidDirection,
            CheckersError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            CheckersError::IllegalMove { .. } => ErrorKind::IllegalMove,
            CheckersError::InvalidCoordinate { .. }
            | CheckersError::MalformedCoordinate(_)
            | CheckersError::UnknownDirection(_)
            | CheckersError::EmptyMoveSequence
            | CheckersError::NoPiece(_)
            | CheckersError::WrongColor { .. } => ErrorKind::Input,
            CheckersError::GameOver { .. } | CheckersError::NothingToUndo => ErrorKind::Game,
        }
    }
}

/// Result type alias for checkers operations
pub type CheckersResult<T> = Result<T, CheckersError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let pos = Position::new(0, 0).unwrap();
        assert_eq!(CheckersError::NoPiece(pos).kind(), ErrorKind::Input);
        assert_eq!(CheckersError::EmptyMoveSequence.kind(), ErrorKind::Input);
        assert_eq!(
            CheckersError::OutOfBounds {
                from: pos,
                direction: Direction::UpLeft,
                kind: StepKind::Slide,
            }
            .kind(),
            ErrorKind::OutOfBounds
        );
    }

    #[test]
    fn test_error_messages() {
        let pos = Position::new(2, 2).unwrap();
        assert_eq!(CheckersError::NoPiece(pos).to_string(), "No piece at c3");
        assert_eq!(
            CheckersError::WrongColor {
                position: pos,
                expected: Color::Black
            }
            .to_string(),
            "Piece at c3 is not Black"
        );
    }
}
