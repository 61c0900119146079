/// Piece state and move-direction geometry.
/// Pieces are plain values owned by the board; operations that mutate the
/// board live in `move_gen` and take the board explicitly.
use crate::error::{CheckersError, CheckersResult};
use crate::types::*;

/// A checkers piece: where it stands, whose it is, and whether it is crowned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) position: Position,
    color: Color,
    king: bool,
}

impl Piece {
    /// Creates an uncrowned piece.
    pub const fn new(position: Position, color: Color) -> Self {
        Self {
            position,
            color,
            king: false,
        }
    }

    /// Creates a crowned piece.
    pub const fn new_king(position: Position, color: Color) -> Self {
        Self {
            position,
            color,
            king: true,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn is_king(&self) -> bool {
        self.king
    }

    /// Returns the directions this piece may currently move in.
    pub const fn legal_directions(&self) -> &'static [Direction] {
        if self.king {
            &Direction::ALL
        } else {
            self.color.forward_directions()
        }
    }

    /// Returns true if `direction` is in this piece's direction set.
    pub fn is_direction_legal(&self, direction: Direction) -> bool {
        self.legal_directions().contains(&direction)
    }

    /// Returns true if a step of `kind` in `direction` stays on the board.
    /// For a jump both the captured cell and the landing cell must be on it.
    pub fn is_within_bounds(&self, direction: Direction, kind: StepKind) -> bool {
        (1..=kind.distance()).all(|steps| self.position.offset(direction, steps).is_some())
    }

    /// Checks bounds and then direction legality for a single step.
    /// Bounds come first so a step off the edge always reports as out of bounds.
    pub fn check_step(&self, direction: Direction, kind: StepKind) -> CheckersResult<()> {
        if !self.is_within_bounds(direction, kind) {
            return Err(CheckersError::OutOfBounds {
                from: self.position,
                direction,
                kind,
            });
        }
        if !self.is_direction_legal(direction) {
            return Err(CheckersError::InvalidDirection {
                direction,
                color: self.color,
                rank: if self.king { "king" } else { "man" },
            });
        }
        Ok(())
    }

    /// Crowns the piece if it stands on its promotion row.
    /// Returns true only when this call performed the promotion.
    pub fn maybe_promote(&mut self) -> bool {
        if !self.king && self.position.row() == self.color.promotion_row() {
            self.king = true;
            true
        } else {
            false
        }
    }
}
