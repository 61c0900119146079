use crate::board::Board;
use crate::error::{CheckersError, CheckersResult};
use crate::types::{Color, Direction, MoveRequest, Position, StepKind};
use tracing::trace;

/// What an applied move sequence did to the board.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    /// Captured pieces' former positions, in jump order.
    pub captured: Vec<Position>,
    /// True if this sequence crowned the piece.
    pub promoted: bool,
}

/// Slides the piece at `from` one cell in `direction`.
///
/// Returns the new position, or None without touching the board if the
/// destination is off the board or occupied. Direction legality is the
/// caller's concern.
pub fn try_slide(board: &mut Board, from: Position, direction: Direction) -> Option<Position> {
    let to = from.offset(direction, 1)?;
    if board.is_empty(from) || !board.is_empty(to) {
        return None;
    }
    board.relocate(from, to);
    Some(to)
}

/// Jumps the piece at `from` over an adjacent opposing piece in `direction`.
///
/// Returns the landing position and clears the captured cell, or None
/// without touching the board unless the middle cell holds an opposing
/// piece and the landing cell is empty.
pub fn try_jump(board: &mut Board, from: Position, direction: Direction) -> Option<Position> {
    let over = from.offset(direction, 1)?;
    let to = from.offset(direction, 2)?;
    let color = board.get(from)?.color();
    let captured = board.get(over)?;
    if captured.color() == color || !board.is_empty(to) {
        return None;
    }
    board.remove(over);
    board.relocate(from, to);
    Some(to)
}

/// Applies a move sequence to `board`.
///
/// A single step is a slide that falls back to a jump when blocked. Two or
/// more steps form a jump chain in which every step must capture. The
/// sequence is all-or-nothing: on any error the board is left exactly as it
/// was. Promotion is evaluated once, after the last step.
pub fn apply_move_sequence(
    board: &mut Board,
    from: Position,
    steps: &[Direction],
) -> CheckersResult<MoveOutcome> {
    let mut scratch = board.duplicate();
    let outcome = run_sequence(&mut scratch, from, steps)?;
    *board = scratch;
    Ok(outcome)
}

/// Dry-runs a move sequence on a duplicate of `board`.
/// Returns what the move would do, or why it is rejected.
pub fn validate_move_sequence(
    board: &Board,
    from: Position,
    steps: &[Direction],
) -> CheckersResult<MoveOutcome> {
    let mut scratch = board.duplicate();
    run_sequence(&mut scratch, from, steps)
}

fn run_sequence(
    board: &mut Board,
    from: Position,
    steps: &[Direction],
) -> CheckersResult<MoveOutcome> {
    let piece = *board.get(from).ok_or(CheckersError::NoPiece(from))?;
    let mut outcome = MoveOutcome {
        from,
        to: from,
        captured: Vec::new(),
        promoted: false,
    };

    match steps {
        [] => return Err(CheckersError::EmptyMoveSequence),
        [direction] => {
            piece.check_step(*direction, StepKind::Slide)?;
            if let Some(to) = try_slide(board, from, *direction) {
                outcome.to = to;
            } else if let Some(to) = try_jump(board, from, *direction) {
                outcome.captured.extend(from.offset(*direction, 1));
                outcome.to = to;
            } else {
                return Err(CheckersError::IllegalMove {
                    from,
                    direction: *direction,
                    step: 1,
                    reason: "is blocked and has no piece to capture",
                });
            }
        }
        chain => {
            for (i, direction) in chain.iter().enumerate() {
                let at = outcome.to;
                let mover = board.get(at).copied().unwrap_or(piece);
                mover.check_step(*direction, StepKind::Jump)?;
                let to = try_jump(board, at, *direction).ok_or(CheckersError::IllegalMove {
                    from: at,
                    direction: *direction,
                    step: i + 1,
                    reason: "is not a capture",
                })?;
                outcome.captured.extend(at.offset(*direction, 1));
                outcome.to = to;
            }
        }
    }

    if let Some(moved) = board.get_mut(outcome.to) {
        outcome.promoted = moved.maybe_promote();
    }
    debug_assert!(board.is_consistent());

    Ok(outcome)
}

/// Generates every validated one-step request for `color`.
///
/// Each piece tries all four directions; the validator rejects those the
/// piece may not take. Requests come out in row-major piece order.
pub fn generate_single_steps(board: &Board, color: Color) -> Vec<(MoveRequest, MoveOutcome)> {
    let mut moves = Vec::new();

    for piece in board.pieces_of(color) {
        let from = piece.position();
        for direction in Direction::ALL {
            match validate_move_sequence(board, from, &[direction]) {
                Ok(outcome) => moves.push((MoveRequest::single(from, direction), outcome)),
                Err(err) => trace!(%from, %direction, %err, "candidate rejected"),
            }
        }
    }

    moves
}
