/// Turn controller: whose move it is, move application and game end.
/// Input adapters and agents submit `MoveRequest`s; failures never consume
/// a turn, so the caller simply asks the same side again.
use crate::board::*;
use crate::error::{CheckersError, CheckersResult};
use crate::move_gen::{apply_move_sequence, validate_move_sequence, MoveOutcome};
use crate::types::*;
use tracing::{debug, info};

/// Where the game stands between turns.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GamePhase {
    /// Waiting for the given side to move.
    AwaitingMove(Color),
    /// The given side has won.
    GameOver(Color),
}

/// One applied turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TurnRecord {
    pub color: Color,
    pub request: MoveRequest,
    pub outcome: MoveOutcome,
}

/// Complete state of a checkers game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    board: Board,
    turn: Color,
    winner: Option<Color>,
    /// Position the history is replayed from on undo
    initial: (Board, Color),
    history: Vec<TurnRecord>,
}

impl GameState {
    /// Creates a new game in the starting position. Black moves first.
    pub fn new() -> Self {
        Self::from_board(Board::starting_position(), Color::Black)
    }

    /// Creates a game from an arbitrary position with `turn` to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let winner = if board.total() > 0 {
            board.is_terminal()
        } else {
            None
        };
        Self {
            initial: (board.clone(), turn),
            board,
            turn,
            winner,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn phase(&self) -> GamePhase {
        match self.winner {
            Some(winner) => GamePhase::GameOver(winner),
            None => GamePhase::AwaitingMove(self.turn),
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Applied turns, oldest first.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Snapshot of the grid for rendering.
    pub fn view(&self) -> BoardView {
        self.board.view()
    }

    /// Checks that the request names a piece belonging to the side to move.
    pub fn check_ownership(&self, request: &MoveRequest) -> CheckersResult<()> {
        if request.steps.is_empty() {
            return Err(CheckersError::EmptyMoveSequence);
        }
        let piece = self
            .board
            .get(request.from)
            .ok_or(CheckersError::NoPiece(request.from))?;
        if piece.color() != self.turn {
            return Err(CheckersError::WrongColor {
                position: request.from,
                expected: self.turn,
            });
        }
        Ok(())
    }

    /// Dry-runs a request for the side to move without changing anything.
    pub fn validate(&self, request: &MoveRequest) -> CheckersResult<MoveOutcome> {
        if let Some(winner) = self.winner {
            return Err(CheckersError::GameOver { winner });
        }
        self.check_ownership(request)?;
        validate_move_sequence(&self.board, request.from, &request.steps)
    }

    /// Attempts one turn for the side to move.
    ///
    /// On success the move is applied, the turn passes and the board is
    /// checked for a winner. On error nothing changes and the same side is
    /// still to move.
    pub fn attempt_turn(&mut self, request: &MoveRequest) -> CheckersResult<MoveOutcome> {
        self.validate(request)?;
        let outcome = apply_move_sequence(&mut self.board, request.from, &request.steps)?;
        debug!(
            color = %self.turn,
            %request,
            to = %outcome.to,
            captured = outcome.captured.len(),
            promoted = outcome.promoted,
            "move applied"
        );

        self.history.push(TurnRecord {
            color: self.turn,
            request: request.clone(),
            outcome: outcome.clone(),
        });
        self.turn = self.turn.opponent();
        self.winner = self.board.is_terminal();
        if let Some(winner) = self.winner {
            info!(%winner, turns = self.history.len(), "game over");
        }

        Ok(outcome)
    }

    /// Takes back the last applied turn by replaying the rest from the
    /// initial position.
    pub fn undo(&mut self) -> CheckersResult<TurnRecord> {
        let (last, kept) = self
            .history
            .split_last()
            .ok_or(CheckersError::NothingToUndo)?;
        let last = last.clone();

        let (board, turn) = self.initial.clone();
        let mut replay = Self::from_board(board, turn);
        for record in kept {
            replay.attempt_turn(&record.request)?;
        }
        *self = replay;

        debug!(request = %last.request, "move taken back");
        Ok(last)
    }

    /// Resets to the position this game started from.
    pub fn restart(&mut self) {
        let (board, turn) = self.initial.clone();
        *self = Self::from_board(board, turn);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
