use crate::evaluation::{best_scored, score_single_steps};
use crate::Agent;
use checkers_core::{GameState, MoveRequest};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

/// One-ply greedy agent.
///
/// Tries every single step for every piece of the side to move, scores the
/// resulting position by piece differential and picks uniformly at random
/// among the best. It never plans jump chains.
pub struct GreedyAgent {
    name: String,
    rng: StdRng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent {
            name: "Greedy".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an agent whose tie-breaking is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        GreedyAgent {
            name: format!("Greedy(seed={})", seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn best_move(&mut self, state: &GameState) -> Option<MoveRequest> {
        if state.is_over() {
            return None;
        }

        let color = state.side_to_move();
        let scored = score_single_steps(state.board(), color);
        let candidates = scored.len();
        let best = best_scored(scored);

        let choice = best.choose(&mut self.rng)?;
        debug!(
            %color,
            candidates,
            tied = best.len(),
            score = choice.score,
            request = %choice.request,
            "greedy move chosen"
        );
        Some(choice.request.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::piece_differential;
    use checkers_core::{
        apply_move_sequence, validate_move_sequence, Board, Color, Direction, Piece, Position,
    };
    use proptest::prelude::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_takes_the_capture() {
        let mut board = Board::empty();
        board.place(Piece::new(pos(5, 3), Color::Black));
        board.place(Piece::new(pos(4, 4), Color::Red));
        board.place(Piece::new(pos(0, 0), Color::Red));
        let state = GameState::from_board(board, Color::Black);

        for seed in 0..10 {
            let mut agent = GreedyAgent::with_seed(seed);
            assert_eq!(
                agent.best_move(&state),
                Some(MoveRequest::single(pos(5, 3), Direction::UpRight))
            );
        }
    }

    #[test]
    fn test_opening_move_is_legal() {
        let state = GameState::new();
        let mut agent = GreedyAgent::with_seed(7);
        let mv = agent.best_move(&state).unwrap();
        assert!(state.validate(&mv).is_ok());
        assert_eq!(mv.from.row(), 5);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = GameState::new();
        let a = GreedyAgent::with_seed(42).best_move(&state);
        let b = GreedyAgent::with_seed(42).best_move(&state);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_move_available() {
        // an uncrowned Red man on the last row has no forward step
        let mut board = Board::empty();
        board.place(Piece::new(pos(7, 1), Color::Red));
        board.place(Piece::new(pos(0, 0), Color::Black));
        let state = GameState::from_board(board, Color::Red);
        assert_eq!(GreedyAgent::with_seed(1).best_move(&state), None);
    }

    #[test]
    fn test_plays_a_full_game() {
        let mut state = GameState::new();
        let mut red = GreedyAgent::with_seed(3);
        let mut black = GreedyAgent::with_seed(4);

        for _ in 0..500 {
            let agent = match state.side_to_move() {
                Color::Red => &mut red,
                Color::Black => &mut black,
            };
            let Some(mv) = agent.best_move(&state) else {
                break;
            };
            state.attempt_turn(&mv).unwrap();
            assert!(state.board().is_consistent());
            if state.is_over() {
                break;
            }
        }

        assert!(state.board().total() <= 24);
        assert!(!state.history().is_empty());
    }

    proptest! {
        #[test]
        fn prop_choice_is_valid_and_maximal(seed in any::<u64>(), plies in 0usize..30) {
            let mut state = GameState::new();
            let mut agent = GreedyAgent::with_seed(seed);
            for _ in 0..plies {
                match agent.best_move(&state) {
                    Some(mv) => { state.attempt_turn(&mv).unwrap(); }
                    None => break,
                }
                if state.is_over() {
                    break;
                }
            }
            prop_assume!(!state.is_over());

            let color = state.side_to_move();
            let board = state.board();
            if let Some(mv) = agent.best_move(&state) {
                prop_assert!(validate_move_sequence(board, mv.from, &mv.steps).is_ok());

                let mut chosen = board.duplicate();
                apply_move_sequence(&mut chosen, mv.from, &mv.steps).unwrap();
                let chosen_score = piece_differential(&chosen, color);

                for piece in board.pieces_of(color) {
                    for direction in Direction::ALL {
                        let mut alt = board.duplicate();
                        if apply_move_sequence(&mut alt, piece.position(), &[direction]).is_ok() {
                            prop_assert!(piece_differential(&alt, color) <= chosen_score);
                        }
                    }
                }
            }
        }
    }
}
