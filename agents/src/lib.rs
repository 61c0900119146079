pub mod evaluation;
pub mod greedy;
pub mod random;

use checkers_core::{GameState, MoveRequest};

/// Core trait for checkers agents
pub trait Agent {
    /// Get a move for the side to move, or None if it has no legal move
    fn best_move(&mut self, state: &GameState) -> Option<MoveRequest>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::*;
pub use greedy::GreedyAgent;
pub use random::RandomAgent;
