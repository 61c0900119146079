use crate::Agent;
use checkers_core::{generate_single_steps, GameState, MoveRequest};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays a uniformly random validated single step.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an agent whose choices are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            name: format!("Random(seed={})", seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn best_move(&mut self, state: &GameState) -> Option<MoveRequest> {
        if state.is_over() {
            return None;
        }

        let moves = generate_single_steps(state.board(), state.side_to_move());
        moves
            .choose(&mut self.rng)
            .map(|(request, _)| request.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
