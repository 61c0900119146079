use checkers_core::{apply_move_sequence, generate_single_steps, Board, Color, MoveRequest};

/// Scores a position for `color` as its piece count minus the opponent's.
/// Kings count the same as men.
pub fn piece_differential(board: &Board, color: Color) -> i32 {
    board.count(color) as i32 - board.count(color.opponent()) as i32
}

/// A validated one-step move and the differential it leads to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoredMove {
    pub request: MoveRequest,
    pub score: i32,
}

/// Simulates every validated single step for `color` on a copy of the
/// board and scores the resulting position.
pub fn score_single_steps(board: &Board, color: Color) -> Vec<ScoredMove> {
    generate_single_steps(board, color)
        .into_iter()
        .filter_map(|(request, _)| {
            let mut simulated = board.duplicate();
            apply_move_sequence(&mut simulated, request.from, &request.steps).ok()?;
            Some(ScoredMove {
                score: piece_differential(&simulated, color),
                request,
            })
        })
        .collect()
}

/// Keeps only the candidates that reach the maximum score.
pub fn best_scored(candidates: Vec<ScoredMove>) -> Vec<ScoredMove> {
    let Some(max) = candidates.iter().map(|c| c.score).max() else {
        return Vec::new();
    };
    candidates.into_iter().filter(|c| c.score == max).collect()
}
