pub mod board;
pub mod error;
pub mod game_state;
pub mod move_gen;
pub mod piece;
pub mod types;

pub use board::*;
pub use error::{CheckersError, CheckersResult, ErrorKind};
pub use game_state::*;
pub use move_gen::*;
pub use piece::Piece;
pub use types::*;
