use crate::error::{CheckersError, CheckersResult};
use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 8;

/// Represents one of the two players in checkers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns the opposite color.
    pub const fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Returns the row on which pieces of this color are crowned.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Red => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }

    /// Returns the two directions a non-king piece of this color may move in.
    pub const fn forward_directions(self) -> &'static [Direction] {
        match self {
            Color::Red => &[Direction::DownRight, Direction::DownLeft],
            Color::Black => &[Direction::UpRight, Direction::UpLeft],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a single step moves one cell or hops over a piece.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StepKind {
    Slide,
    Jump,
}

impl StepKind {
    /// Number of cells the piece travels along the diagonal.
    pub const fn distance(self) -> i8 {
        match self {
            StepKind::Slide => 1,
            StepKind::Jump => 2,
        }
    }
}

/// One of the four diagonal move directions.
/// "Up" decreases the row index, "down" increases it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Direction {
    /// All directions in the order candidates are tried.
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    /// Returns the `(drow, dcol)` vector of this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::UpRight => (-1, 1),
            Direction::UpLeft => (-1, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
        }
    }

    /// Returns the long token name, e.g. `up-right`.
    pub const fn token(self) -> &'static str {
        match self {
            Direction::UpRight => "up-right",
            Direction::UpLeft => "up-left",
            Direction::DownRight => "down-right",
            Direction::DownLeft => "down-left",
        }
    }

    /// Returns the short token used at the prompt, e.g. `ur`.
    pub const fn short_token(self) -> &'static str {
        match self {
            Direction::UpRight => "ur",
            Direction::UpLeft => "ul",
            Direction::DownRight => "dr",
            Direction::DownLeft => "dl",
        }
    }
}

impl FromStr for Direction {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.token() == s || d.short_token() == s)
            .ok_or_else(|| CheckersError::UnknownDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A cell on the board.
/// Can only be constructed in range, so every lookup through it is in bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from row and column (0-7).
    /// Returns None if either is out of range.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Like [`Position::new`] but reports out-of-range input as an error.
    pub fn try_new(row: i32, col: i32) -> CheckersResult<Self> {
        u8::try_from(row)
            .ok()
            .zip(u8::try_from(col).ok())
            .and_then(|(r, c)| Position::new(r, c))
            .ok_or(CheckersError::InvalidCoordinate { row, col })
    }

    /// Creates a position from a row-major index (0-63).
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Position {
                row: index / BOARD_SIZE,
                col: index % BOARD_SIZE,
            })
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major index (0-63).
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Returns the position `steps` cells away in `direction`, if on the board.
    pub const fn offset(self, direction: Direction, steps: i8) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row as i8 + dr * steps;
        let col = self.col as i8 + dc * steps;
        if row >= 0 && row < BOARD_SIZE as i8 && col >= 0 && col < BOARD_SIZE as i8 {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterates all 64 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Position::from_index)
    }
}

impl FromStr for Position {
    type Err = CheckersError;

    /// Parses board notation such as `b6`: file letter is the column,
    /// rank digit is the row plus one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CheckersError::MalformedCoordinate(s.to_string());
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f.to_ascii_lowercase(), r),
            _ => return Err(malformed()),
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(malformed());
        }
        Position::new(rank as u8 - b'1', file as u8 - b'a').ok_or_else(malformed)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// A request to move the piece at `from` through an ordered list of steps.
/// This is what an input adapter or an agent hands to the turn controller.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoveRequest {
    pub from: Position,
    pub steps: Vec<Direction>,
}

impl MoveRequest {
    pub fn new(from: Position, steps: Vec<Direction>) -> Self {
        Self { from, steps }
    }

    /// A one-step request, the only kind the agents generate.
    pub fn single(from: Position, direction: Direction) -> Self {
        Self {
            from,
            steps: vec![direction],
        }
    }
}

impl FromStr for MoveRequest {
    type Err = CheckersError;

    /// Parses `b6,ur` or `c3,dr,dl`; whitespace around tokens is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut tokens = lowered.split(',').map(str::trim);
        let from = match tokens.next() {
            Some(coord) if !coord.is_empty() => coord.parse::<Position>()?,
            _ => return Err(CheckersError::MalformedCoordinate(s.trim().to_string())),
        };
        let steps = tokens
            .filter(|t| !t.is_empty())
            .map(str::parse::<Direction>)
            .collect::<CheckersResult<Vec<_>>>()?;
        if steps.is_empty() {
            return Err(CheckersError::EmptyMoveSequence);
        }
        Ok(MoveRequest { from, steps })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        for step in &self.steps {
            write!(f, ",{}", step.short_token())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Red.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::Red);
    }

    #[test]
    fn test_forward_directions_point_at_promotion_row() {
        for color in [Color::Red, Color::Black] {
            for dir in color.forward_directions() {
                let (dr, _) = dir.delta();
                if color.promotion_row() == 0 {
                    assert_eq!(dr, -1);
                } else {
                    assert_eq!(dr, 1);
                }
            }
        }
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(2, 2).unwrap();
        assert_eq!(
            pos.offset(Direction::DownRight, 1),
            Position::new(3, 3)
        );
        assert_eq!(pos.offset(Direction::UpLeft, 2), Position::new(0, 0));
        assert_eq!(pos.offset(Direction::UpLeft, 3), None);

        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset(Direction::UpLeft, 1), None);
    }

    #[test]
    fn test_position_try_new_rejects_out_of_range() {
        assert!(Position::try_new(7, 7).is_ok());
        assert_eq!(
            Position::try_new(8, 0),
            Err(CheckersError::InvalidCoordinate { row: 8, col: 0 })
        );
        assert!(Position::try_new(-1, 3).is_err());
    }

    #[test]
    fn test_position_notation() {
        let pos: Position = "b6".parse().unwrap();
        assert_eq!((pos.row(), pos.col()), (5, 1));
        assert_eq!(pos.to_string(), "b6");
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("a".parse::<Position>().is_err());
        assert!("a10".parse::<Position>().is_err());
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!("ur".parse::<Direction>().unwrap(), Direction::UpRight);
        assert_eq!("down-left".parse::<Direction>().unwrap(), Direction::DownLeft);
        assert_eq!(
            "up".parse::<Direction>(),
            Err(CheckersError::UnknownDirection("up".to_string()))
        );
    }

    #[test]
    fn test_move_request_parsing() {
        let req: MoveRequest = "C3, DR ,dl".parse().unwrap();
        assert_eq!(req.from, Position::new(2, 2).unwrap());
        assert_eq!(req.steps, vec![Direction::DownRight, Direction::DownLeft]);
        assert_eq!(req.to_string(), "c3,dr,dl");

        assert_eq!(
            "c3".parse::<MoveRequest>(),
            Err(CheckersError::EmptyMoveSequence)
        );
        assert!(matches!(
            "z3,ur".parse::<MoveRequest>(),
            Err(CheckersError::MalformedCoordinate(_))
        ));
        assert!(matches!(
            "c3,xx".parse::<MoveRequest>(),
            Err(CheckersError::UnknownDirection(_))
        ));
    }
}
