/// Board representation: an 8x8 grid of optional pieces.
/// Pieces are stored by value, so cloning the board yields a fully
/// independent copy with no shared cells or pieces.
use crate::piece::Piece;
use crate::types::*;

/// Array-based board representation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// 64 cells, indexed by Position::index()
    cells: [Option<Piece>; 64],
}

/// What the display adapter needs to know about an occupied cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CellView {
    pub color: Color,
    pub king: bool,
}

/// Read-only snapshot of the grid, row-major.
pub type BoardView = [[Option<CellView>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Creates the standard starting position: twelve pieces per side on the
    /// dark squares, Red on rows 0-2 and Black on rows 5-7.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for pos in Position::all() {
            if (pos.row() + pos.col()) % 2 != 0 {
                continue;
            }
            let color = match pos.row() {
                0..=2 => Color::Red,
                5..=7 => Color::Black,
                _ => continue,
            };
            board.place(Piece::new(pos, color));
        }

        board
    }

    /// Gets the piece at the given position.
    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.cells[pos.index()].as_ref()
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        self.cells[pos.index()].as_mut()
    }

    /// Sets the cell at `pos`. A placed piece has its stored position
    /// rewritten to `pos`; returns whatever occupied the cell before.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) -> Option<Piece> {
        let piece = piece.map(|mut p| {
            p.position = pos;
            p
        });
        std::mem::replace(&mut self.cells[pos.index()], piece)
    }

    /// Places a piece at its own stored position.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.set(piece.position(), Some(piece))
    }

    /// Clears the cell at `pos`, returning its occupant.
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.index()].take()
    }

    /// Moves the occupant of `from` to the empty cell `to`.
    /// Callers must have checked that `from` is occupied and `to` is empty.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) {
        debug_assert!(self.is_empty(to), "relocating onto occupied cell {to}");
        let piece = self.remove(from);
        self.set(to, piece);
    }

    /// Returns true if the given position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Visits every cell in row-major order.
    pub fn for_each_cell<F>(&self, mut visitor: F)
    where
        F: FnMut(Position, Option<&Piece>),
    {
        for pos in Position::all() {
            visitor(pos, self.get(pos));
        }
    }

    /// Iterates over all pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// Iterates over the pieces of one color in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color() == color)
    }

    /// Counts the pieces of one color.
    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Counts every piece on the board.
    pub fn total(&self) -> usize {
        self.pieces().count()
    }

    /// Produces an independent copy for what-if simulation.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Returns the winner once only one color has pieces left.
    ///
    /// Panics on an empty board: no sequence of legal moves can clear both
    /// sides, so reaching it means the board was built incorrectly.
    pub fn is_terminal(&self) -> Option<Color> {
        let red = self.count(Color::Red);
        let black = self.count(Color::Black);
        assert!(red + black > 0, "is_terminal called on an empty board");

        match (red, black) {
            (_, 0) => Some(Color::Red),
            (0, _) => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns true if every piece's stored position matches its cell.
    pub fn is_consistent(&self) -> bool {
        Position::all().all(|pos| self.get(pos).map_or(true, |p| p.position() == pos))
    }

    /// Snapshot of the grid for rendering.
    pub fn view(&self) -> BoardView {
        let mut view = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.for_each_cell(|pos, piece| {
            view[pos.row() as usize][pos.col() as usize] = piece.map(|p| CellView {
                color: p.color(),
                king: p.is_king(),
            });
        });
        view
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = Board::starting_position();

        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.count(Color::Black), 12);

        assert_eq!(board.get(pos(0, 0)).map(|p| p.color()), Some(Color::Red));
        assert_eq!(board.get(pos(1, 1)).map(|p| p.color()), Some(Color::Red));
        assert_eq!(board.get(pos(5, 1)).map(|p| p.color()), Some(Color::Black));
        assert_eq!(board.get(pos(6, 0)).map(|p| p.color()), Some(Color::Black));
        assert!(board.is_empty(pos(0, 1)));
        assert!(board.is_empty(pos(3, 3)));
        assert!(board.is_empty(pos(4, 4)));

        assert!(board.pieces().all(|p| !p.is_king()));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_starting_position_uses_dark_squares_only() {
        let board = Board::starting_position();
        let mut rows = [0usize; 8];
        board.for_each_cell(|p, piece| {
            if let Some(piece) = piece {
                assert_eq!((p.row() + p.col()) % 2, 0, "piece on light square {p}");
                assert_eq!(piece.position(), p);
                rows[p.row() as usize] += 1;
            }
        });
        assert_eq!(rows, [4, 4, 4, 0, 0, 4, 4, 4]);
    }

    #[test]
    fn test_set_rewrites_position() {
        let mut board = Board::empty();
        let piece = Piece::new(pos(0, 0), Color::Red);
        board.set(pos(4, 4), Some(piece));

        assert_eq!(board.get(pos(4, 4)).unwrap().position(), pos(4, 4));
        assert!(board.is_empty(pos(0, 0)));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_for_each_cell_is_row_major() {
        let board = Board::empty();
        let mut visited = Vec::new();
        board.for_each_cell(|p, _| visited.push(p.index()));
        assert_eq!(visited, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let board = Board::starting_position();
        let mut copy = board.duplicate();

        copy.remove(pos(0, 0));
        copy.set(pos(3, 3), Some(Piece::new_king(pos(3, 3), Color::Black)));

        assert_eq!(board, Board::starting_position());
        assert!(board.is_empty(pos(3, 3)));
        assert!(!board.is_empty(pos(0, 0)));
        assert_ne!(board, copy);
    }

    #[test]
    fn test_is_terminal() {
        let mut board = Board::empty();
        board.place(Piece::new(pos(2, 2), Color::Red));
        assert_eq!(board.is_terminal(), Some(Color::Red));

        board.place(Piece::new(pos(5, 5), Color::Black));
        assert_eq!(board.is_terminal(), None);

        board.remove(pos(2, 2));
        assert_eq!(board.is_terminal(), Some(Color::Black));

        assert_eq!(Board::starting_position().is_terminal(), None);
    }

    #[test]
    #[should_panic(expected = "empty board")]
    fn test_is_terminal_panics_on_empty_board() {
        Board::empty().is_terminal();
    }

    #[test]
    fn test_view() {
        let mut board = Board::empty();
        board.place(Piece::new_king(pos(1, 2), Color::Black));
        let view = board.view();
        assert_eq!(
            view[1][2],
            Some(CellView {
                color: Color::Black,
                king: true
            })
        );
        assert_eq!(view[2][1], None);
    }
}
