use super::error::BoardError;
use super::piece::Piece;
use super::setup::setup_from_strings;
use super::types::{Color, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Men per side in the standard opening position.
pub const PIECES_PER_SIDE: usize = 12;

/// 盤面
///
/// The grid owns every piece. The per-colour counters always agree with the
/// grid contents and only dark squares are ever occupied.
///
/// Serialized as the eight diagram rows. Loading goes back through
/// `setup_from_strings`, so the counters are rebuilt from the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    red_left: usize,
    white_left: usize,
    red_kings: usize,
    white_kings: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening: White on rows 0-2, Red on rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for pos in Position::all().filter(|p| p.is_dark()) {
            let color = match pos.row() {
                0..=2 => Color::White,
                5..=7 => Color::Red,
                _ => continue,
            };
            board.put(pos, Piece::man(color));
        }
        board
    }

    pub fn empty() -> Self {
        Board {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
            red_left: 0,
            white_left: 0,
            red_kings: 0,
            white_kings: 0,
        }
    }

    /// Put a piece on an empty dark square.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<(), BoardError> {
        if !pos.is_dark() {
            return Err(BoardError::LightSquare(pos));
        }
        if self.piece_at(pos).is_some() {
            return Err(BoardError::Occupied(pos));
        }
        self.put(pos, piece);
        Ok(())
    }

    fn put(&mut self, pos: Position, piece: Piece) {
        *self.remaining_mut(piece.color) += 1;
        if piece.king {
            *self.kings_mut(piece.color) += 1;
        }
        self.grid[pos.row()][pos.col()] = Some(piece);
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.grid[pos.row()][pos.col()].as_ref()
    }

    /// Raw-coordinate lookup for callers that have not validated yet.
    pub fn piece_at_coords(&self, row: usize, col: usize) -> Result<Option<&Piece>, BoardError> {
        Ok(self.piece_at(Position::new(row, col)?))
    }

    /// Relocate whatever stands on `from` to `to`, crowning it when it lands
    /// on its colour's far row. Returns true when a promotion happened.
    ///
    /// No legality check is done here; destinations come from
    /// `logic::legal_moves`.
    pub fn move_piece(&mut self, from: Position, to: Position) -> bool {
        let moving = self.grid[from.row()][from.col()].take();
        let displaced = self.grid[to.row()][to.col()].take();
        self.grid[from.row()][from.col()] = displaced;
        self.grid[to.row()][to.col()] = moving;

        let Some(piece) = self.grid[to.row()][to.col()].as_mut() else {
            return false;
        };
        if piece.king || to.row() != piece.color.crown_row() {
            return false;
        }
        piece.king = true;
        let color = piece.color;
        *self.kings_mut(color) += 1;
        true
    }

    /// Clear the given cells and decrement the owners' counters.
    /// Cells that are already empty are skipped.
    pub fn remove(&mut self, positions: &[Position]) {
        for &pos in positions {
            if let Some(piece) = self.grid[pos.row()][pos.col()].take() {
                let left = self.remaining_mut(piece.color);
                *left = left.saturating_sub(1);
                if piece.king {
                    let kings = self.kings_mut(piece.color);
                    *kings = kings.saturating_sub(1);
                }
            }
        }
    }

    /// Colour whose opponent has run out of pieces.
    pub fn winner(&self) -> Option<Color> {
        if self.red_left == 0 {
            Some(Color::White)
        } else if self.white_left == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }

    pub fn remaining(&self, color: Color) -> usize {
        match color {
            Color::Red => self.red_left,
            Color::White => self.white_left,
        }
    }

    pub fn kings(&self, color: Color) -> usize {
        match color {
            Color::Red => self.red_kings,
            Color::White => self.white_kings,
        }
    }

    fn remaining_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Red => &mut self.red_left,
            Color::White => &mut self.white_left,
        }
    }

    fn kings_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Red => &mut self.red_kings,
            Color::White => &mut self.white_kings,
        }
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|p| (pos, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        setup_from_strings(&rows)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.to_string().lines().map(str::to_string).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.grid {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', |p| p.display_char()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_standard_setup() {
        let board = Board::new();
        assert_eq!(board.remaining(Color::Red), PIECES_PER_SIDE);
        assert_eq!(board.remaining(Color::White), PIECES_PER_SIDE);
        assert_eq!(board.pieces().count(), 2 * PIECES_PER_SIDE);
        assert!(board.pieces().all(|(p, _)| p.is_dark()));
        assert_eq!(board.piece_at(pos(0, 1)), Some(&Piece::man(Color::White)));
        assert_eq!(board.piece_at(pos(7, 0)), Some(&Piece::man(Color::Red)));
        assert!(board.piece_at(pos(3, 0)).is_none());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_place_rejects_light_and_occupied() {
        let mut board = Board::empty();
        assert_eq!(
            board.place(pos(0, 0), Piece::man(Color::Red)),
            Err(BoardError::LightSquare(pos(0, 0)))
        );
        board.place(pos(0, 1), Piece::man(Color::Red)).unwrap();
        assert_eq!(
            board.place(pos(0, 1), Piece::man(Color::White)),
            Err(BoardError::Occupied(pos(0, 1)))
        );
        assert_eq!(board.remaining(Color::Red), 1);
        assert_eq!(board.remaining(Color::White), 0);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let board = Board::new();
        assert_eq!(
            board.piece_at_coords(8, 1),
            Err(BoardError::OutOfBounds { row: 8, col: 1 })
        );
        assert!(board.piece_at_coords(7, 0).unwrap().is_some());
    }

    #[test]
    fn test_promotion_counts_once() {
        let mut board = Board::empty();
        board.place(pos(1, 2), Piece::man(Color::Red)).unwrap();

        assert!(board.move_piece(pos(1, 2), pos(0, 1)));
        assert!(board.piece_at(pos(0, 1)).unwrap().king);
        assert_eq!(board.kings(Color::Red), 1);

        // A king stepping off and back onto the crown row is not re-crowned.
        assert!(!board.move_piece(pos(0, 1), pos(1, 0)));
        assert!(!board.move_piece(pos(1, 0), pos(0, 1)));
        assert_eq!(board.kings(Color::Red), 1);
    }

    #[test]
    fn test_white_promotes_on_last_row() {
        let mut board = Board::empty();
        board.place(pos(6, 1), Piece::man(Color::White)).unwrap();
        assert!(board.move_piece(pos(6, 1), pos(7, 2)));
        assert_eq!(board.kings(Color::White), 1);
        assert_eq!(board.kings(Color::Red), 0);
    }

    #[test]
    fn test_remove_until_winner() {
        let mut board = Board::empty();
        board.place(pos(0, 1), Piece::man(Color::White)).unwrap();
        board.place(pos(2, 3), Piece::king(Color::White)).unwrap();
        board.place(pos(7, 0), Piece::man(Color::Red)).unwrap();

        board.remove(&[pos(0, 1)]);
        assert_eq!(board.winner(), None);
        assert_eq!(board.remaining(Color::White), 1);

        board.remove(&[pos(2, 3)]);
        assert_eq!(board.remaining(Color::White), 0);
        assert_eq!(board.kings(Color::White), 0);
        assert_eq!(board.winner(), Some(Color::Red));

        // Removing an empty cell changes nothing.
        board.remove(&[pos(2, 3)]);
        assert_eq!(board.remaining(Color::White), 0);
        assert_eq!(board.remaining(Color::Red), 1);
    }

    #[test]
    fn test_display_diagram() {
        let board = Board::new();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], ".w.w.w.w");
        assert_eq!(lines[3], "........");
        assert_eq!(lines[7], "r.r.r.r.");
    }

    #[test]
    fn test_json_is_the_diagram() {
        let mut board = Board::new();
        board.remove(&[pos(5, 0)]);
        board.move_piece(pos(6, 1), pos(5, 0));

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json[0], ".w.w.w.w");
        assert_eq!(json[6], "...r.r.r");

        let loaded: Board = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, board);
        assert_eq!(loaded.remaining(Color::Red), PIECES_PER_SIDE - 1);
    }

    #[test]
    fn test_json_rejects_broken_boards() {
        let mut rows = vec!["........"; 8];
        rows[0] = "w.......";
        let light = serde_json::json!(rows);
        assert!(serde_json::from_value::<Board>(light).is_err());

        // counters are never read back, so they cannot disagree with the grid
        let grid = vec![vec![serde_json::Value::Null; BOARD_SIZE]; BOARD_SIZE];
        let counted = serde_json::json!({
            "grid": grid,
            "red_left": 0,
            "white_left": 5,
            "red_kings": 3,
            "white_kings": 0,
        });
        assert!(serde_json::from_value::<Board>(counted).is_err());

        let short = serde_json::json!(vec!["........"; 7]);
        assert!(serde_json::from_value::<Board>(short).is_err());
    }
}
