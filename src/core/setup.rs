use crate::core::{Board, BoardError, Piece, Position, BOARD_SIZE};

/// 文字列配列から盤面を初期化する
///
/// One string per row, top (row 0) first. `.` is an empty cell, `r`/`w` are
/// red/white men and `R`/`W` their kings. Whitespace is ignored so rows can be
/// written either packed (`".w.w.w.w"`) or spaced (`". w . w . w . w"`).
pub fn setup_from_strings(rows: &[&str]) -> Result<Board, BoardError> {
    if rows.len() != BOARD_SIZE {
        return Err(BoardError::BadSetup {
            message: format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
        });
    }

    let mut board = Board::empty();
    for (row, line) in rows.iter().enumerate() {
        let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != BOARD_SIZE {
            return Err(BoardError::BadSetup {
                message: format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    BOARD_SIZE
                ),
            });
        }
        for (col, &c) in cells.iter().enumerate() {
            if c == '.' {
                continue;
            }
            let piece = Piece::from_char(c).ok_or_else(|| BoardError::BadSetup {
                message: format!("unknown symbol '{}' at ({}, {})", c, row, col),
            })?;
            board.place(Position::new(row, col)?, piece)?;
        }
    }
    Ok(board)
}

pub fn get_standard_setup() -> Vec<&'static str> {
    vec![
        ". w . w . w . w",
        "w . w . w . w .",
        ". w . w . w . w",
        ". . . . . . . .",
        ". . . . . . . .",
        "r . r . r . r .",
        ". r . r . r . r",
        "r . r . r . r .",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_standard_strings_match_board_new() {
        let board = setup_from_strings(&get_standard_setup()).unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_kings_are_counted() {
        let board = setup_from_strings(&[
            "........", "..W.....", "........", "........", "........", "..r.....",
            ".R......", "........",
        ])
        .unwrap();
        assert_eq!(board.kings(Color::White), 1);
        assert_eq!(board.kings(Color::Red), 1);
        assert_eq!(board.remaining(Color::Red), 2);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        assert!(matches!(
            setup_from_strings(&["........"]),
            Err(BoardError::BadSetup { .. })
        ));
        let mut rows = vec!["........"; 8];
        rows[2] = ".x......";
        assert!(matches!(
            setup_from_strings(&rows),
            Err(BoardError::BadSetup { .. })
        ));
        rows[2] = "r.......";
        assert!(matches!(
            setup_from_strings(&rows),
            Err(BoardError::LightSquare(_))
        ));
    }
}
