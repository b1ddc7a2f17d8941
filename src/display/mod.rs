use crate::core::{Board, Color, Move, Position, BOARD_SIZE};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{self, stdout, Write};

pub struct DisplayState {
    pub cursor: Position,
    pub selected: Option<Position>,
    pub highlights: Vec<Position>,
    pub status_msg: Option<String>,
    pub last_move: Option<Move>,
    /// Side drawn at the bottom of the screen.
    pub perspective: Color,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Position::default(),
            selected: None,
            highlights: Vec::new(),
            status_msg: None,
            last_move: None,
            perspective: Color::Red,
            show_cursor: true,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Screen index -> board index. Red sits at the bottom in board coordinates,
/// so White's view is the board turned around.
fn oriented(i: usize, perspective: Color) -> usize {
    match perspective {
        Color::Red => i,
        Color::White => BOARD_SIZE - 1 - i,
    }
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    print!("=== Checkers ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    print!("   ");
    for i in 0..BOARD_SIZE {
        print!("  {} ", oriented(i, state.perspective));
    }
    print!("\r\n");
    print!("  +{}+\r\n", "----".repeat(BOARD_SIZE));

    for i in 0..BOARD_SIZE {
        let row = oriented(i, state.perspective);
        print!("{:>2}|", row);
        for j in 0..BOARD_SIZE {
            let col = oriented(j, state.perspective);
            let Ok(pos) = Position::new(row, col) else {
                continue;
            };
            let piece = board.piece_at(pos);

            let is_cursor = state.show_cursor && state.cursor == pos;
            let is_selected = state.selected == Some(pos);
            let is_highlight = state.highlights.contains(&pos);
            let is_last_move = state.last_move.as_ref().is_some_and(|mv| {
                mv.from == pos || mv.to == pos || mv.captured.contains(&pos)
            });

            let symbol = match piece {
                Some(p) => p.display_char(),
                None if pos.is_dark() => '.',
                None => ' ',
            };
            let (prefix, suffix) = if is_cursor {
                ('[', ']')
            } else if is_selected {
                ('|', '|')
            } else if is_highlight {
                ('(', ')')
            } else if is_last_move {
                ('{', '}')
            } else {
                (' ', ' ')
            };
            let cell_text = format!("{} {}{}", prefix, symbol, suffix);

            if is_cursor {
                print!("{}", cell_text.yellow());
            } else if is_selected {
                print!("{}", cell_text.blue());
            } else if is_highlight {
                print!("{}", cell_text.green());
            } else if is_last_move {
                print!("{}", cell_text.dark_grey());
            } else if let Some(p) = piece {
                match p.color {
                    Color::Red => print!("{}", cell_text.red()),
                    Color::White => print!("{}", cell_text.white().bold()),
                }
            } else {
                print!("{}", cell_text);
            }
        }
        print!("|\r\n");
    }
    print!("  +{}+\r\n", "----".repeat(BOARD_SIZE));

    print!(
        "Red: {} ({} kings)  White: {} ({} kings)\r\n",
        board.remaining(Color::Red),
        board.kings(Color::Red),
        board.remaining(Color::White),
        board.kings(Color::White)
    );
    out.flush()
}
