use crate::core::{Board, Color, Move, Position, BOARD_SIZE};
use crate::display::{render_board, DisplayState};
use crate::game::Selection;
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;

pub struct TuiController {
    color: Color,
    name: String,
}

impl TuiController {
    pub fn new(color: Color, name: &str) -> Self {
        Self {
            color,
            name: name.to_string(),
        }
    }

    /// Arrow keys move in screen space; White looks at the board upside down.
    fn step_cursor(&self, cursor: Position, up: isize, right: isize) -> Position {
        let (dr, dc) = match self.color {
            Color::Red => (-up, right),
            Color::White => (up, -right),
        };
        cursor.offset(dr, dc).unwrap_or(cursor)
    }

    fn read_key() -> Option<KeyCode> {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(KeyEvent { code, .. })) => Some(code),
                _ => None,
            },
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(error = %e, "terminal poll failed");
                None
            }
        }
    }
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn color(&self) -> Color {
        self.color
    }

    fn is_human(&self) -> bool {
        true
    }

    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move> {
        let mut state = DisplayState::new();
        state.perspective = self.color;
        state.status_msg = Some(format!("{}'s turn ({})", self.name, self.color));

        // 初期カーソル位置を最初に動かせる駒に合わせる
        if let Some(mv) = legal_moves.first() {
            state.cursor = mv.from;
        } else if let Ok(pos) = Position::new(BOARD_SIZE / 2, BOARD_SIZE / 2) {
            state.cursor = pos;
        }

        let mut selection = Selection::default();
        loop {
            state.selected = selection.selected;
            state.highlights = selection.destinations();
            if let Err(e) = render_board(board, &state) {
                tracing::warn!(error = %e, "render failed");
            }
            print!("[Arrows]: Move | [Enter]: Select | [Esc]: Cancel | [q]: Resign\r\n");

            let Some(code) = Self::read_key() else {
                continue;
            };
            match code {
                KeyCode::Char('q') => return None,
                KeyCode::Esc => selection.clear(),
                KeyCode::Up => state.cursor = self.step_cursor(state.cursor, 1, 0),
                KeyCode::Down => state.cursor = self.step_cursor(state.cursor, -1, 0),
                KeyCode::Left => state.cursor = self.step_cursor(state.cursor, 0, -1),
                KeyCode::Right => state.cursor = self.step_cursor(state.cursor, 0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    // 移動先確定
                    if let Some(mv) = selection.target(state.cursor) {
                        return Some(mv);
                    }
                    // 移動元選択
                    selection.select(board, self.color, legal_moves, state.cursor);
                }
                _ => {}
            }
        }
    }
}
