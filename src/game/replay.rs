use crate::core::{Board, Color};
use crate::display::{render_board, DisplayState};
use crate::game::GameRecord;
use crossterm::event::{self, Event, KeyCode};
use std::path::Path;
use std::time::Duration;

/// Step through a saved game one ply at a time.
pub struct ReplayViewer {
    record: GameRecord,
    boards: Vec<Board>,
    current_index: usize,
}

impl ReplayViewer {
    pub fn new(record: GameRecord) -> anyhow::Result<Self> {
        let boards = record.replay()?;
        Ok(Self {
            record,
            boards,
            current_index: 0,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::new(GameRecord::load(path)?)
    }

    /// Board after `index()` plies.
    pub fn current(&self) -> &Board {
        &self.boards[self.current_index]
    }

    pub fn index(&self) -> usize {
        self.current_index
    }

    pub fn forward(&mut self) {
        if self.current_index < self.record.moves.len() {
            self.current_index += 1;
        }
    }

    pub fn back(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let total_moves = self.record.moves.len();
            let mut state = DisplayState::new();
            state.perspective = Color::Red;
            state.show_cursor = false;
            state.last_move = self
                .current_index
                .checked_sub(1)
                .and_then(|i| self.record.moves.get(i))
                .cloned();
            state.status_msg = Some(format!(
                "Replay ({}) | Move {}/{} | [←/→] Navigate | [q] Quit",
                self.record.finished_at, self.current_index, total_moves
            ));
            render_board(self.current(), &state)?;

            match self.record.winner {
                Some(w) => print!("Winner: {}\r\n", w),
                None => print!("Result: draw\r\n"),
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Right | KeyCode::Char('n') => self.forward(),
                        KeyCode::Left | KeyCode::Char('p') => self.back(),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}
