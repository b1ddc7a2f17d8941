pub mod record;
pub mod replay;
pub mod selection;

pub use record::GameRecord;
pub use selection::Selection;

use crate::core::{Board, BoardError, Color, Move, Position};
use crate::display::{render_board, DisplayState};
use crate::logic::{commit_move, game_result, moves_for, Rules};
use crate::player::PlayerController;
use std::time::Duration;

/// Plies before an unfinished game is called a draw.
pub const DEFAULT_MAX_MOVES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerspectiveMode {
    Fixed(Color),
    AutoFlip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The loser was to move and had no legal move.
    NoMoves,
    Resigned,
    /// Drawn by the ply limit.
    MoveLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Option<Color>,
    pub reason: EndReason,
    pub moves: usize,
}

impl GameOutcome {
    pub fn describe(&self) -> String {
        match (self.winner, self.reason) {
            (_, EndReason::MoveLimit) | (None, _) => {
                format!("Draw after {} moves.", self.moves)
            }
            (Some(w), EndReason::NoPieces) => format!("{} wins! {} has no pieces left.", w, w.opponent()),
            (Some(w), EndReason::NoMoves) => format!("{} wins! {} cannot move.", w, w.opponent()),
            (Some(w), EndReason::Resigned) => format!("{} wins! {} resigned.", w, w.opponent()),
        }
    }
}

/// A game in progress: the board, whose turn it is, what has been played,
/// and the piece currently picked up by an interactive player.
pub struct Game {
    pub board: Board,
    pub turn: Color,
    pub rules: Rules,
    pub history: Vec<Move>,
    pub selection: Selection,
    pub perspective_mode: PerspectiveMode,
    /// Plies before the game is called a draw.
    pub max_moves: usize,
    initial: Board,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            initial: board.clone(),
            board,
            turn: Color::Red,
            rules: Rules::default(),
            history: Vec::new(),
            selection: Selection::default(),
            perspective_mode: PerspectiveMode::AutoFlip,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        moves_for(&self.board, self.turn, &self.rules)
    }

    /// Winner with the current side to move, counting a blocked side as lost.
    pub fn winner(&self) -> Option<Color> {
        self.finished().and_then(|o| o.winner)
    }

    fn finished(&self) -> Option<GameOutcome> {
        let moves = self.history.len();
        if let Some(winner) = game_result(&self.board, self.turn, &self.rules) {
            let reason = if self.board.winner().is_some() {
                EndReason::NoPieces
            } else {
                EndReason::NoMoves
            };
            return Some(GameOutcome {
                winner: Some(winner),
                reason,
                moves,
            });
        }
        if moves >= self.max_moves {
            return Some(GameOutcome {
                winner: None,
                reason: EndReason::MoveLimit,
                moves,
            });
        }
        None
    }

    /// Pick up the piece on (row, col). Succeeds only for a piece of the side
    /// to move; on failure the previous selection is dropped.
    pub fn select(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        let pos = Position::new(row, col)?;
        let legal = self.legal_moves();
        Ok(self.selection.select(&self.board, self.turn, &legal, pos))
    }

    /// Move the selected piece to (row, col). The board is left untouched
    /// unless the destination is one of the selection's legal moves.
    pub fn move_selected(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        let pos = Position::new(row, col)?;
        match self.selection.target(pos) {
            Some(mv) => Ok(self.play_move(&mv)),
            None => Ok(false),
        }
    }

    /// Mouse-style handling: with a piece selected, try to move it there;
    /// otherwise (or if that fails) try to select the piece on the cell.
    pub fn click(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        if self.selection.selected.is_some() && self.move_selected(row, col)? {
            return Ok(true);
        }
        self.select(row, col)
    }

    /// Commit `mv` for the side to move if it is legal, then pass the turn.
    pub fn play_move(&mut self, mv: &Move) -> bool {
        if !self.legal_moves().contains(mv) {
            tracing::warn!(color = %self.turn, %mv, "rejected illegal move");
            return false;
        }
        let promoted = commit_move(&mut self.board, mv);
        tracing::info!(
            ply = self.history.len() + 1,
            color = %self.turn,
            %mv,
            promoted,
            red = self.board.remaining(Color::Red),
            white = self.board.remaining(Color::White),
            "move played"
        );
        self.history.push(mv.clone());
        self.selection.clear();
        self.turn = self.turn.opponent();
        true
    }

    pub fn to_record(&self, winner: Option<Color>) -> GameRecord {
        GameRecord::new(self.initial.clone(), self.rules, self.history.clone(), winner)
    }

    fn controller<'a>(
        &self,
        red: &'a dyn PlayerController,
        white: &'a dyn PlayerController,
    ) -> &'a dyn PlayerController {
        match self.turn {
            Color::Red => red,
            Color::White => white,
        }
    }

    /// Ask the side to move for a move and play it. Returns the outcome once
    /// the game is over.
    fn advance(
        &mut self,
        red: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<Option<GameOutcome>> {
        if let Some(outcome) = self.finished() {
            return Ok(Some(outcome));
        }

        let controller = self.controller(red, white);
        let moves = self.legal_moves();
        let Some(mv) = controller.choose_move(&self.board, &moves) else {
            tracing::info!(color = %self.turn, player = controller.name(), "resigned");
            return Ok(Some(GameOutcome {
                winner: Some(self.turn.opponent()),
                reason: EndReason::Resigned,
                moves: self.history.len(),
            }));
        };
        if !self.play_move(&mv) {
            anyhow::bail!("{} returned an illegal move: {}", controller.name(), mv);
        }
        Ok(None)
    }

    /// Play to the end without drawing anything.
    pub fn run_silent(
        &mut self,
        red: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.advance(red, white)? {
                tracing::info!(result = %outcome.describe(), "game over");
                return Ok(outcome);
            }
        }
    }

    /// Play to the end in the terminal.
    pub fn play(
        &mut self,
        red: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<GameOutcome> {
        loop {
            let controller = self.controller(red, white);
            let mut state = DisplayState::new();
            state.perspective = match self.perspective_mode {
                PerspectiveMode::Fixed(c) => c,
                PerspectiveMode::AutoFlip => self.turn,
            };
            state.last_move = self.history.last().cloned();
            state.show_cursor = false;
            state.status_msg = Some(format!("{}'s turn ({})", controller.name(), self.turn));

            if !controller.is_human() {
                state.status_msg = Some(format!("{} ({}) is thinking...", controller.name(), self.turn));
                render_board(&self.board, &state)?;
                std::thread::sleep(Duration::from_millis(300));
            }

            if let Some(outcome) = self.advance(red, white)? {
                state.last_move = self.history.last().cloned();
                state.status_msg = Some(outcome.describe());
                render_board(&self.board, &state)?;
                tracing::info!(result = %outcome.describe(), "game over");
                return Ok(outcome);
            }
        }
    }
}
