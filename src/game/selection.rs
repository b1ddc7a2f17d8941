use crate::core::{Board, Color, Move, Position};
use crate::logic::MoveMap;

/// A picked-up piece and the destinations it may go to this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected: Option<Position>,
    pub valid_moves: MoveMap,
}

impl Selection {
    pub fn clear(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    /// Select the piece on `pos` if it belongs to `turn`, caching its entries
    /// from `legal`. Anything else clears the selection.
    pub fn select(&mut self, board: &Board, turn: Color, legal: &[Move], pos: Position) -> bool {
        match board.piece_at(pos) {
            Some(piece) if piece.color == turn => {
                self.selected = Some(pos);
                self.valid_moves = legal
                    .iter()
                    .filter(|m| m.from == pos)
                    .map(|m| (m.to, m.captured.clone()))
                    .collect();
                true
            }
            _ => {
                self.clear();
                false
            }
        }
    }

    /// The move that lands the selected piece on `to`, if that is allowed.
    pub fn target(&self, to: Position) -> Option<Move> {
        let from = self.selected?;
        self.valid_moves
            .get(&to)
            .map(|captured| Move::new(from, to, captured.clone()))
    }

    pub fn destinations(&self) -> Vec<Position> {
        self.valid_moves.keys().copied().collect()
    }
}
