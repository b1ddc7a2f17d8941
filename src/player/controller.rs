use crate::core::{Board, Color, Move};

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// Pick one of `legal_moves`, or `None` to resign.
    fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> Option<Move>;
    fn name(&self) -> &str;
    fn color(&self) -> Color;

    /// Human controllers draw their own prompt while choosing.
    fn is_human(&self) -> bool {
        false
    }
}
