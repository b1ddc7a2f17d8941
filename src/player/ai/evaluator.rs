//! Evaluator trait for board evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::Board;

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the board from White's perspective
    ///
    /// Returns:
    ///   - Positive score: White advantage
    ///   - Negative score: Red advantage
    ///   - `±win_score()`: decided game
    fn evaluate(&self, board: &Board) -> i32;

    /// Magnitude reported for a won or lost position.
    fn win_score(&self) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}
