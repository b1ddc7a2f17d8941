//! # Evaluation Module
//!
//! Static evaluation of a checkers position, always from White's side
//! (positive = White ahead). White is the maximizing side of the search.
//!
//! ## Scoring
//! 1. **Material**: `man_value` per piece still on the board.
//! 2. **Kings**: `king_bonus` per crowned piece on top of its material.
//! 3. **Decided games**: `±win_score` as soon as one side has no pieces.

use super::config::EvaluationConfig;
use super::evaluator::Evaluator;
use crate::core::{Board, Color};

#[derive(Debug, Clone, Copy)]
pub struct MaterialEvaluator {
    weights: EvaluationConfig,
}

impl MaterialEvaluator {
    pub fn new(weights: EvaluationConfig) -> Self {
        Self { weights }
    }
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self::new(super::config::AIConfig::default().evaluation)
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        match board.winner() {
            Some(Color::White) => return self.weights.win_score,
            Some(Color::Red) => return -self.weights.win_score,
            None => {}
        }

        let men = board.remaining(Color::White) as i32 - board.remaining(Color::Red) as i32;
        let kings = board.kings(Color::White) as i32 - board.kings(Color::Red) as i32;
        self.weights.man_value * men + self.weights.king_bonus * kings
    }

    fn win_score(&self) -> i32 {
        self.weights.win_score
    }

    fn name(&self) -> &str {
        "material"
    }
}
