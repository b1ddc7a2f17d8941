use super::types::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One committed turn: a piece travels from `from` to `to`, jumping over
/// `captured` in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub captured: Vec<Position>,
}

impl Move {
    pub fn new(from: Position, to: Position, captured: Vec<Position>) -> Self {
        Move { from, to, captured }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.captured.is_empty() {
            write!(f, "{} -> {}", self.from, self.to)
        } else {
            write!(f, "{} x {}", self.from, self.to)?;
            write!(f, " (captures")?;
            for pos in &self.captured {
                write!(f, " {}", pos)?;
            }
            write!(f, ")")
        }
    }
}
