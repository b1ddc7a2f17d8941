use super::types::Color;
use serde::{Deserialize, Serialize};

/// 駒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Piece { color, king: false }
    }

    pub fn king(color: Color) -> Self {
        Piece { color, king: true }
    }

    /// Row directions this piece may move and capture in.
    pub fn directions(&self) -> &'static [isize] {
        if self.king {
            &[-1, 1]
        } else {
            match self.color {
                Color::Red => &[-1],
                Color::White => &[1],
            }
        }
    }

    /// Single-character symbol used by setups and the ASCII diagram.
    pub fn display_char(&self) -> char {
        match (self.color, self.king) {
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
            (Color::White, false) => 'w',
            (Color::White, true) => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Piece::man(Color::Red)),
            'R' => Some(Piece::king(Color::Red)),
            'w' => Some(Piece::man(Color::White)),
            'W' => Some(Piece::king(Color::White)),
            _ => None,
        }
    }
}
