//! Error types for board access and setup
//!
//! Invalid coordinates and malformed setups are caller bugs, so they surface
//! as typed errors instead of being clamped.

use super::types::Position;

/// Errors raised by board construction and coordinate validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Coordinates outside the 8x8 grid
    #[error("Position ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: usize, col: usize },

    /// Pieces may only stand on dark squares
    #[error("Cannot place a piece on light square {0}")]
    LightSquare(Position),

    /// Target cell already holds a piece
    #[error("Square {0} is already occupied")]
    Occupied(Position),

    /// Text layout could not be parsed
    #[error("Bad board setup: {message}")]
    BadSetup { message: String },
}
