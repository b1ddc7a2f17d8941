pub mod board;
pub mod error;
pub mod r#move;
pub mod piece;
pub mod setup;
pub mod types;

pub use board::Board;
pub use error::BoardError;
pub use piece::Piece;
pub use r#move::Move;
pub use setup::setup_from_strings;
pub use types::{Color, Position, BOARD_SIZE};
