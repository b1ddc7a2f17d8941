pub mod core;
pub mod display;
pub mod game;
pub mod logging;
pub mod logic;
pub mod player;
pub mod selfplay;
