//! Core game logic: the board in its two encodings, per-player piece
//! histories, and the engine implementing drop, disarray and offset.

mod board;
mod history;
pub mod notation;
mod player;
mod state;

pub use board::{Board, Cell, Pos, Representation};
pub use history::History;
pub use notation::Command;
pub use player::Player;
pub use state::{Game, Outcome};
