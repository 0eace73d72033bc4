//! Front ends over the game engine: a full-screen terminal view with a
//! column selector, and a plain line-based mode.

mod app;
mod game_view;
pub mod plain;

pub use app::App;
