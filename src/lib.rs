//! # Connect Disarray
//!
//! A two-player connect-style game with two extra moves: *disarray* flips
//! the board upside down and lets every column fall back into place, and
//! *offset* removes the mover's oldest piece together with the opponent's
//! newest one. The board can be stored densely or packed two bits per cell.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, piece histories, move engine
//! - [`ui`]: Terminal UI and plain line-based play
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
