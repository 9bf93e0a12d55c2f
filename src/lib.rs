//! Falling-block puzzle game: board, piece catalog, collision engine and the
//! game lifecycle, plus the terminal adapters that drive them.

pub mod app;
pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod pieces;
pub mod player;
pub mod ui;
