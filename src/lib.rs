//! Term Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - High score persistence (scores module)
//! - Key mapping, menu state and TUI rendering (input, menu, render modules)
//! - The terminal front end tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod menu;
pub mod render;
pub mod scores;
