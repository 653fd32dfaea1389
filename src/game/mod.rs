//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end in [`crate::app`] drives it one tick at a time.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use food::FoodSpawner;
pub use state::{
    CollisionType, EndReason, GameStatus, Position, Snake, SnakeState, StepResult,
};
