//! Knightcrawl - tactical core of a turn-based dungeon crawler
//!
//! Ray-cast field of view, line tracing for ranged spells, and the
//! creature, combat, progression and equipment model they feed.

pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod ecs;
pub mod world;
pub mod entities;
pub mod combat;
pub mod items;
pub mod progression;
pub mod data;

// Re-export commonly used types
pub use config::GameConfig;
pub use error::{DataError, GameError, GameResult};
pub use game::{Game, GameState};
pub use ecs::components::*;
pub use world::map::Map;
