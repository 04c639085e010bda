//! Entity Component System module
//!
//! Components live in a `hecs::World`; an `Entity` handle is the only way
//! one object refers to another.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{Ai, ChaseAi, PolicyView, TurnAction, TurnPolicy};
