//! Entity creation and management

pub mod player;
pub mod enemies;
pub mod items;

pub use player::{spawn_free_camera, spawn_player};
pub use enemies::{build_creature, spawn_creature, spawn_enemy};
pub use items::{give_item, spawn_item};
