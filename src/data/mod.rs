//! Data loading and external game content
//!
//! Creature and item tables, read from RON or JSON files with built-in
//! fallbacks.

pub mod loader;
pub mod creatures;
pub mod items;

pub use loader::{export_default_data, DataManager};
pub use creatures::{CreatureTemplate, CreatureTemplates};
pub use items::{ItemTemplate, ItemTemplates};
