//! World module
//!
//! Tile grid, visibility and line tracing. Map generation lives outside
//! the core; maps arrive finished.

pub mod map;
pub mod tile;
pub mod fov;
pub mod line;

pub use map::Map;
pub use tile::{Tile, TileType};
pub use fov::{compute_visibility, compute_visibility_with_step, VisibilityMask};
pub use line::trace_line;
