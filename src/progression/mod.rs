//! Progression systems

pub mod xp;

pub use xp::{exp_for_kill, exp_to_next_level, split_levels};
