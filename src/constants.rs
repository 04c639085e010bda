//! Tuning constants shared across the core.

/// Number of degrees swept by the visibility ray caster.
pub const RAYS: usize = 360;

/// Default angular step between rays, in degrees.
pub const RAY_STEP: usize = 3;

/// Nominal sight radius of the player (in tiles).
pub const SIGHT_RADIUS: i32 = 3;

/// Extra tile granted to creatures that act after the player, so a player
/// that steps away first is still seen on the enemy's turn.
pub const FOV_PARITY_BONUS: i32 = 1;

/// Turns between passive hp/mp regeneration ticks.
pub const REGEN_TIME: u64 = 10;

/// Experience needed per level.
pub const EXP_PER_LEVEL: u32 = 100;

/// Flat stat gains per level.
pub const HP_PER_LEVEL: i32 = 5;
pub const MP_PER_LEVEL: i32 = 3;
pub const STAT_PER_LEVEL: i32 = 1;

/// Exp multiplier when the killer is at or below the victim's level.
pub const EXP_SCALE_UPWARD: u32 = 20;
/// Exp multiplier when the killer out-levels the victim.
pub const EXP_SCALE_DOWNWARD: u32 = 5;

/// Default container capacity for the player.
pub const INVENTORY_VOLUME: f32 = 20.0;

/// Messages kept in the log.
pub const MAX_MESSAGES: usize = 100;

/// Default directory holding data tables and config.
pub const DATA_DIR: &str = "assets/data";
