//! Experience and leveling
//!
//! Kill rewards and the 100-exp bucket rule that turns exp into levels.

use crate::constants::{EXP_PER_LEVEL, EXP_SCALE_DOWNWARD, EXP_SCALE_UPWARD};

/// Exp awarded to a killer of `attacker_level` for slaying a creature of
/// `defender_level`. Kills at or below the target's level use the larger
/// scale; the level gap multiplies either way.
pub fn exp_for_kill(attacker_level: u32, defender_level: u32) -> u32 {
    let scale = if attacker_level <= defender_level {
        EXP_SCALE_UPWARD
    } else {
        EXP_SCALE_DOWNWARD
    };
    (attacker_level.abs_diff(defender_level) + 1) * scale
}

/// Split an exp total into whole levels and the remainder kept at rest
pub fn split_levels(exp: u32) -> (u32, u32) {
    (exp / EXP_PER_LEVEL, exp % EXP_PER_LEVEL)
}

/// Exp still missing before the next level-up
pub fn exp_to_next_level(exp: u32) -> u32 {
    EXP_PER_LEVEL - split_levels(exp).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_level_kill() {
        assert_eq!(exp_for_kill(1, 1), 20);
        assert_eq!(exp_for_kill(4, 4), 20);
    }

    #[test]
    fn test_upward_kill_scales_with_gap() {
        assert_eq!(exp_for_kill(1, 3), 60);
        assert_eq!(exp_for_kill(2, 7), 120);
    }

    #[test]
    fn test_downward_kill_uses_small_scale() {
        assert_eq!(exp_for_kill(3, 1), 15);
        assert_eq!(exp_for_kill(10, 1), 50);
    }

    #[test]
    fn test_split_levels() {
        assert_eq!(split_levels(0), (0, 0));
        assert_eq!(split_levels(250), (2, 50));
        assert_eq!(split_levels(100), (1, 0));
        assert_eq!(exp_to_next_level(250), 50);
        assert_eq!(exp_to_next_level(0), 100);
    }
}
