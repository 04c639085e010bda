//! ECS Components
//!
//! Components attached to positioned entities in the `hecs` world. A
//! creature never stores its own coordinates; they are always read from
//! the `Position` of the entity that owns it.

use serde::{Deserialize, Serialize};

use crate::constants::{HP_PER_LEVEL, MP_PER_LEVEL, STAT_PER_LEVEL};
use crate::items::EquipSlots;
use crate::progression::xp;

// ============================================================================
// Position & Movement
// ============================================================================

/// Position in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position
    pub fn distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// Facing and movement intent, consumed by the animation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    pub right: bool,
    pub moving: bool,
}

impl Default for Facing {
    fn default() -> Self {
        Self { right: true, moving: false }
    }
}

impl Facing {
    /// Record the direction of an attempted step, whether or not it succeeds
    pub fn update(&mut self, dx: i32, dy: i32) {
        if dx > 0 {
            self.right = true;
            self.moving = true;
        } else if dx < 0 {
            self.right = false;
            self.moving = true;
        }
        if dy != 0 {
            self.moving = true;
        }
    }

    pub fn left(&self) -> bool {
        !self.right
    }
}

// ============================================================================
// Identity & Teams
// ============================================================================

/// Marks an entity as the player
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Team tag; creatures without one are neutral and collide with nobody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn name(&self) -> &'static str {
        match self {
            Faction::Player => "player",
            Faction::Enemy => "enemy",
        }
    }
}

// ============================================================================
// Creature Stats
// ============================================================================

/// Level-1 stat row as stored in the creature table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub mp: i32,
    pub strength: i32,
    pub defense: i32,
    pub wizardry: i32,
}

impl BaseStats {
    pub fn new(hp: i32, mp: i32, strength: i32, defense: i32, wizardry: i32) -> Self {
        Self { hp, mp, strength, defense, wizardry }
    }
}

/// Live stat block of a creature
///
/// `hp` and `mp` never exceed their maximums and `exp` is always below
/// `EXP_PER_LEVEL` once a call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStat {
    pub max_hp: i32,
    pub max_mp: i32,
    pub hp: i32,
    pub mp: i32,
    pub strength: i32,
    pub defense: i32,
    pub wizardry: i32,
    pub level: u32,
    pub exp: u32,
}

impl CreatureStat {
    /// Derive a stat block for `level` from base values
    pub fn new(base: BaseStats, level: u32) -> Self {
        let level = level.max(1);
        let gained = (level - 1) as i32;
        let max_hp = base.hp + HP_PER_LEVEL * gained;
        let max_mp = base.mp + MP_PER_LEVEL * gained;
        Self {
            max_hp,
            max_mp,
            hp: max_hp,
            mp: max_mp,
            strength: base.strength + STAT_PER_LEVEL * gained,
            defense: base.defense + STAT_PER_LEVEL * gained,
            wizardry: base.wizardry + STAT_PER_LEVEL * gained,
            level,
            exp: 0,
        }
    }

    /// Heal hp up to the maximum, returning the amount actually restored
    pub fn heal_hp(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Restore mp up to the maximum, returning the amount actually restored
    pub fn heal_mp(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = (self.mp + amount.max(0)).min(self.max_mp);
        self.mp - before
    }

    pub fn spend_mp(&mut self, amount: i32) -> bool {
        let amount = amount.max(0);
        if self.mp >= amount {
            self.mp -= amount;
            true
        } else {
            false
        }
    }

    /// Unarmed hit damage
    pub fn physical_damage(&self) -> i32 {
        self.strength
    }

    pub fn magic_damage(&self, base_damage: i32) -> i32 {
        self.wizardry + base_damage
    }

    pub fn damage_blocked(&self) -> i32 {
        self.defense
    }

    /// Exp a killer of `attacker_level` earns by slaying this creature
    pub fn calc_exp_gained(&self, attacker_level: u32) -> u32 {
        xp::exp_for_kill(attacker_level, self.level)
    }

    /// Flat per-level stat increase
    pub fn level_up(&mut self) {
        self.level += 1;
        self.max_hp += HP_PER_LEVEL;
        self.max_mp += MP_PER_LEVEL;
        self.strength += STAT_PER_LEVEL;
        self.defense += STAT_PER_LEVEL;
        self.wizardry += STAT_PER_LEVEL;
    }

    /// Convert whole exp buckets into levels, returning how many were gained
    pub fn check_for_level_up(&mut self) -> u32 {
        let (gained, rest) = xp::split_levels(self.exp);
        for _ in 0..gained {
            self.level_up();
        }
        self.exp = rest;
        gained
    }

    /// Add exp and settle any level-ups in one step
    pub fn gain_exp(&mut self, amount: u32) -> u32 {
        self.exp = self.exp.saturating_add(amount);
        self.check_for_level_up()
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// A creature attached to a positioned entity
#[derive(Debug, Clone)]
pub struct Creature {
    pub name: String,
    /// `None` = neutral
    pub team: Option<Faction>,
    pub killable: bool,
    pub walk_through_tile: bool,
    pub stat: CreatureStat,
    /// Present only for creatures that can wear equipment
    pub equip_slot: Option<EquipSlots>,
    pub description: Option<String>,
}

impl Creature {
    pub fn new(name: impl Into<String>, stat: CreatureStat) -> Self {
        Self {
            name: name.into(),
            team: None,
            killable: true,
            walk_through_tile: false,
            stat,
            equip_slot: None,
            description: None,
        }
    }

    pub fn with_team(mut self, team: Option<Faction>) -> Self {
        self.team = team;
        self
    }

    pub fn with_killable(mut self, killable: bool) -> Self {
        self.killable = killable;
        self
    }

    pub fn with_walk_through_tile(mut self, walk_through_tile: bool) -> Self {
        self.walk_through_tile = walk_through_tile;
        self
    }

    pub fn with_equip_slots(mut self, slots: EquipSlots) -> Self {
        self.equip_slot = Some(slots);
        self
    }

    /// True when `other` is on a different, non-neutral team
    pub fn is_hostile_to(&self, other: &Creature) -> bool {
        match (self.team, other.team) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("No description available")
    }

    /// Heal 1 hp and 1 mp on every `regen_time`-th turn
    pub fn regen(&mut self, turn: u64, regen_time: u64) -> bool {
        if regen_time == 0 || turn % regen_time != 0 {
            return false;
        }
        self.stat.heal_hp(1);
        self.stat.heal_mp(1);
        true
    }

    pub fn check_for_level_up(&mut self) -> u32 {
        self.stat.check_for_level_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXP_PER_LEVEL;

    fn base() -> BaseStats {
        BaseStats::new(10, 4, 3, 2, 1)
    }

    #[test]
    fn test_stat_derivation_by_level() {
        let stat = CreatureStat::new(base(), 3);
        assert_eq!(stat.max_hp, 20);
        assert_eq!(stat.max_mp, 10);
        assert_eq!(stat.hp, stat.max_hp);
        assert_eq!(stat.mp, stat.max_mp);
        assert_eq!(stat.strength, 5);
        assert_eq!(stat.defense, 4);
        assert_eq!(stat.wizardry, 3);
        assert_eq!(stat.exp, 0);
    }

    #[test]
    fn test_level_zero_treated_as_one() {
        let stat = CreatureStat::new(base(), 0);
        assert_eq!(stat.level, 1);
        assert_eq!(stat.max_hp, 10);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut stat = CreatureStat::new(base(), 1);
        stat.hp = 7;
        assert_eq!(stat.heal_hp(10), 3);
        assert_eq!(stat.hp, stat.max_hp);
        assert_eq!(stat.heal_mp(5), 0);
        assert_eq!(stat.mp, stat.max_mp);
    }

    #[test]
    fn test_negative_mp_cost_cannot_overfill() {
        let mut stat = CreatureStat::new(base(), 1);
        assert!(stat.spend_mp(-5));
        assert_eq!(stat.mp, stat.max_mp);
        assert!(stat.spend_mp(3));
        assert_eq!(stat.mp, 1);
        assert!(!stat.spend_mp(2));
        assert_eq!(stat.mp, 1);
    }

    #[test]
    fn test_damage_formulas() {
        let stat = CreatureStat::new(base(), 1);
        assert_eq!(stat.physical_damage(), 3);
        assert_eq!(stat.magic_damage(6), 7);
        assert_eq!(stat.damage_blocked(), 2);
    }

    #[test]
    fn test_exp_buckets_become_levels() {
        let mut stat = CreatureStat::new(base(), 1);
        let gained = stat.gain_exp(250);
        assert_eq!(gained, 2);
        assert_eq!(stat.level, 3);
        assert_eq!(stat.exp, 50);
        assert_eq!(stat.max_hp, 20);
        assert_eq!(stat.strength, 5);
    }

    #[test]
    fn test_exp_below_bucket_keeps_level() {
        let mut stat = CreatureStat::new(base(), 2);
        assert_eq!(stat.gain_exp(99), 0);
        assert_eq!(stat.level, 2);
        assert_eq!(stat.exp, 99);
        assert_eq!(stat.gain_exp(1), 1);
        assert_eq!(stat.exp, 0);
    }

    #[test]
    fn test_exp_invariant_across_awards() {
        let mut stat = CreatureStat::new(base(), 1);
        for award in [0, 5, 99, 100, 101, 340, 7, 1000] {
            let before = stat.level;
            let total = stat.exp + award;
            let gained = stat.gain_exp(award);
            assert_eq!(gained, total / EXP_PER_LEVEL);
            assert_eq!(stat.level, before + gained);
            assert!(stat.exp < EXP_PER_LEVEL);
        }
    }

    #[test]
    fn test_regen_only_on_interval() {
        let mut creature = Creature::new("slime", CreatureStat::new(base(), 1));
        creature.stat.hp = 5;
        creature.stat.mp = 0;
        assert!(!creature.regen(3, 10));
        assert_eq!(creature.stat.hp, 5);
        assert!(creature.regen(20, 10));
        assert_eq!((creature.stat.hp, creature.stat.mp), (6, 1));
    }

    #[test]
    fn test_hostility() {
        let stat = CreatureStat::new(base(), 1);
        let knight = Creature::new("knight", stat).with_team(Some(Faction::Player));
        let slime = Creature::new("slime", stat).with_team(Some(Faction::Enemy));
        let camera = Creature::new("camera", stat);
        assert!(knight.is_hostile_to(&slime));
        assert!(!knight.is_hostile_to(&knight.clone()));
        assert!(!camera.is_hostile_to(&slime));
    }

    #[test]
    fn test_facing_tracks_attempted_direction() {
        let mut facing = Facing::default();
        facing.update(-1, 0);
        assert!(facing.left() && facing.moving);
        facing.moving = false;
        facing.update(0, 1);
        assert!(facing.left() && facing.moving);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Position::new(1, 1);
        assert_eq!(a.chebyshev_distance(&Position::new(4, 3)), 3);
        assert_eq!(a.distance(&Position::new(4, 3)), 5);
    }
}
