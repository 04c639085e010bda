//! Damage calculation
//!
//! Flat damage/defense arithmetic plus kill rewards. There is no hit roll:
//! every attack lands and defense subtracts from it.

use hecs::{Entity, World};

use crate::ecs::Creature;
use crate::error::{GameError, GameResult};
use crate::items::{equipment_bonuses, EquipmentBonuses};

/// Result of applying raw damage to one creature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    pub raw: i32,
    pub blocked: i32,
    /// Damage that actually came off hp; never negative
    pub dealt: i32,
    pub remaining_hp: i32,
    pub died: bool,
}

impl Creature {
    /// Strength plus worn strength bonuses
    pub fn total_physical_damage(&self, bonuses: &EquipmentBonuses) -> i32 {
        self.stat.physical_damage() + bonuses.strength
    }

    /// Defense plus worn defense bonuses
    pub fn total_blocked_damage(&self, bonuses: &EquipmentBonuses) -> i32 {
        self.stat.damage_blocked() + bonuses.defense
    }

    pub fn total_magic_damage(&self, base_damage: i32, bonuses: &EquipmentBonuses) -> i32 {
        self.stat.magic_damage(base_damage) + bonuses.wizardry
    }

    /// Subtract `raw` less blocked damage from hp. Hp stops at zero; only
    /// killable creatures die there.
    pub fn take_damage(&mut self, raw: i32, bonuses: &EquipmentBonuses) -> DamageResult {
        let blocked = self.total_blocked_damage(bonuses);
        let dealt = (raw - blocked).max(0);
        self.stat.hp = (self.stat.hp - dealt).max(0);
        DamageResult {
            raw,
            blocked,
            dealt,
            remaining_hp: self.stat.hp,
            died: self.stat.hp <= 0 && self.killable,
        }
    }
}

/// Result of one creature striking another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackResult {
    pub attacker: Entity,
    pub target: Entity,
    pub attacker_name: String,
    pub target_name: String,
    pub damage: DamageResult,
    /// Exp the attacker earned; zero unless the target died
    pub exp_gained: u32,
    pub levels_gained: u32,
    /// Attacker level after any level-ups
    pub attacker_level: u32,
}

impl AttackResult {
    pub fn died(&self) -> bool {
        self.damage.died
    }
}

/// Worn bonuses of a creature entity
pub fn bonuses_of(world: &World, entity: Entity) -> GameResult<EquipmentBonuses> {
    let creature = world
        .get::<&Creature>(entity)
        .map_err(|_| GameError::NotACreature(entity))?;
    Ok(equipment_bonuses(world, &creature))
}

/// Melee damage a creature entity deals with its current gear
pub fn physical_damage_of(world: &World, entity: Entity) -> GameResult<i32> {
    let bonuses = bonuses_of(world, entity)?;
    let creature = world
        .get::<&Creature>(entity)
        .map_err(|_| GameError::NotACreature(entity))?;
    Ok(creature.total_physical_damage(&bonuses))
}

/// Apply `damage` from `attacker` to `target`. On a kill the attacker is
/// awarded exp and levels up as needed. Removing the dead creature from
/// the world is left to the caller.
pub fn resolve_attack(
    world: &World,
    attacker: Entity,
    target: Entity,
    damage: i32,
) -> GameResult<AttackResult> {
    let (attacker_name, attacker_level) = {
        let creature = world
            .get::<&Creature>(attacker)
            .map_err(|_| GameError::NotACreature(attacker))?;
        (creature.name.clone(), creature.stat.level)
    };
    let bonuses = bonuses_of(world, target)?;

    let (result, target_name, exp) = {
        let mut creature = world
            .get::<&mut Creature>(target)
            .map_err(|_| GameError::NotACreature(target))?;
        let result = creature.take_damage(damage, &bonuses);
        let exp = if result.died {
            creature.stat.calc_exp_gained(attacker_level)
        } else {
            0
        };
        (result, creature.name.clone(), exp)
    };

    let mut killer = world
        .get::<&mut Creature>(attacker)
        .map_err(|_| GameError::NotACreature(attacker))?;
    let levels_gained = killer.stat.gain_exp(exp);
    if result.died {
        log::info!("{} killed {} (+{} exp)", attacker_name, target_name, exp);
    }
    if levels_gained > 0 {
        log::info!("{} reached level {}", attacker_name, killer.stat.level);
    }

    Ok(AttackResult {
        attacker,
        target,
        attacker_name,
        target_name,
        damage: result,
        exp_gained: exp,
        levels_gained,
        attacker_level: killer.stat.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{BaseStats, CreatureStat};
    use crate::items::{toggle_equip, Container, EquipSlot, EquipSlots, EquipmentStat, Item};

    fn creature(name: &str, base: BaseStats, level: u32) -> Creature {
        Creature::new(name, CreatureStat::new(base, level))
    }

    #[test]
    fn test_take_damage_subtracts_defense() {
        let mut target = creature("skeleton", BaseStats::new(10, 0, 4, 3, 1), 1);
        let result = target.take_damage(5, &EquipmentBonuses::default());
        assert_eq!(result.blocked, 3);
        assert_eq!(result.dealt, 2);
        assert_eq!(target.stat.hp, 8);
        assert!(!result.died);
    }

    #[test]
    fn test_damage_never_negative() {
        let mut target = creature("skeleton", BaseStats::new(10, 0, 4, 3, 1), 1);
        let bonuses = EquipmentBonuses { defense: 4, ..Default::default() };
        let result = target.take_damage(2, &bonuses);
        assert_eq!(result.dealt, 0);
        assert_eq!(target.stat.hp, 10);
    }

    #[test]
    fn test_hp_clamped_and_unkillable_survives() {
        let mut target = creature("camera", BaseStats::new(3, 0, 1, 1, 1), 1).with_killable(false);
        let result = target.take_damage(50, &EquipmentBonuses::default());
        assert_eq!(target.stat.hp, 0);
        assert!(!result.died);

        let mut slime = creature("slime", BaseStats::new(3, 0, 1, 1, 1), 1);
        let result = slime.take_damage(50, &EquipmentBonuses::default());
        assert_eq!(result.remaining_hp, 0);
        assert!(result.died);
    }

    #[test]
    fn test_totals_include_equipment() {
        let knight = creature("knight", BaseStats::new(30, 10, 5, 2, 3), 1);
        let bonuses = EquipmentBonuses { strength: 3, defense: 2, wizardry: 1, ..Default::default() };
        assert_eq!(knight.total_physical_damage(&bonuses), 8);
        assert_eq!(knight.total_blocked_damage(&bonuses), 4);
        assert_eq!(knight.total_magic_damage(6, &bonuses), 10);
    }

    #[test]
    fn test_kill_awards_exp_to_attacker() {
        let mut world = World::new();
        let knight = world.spawn((creature("knight", BaseStats::new(30, 10, 5, 2, 3), 1),));
        let slime = world.spawn((creature("slime", BaseStats::new(4, 0, 2, 1, 1), 1),));

        let result = resolve_attack(&world, knight, slime, 5).unwrap();
        assert!(result.died());
        assert_eq!(result.exp_gained, 20);
        assert_eq!(world.get::<&Creature>(knight).unwrap().stat.exp, 20);
    }

    #[test]
    fn test_big_kill_levels_up_attacker() {
        let mut world = World::new();
        let knight = world.spawn((creature("knight", BaseStats::new(30, 10, 5, 2, 3), 1),));
        let dragon = world.spawn((creature("dragon", BaseStats::new(1, 0, 1, 1, 1), 10),));

        let result = resolve_attack(&world, knight, dragon, 100).unwrap();
        // (|1 - 10| + 1) * 20
        assert_eq!(result.exp_gained, 200);
        assert_eq!(result.levels_gained, 2);
        assert_eq!(result.attacker_level, 3);
        let stat = world.get::<&Creature>(knight).unwrap().stat;
        assert_eq!((stat.level, stat.exp), (3, 0));
    }

    #[test]
    fn test_survivor_awards_nothing() {
        let mut world = World::new();
        let knight = world.spawn((creature("knight", BaseStats::new(30, 10, 5, 2, 3), 1),));
        let troll = world.spawn((creature("troll", BaseStats::new(40, 0, 5, 1, 1), 1),));
        let result = resolve_attack(&world, knight, troll, 5).unwrap();
        assert!(!result.died());
        assert_eq!(result.exp_gained, 0);
        assert_eq!(result.damage.remaining_hp, 36);
    }

    #[test]
    fn test_worn_shield_blocks() {
        let mut world = World::new();
        let knight = world.spawn((
            creature("knight", BaseStats::new(30, 10, 5, 2, 3), 1)
                .with_equip_slots(EquipSlots::new([EquipSlot::Shield])),
            Container::new(20.0),
        ));
        let mut shield = Item::new("shield", 4.0, 3.0)
            .with_equipment(EquipmentStat::new(EquipSlot::Shield).with_defense(2));
        shield.holder = Some(knight);
        let shield = world.spawn((shield,));
        world.get::<&mut Container>(knight).unwrap().push(shield);
        toggle_equip(&world, shield).unwrap();

        let goblin = world.spawn((creature("goblin", BaseStats::new(14, 2, 4, 2, 1), 1),));
        let result = resolve_attack(&world, goblin, knight, 6).unwrap();
        assert_eq!(result.damage.blocked, 4);
        assert_eq!(result.damage.dealt, 2);
    }
}
