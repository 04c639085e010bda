//! Creature entity creation
//!
//! Builds creatures from the creature table. Any creature can be spawned
//! onto any team; enemies are simply creatures on the enemy team with a
//! chase policy.

use hecs::{Entity, EntityBuilder, World};

use crate::data::DataManager;
use crate::ecs::{Ai, Creature, CreatureStat, Facing, Faction, Position};
use crate::error::DataError;
use crate::items::EquipSlots;

/// Build a creature component from its table row
pub fn build_creature(
    data: &DataManager,
    name: &str,
    team: Option<Faction>,
    level: u32,
) -> Result<Creature, DataError> {
    let template = data.creature(name)?;
    let mut creature = Creature::new(template.name.clone(), CreatureStat::new(template.stats, level))
        .with_team(team);
    if !template.equip.is_empty() {
        creature = creature.with_equip_slots(EquipSlots::new(template.equip.iter().copied()));
    }
    creature.description = template.description.clone();
    Ok(creature)
}

/// Spawn a creature at `pos`, optionally driven by a policy
pub fn spawn_creature(
    world: &mut World,
    data: &DataManager,
    name: &str,
    pos: Position,
    team: Option<Faction>,
    level: u32,
    ai: Option<Ai>,
) -> Result<Entity, DataError> {
    let creature = build_creature(data, name, team, level)?;
    log::debug!("Spawning {} (level {}) at ({}, {})", creature.name, level, pos.x, pos.y);

    let mut builder = EntityBuilder::new();
    builder.add(pos).add(creature).add(Facing::default());
    if let Some(ai) = ai {
        builder.add(ai);
    }
    Ok(world.spawn(builder.build()))
}

/// Spawn a chasing creature on the enemy team
pub fn spawn_enemy(
    world: &mut World,
    data: &DataManager,
    name: &str,
    pos: Position,
    level: u32,
) -> Result<Entity, DataError> {
    spawn_creature(world, data, name, pos, Some(Faction::Enemy), level, Some(Ai::chase()))
}
