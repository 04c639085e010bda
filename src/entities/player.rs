//! Player entity creation

use hecs::{Entity, World};

use super::enemies::build_creature;
use crate::data::DataManager;
use crate::ecs::{Creature, Facing, Faction, Player, Position};
use crate::error::DataError;
use crate::items::Container;

/// Spawn the player: a level-1 creature on the player team with an
/// inventory of `volume` capacity
pub fn spawn_player(
    world: &mut World,
    data: &DataManager,
    name: &str,
    pos: Position,
    volume: f32,
) -> Result<Entity, DataError> {
    let creature = build_creature(data, name, Some(Faction::Player), 1)?;
    log::debug!("Spawning player {} at ({}, {})", creature.name, pos.x, pos.y);
    Ok(world.spawn((Player, pos, creature, Facing::default(), Container::new(volume))))
}

/// Spawn an unkillable, neutral camera that can float through walls
pub fn spawn_free_camera(world: &mut World, data: &DataManager, pos: Position) -> Result<Entity, DataError> {
    let creature: Creature = build_creature(data, "camera", None, 1)?
        .with_killable(false)
        .with_walk_through_tile(true);
    Ok(world.spawn((pos, creature, Facing::default())))
}
