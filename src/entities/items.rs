//! Item entity creation

use hecs::{Entity, World};

use crate::data::DataManager;
use crate::ecs::Position;
use crate::error::GameResult;
use crate::items::Container;

/// Spawn an item from the item table lying on the floor at `pos`
pub fn spawn_item(world: &mut World, data: &DataManager, name: &str, pos: Position) -> GameResult<Entity> {
    let item = data.item(name)?.instantiate();
    log::debug!("Spawning {} at ({}, {})", item.name, pos.x, pos.y);
    Ok(world.spawn((pos, item)))
}

/// Spawn an item straight into `holder`'s inventory, ignoring capacity
pub fn give_item(world: &mut World, data: &DataManager, holder: Entity, name: &str) -> GameResult<Entity> {
    let mut item = data.item(name)?.instantiate();
    world.get::<&Container>(holder).map(|_| ())?;
    item.holder = Some(holder);
    let entity = world.spawn((item,));
    world.get::<&mut Container>(holder)?.push(entity);
    Ok(entity)
}
