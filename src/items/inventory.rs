//! Inventory system
//!
//! Volume-bounded containers and moving items between the floor and a
//! creature's inventory.

use hecs::{Entity, World};

use super::item::Item;
use crate::ecs::Position;
use crate::error::{GameError, GameResult};

/// Bounded-volume inventory: an ordered list of item entities
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// Maximum total volume of carried (not worn) items
    pub capacity: f32,
    inventory: Vec<Entity>,
}

impl Container {
    pub fn new(capacity: f32) -> Self {
        Self {
            capacity,
            inventory: Vec::new(),
        }
    }

    /// Items in pickup order
    pub fn items(&self) -> &[Entity] {
        &self.inventory
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn contains(&self, item: Entity) -> bool {
        self.inventory.contains(&item)
    }

    pub(crate) fn push(&mut self, item: Entity) {
        if !self.contains(item) {
            self.inventory.push(item);
        }
    }

    pub(crate) fn remove(&mut self, item: Entity) -> bool {
        match self.inventory.iter().position(|&e| e == item) {
            Some(idx) => {
                self.inventory.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empty the container, returning its items
    pub(crate) fn take_all(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.inventory)
    }

    /// Total volume of the items in the inventory
    pub fn used_volume(&self, world: &World) -> f32 {
        self.inventory
            .iter()
            .filter_map(|&e| world.get::<&Item>(e).ok().map(|item| item.volume))
            .sum()
    }

    pub fn can_fit(&self, world: &World, volume: f32) -> bool {
        self.used_volume(world) + volume <= self.capacity
    }
}

/// Result of a pickup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    PickedUp,
    /// Not enough free volume; nothing changed
    InventoryFull,
    /// The picker cannot carry anything
    NoContainer,
    /// Already carried by someone
    NotOnFloor,
}

/// Result of a drop attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped(Position),
    /// Worn items have to be unequipped first
    StillEquipped,
    NotCarried,
}

/// Move a floor item into `picker`'s inventory
pub fn pick_up(world: &mut World, picker: Entity, item: Entity) -> GameResult<PickupOutcome> {
    {
        let item_ref = world
            .get::<&Item>(item)
            .map_err(|_| GameError::NotAnItem(item))?;
        if item_ref.holder.is_some() || world.get::<&Position>(item).is_err() {
            return Ok(PickupOutcome::NotOnFloor);
        }

        let Ok(container) = world.get::<&Container>(picker) else {
            return Ok(PickupOutcome::NoContainer);
        };
        if !container.can_fit(world, item_ref.volume) {
            log::debug!("{} does not fit", item_ref.name);
            return Ok(PickupOutcome::InventoryFull);
        }
    }

    world.remove_one::<Position>(item)?;
    world.get::<&mut Item>(item)?.holder = Some(picker);
    world.get::<&mut Container>(picker)?.push(item);
    Ok(PickupOutcome::PickedUp)
}

/// Put a carried item on the floor under its holder
pub fn drop_item(world: &mut World, holder: Entity, item: Entity) -> GameResult<DropOutcome> {
    let position = {
        let item_ref = world
            .get::<&Item>(item)
            .map_err(|_| GameError::NotAnItem(item))?;
        if item_ref.holder != Some(holder) {
            return Ok(DropOutcome::NotCarried);
        }
        if item_ref.is_equipped() {
            return Ok(DropOutcome::StillEquipped);
        }
        *world.get::<&Position>(holder)?
    };

    if !world.get::<&mut Container>(holder)?.remove(item) {
        return Ok(DropOutcome::NotCarried);
    }
    world.get::<&mut Item>(item)?.holder = None;
    world.insert_one(item, position)?;
    Ok(DropOutcome::Dropped(position))
}
