//! Equipment system
//!
//! Per-creature slot maps, on-demand bonus totals and the equip toggle.
//! An item is always in exactly one place: a container's inventory, an
//! equip slot, or on the floor.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use super::inventory::Container;
use super::item::{EquipSlot, EquipmentStat, Item};
use crate::ecs::Creature;
use crate::error::{GameError, GameResult};

/// Slots a creature can wear, each empty or holding an item entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipSlots {
    slots: BTreeMap<EquipSlot, Option<Entity>>,
}

impl EquipSlots {
    /// Empty slots for the given scheme
    pub fn new(scheme: impl IntoIterator<Item = EquipSlot>) -> Self {
        Self {
            slots: scheme.into_iter().map(|slot| (slot, None)).collect(),
        }
    }

    pub fn has_slot(&self, slot: EquipSlot) -> bool {
        self.slots.contains_key(&slot)
    }

    /// Item in a slot, if any
    pub fn get(&self, slot: EquipSlot) -> Option<Entity> {
        self.slots.get(&slot).copied().flatten()
    }

    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_none()
    }

    fn set(&mut self, slot: EquipSlot, item: Option<Entity>) {
        if let Some(entry) = self.slots.get_mut(&slot) {
            *entry = item;
        }
    }

    /// Slot names in order
    pub fn slots(&self) -> impl Iterator<Item = EquipSlot> + '_ {
        self.slots.keys().copied()
    }

    /// Non-empty slots
    pub fn equipped(&self) -> impl Iterator<Item = (EquipSlot, Entity)> + '_ {
        self.slots
            .iter()
            .filter_map(|(slot, item)| item.map(|e| (*slot, e)))
    }

    /// Empty every slot, returning what was worn
    pub fn clear(&mut self) -> Vec<Entity> {
        self.slots.values_mut().filter_map(Option::take).collect()
    }
}

/// Summed bonuses over a creature's non-empty slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentBonuses {
    pub strength: i32,
    pub defense: i32,
    pub wizardry: i32,
    /// Reported only; does not raise `max_hp`
    pub hp: i32,
    /// Reported only; does not raise `max_mp`
    pub mp: i32,
}

impl EquipmentBonuses {
    pub fn add(&mut self, stat: &EquipmentStat) {
        self.strength += stat.strength_bonus;
        self.defense += stat.defense_bonus;
        self.wizardry += stat.wizardry_bonus;
        self.hp += stat.hp_bonus;
        self.mp += stat.mp_bonus;
    }
}

/// Sum equipment bonuses for a creature. Recomputed on every call.
pub fn equipment_bonuses(world: &World, creature: &Creature) -> EquipmentBonuses {
    let mut bonuses = EquipmentBonuses::default();
    let Some(slots) = &creature.equip_slot else {
        return bonuses;
    };

    for (slot, item) in slots.equipped() {
        match world.get::<&Item>(item) {
            Ok(item) => {
                if let Some(stat) = &item.equipment {
                    bonuses.add(stat);
                }
            }
            Err(_) => log::warn!("{} slot of {} holds a stale item", slot.name(), creature.name),
        }
    }
    bonuses
}

/// Result of toggling an item's equipped state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    Equipped(EquipSlot),
    Unequipped(EquipSlot),
    /// Another item already occupies the slot; nothing changed
    SlotOccupied(EquipSlot),
    /// The holder has no such slot
    NoSuchSlot(EquipSlot),
    /// Unequipping would overflow the holder's inventory; nothing changed
    InventoryFull(EquipSlot),
    NotEquipment,
    /// Lying on the floor; pick it up first
    NotHeld,
}

/// Equip a carried item into its slot, or unequip it back into the
/// holder's inventory. Never despawns the item.
pub fn toggle_equip(world: &World, item: Entity) -> GameResult<EquipOutcome> {
    let (equipment, holder, volume) = {
        let item_ref = world
            .get::<&Item>(item)
            .map_err(|_| GameError::NotAnItem(item))?;
        (item_ref.equipment, item_ref.holder, item_ref.volume)
    };
    let Some(mut equipment) = equipment else {
        return Ok(EquipOutcome::NotEquipment);
    };
    let Some(holder) = holder else {
        return Ok(EquipOutcome::NotHeld);
    };
    let slot = equipment.slot;

    // Checked before any mutable borrow of the Item column
    if equipment.equipped && !world.get::<&Container>(holder)?.can_fit(world, volume) {
        return Ok(EquipOutcome::InventoryFull(slot));
    }

    {
        let mut creature = world
            .get::<&mut Creature>(holder)
            .map_err(|_| GameError::NotACreature(holder))?;
        let mut container = world.get::<&mut Container>(holder)?;

        let Some(slots) = creature.equip_slot.as_mut().filter(|s| s.has_slot(slot)) else {
            return Ok(EquipOutcome::NoSuchSlot(slot));
        };

        if equipment.equipped {
            slots.set(slot, None);
            container.push(item);
        } else {
            if !slots.is_empty(slot) {
                return Ok(EquipOutcome::SlotOccupied(slot));
            }
            slots.set(slot, Some(item));
            container.remove(item);
        }
    }

    equipment.equipped = !equipment.equipped;
    world.get::<&mut Item>(item)?.equipment = Some(equipment);
    Ok(if equipment.equipped {
        EquipOutcome::Equipped(slot)
    } else {
        EquipOutcome::Unequipped(slot)
    })
}
