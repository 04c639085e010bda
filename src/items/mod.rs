//! Item system

pub mod item;
pub mod inventory;
pub mod equipment;

pub use item::{EquipSlot, EquipmentStat, Item, UseEffect};
pub use inventory::{drop_item, pick_up, Container, DropOutcome, PickupOutcome};
pub use equipment::{equipment_bonuses, toggle_equip, EquipOutcome, EquipSlots, EquipmentBonuses};
