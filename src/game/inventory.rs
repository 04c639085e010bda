//! Item handling on the game context
//!
//! Pickup, drop, use and equip with their player-facing messages.

use hecs::Entity;
use rand::seq::SliceRandom;

use super::messages::MessageCategory;
use super::state::{Game, GameState};
use crate::ecs::{Creature, Position};
use crate::error::{GameError, GameResult};
use crate::items::{
    self, Container, DropOutcome, EquipOutcome, Item, PickupOutcome, UseEffect,
};

/// Result of using an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// The effect was applied and the item consumed
    Used(UseEffect),
    /// Equipment and other items without an effect stay untouched
    NoEffect,
    /// Only carried items can be used
    NotHeld,
    /// Worn items have to be unequipped first
    StillEquipped,
}

impl Game {
    fn name_of(&self, entity: Entity) -> String {
        self.world
            .get::<&Creature>(entity)
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| "someone".to_string())
    }

    /// Pick a floor item up into `entity`'s inventory
    pub fn pick_up(&mut self, entity: Entity, item: Entity) -> GameResult<PickupOutcome> {
        let outcome = items::pick_up(&mut self.world, entity, item)?;
        let item_name = self.item(item)?.name;
        match outcome {
            PickupOutcome::PickedUp => {
                let who = self.name_of(entity);
                self.add_message(format!("{} picked up {}", who, item_name), MessageCategory::Item);
            }
            PickupOutcome::InventoryFull => {
                self.add_message("Inventory Full", MessageCategory::Item);
            }
            PickupOutcome::NoContainer | PickupOutcome::NotOnFloor => {
                log::debug!("pickup of {} rejected: {:?}", item_name, outcome);
            }
        }
        Ok(outcome)
    }

    /// Pick up the first item lying under `entity`, if there is one
    pub fn pick_up_here(&mut self, entity: Entity) -> GameResult<Option<PickupOutcome>> {
        let pos = self.position(entity)?;
        match self.items_at(pos).first() {
            Some(&item) => self.pick_up(entity, item).map(Some),
            None => Ok(None),
        }
    }

    /// Drop a carried item at the holder's feet
    pub fn drop_item(&mut self, entity: Entity, item: Entity) -> GameResult<DropOutcome> {
        let outcome = items::drop_item(&mut self.world, entity, item)?;
        let item_name = self.item(item)?.name;
        match outcome {
            DropOutcome::Dropped(_) => {
                self.add_message(format!("{} dropped", item_name), MessageCategory::Item);
            }
            DropOutcome::StillEquipped => {
                self.add_message(format!("Unequip {} first", item_name), MessageCategory::Item);
            }
            DropOutcome::NotCarried => {}
        }
        Ok(outcome)
    }

    /// Equip or unequip a carried item
    pub fn toggle_equip(&mut self, item: Entity) -> GameResult<EquipOutcome> {
        let outcome = items::toggle_equip(&self.world, item)?;
        let item_name = self.item(item)?.name;
        let text = match outcome {
            EquipOutcome::Equipped(slot) => format!("Equipped {} ({})", item_name, slot.name()),
            EquipOutcome::Unequipped(slot) => format!("Unequipped {} ({})", item_name, slot.name()),
            EquipOutcome::SlotOccupied(slot) => format!("The {} slot is already occupied", slot.name()),
            EquipOutcome::NoSuchSlot(slot) => format!("Cannot wear anything as {}", slot.name()),
            EquipOutcome::NotEquipment => format!("{} cannot be equipped", item_name),
            EquipOutcome::NotHeld => format!("Pick up {} first", item_name),
            EquipOutcome::InventoryFull(_) => "Inventory Full".to_string(),
        };
        if !matches!(outcome, EquipOutcome::Equipped(_) | EquipOutcome::Unequipped(_)) {
            log::debug!("equip of {} rejected: {:?}", item_name, outcome);
        }
        self.add_message(text, MessageCategory::Item);
        Ok(outcome)
    }

    /// Apply a carried item's effect to its holder and consume it
    pub fn use_item(&mut self, item: Entity) -> GameResult<UseOutcome> {
        let record = self.item(item)?;
        let equipped = record.is_equipped();
        let Item { name, holder, use_effect, .. } = record;
        let Some(holder) = holder else {
            return Ok(UseOutcome::NotHeld);
        };
        let Some(effect) = use_effect else {
            return Ok(UseOutcome::NoEffect);
        };
        if equipped {
            self.add_message(format!("Unequip {} first", name), MessageCategory::Item);
            return Ok(UseOutcome::StillEquipped);
        }
        let user = self.name_of(holder);

        match effect {
            UseEffect::HealHp(_) | UseEffect::HealMp(_) => {
                let healed = {
                    let mut creature = self
                        .world
                        .get::<&mut Creature>(holder)
                        .map_err(|_| GameError::NotACreature(holder))?;
                    effect.apply_to_stat(&mut creature.stat).unwrap_or(0)
                };
                let what = if matches!(effect, UseEffect::HealHp(_)) { "hp" } else { "mp" };
                self.add_message(format!("{} healed {} {}", user, healed, what), MessageCategory::Item);
            }
            UseEffect::Teleport => {
                let dest = self.random_free_tile();
                if let Some(dest) = dest {
                    *self.world.get::<&mut Position>(holder)? = dest;
                    self.add_message(format!("{} teleported", user), MessageCategory::Magic);
                    if Some(holder) == self.player() {
                        self.refresh_fov();
                    }
                } else {
                    self.add_message("The scroll fizzles", MessageCategory::Magic);
                }
            }
            UseEffect::Win => {
                self.add_message(format!("{} opens the {}. Victory!", user, name), MessageCategory::System);
                self.set_state(GameState::Victory);
            }
        }

        if let Ok(mut container) = self.world.get::<&mut Container>(holder) {
            container.remove(item);
        }
        self.world.despawn(item)?;
        Ok(UseOutcome::Used(effect))
    }

    /// Walkable tile nobody stands on, chosen with the game RNG
    fn random_free_tile(&mut self) -> Option<Position> {
        let free: Vec<Position> = self
            .map
            .get_walkable_positions()
            .into_iter()
            .filter(|&p| self.creature_at(p, None).is_none())
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::data::DataManager;
    use crate::items::EquipSlot;
    use crate::world::Map;

    fn game_with_player() -> (Game, Entity) {
        let config = GameConfig { rng_seed: Some(3), ..GameConfig::default() };
        let mut game = Game::new(Map::test_map(), DataManager::defaults(), config);
        let player = game.spawn_player("knight", Position::new(2, 2)).unwrap();
        (game, player)
    }

    #[test]
    fn test_pick_up_here_and_drop() {
        let (mut game, player) = game_with_player();
        let potion = game.spawn_item("red potion", Position::new(2, 2)).unwrap();

        assert_eq!(game.pick_up_here(player).unwrap(), Some(PickupOutcome::PickedUp));
        assert_eq!(game.inventory(player).unwrap(), vec![potion]);
        assert!(game.messages().contains("knight picked up red potion"));
        assert_eq!(game.pick_up_here(player).unwrap(), None);

        assert_eq!(
            game.drop_item(player, potion).unwrap(),
            DropOutcome::Dropped(Position::new(2, 2))
        );
        assert_eq!(game.items_at(Position::new(2, 2)), vec![potion]);
    }

    #[test]
    fn test_inventory_full_message() {
        let (mut game, player) = game_with_player();
        for _ in 0..4 {
            let chest = game.spawn_item("chest", Position::new(2, 2)).unwrap();
            assert_eq!(game.pick_up(player, chest).unwrap(), PickupOutcome::PickedUp);
        }
        let chest = game.spawn_item("chest", Position::new(2, 2)).unwrap();
        assert_eq!(game.pick_up(player, chest).unwrap(), PickupOutcome::InventoryFull);
        assert_eq!(game.messages().last().map(|m| m.text.as_str()), Some("Inventory Full"));
    }

    #[test]
    fn test_potion_heals_and_is_consumed() {
        let (mut game, player) = game_with_player();
        game.world_mut().get::<&mut Creature>(player).unwrap().stat.hp = 15;
        let potion = game.give_item(player, "red potion").unwrap();

        assert_eq!(game.use_item(potion).unwrap(), UseOutcome::Used(UseEffect::HealHp(10)));
        assert_eq!(game.creature(player).unwrap().stat.hp, 25);
        assert!(!game.world().contains(potion));
        assert!(game.inventory(player).unwrap().is_empty());
        assert!(game.messages().contains("knight healed 10 hp"));
    }

    #[test]
    fn test_heal_at_max_heals_zero() {
        let (mut game, player) = game_with_player();
        let potion = game.give_item(player, "blue potion").unwrap();
        game.use_item(potion).unwrap();
        assert!(game.messages().contains("knight healed 0 mp"));
    }

    #[test]
    fn test_equipment_has_no_use_effect() {
        let (mut game, player) = game_with_player();
        let sword = game.give_item(player, "sword").unwrap();
        assert_eq!(game.use_item(sword).unwrap(), UseOutcome::NoEffect);
        assert!(game.world().contains(sword));
    }

    #[test]
    fn test_teleport_lands_on_walkable_tile() {
        let (mut game, player) = game_with_player();
        let scroll = game.give_item(player, "teleport scroll").unwrap();
        game.use_item(scroll).unwrap();
        let pos = game.position(player).unwrap();
        assert!(game.map().is_walkable(pos.x, pos.y));
        assert!(game.is_visible(pos));
    }

    #[test]
    fn test_worn_item_with_effect_is_not_consumed() {
        let (mut game, player) = game_with_player();
        let blade = game.give_item(player, "sword").unwrap();
        {
            let mut item = game.world_mut().get::<&mut Item>(blade).unwrap();
            item.use_effect = Some(UseEffect::HealHp(5));
        }
        game.toggle_equip(blade).unwrap();

        assert_eq!(game.use_item(blade).unwrap(), UseOutcome::StillEquipped);
        assert!(game.world().contains(blade));
        assert!(game.messages().contains("Unequip sword first"));
        assert_eq!(
            game.toggle_equip(blade).unwrap(),
            EquipOutcome::Unequipped(EquipSlot::Weapon)
        );
        let fresh = game.give_item(player, "sword").unwrap();
        assert_eq!(game.toggle_equip(fresh).unwrap(), EquipOutcome::Equipped(EquipSlot::Weapon));
    }

    #[test]
    fn test_chest_wins() {
        let (mut game, player) = game_with_player();
        let chest = game.give_item(player, "chest").unwrap();
        game.use_item(chest).unwrap();
        assert_eq!(game.state(), &GameState::Victory);
    }

    #[test]
    fn test_equip_messages_and_drop_rule() {
        let (mut game, player) = game_with_player();
        let sword = game.give_item(player, "sword").unwrap();
        let spare = game.give_item(player, "sword").unwrap();

        assert_eq!(game.toggle_equip(sword).unwrap(), EquipOutcome::Equipped(EquipSlot::Weapon));
        assert_eq!(game.toggle_equip(spare).unwrap(), EquipOutcome::SlotOccupied(EquipSlot::Weapon));
        assert!(game.messages().contains("already occupied"));
        assert_eq!(game.drop_item(player, sword).unwrap(), DropOutcome::StillEquipped);
        assert_eq!(game.inventory(player).unwrap(), vec![spare]);
    }
}
