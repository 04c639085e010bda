//! Item templates
//!
//! Item table rows keyed by name. Equipment rows carry a bonus block,
//! consumables a use effect.

use serde::{Deserialize, Serialize};

use crate::items::{EquipSlot, EquipmentStat, Item, UseEffect};

/// A template for creating items from external data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    #[serde(default)]
    pub equipment: Option<EquipmentStat>,
    #[serde(default)]
    pub use_effect: Option<UseEffect>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemTemplate {
    fn new(name: &str, weight: f32, volume: f32) -> Self {
        Self {
            name: name.to_string(),
            weight,
            volume,
            equipment: None,
            use_effect: None,
            description: None,
        }
    }

    fn equipment(mut self, stat: EquipmentStat) -> Self {
        self.equipment = Some(stat);
        self
    }

    fn effect(mut self, effect: UseEffect) -> Self {
        self.use_effect = Some(effect);
        self
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Fresh, unequipped item component for this row
    pub fn instantiate(&self) -> Item {
        let mut item = Item::new(self.name.clone(), self.weight, self.volume);
        item.equipment = self.equipment.map(|mut e| {
            e.equipped = false;
            e
        });
        item.use_effect = self.use_effect;
        item.description = self.description.clone();
        item
    }
}

/// Collection of item templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub templates: Vec<ItemTemplate>,
}

impl ItemTemplates {
    /// Find a template by name, ignoring ASCII case
    pub fn find(&self, name: &str) -> Option<&ItemTemplate> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Built-in item table
pub fn default_item_templates() -> ItemTemplates {
    ItemTemplates {
        templates: vec![
            ItemTemplate::new("red potion", 0.5, 1.0)
                .effect(UseEffect::HealHp(10))
                .describe("Restores 10 hp"),
            ItemTemplate::new("blue potion", 0.5, 1.0)
                .effect(UseEffect::HealMp(5))
                .describe("Restores 5 mp"),
            ItemTemplate::new("teleport scroll", 0.1, 0.5)
                .effect(UseEffect::Teleport)
                .describe("Whisks the reader somewhere else on the floor"),
            ItemTemplate::new("chest", 10.0, 5.0)
                .effect(UseEffect::Win)
                .describe("The treasure you came for"),
            ItemTemplate::new("sword", 3.0, 2.0)
                .equipment(EquipmentStat::new(EquipSlot::Weapon).with_strength(3)),
            ItemTemplate::new("shield", 4.0, 3.0)
                .equipment(EquipmentStat::new(EquipSlot::Shield).with_defense(2)),
            ItemTemplate::new("armor", 8.0, 4.0)
                .equipment(EquipmentStat::new(EquipSlot::Armor).with_defense(3).with_hp(5)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_is_unequipped_and_unheld() {
        let table = default_item_templates();
        let sword = table.find("Sword").unwrap().instantiate();
        assert_eq!(sword.slot(), Some(EquipSlot::Weapon));
        assert!(!sword.is_equipped());
        assert!(sword.holder.is_none());
    }

    #[test]
    fn test_consumables_have_effects() {
        let table = default_item_templates();
        assert_eq!(table.find("red potion").unwrap().use_effect, Some(UseEffect::HealHp(10)));
        assert_eq!(table.find("chest").unwrap().use_effect, Some(UseEffect::Win));
        assert!(table.find("sword").unwrap().use_effect.is_none());
    }
}
