//! Item definitions
//!
//! The `Item` component, its optional equipment block and use effect.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::ecs::CreatureStat;

/// Equipment slots a creature may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    Weapon,
    Shield,
    Armor,
    Helmet,
    Ring,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Shield => "shield",
            EquipSlot::Armor => "armor",
            EquipSlot::Helmet => "helmet",
            EquipSlot::Ring => "ring",
        }
    }
}

/// Stat bonuses granted while an item is worn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentStat {
    pub slot: EquipSlot,
    #[serde(default)]
    pub strength_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
    #[serde(default)]
    pub wizardry_bonus: i32,
    #[serde(default)]
    pub hp_bonus: i32,
    #[serde(default)]
    pub mp_bonus: i32,
    #[serde(default, skip_serializing)]
    pub equipped: bool,
}

impl EquipmentStat {
    pub fn new(slot: EquipSlot) -> Self {
        Self {
            slot,
            strength_bonus: 0,
            defense_bonus: 0,
            wizardry_bonus: 0,
            hp_bonus: 0,
            mp_bonus: 0,
            equipped: false,
        }
    }

    pub fn with_strength(mut self, bonus: i32) -> Self {
        self.strength_bonus = bonus;
        self
    }

    pub fn with_defense(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn with_wizardry(mut self, bonus: i32) -> Self {
        self.wizardry_bonus = bonus;
        self
    }

    pub fn with_hp(mut self, bonus: i32) -> Self {
        self.hp_bonus = bonus;
        self
    }

    pub fn with_mp(mut self, bonus: i32) -> Self {
        self.mp_bonus = bonus;
        self
    }
}

/// What happens when an item is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseEffect {
    HealHp(i32),
    HealMp(i32),
    /// Move the user to a random walkable tile
    Teleport,
    /// Ends the game in victory
    Win,
}

impl UseEffect {
    pub fn name(&self) -> &'static str {
        match self {
            UseEffect::HealHp(_) => "heal hp",
            UseEffect::HealMp(_) => "heal mp",
            UseEffect::Teleport => "teleport",
            UseEffect::Win => "win",
        }
    }

    /// Apply a stat-only effect, returning the amount restored. Effects that
    /// need the world (teleport, win) return `None`.
    pub fn apply_to_stat(&self, stat: &mut CreatureStat) -> Option<i32> {
        match *self {
            UseEffect::HealHp(amount) => Some(stat.heal_hp(amount)),
            UseEffect::HealMp(amount) => Some(stat.heal_mp(amount)),
            UseEffect::Teleport | UseEffect::Win => None,
        }
    }
}

/// An item attached to an entity. While it lies on the floor the entity
/// also carries a `Position`; once picked up it has a holder instead.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    pub equipment: Option<EquipmentStat>,
    pub use_effect: Option<UseEffect>,
    /// Creature carrying or wearing this item
    pub holder: Option<Entity>,
    pub description: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, weight: f32, volume: f32) -> Self {
        Self {
            name: name.into(),
            weight,
            volume,
            equipment: None,
            use_effect: None,
            holder: None,
            description: None,
        }
    }

    pub fn with_equipment(mut self, equipment: EquipmentStat) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_use_effect(mut self, effect: UseEffect) -> Self {
        self.use_effect = Some(effect);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_equipment(&self) -> bool {
        self.equipment.is_some()
    }

    pub fn is_equipped(&self) -> bool {
        self.equipment.map_or(false, |e| e.equipped)
    }

    pub fn slot(&self) -> Option<EquipSlot> {
        self.equipment.map(|e| e.slot)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::BaseStats;

    #[test]
    fn test_equipment_flags() {
        let sword = Item::new("sword", 3.0, 2.0)
            .with_equipment(EquipmentStat::new(EquipSlot::Weapon).with_strength(3));
        assert!(sword.is_equipment());
        assert!(!sword.is_equipped());
        assert_eq!(sword.slot(), Some(EquipSlot::Weapon));

        let potion = Item::new("red potion", 0.5, 1.0).with_use_effect(UseEffect::HealHp(10));
        assert!(!potion.is_equipment());
        assert_eq!(potion.slot(), None);
    }

    #[test]
    fn test_heal_effects_apply_to_stat() {
        let mut stat = CreatureStat::new(BaseStats::new(20, 10, 1, 1, 1), 1);
        stat.hp = 5;
        stat.mp = 8;
        assert_eq!(UseEffect::HealHp(10).apply_to_stat(&mut stat), Some(10));
        assert_eq!(stat.hp, 15);
        assert_eq!(UseEffect::HealMp(5).apply_to_stat(&mut stat), Some(2));
        assert_eq!(stat.mp, 10);
        assert_eq!(UseEffect::Teleport.apply_to_stat(&mut stat), None);
    }

    #[test]
    fn test_slot_serializes_lowercase() {
        let text = ron::to_string(&EquipSlot::Shield).unwrap();
        assert_eq!(text, "shield");
        let slot: EquipSlot = ron::from_str("armor").unwrap();
        assert_eq!(slot, EquipSlot::Armor);
    }
}
