//! Creature templates
//!
//! Level-1 stat rows keyed by creature name, plus the equip slots a
//! creature of that kind can wear.

use serde::{Deserialize, Serialize};

use crate::ecs::BaseStats;
use crate::items::EquipSlot;

/// A template for creating creatures from external data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub name: String,
    pub stats: BaseStats,
    /// Equip slot scheme; empty means the creature wears nothing
    #[serde(default)]
    pub equip: Vec<EquipSlot>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreatureTemplate {
    pub fn new(name: &str, stats: BaseStats) -> Self {
        Self {
            name: name.to_string(),
            stats,
            equip: Vec::new(),
            description: None,
        }
    }

    fn with_equip(mut self, equip: &[EquipSlot]) -> Self {
        self.equip = equip.to_vec();
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Collection of creature templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatureTemplates {
    pub templates: Vec<CreatureTemplate>,
}

impl CreatureTemplates {
    /// Find a template by name, ignoring ASCII case
    pub fn find(&self, name: &str) -> Option<&CreatureTemplate> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Built-in creature table
pub fn default_creature_templates() -> CreatureTemplates {
    CreatureTemplates {
        templates: vec![
            CreatureTemplate::new("knight", BaseStats::new(30, 10, 5, 2, 3))
                .with_equip(&[EquipSlot::Weapon, EquipSlot::Shield, EquipSlot::Armor])
                .with_description("A knight sworn to clear the dungeon"),
            CreatureTemplate::new("slime", BaseStats::new(8, 0, 3, 1, 1))
                .with_description("A quivering blob"),
            CreatureTemplate::new("goblin", BaseStats::new(14, 2, 4, 2, 1))
                .with_description("Small, mean and quick to anger"),
            CreatureTemplate::new("skeleton", BaseStats::new(10, 0, 4, 3, 1))
                .with_description("Bones held together by spite"),
            CreatureTemplate::new("camera", BaseStats::new(1, 0, 1, 1, 1))
                .with_description("A floating eye for looking around"),
        ],
    }
}
