//! Team rosters
//!
//! Ordered member lists per team. Neutral creatures are never listed.

use std::collections::BTreeMap;

use hecs::Entity;

use crate::ecs::Faction;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: BTreeMap<Faction, Vec<Entity>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to a team; neutral (`None`) is ignored
    pub fn add(&mut self, team: Option<Faction>, entity: Entity) {
        if let Some(team) = team {
            let members = self.teams.entry(team).or_default();
            if !members.contains(&entity) {
                members.push(entity);
            }
        }
    }

    /// Remove from whichever team lists it
    pub fn remove(&mut self, entity: Entity) -> bool {
        let mut removed = false;
        for members in self.teams.values_mut() {
            let before = members.len();
            members.retain(|&e| e != entity);
            removed |= members.len() != before;
        }
        removed
    }

    pub fn members(&self, team: Faction) -> &[Entity] {
        self.teams.get(&team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, team: Faction, entity: Entity) -> bool {
        self.members(team).contains(&entity)
    }

    /// Every listed creature, player team first
    pub fn all(&self) -> impl Iterator<Item = Entity> + '_ {
        self.teams.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.teams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
