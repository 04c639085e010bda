//! Ranged spells
//!
//! Spells travel along a traced line from the caster toward a target tile.
//! A bolt stops at the first hostile creature on the line, a beam hits
//! every hostile creature on it.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::damage::{bonuses_of, resolve_attack, AttackResult};
use crate::ecs::{Creature, Faction, Position};
use crate::error::{GameError, GameResult};
use crate::world::{trace_line, Map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellKind {
    Bolt,
    Beam,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub kind: SpellKind,
    pub base_damage: i32,
    pub mp_cost: i32,
}

impl Spell {
    pub fn new(name: impl Into<String>, kind: SpellKind, base_damage: i32, mp_cost: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            base_damage,
            mp_cost,
        }
    }

    pub fn fireball() -> Self {
        Self::new("fireball", SpellKind::Bolt, 5, 3)
    }

    pub fn lightning() -> Self {
        Self::new("lightning", SpellKind::Beam, 3, 5)
    }
}

/// Result of a cast attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    Cast {
        spell: String,
        /// Tiles the spell travelled through
        path: Vec<Position>,
        hits: Vec<AttackResult>,
    },
    /// Nothing was spent or traced
    NotEnoughMana { needed: i32, available: i32 },
}

/// Creatures standing on `pos` whose team is hostile to `caster_team`,
/// in spawn order
pub fn hostiles_at(world: &World, caster_team: Option<Faction>, pos: Position) -> Vec<Entity> {
    let Some(caster_team) = caster_team else {
        return Vec::new();
    };
    let mut found: Vec<Entity> = world
        .query::<(&Position, &Creature)>()
        .iter()
        .filter(|(_, (p, c))| **p == pos && c.team.map_or(false, |t| t != caster_team))
        .map(|(e, _)| e)
        .collect();
    found.sort_by_key(|e| e.id());
    found
}

fn team_of(world: &World, caster: Entity) -> GameResult<Option<Faction>> {
    Ok(world
        .get::<&Creature>(caster)
        .map_err(|_| GameError::NotACreature(caster))?
        .team)
}

/// Hit the first hostile creature along `path`
pub fn cast_bolt(
    world: &World,
    caster: Entity,
    path: &[Position],
    damage: i32,
) -> GameResult<Vec<AttackResult>> {
    let team = team_of(world, caster)?;
    let target = path
        .iter()
        .find_map(|&pos| hostiles_at(world, team, pos).into_iter().next());

    match target {
        Some(target) => Ok(vec![resolve_attack(world, caster, target, damage)?]),
        None => Ok(Vec::new()),
    }
}

/// Hit every hostile creature along `path`
pub fn cast_beam(
    world: &World,
    caster: Entity,
    path: &[Position],
    damage: i32,
) -> GameResult<Vec<AttackResult>> {
    let team = team_of(world, caster)?;
    let targets: Vec<Entity> = path
        .iter()
        .flat_map(|&pos| hostiles_at(world, team, pos))
        .collect();

    targets
        .into_iter()
        .map(|target| resolve_attack(world, caster, target, damage))
        .collect()
}

/// Spend mana and release `spell` from the caster toward `target`.
/// Dead targets are left in the world for the caller to remove.
pub fn cast_spell(
    world: &World,
    map: &Map,
    caster: Entity,
    spell: &Spell,
    target: Position,
) -> GameResult<CastOutcome> {
    let origin = *world.get::<&Position>(caster)?;
    let bonuses = bonuses_of(world, caster)?;
    let damage = {
        let mut creature = world
            .get::<&mut Creature>(caster)
            .map_err(|_| GameError::NotACreature(caster))?;
        if !creature.stat.spend_mp(spell.mp_cost) {
            return Ok(CastOutcome::NotEnoughMana {
                needed: spell.mp_cost,
                available: creature.stat.mp,
            });
        }
        creature.total_magic_damage(spell.base_damage, &bonuses)
    };

    let path = trace_line(origin, target, map);
    let hits = match spell.kind {
        SpellKind::Bolt => cast_bolt(world, caster, &path, damage)?,
        SpellKind::Beam => cast_beam(world, caster, &path, damage)?,
    };
    log::debug!(
        "{} cast over {} tiles for {} damage, {} hit",
        spell.name,
        path.len(),
        damage,
        hits.len()
    );

    Ok(CastOutcome::Cast {
        spell: spell.name.clone(),
        path,
        hits,
    })
}
