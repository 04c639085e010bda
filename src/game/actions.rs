//! Turn actions
//!
//! Movement, melee, spells and the per-turn loop. Each operation runs to
//! completion before the next actor is asked to act.

use hecs::Entity;

use super::messages::MessageCategory;
use super::state::Game;
use crate::combat::{
    bonuses_of, cast_spell, physical_damage_of, resolve_attack, AttackResult, CastOutcome, Spell,
};
use crate::ecs::{Ai, Creature, Facing, PolicyView, Position, TurnAction};
use crate::error::{GameError, GameResult};

/// Result of a movement attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// The destination held a hostile creature, so the move became an attack
    Attacked(AttackResult),
    /// Wall, map edge or ally in the way; nothing changed
    Blocked,
}

impl Game {
    /// Try to step `entity` by (dx, dy). Walls block unless the creature
    /// walks through tiles, allies block, hostiles get attacked.
    pub fn move_creature(&mut self, entity: Entity, dx: i32, dy: i32) -> GameResult<MoveOutcome> {
        let (team, walk_through_tile) = {
            let creature = self
                .world
                .get::<&Creature>(entity)
                .map_err(|_| GameError::NotACreature(entity))?;
            (creature.team, creature.walk_through_tile)
        };
        let from = self.position(entity)?;
        if let Ok(mut facing) = self.world.get::<&mut Facing>(entity) {
            facing.update(dx, dy);
        }

        let dest = from.offset(dx, dy);
        if !self.map.in_bounds(dest.x, dest.y) {
            return Ok(MoveOutcome::Blocked);
        }
        if self.map.is_wall(dest.x, dest.y) && !walk_through_tile {
            return Ok(MoveOutcome::Blocked);
        }

        // Neutral creatures never collide
        if let Some(team) = team {
            if let Some(other) = self.creature_at(dest, Some(entity)) {
                if self.roster.contains(team, other) {
                    return Ok(MoveOutcome::Blocked);
                }
                let damage = physical_damage_of(&self.world, entity)?;
                return Ok(MoveOutcome::Attacked(self.attack(entity, other, damage)?));
            }
        }

        *self.world.get::<&mut Position>(entity)? = dest;
        Ok(MoveOutcome::Moved(dest))
    }

    /// Strike `target` for `damage`, removing it if it dies
    pub fn attack(&mut self, attacker: Entity, target: Entity, damage: i32) -> GameResult<AttackResult> {
        let result = resolve_attack(&self.world, attacker, target, damage)?;
        self.report_hit(&result, MessageCategory::Combat);
        if result.died() {
            let cause = format!("slain by {}", result.attacker_name);
            self.handle_death(target, &cause)?;
        }
        Ok(result)
    }

    /// Apply raw damage with no attacker. Returns whether the creature died.
    pub fn take_damage(&mut self, entity: Entity, raw: i32) -> GameResult<bool> {
        let bonuses = bonuses_of(&self.world, entity)?;
        let (result, name) = {
            let mut creature = self
                .world
                .get::<&mut Creature>(entity)
                .map_err(|_| GameError::NotACreature(entity))?;
            (creature.take_damage(raw, &bonuses), creature.name.clone())
        };
        self.add_message(
            format!("{} takes {} damage", name, result.dealt),
            MessageCategory::Combat,
        );
        if result.died {
            self.handle_death(entity, "took too much damage")?;
        }
        Ok(result.died)
    }

    /// Cast `spell` from `caster` toward `target`
    pub fn cast(&mut self, caster: Entity, spell: &Spell, target: Position) -> GameResult<CastOutcome> {
        let outcome = cast_spell(&self.world, &self.map, caster, spell, target)?;
        match &outcome {
            CastOutcome::NotEnoughMana { needed, available } => {
                self.add_message(
                    format!("Not enough mana for {} ({}/{})", spell.name, available, needed),
                    MessageCategory::Magic,
                );
            }
            CastOutcome::Cast { hits, .. } => {
                let caster_name = self.creature(caster)?.name;
                self.add_message(format!("{} casts {}", caster_name, spell.name), MessageCategory::Magic);
                for hit in hits {
                    self.report_hit(hit, MessageCategory::Magic);
                }
                for hit in hits.iter().filter(|h| h.died()) {
                    let cause = format!("{}'s {}", hit.attacker_name, spell.name);
                    self.handle_death(hit.target, &cause)?;
                }
            }
        }
        Ok(outcome)
    }

    fn report_hit(&mut self, result: &AttackResult, category: MessageCategory) {
        self.add_message(
            format!(
                "{} hits {} for {} damage",
                result.attacker_name, result.target_name, result.damage.dealt
            ),
            category,
        );
        if result.exp_gained > 0 {
            self.add_message(
                format!("{} gains {} exp", result.attacker_name, result.exp_gained),
                MessageCategory::Progression,
            );
        }
        if result.levels_gained > 0 {
            self.add_message(
                format!("{} reached level {}", result.attacker_name, result.attacker_level),
                MessageCategory::Progression,
            );
        }
    }

    /// Heal every creature on regeneration turns
    pub fn regen_all(&mut self) {
        let turn = self.turns.turn();
        let regen_time = self.config().regen_time;
        for (_, creature) in self.world.query_mut::<&mut Creature>() {
            creature.regen(turn, regen_time);
        }
    }

    /// Let every policy-driven creature act once, in roster order
    pub fn run_ai_turns(&mut self) -> GameResult<()> {
        let player = self.player();
        let actors: Vec<Entity> = self
            .roster
            .all()
            .filter(|&e| Some(e) != player && self.world.get::<&Ai>(e).is_ok())
            .collect();
        self.turns.begin_round(actors);

        while let Some(actor) = self.turns.next_actor() {
            if !self.is_playing() {
                break;
            }
            let position = self.position(actor)?;
            let sight = self.visibility_from(position, self.config().enemy_sight_radius());
            let seen_player = self.player_position().filter(|p| sight.contains(*p));

            let action = {
                let mut ai = self.world.get::<&mut Ai>(actor)?;
                ai.decide(&PolicyView {
                    map: &self.map,
                    position,
                    player: seen_player,
                })
            };
            if let TurnAction::Move { dx, dy } = action {
                self.move_creature(actor, dx, dy)?;
            }
        }
        Ok(())
    }

    /// Close the current turn: AI acts, the counter advances, regeneration
    /// ticks and the player's view is recomputed
    pub fn end_turn(&mut self) -> GameResult<()> {
        self.run_ai_turns()?;
        self.turns.end_round();
        if self.turns.is_regen_tick(self.config().regen_time) {
            self.regen_all();
        }
        self.refresh_fov();
        Ok(())
    }

    /// One full turn driven by a player step
    pub fn player_move(&mut self, dx: i32, dy: i32) -> GameResult<MoveOutcome> {
        let player = self.require_player()?;
        if !self.is_playing() {
            return Ok(MoveOutcome::Blocked);
        }
        let outcome = self.move_creature(player, dx, dy)?;
        self.end_turn()?;
        Ok(outcome)
    }

    /// One full turn in which the player does nothing
    pub fn player_wait(&mut self) -> GameResult<()> {
        self.require_player()?;
        if self.is_playing() {
            self.end_turn()?;
        }
        Ok(())
    }

    /// One full turn in which the player casts a spell
    pub fn player_cast(&mut self, spell: &Spell, target: Position) -> GameResult<CastOutcome> {
        let player = self.require_player()?;
        let outcome = self.cast(player, spell, target)?;
        if self.is_playing() {
            self.end_turn()?;
        }
        Ok(outcome)
    }
}
