//! Game state
//!
//! The `Game` context owns everything a session mutates: the entity world,
//! the map, rosters, the turn counter and the message log. Core operations
//! take it by reference instead of reaching for globals.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::messages::{MessageCategory, MessageLog};
use super::roster::Roster;
use super::turn::TurnManager;
use crate::config::GameConfig;
use crate::data::DataManager;
use crate::ecs::{Ai, Creature, Faction, Position};
use crate::entities;
use crate::error::{GameError, GameResult};
use crate::items::{Container, Item};
use crate::world::{compute_visibility_with_step, Map, VisibilityMask};

/// Session-level state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// A win item was used
    Victory,
    /// The player died
    GameOver { cause: String },
}

/// The main game struct that holds all session data
pub struct Game {
    state: GameState,
    /// ECS world containing all entities
    pub(super) world: World,
    pub(super) map: Map,
    data: DataManager,
    config: GameConfig,
    pub(super) roster: Roster,
    pub(super) turns: TurnManager,
    /// What the player currently sees
    fov: VisibilityMask,
    pub(super) messages: MessageLog,
    player_entity: Option<Entity>,
    pub(super) rng: StdRng,
}

impl Game {
    pub fn new(map: Map, data: DataManager, config: GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: GameState::Playing,
            world: World::new(),
            fov: VisibilityMask::for_map(&map),
            map,
            data,
            config,
            roster: Roster::new(),
            turns: TurnManager::new(),
            messages: MessageLog::new(),
            player_entity: None,
            rng,
        }
    }

    /// Built-in data tables and default config
    pub fn with_defaults(map: Map) -> Self {
        Self::new(map, DataManager::defaults(), GameConfig::default())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn data(&self) -> &DataManager {
        &self.data
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn fov(&self) -> &VisibilityMask {
        &self.fov
    }

    pub fn turn(&self) -> u64 {
        self.turns.turn()
    }

    pub fn player(&self) -> Option<Entity> {
        self.player_entity
    }

    pub(super) fn require_player(&self) -> GameResult<Entity> {
        self.player_entity.ok_or(GameError::NoPlayer)
    }

    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.add(text, self.turns.turn(), category);
    }

    /// Copy of a creature's component
    pub fn creature(&self, entity: Entity) -> GameResult<Creature> {
        self.world
            .get::<&Creature>(entity)
            .map(|c| (*c).clone())
            .map_err(|_| GameError::NotACreature(entity))
    }

    pub fn item(&self, entity: Entity) -> GameResult<Item> {
        self.world
            .get::<&Item>(entity)
            .map(|i| (*i).clone())
            .map_err(|_| GameError::NotAnItem(entity))
    }

    pub fn position(&self, entity: Entity) -> GameResult<Position> {
        Ok(*self.world.get::<&Position>(entity)?)
    }

    pub fn player_position(&self) -> Option<Position> {
        self.player_entity.and_then(|p| self.position(p).ok())
    }

    /// Items in a creature's inventory
    pub fn inventory(&self, entity: Entity) -> GameResult<Vec<Entity>> {
        Ok(self.world.get::<&Container>(entity)?.items().to_vec())
    }

    /// Rostered creature standing on `pos`, other than `except`
    pub fn creature_at(&self, pos: Position, except: Option<Entity>) -> Option<Entity> {
        self.roster
            .all()
            .filter(|&e| Some(e) != except)
            .find(|&e| self.position(e).map_or(false, |p| p == pos))
    }

    /// Items lying on the floor at `pos`
    pub fn items_at(&self, pos: Position) -> Vec<Entity> {
        let mut items: Vec<Entity> = self
            .world
            .query::<(&Position, &Item)>()
            .iter()
            .filter(|(_, (p, _))| **p == pos)
            .map(|(e, _)| e)
            .collect();
        items.sort_by_key(|e| e.id());
        items
    }

    // ------------------------------------------------------------------
    // Spawning
    // ------------------------------------------------------------------

    /// Spawn a creature from the creature table and list it on its team
    pub fn spawn_creature(
        &mut self,
        name: &str,
        pos: Position,
        team: Option<Faction>,
        level: u32,
        ai: Option<Ai>,
    ) -> GameResult<Entity> {
        let entity = entities::spawn_creature(&mut self.world, &self.data, name, pos, team, level, ai)?;
        self.roster.add(team, entity);
        Ok(entity)
    }

    /// Spawn a chasing enemy
    pub fn spawn_enemy(&mut self, name: &str, pos: Position, level: u32) -> GameResult<Entity> {
        let entity = entities::spawn_enemy(&mut self.world, &self.data, name, pos, level)?;
        self.roster.add(Some(Faction::Enemy), entity);
        Ok(entity)
    }

    /// Spawn the player and compute its first field of view
    pub fn spawn_player(&mut self, name: &str, pos: Position) -> GameResult<Entity> {
        let entity = entities::spawn_player(
            &mut self.world,
            &self.data,
            name,
            pos,
            self.config.inventory_volume,
        )?;
        self.roster.add(Some(Faction::Player), entity);
        self.player_entity = Some(entity);
        self.refresh_fov();
        Ok(entity)
    }

    pub fn spawn_free_camera(&mut self, pos: Position) -> GameResult<Entity> {
        Ok(entities::spawn_free_camera(&mut self.world, &self.data, pos)?)
    }

    /// Spawn an item on the floor
    pub fn spawn_item(&mut self, name: &str, pos: Position) -> GameResult<Entity> {
        entities::spawn_item(&mut self.world, &self.data, name, pos)
    }

    /// Spawn an item directly into a creature's inventory
    pub fn give_item(&mut self, holder: Entity, name: &str) -> GameResult<Entity> {
        entities::give_item(&mut self.world, &self.data, holder, name)
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Field of view from `origin` using the configured ray step
    pub fn visibility_from(&self, origin: Position, radius: i32) -> VisibilityMask {
        compute_visibility_with_step(&self.map, origin, radius, self.config.ray_step)
    }

    /// Recompute the player's view and update seen/seeing flags
    pub fn refresh_fov(&mut self) {
        let Some(origin) = self.player_position() else {
            return;
        };
        let mask = self.visibility_from(origin, self.config.sight_radius);
        self.map.change_seen(&mask);
        self.fov = mask;
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.fov.contains(pos)
    }

    /// True when the entity stands inside the player's view
    pub fn check_if_in_fov(&self, entity: Entity) -> bool {
        self.position(entity).map_or(false, |p| self.is_visible(p))
    }

    // ------------------------------------------------------------------
    // Death
    // ------------------------------------------------------------------

    /// Remove a dead creature with everything it carried or wore
    pub(super) fn handle_death(&mut self, entity: Entity, cause: &str) -> GameResult<()> {
        let name = self.creature(entity)?.name;
        self.roster.remove(entity);
        self.turns.remove_entity(entity);

        let mut belongings = Vec::new();
        if let Ok(mut container) = self.world.get::<&mut Container>(entity) {
            belongings.extend(container.take_all());
        }
        if let Ok(mut creature) = self.world.get::<&mut Creature>(entity) {
            if let Some(slots) = creature.equip_slot.as_mut() {
                belongings.extend(slots.clear());
            }
        }
        for item in belongings {
            // Already gone is fine
            let _ = self.world.despawn(item);
        }
        self.world.despawn(entity)?;
        log::info!("{} died ({})", name, cause);
        self.add_message(format!("{} dies", name), MessageCategory::Combat);

        if self.player_entity == Some(entity) {
            self.player_entity = None;
            self.set_state(GameState::GameOver { cause: cause.to_string() });
            self.add_message("You have died", MessageCategory::System);
        }
        Ok(())
    }
}
