//! Turn management
//!
//! Global turn counter and the order in which actors take their turn.

use std::collections::VecDeque;

use hecs::Entity;

/// Manages turn order and the turn counter
#[derive(Debug, Clone, Default)]
pub struct TurnManager {
    /// Actors still to act this round, in order
    turn_order: VecDeque<Entity>,
    /// Completed turns since the session began
    turn: u64,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the actors for a round
    pub fn begin_round(&mut self, actors: impl IntoIterator<Item = Entity>) {
        self.turn_order = actors.into_iter().collect();
    }

    /// Next actor whose turn it is
    pub fn next_actor(&mut self) -> Option<Entity> {
        self.turn_order.pop_front()
    }

    /// Drop an entity from the current round (died, despawned)
    pub fn remove_entity(&mut self, entity: Entity) {
        self.turn_order.retain(|&e| e != entity);
    }

    /// Close the round and advance the counter
    pub fn end_round(&mut self) -> u64 {
        self.turn_order.clear();
        self.turn += 1;
        self.turn
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// True on turns where regeneration happens
    pub fn is_regen_tick(&self, regen_time: u64) -> bool {
        regen_time > 0 && self.turn % regen_time == 0
    }
}
