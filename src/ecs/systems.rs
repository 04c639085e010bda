//! ECS Systems
//!
//! Decision policies for creatures that act on their own. A creature with
//! an `Ai` component is asked for one action per turn; creatures without
//! one never act unless driven by the player.

use crate::ecs::Position;
use crate::world::Map;

/// What a policy sees when it is asked to act
#[derive(Debug, Clone, Copy)]
pub struct PolicyView<'a> {
    pub map: &'a Map,
    pub position: Position,
    /// Player position, present only when the player is inside this
    /// creature's field of view
    pub player: Option<Position>,
}

/// Action chosen for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Step by (dx, dy); stepping onto a hostile attacks it
    Move { dx: i32, dy: i32 },
    Wait,
}

/// Per-creature decision policy
pub trait TurnPolicy: Send + Sync + 'static {
    fn decide(&mut self, view: &PolicyView<'_>) -> TurnAction;

    fn name(&self) -> &'static str;
}

/// Component holding a creature's policy
pub struct Ai(pub Box<dyn TurnPolicy>);

impl Ai {
    pub fn new(policy: impl TurnPolicy) -> Self {
        Self(Box::new(policy))
    }

    pub fn chase() -> Self {
        Self::new(ChaseAi)
    }

    pub fn decide(&mut self, view: &PolicyView<'_>) -> TurnAction {
        self.0.decide(view)
    }
}

impl std::fmt::Debug for Ai {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Ai").field(&self.0.name()).finish()
    }
}

/// Step toward a visible player; wait otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseAi;

impl TurnPolicy for ChaseAi {
    fn decide(&mut self, view: &PolicyView<'_>) -> TurnAction {
        let Some(target) = view.player else {
            return TurnAction::Wait;
        };
        match calculate_chase_move(view.position, target, view.map) {
            Some((dx, dy)) => TurnAction::Move { dx, dy },
            None => TurnAction::Wait,
        }
    }

    fn name(&self) -> &'static str {
        "chase"
    }
}

/// Step toward `target` by the sign of each axis. When the direct step is
/// walled off, try the single-axis steps.
fn calculate_chase_move(from: Position, target: Position, map: &Map) -> Option<(i32, i32)> {
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();
    if dx == 0 && dy == 0 {
        return None;
    }

    let candidates = if dx != 0 && dy != 0 {
        vec![(dx, dy), (dx, 0), (0, dy)]
    } else {
        vec![(dx, dy)]
    };

    candidates
        .into_iter()
        .find(|&(cx, cy)| map.is_walkable(from.x + cx, from.y + cy))
}
