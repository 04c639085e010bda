//! Game module - session context, turn loop and message log

mod state;
mod actions;
mod inventory;
mod messages;
mod roster;
mod turn;

pub use state::{Game, GameState};
pub use actions::MoveOutcome;
pub use inventory::UseOutcome;
pub use messages::{GameMessage, MessageCategory, MessageLog};
pub use roster::Roster;
pub use turn::TurnManager;
