//! Error types
//!
//! Only content/config defects and stale handles are errors. Rejected
//! moves, full inventories and occupied slots are ordinary outcomes.

use std::path::PathBuf;

use hecs::Entity;

/// Failures while loading or looking up data tables
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Creature name absent from the creature table
    #[error("creature '{0}' not found in creature table")]
    UnknownCreature(String),

    /// Item name absent from the item table
    #[error("item '{0}' not found in item table")]
    UnknownItem(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: ron::Error,
    },
}

/// Errors surfaced by [`crate::game::Game`] operations
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Data(#[from] DataError),

    /// Handle refers to a despawned entity or one lacking a component
    #[error("entity lookup failed: {0}")]
    Component(#[from] hecs::ComponentError),

    #[error("entity no longer exists")]
    NoSuchEntity(#[from] hecs::NoSuchEntity),

    #[error("entity {0:?} has no creature")]
    NotACreature(Entity),

    #[error("entity {0:?} is not an item")]
    NotAnItem(Entity),

    /// Player-driven operation with no player spawned
    #[error("no player in the world")]
    NoPlayer,
}

pub type GameResult<T> = Result<T, GameError>;
