//! Message log
//!
//! Player-facing text for everything that happens during a turn.

use std::collections::VecDeque;

use crate::constants::MAX_MESSAGES;

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub text: String,
    /// Turn the message was written on
    pub turn: u64,
    pub category: MessageCategory,
}

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCategory {
    Combat,
    Item,
    Magic,
    Progression,
    System,
}

/// Bounded log keeping the most recent messages
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: VecDeque<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: impl Into<String>, turn: u64, category: MessageCategory) {
        let message = GameMessage {
            text: text.into(),
            turn,
            category,
        };
        log::debug!("[{:?}] {}", message.category, message.text);
        self.messages.push_back(message);

        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &GameMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&GameMessage> {
        self.messages.back()
    }

    /// The `n` most recent messages, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &GameMessage> {
        self.messages.iter().skip(self.messages.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True if any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }
}
