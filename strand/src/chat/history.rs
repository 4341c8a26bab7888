//! Bounded chat history with optional system-message pinning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Message, PromptTurn, Role};

use super::ChatSettings;

/// One stored message with its id and arrival time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: Message,
}

impl ChatEntry {
    pub fn new(message: Message) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            message,
        }
    }
}

/// Ordered chat history holding at most `max_len` messages.
///
/// When trimming, the oldest messages go first. With `preserve_system` set, the
/// first system message is pinned at the front (it counts toward `max_len`) and
/// later system messages are dropped in favour of conversation turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    entries: Vec<ChatEntry>,
    max_len: usize,
    preserve_system: bool,
}

impl ChatHistory {
    /// `max_len` below 1 is treated as 1.
    pub fn new(max_len: usize, preserve_system: bool) -> Self {
        Self {
            entries: Vec::new(),
            max_len: max_len.max(1),
            preserve_system,
        }
    }

    /// Limit and pinning from `settings`.
    pub fn from_settings(settings: &ChatSettings) -> Self {
        Self::new(settings.max_chat_length, settings.preserve_system_message)
    }

    /// Appends a message and trims to `max_len`; returns the new entry's id.
    pub fn add_message(&mut self, message: Message) -> Uuid {
        let entry = ChatEntry::new(message);
        let id = entry.id;
        self.entries.push(entry);
        self.trim();
        id
    }

    pub fn add_messages(&mut self, messages: impl IntoIterator<Item = Message>) {
        for message in messages {
            self.add_message(message);
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Messages in order, as sent to the model.
    pub fn messages(&self) -> Vec<Message> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn messages_by_role(&self, role: Role) -> Vec<&Message> {
        self.entries
            .iter()
            .map(|e| &e.message)
            .filter(|m| m.role() == role)
            .collect()
    }

    /// `{role, content}` turns for a chat-completion request.
    pub fn to_prompt_format(&self) -> Vec<PromptTurn> {
        self.entries
            .iter()
            .map(|e| e.message.to_prompt_turn())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn trim(&mut self) {
        if self.entries.len() <= self.max_len {
            return;
        }
        let pinned = if self.preserve_system {
            self.entries.iter().position(|e| e.message.is_system())
        } else {
            None
        };
        let Some(pinned) = pinned else {
            let excess = self.entries.len() - self.max_len;
            self.entries.drain(..excess);
            return;
        };

        let system = self.entries.remove(pinned);
        let mut rest: Vec<ChatEntry> = self
            .entries
            .drain(..)
            .filter(|e| !e.message.is_system())
            .collect();
        let keep = self.max_len - 1;
        if rest.len() > keep {
            rest.drain(..rest.len() - keep);
        }
        self.entries.push(system);
        self.entries.extend(rest);
    }
}
