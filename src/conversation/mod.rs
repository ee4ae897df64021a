//! Conversation types and the append-only message store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned message identifier, strictly increasing within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

/// Ordered message history. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one system message
    pub fn with_system(content: &str) -> Self {
        let mut store = Self::new();
        store.push(Sender::System, content);
        store
    }

    /// Append a message stamped with the current time
    pub fn push(&mut self, sender: Sender, content: &str) -> &Message {
        self.next_id += 1;
        self.messages.push(Message {
            id: MessageId(self.next_id),
            content: content.to_string(),
            sender,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Rebuild a store from existing messages, keeping their ids
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let next_id = messages.iter().map(|m| m.id.0).max().unwrap_or(0);
        Self { messages, next_id }
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
