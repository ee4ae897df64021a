//! Chat panel controller
//!
//! A two-state machine over the message store:
//!
//! - `Idle`: input enabled. A non-blank submission appends the user message,
//!   clears the input and moves to `AwaitingReply`.
//! - `AwaitingReply`: input disabled, typing indicator shown. Delivering the
//!   reply appends one system message and returns to `Idle`.
//!
//! Scheduling the reply is the caller's job (see `Session`): `submit` hands
//! back a `ReplyTicket` and `deliver_reply` completes it.

use serde::{Deserialize, Serialize};

use crate::conversation::{Message, MessageId, MessageStore, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

/// Proof that a user message was accepted and a reply is owed
#[derive(Debug)]
#[must_use = "an accepted message needs its reply scheduled"]
pub struct ReplyTicket {
    /// The accepted user text, as submitted
    pub user_text: String,
    pub user_message: MessageId,
}

/// Keys the input surface forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Key {
    Enter,
    Other,
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        if name.eq_ignore_ascii_case("enter") {
            Key::Enter
        } else {
            Key::Other
        }
    }
}

/// Where the display should scroll to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ScrollTarget {
    Message(MessageId),
    TypingIndicator,
}

/// Serializable copy of the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub pending_reply: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("Cannot restore while a reply is pending")]
    ReplyPending,

    #[error("Snapshot has a pending reply")]
    SnapshotPending,

    #[error("Snapshot has no messages")]
    EmptySnapshot,

    #[error("Snapshot history is invalid: {0}")]
    InvalidHistory(&'static str),
}

/// What the display surface renders for the chat panel
#[derive(Debug, Clone, Serialize)]
pub struct ChatView {
    pub state: ChatState,
    pub messages: Vec<Message>,
    pub pending_reply: bool,
    pub input: String,
    pub can_send: bool,
    pub suggestions: Vec<String>,
    pub scroll_to: Option<ScrollTarget>,
    /// Changes on every append and every typing indicator change
    pub scroll_revision: u64,
}

#[derive(Debug, Clone)]
pub struct ChatPanel {
    store: MessageStore,
    pending_reply: bool,
    input: String,
    suggestions: Vec<String>,
    scroll_revision: u64,
}

impl ChatPanel {
    /// Panel in `Idle` with the greeting already posted
    pub fn new(greeting: &str, suggestions: Vec<String>) -> Self {
        Self {
            store: MessageStore::with_system(greeting),
            pending_reply: false,
            input: String::new(),
            suggestions,
            scroll_revision: 1,
        }
    }

    pub fn state(&self) -> ChatState {
        if self.pending_reply {
            ChatState::AwaitingReply
        } else {
            ChatState::Idle
        }
    }

    pub fn pending_reply(&self) -> bool {
        self.pending_reply
    }

    pub fn messages(&self) -> &[Message] {
        self.store.as_slice()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Fill the input with a suggestion chip. Returns false for unknown chips.
    pub fn apply_suggestion(&mut self, chip: &str) -> bool {
        match self.suggestions.iter().find(|s| s.as_str() == chip) {
            Some(s) => {
                self.input = s.clone();
                true
            }
            None => false,
        }
    }

    pub fn can_send(&self) -> bool {
        !self.pending_reply && !self.input.trim().is_empty()
    }

    /// Enter sends the buffer, Shift+Enter adds a line break
    pub fn key_press(&mut self, key: Key, shift: bool) -> Option<ReplyTicket> {
        match (key, shift) {
            (Key::Enter, false) => self.send_input(),
            (Key::Enter, true) => {
                self.input.push('\n');
                None
            }
            (Key::Other, _) => None,
        }
    }

    /// Submit whatever is in the input buffer
    pub fn send_input(&mut self) -> Option<ReplyTicket> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Accept `text` as a user message. No-op while a reply is pending or
    /// when `text` is blank.
    pub fn submit(&mut self, text: &str) -> Option<ReplyTicket> {
        if self.pending_reply || text.trim().is_empty() {
            return None;
        }

        let id = self.store.push(Sender::User, text).id;
        self.input.clear();
        self.pending_reply = true;
        self.scroll_revision += 1;

        Some(ReplyTicket {
            user_text: text.to_string(),
            user_message: id,
        })
    }

    /// Append the reply for the outstanding ticket and return to `Idle`
    pub fn deliver_reply(&mut self, ticket: ReplyTicket, content: &str) -> MessageId {
        debug_assert!(
            self.pending_reply,
            "reply for {:?} delivered while idle",
            ticket.user_message
        );
        let id = self.store.push(Sender::System, content).id;
        self.pending_reply = false;
        self.scroll_revision += 1;
        id
    }

    pub fn scroll_target(&self) -> Option<ScrollTarget> {
        if self.pending_reply {
            Some(ScrollTarget::TypingIndicator)
        } else {
            self.store.last().map(|m| ScrollTarget::Message(m.id))
        }
    }

    pub fn scroll_revision(&self) -> u64 {
        self.scroll_revision
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            state: self.state(),
            messages: self.store.as_slice().to_vec(),
            pending_reply: self.pending_reply,
            input: self.input.clone(),
            can_send: self.can_send(),
            suggestions: self.suggestions.clone(),
            scroll_to: self.scroll_target(),
            scroll_revision: self.scroll_revision,
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.store.as_slice().to_vec(),
            pending_reply: self.pending_reply,
        }
    }

    /// Replace the conversation with a saved one
    pub fn restore(&mut self, snapshot: ConversationSnapshot) -> Result<(), RestoreError> {
        if self.pending_reply {
            return Err(RestoreError::ReplyPending);
        }
        if snapshot.pending_reply {
            return Err(RestoreError::SnapshotPending);
        }
        if snapshot.messages.is_empty() {
            return Err(RestoreError::EmptySnapshot);
        }
        check_history(&snapshot.messages)?;
        self.store = MessageStore::from_messages(snapshot.messages);
        self.scroll_revision += 1;
        Ok(())
    }
}

/// A restorable history opens with the greeting, alternates user and system
/// messages after it and ends on a system message.
fn check_history(messages: &[Message]) -> Result<(), RestoreError> {
    if messages.iter().any(|m| m.content.trim().is_empty()) {
        return Err(RestoreError::InvalidHistory("blank message content"));
    }
    if messages.windows(2).any(|w| w[1].id <= w[0].id) {
        return Err(RestoreError::InvalidHistory("message ids must strictly increase"));
    }
    for (i, message) in messages.iter().enumerate() {
        let expected = if i % 2 == 0 { Sender::System } else { Sender::User };
        if message.sender != expected {
            return Err(RestoreError::InvalidHistory(
                "senders must alternate after the greeting",
            ));
        }
    }
    // Alternation from a system seed leaves an even count only when a user
    // message is last
    if messages.len() % 2 == 0 {
        return Err(RestoreError::InvalidHistory("last message awaits a reply"));
    }
    Ok(())
}
