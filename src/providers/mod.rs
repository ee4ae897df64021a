//! Reply providers
//!
//! The chat panel never produces replies itself. It asks a `ReplyGenerator`
//! for the content and the latency to simulate, so a real backend can replace
//! the canned one without touching the panel's state machine.

mod canned;

use std::time::Duration;

use async_trait::async_trait;
pub use canned::CannedReplies;

/// A reply together with the latency the panel should wait before showing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub delay: Duration,
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Produce the reply to `user_text`. Infallible: every accepted user
    /// message gets exactly one reply.
    async fn generate_reply(&self, user_text: &str) -> Reply;
}
