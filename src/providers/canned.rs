//! Canned reply provider

use std::ops::Range;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::content::ChatContent;

use super::{Reply, ReplyGenerator};

/// Picks a reply uniformly from a fixed set after a uniform random delay
pub struct CannedReplies {
    replies: Vec<String>,
    delay_ms: Range<u64>,
    rng: Mutex<StdRng>,
}

impl CannedReplies {
    /// `replies` must contain at least one entry and `delay_ms` must be non-empty;
    /// `SiteContent::validate` guarantees both for loaded content.
    pub fn new(replies: Vec<String>, delay_ms: Range<u64>) -> Self {
        Self {
            replies,
            delay_ms,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn from_content(chat: &ChatContent) -> Self {
        let replies = chat
            .replies
            .iter()
            .filter(|r| !r.trim().is_empty())
            .cloned()
            .collect();
        Self::new(replies, chat.reply_delay_min_ms..chat.reply_delay_max_ms)
    }

    /// Use a fixed seed so the picks are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    fn pick(&self) -> Reply {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let content = self
            .replies
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_default();
        let delay = if self.delay_ms.is_empty() {
            self.delay_ms.start
        } else {
            rng.gen_range(self.delay_ms.clone())
        };
        Reply {
            content,
            delay: Duration::from_millis(delay),
        }
    }
}

#[async_trait]
impl ReplyGenerator for CannedReplies {
    async fn generate_reply(&self, user_text: &str) -> Reply {
        let reply = self.pick();
        tracing::debug!(
            user_chars = user_text.chars().count(),
            delay_ms = reply.delay.as_millis() as u64,
            "Picked canned reply"
        );
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replies() -> Vec<String> {
        vec!["one".to_string(), "two".to_string(), "three".to_string()]
    }

    #[tokio::test]
    async fn test_reply_comes_from_set_within_delay_bounds() {
        let canned = CannedReplies::new(replies(), 1000..3000).with_seed(7);

        for _ in 0..200 {
            let reply = canned.generate_reply("hello").await;
            assert!(canned.replies().contains(&reply.content));
            assert!(reply.delay >= Duration::from_millis(1000));
            assert!(reply.delay < Duration::from_millis(3000));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_sequence() {
        let a = CannedReplies::new(replies(), 1000..3000).with_seed(42);
        let b = CannedReplies::new(replies(), 1000..3000).with_seed(42);

        for _ in 0..10 {
            assert_eq!(a.generate_reply("x").await, b.generate_reply("x").await);
        }
    }

    #[tokio::test]
    async fn test_from_content_skips_blank_replies() {
        let chat = ChatContent {
            replies: vec!["  ".to_string(), "only".to_string()],
            ..ChatContent::default()
        };
        let canned = CannedReplies::from_content(&chat);

        assert_eq!(canned.replies(), &["only".to_string()]);
        assert_eq!(canned.generate_reply("x").await.content, "only");
    }
}
