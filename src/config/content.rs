//! Portfolio content loaded from TOML files
//!
//! Everything the panels display comes from a single `SiteContent` document:
//! - Profile card and social links for the sidebar
//! - Chat greeting, canned replies, suggestion chips and reply latency
//! - Projects, experience timeline and skill groups
//! - Contact channels, fun facts and client reviews
//!
//! The default document is compiled in from `content/site.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The compiled-in default content
pub const DEFAULT_CONTENT: &str = include_str!("../../content/site.toml");

/// Root content document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContent {
    /// Sidebar profile
    #[serde(default)]
    pub profile: Profile,

    /// Chat panel settings
    #[serde(default)]
    pub chat: ChatContent,

    #[serde(default)]
    pub projects: Vec<Project>,

    /// Experience timeline, most recent first
    #[serde(default)]
    pub experience: Vec<Experience>,

    /// Skill summary groups shown under the timeline
    #[serde(default)]
    pub skills: Vec<SkillGroup>,

    #[serde(default)]
    pub contact: ContactContent,

    #[serde(default)]
    pub fun: FunContent,

    /// Client reviews, shown in the carousel
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl SiteContent {
    /// Load content from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load content from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ContentError> {
        let site: SiteContent = toml::from_str(content)?;
        site.validate()?;
        Ok(site)
    }

    /// The compiled-in default content
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_str(DEFAULT_CONTENT)
    }

    /// Check the invariants the panels rely on
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.chat.greeting.trim().is_empty() {
            return Err(ContentError::Validation("chat.greeting is empty".into()));
        }
        if self.chat.replies.iter().all(|r| r.trim().is_empty()) {
            return Err(ContentError::Validation(
                "chat.replies needs at least one non-empty reply".into(),
            ));
        }
        if self.chat.reply_delay_min_ms >= self.chat.reply_delay_max_ms {
            return Err(ContentError::Validation(format!(
                "chat.reply_delay_min_ms ({}) must be below reply_delay_max_ms ({})",
                self.chat.reply_delay_min_ms, self.chat.reply_delay_max_ms
            )));
        }
        if self.reviews.is_empty() {
            return Err(ContentError::Validation(
                "at least one review is required".into(),
            ));
        }
        if let Some(review) = self.reviews.iter().find(|r| r.rating > 5) {
            return Err(ContentError::Validation(format!(
                "review {} has rating {} (max 5)",
                review.id, review.rating
            )));
        }
        Ok(())
    }

    pub fn hobby(&self, id: &str) -> Option<&Hobby> {
        self.fun.hobbies.iter().find(|h| h.id == id)
    }
}

/// Sidebar profile card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,

    /// Shown in the avatar circle
    #[serde(default)]
    pub initials: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub location: String,

    /// Drives the "Available for work" badge
    #[serde(default)]
    pub available: bool,

    #[serde(default)]
    pub tagline: Option<String>,

    #[serde(default)]
    pub social: Vec<SocialLink>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            initials: String::new(),
            title: String::new(),
            location: String::new(),
            available: false,
            tagline: None,
            social: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

/// Chat panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContent {
    /// Seeded system message
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Canned reply set the simulator picks from
    #[serde(default = "default_replies")]
    pub replies: Vec<String>,

    /// Chips that fill the input when clicked
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,

    /// Lower bound of the reply delay (inclusive)
    #[serde(default = "default_delay_min")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the reply delay (exclusive)
    #[serde(default = "default_delay_max")]
    pub reply_delay_max_ms: u64,
}

fn default_greeting() -> String {
    builtin::GREETING.to_string()
}

fn default_replies() -> Vec<String> {
    builtin::REPLIES.iter().map(|r| r.to_string()).collect()
}

fn default_suggestions() -> Vec<String> {
    builtin::SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_delay_min() -> u64 {
    1000
}

fn default_delay_max() -> u64 {
    3000
}

impl Default for ChatContent {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            replies: default_replies(),
            suggestions: default_suggestions(),
            reply_delay_min_ms: default_delay_min(),
            reply_delay_max_ms: default_delay_max(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Fullstack,
    Frontend,
    Backend,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 5] = [
        ProjectCategory::Fullstack,
        ProjectCategory::Frontend,
        ProjectCategory::Backend,
        ProjectCategory::Mobile,
        ProjectCategory::Web,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Fullstack => "fullstack",
            ProjectCategory::Frontend => "frontend",
            ProjectCategory::Backend => "backend",
        }
    }

    /// Label used on the filter buttons
    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "Web Apps",
            ProjectCategory::Mobile => "Mobile",
            ProjectCategory::Fullstack => "Full Stack",
            ProjectCategory::Frontend => "Frontend",
            ProjectCategory::Backend => "Backend",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub github_url: Option<String>,

    #[serde(default)]
    pub live_url: Option<String>,

    pub category: ProjectCategory,
}

/// One role on the experience timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,

    #[serde(default)]
    pub company_url: Option<String>,

    #[serde(default)]
    pub location: String,

    /// Human readable span, e.g. "Jan 2022 - Present"
    pub duration: String,

    /// `YYYY-MM`
    pub start_date: String,

    /// `YYYY-MM` or "Present"
    pub end_date: String,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub responsibilities: Vec<String>,

    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub area: String,
    pub items: Vec<String>,
}

/// Contact panel content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactContent {
    /// Ways to reach out besides the form
    #[serde(default)]
    pub channels: Vec<ContactChannel>,

    /// Shown after a (simulated) successful submission
    #[serde(default)]
    pub confirmation: String,

    /// Availability notes
    #[serde(default)]
    pub availability: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactChannel {
    pub label: String,
    pub value: String,
    pub href: String,
}

/// Fun facts panel content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunContent {
    #[serde(default)]
    pub hobbies: Vec<Hobby>,

    /// Extra line shown on the expanded hobby card
    #[serde(default)]
    pub hobby_note: Option<String>,

    #[serde(default)]
    pub achievements: Vec<String>,

    /// Quirky facts
    #[serde(default)]
    pub facts: Vec<String>,

    /// Work style bars
    #[serde(default)]
    pub traits: Vec<PersonalityTrait>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hobby {
    pub id: String,
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub stats: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityTrait {
    pub name: String,

    /// 0..=100
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub company_url: Option<String>,

    /// 1..=5 stars
    pub rating: u8,

    pub review: String,

    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub avatar: String,
}

/// Content errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Chat defaults used when a content file omits the `[chat]` table
pub mod builtin {
    pub const GREETING: &str = "👋 Hello! I'm your AI assistant. I can tell you about experience, projects, and skills. What would you like to know?";

    pub const REPLIES: &[&str] = &[
        "I'm a passionate full-stack developer with years of experience across the web stack.",
        "I've worked on e-commerce platforms, SaaS applications, and mobile apps.",
        "I'm currently available for freelance projects and full-time opportunities.",
    ];

    pub const SUGGESTIONS: &[&str] = &["Project", "Experience", "Tell me about yourself"];
}
