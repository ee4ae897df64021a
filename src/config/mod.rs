//! Application configuration

pub mod content;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use content::{ContentError, SiteContent};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Content file overriding the compiled-in default
    pub content_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            content_path: env::var("FOLIO_CONTENT").ok().map(PathBuf::from),
        })
    }

    /// Load the site content this configuration points at
    pub fn load_content(&self) -> Result<SiteContent, ContentError> {
        match &self.content_path {
            Some(path) => SiteContent::from_file(path),
            None => SiteContent::builtin(),
        }
    }
}
