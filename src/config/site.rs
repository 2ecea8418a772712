//! Site configuration (_config.yml)

use anyhow::Result;
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    /// Author shown on cards for posts without one
    pub default_author: String,

    // Content
    /// Location of the post collection: a path relative to the site
    /// directory or an http(s) URL
    pub posts: String,

    // Date / Time format
    pub date_format: String,
    /// IANA zone name; empty keeps each date's own offset
    pub timezone: String,

    // Search
    pub search_debounce_ms: u64,

    #[serde(default)]
    pub messages: Messages,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_author: "Author".to_string(),

            posts: "posts.json".to_string(),

            date_format: "MMM D, YYYY".to_string(),
            timezone: String::new(),

            search_debounce_ms: 220,

            messages: Messages::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The configured timezone, if any and valid
    pub fn tz(&self) -> Option<Tz> {
        if self.timezone.is_empty() {
            return None;
        }
        match self.timezone.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!("Ignoring timezone {:?}: {}", self.timezone, e);
                None
            }
        }
    }

    /// Quiescence window for search input
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Inline messages shown in place of content
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub load_failed: String,
    pub no_matches: String,
    pub not_found: String,
    pub all_tags: String,
    pub read_more: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            load_failed: "Unable to load posts.".to_string(),
            no_matches: "No posts match your search.".to_string(),
            not_found: "Post not found.".to_string(),
            all_tags: "All tags".to_string(),
            read_more: "Read →".to_string(),
        }
    }
}
