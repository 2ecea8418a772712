//! hashfolio: a post-collection renderer with search, tag filtering and
//! hash routing
//!
//! A collection of posts is loaded once from a JSON document, rendered as
//! cards into an in-memory page, narrowed by free-text search and tags, and
//! switched between list and single-post views by URL fragments such as
//! `#/post/<id>` and `#tag=<tag>`.

pub mod app;
pub mod commands;
pub mod config;
pub mod content;
pub mod filter;
pub mod helpers;
pub mod page;
pub mod render;
pub mod router;
pub mod session;

use anyhow::Result;
use std::path::Path;

/// A site directory with its configuration
#[derive(Debug, Clone)]
pub struct Hashfolio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Hashfolio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Where the post collection is read from
    pub fn source(&self) -> content::PostSource {
        content::PostSource::resolve(&self.base_dir, &self.config.posts)
    }

    /// Load the collection and open the page at `fragment`
    pub async fn open(&self, fragment: &str) -> app::App {
        app::App::start(&self.config, &self.source(), fragment).await
    }
}
