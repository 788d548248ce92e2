//! prime-site: the Prime Accounting marketing and blog site
//!
//! Pages render server-side with Tera templates from an immutable
//! in-memory content store populated once at startup. The only write
//! path is the contact form, which forwards validated submissions to an
//! SMTP collaborator.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::{Context as _, Result};
use std::path::Path;

/// The loaded site: configuration plus the content store
pub struct Site {
    pub config: config::SiteConfig,
    pub store: content::ContentStore,
}

impl Site {
    /// Load the site. An explicit config path must exist; otherwise
    /// ./site.yml is used when present, and defaults apply when not.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::SiteConfig::load(path)
                .with_context(|| format!("failed to load config from {:?}", path))?,
            None => {
                let default_path = Path::new("site.yml");
                if default_path.exists() {
                    config::SiteConfig::load(default_path)?
                } else {
                    config::SiteConfig::default()
                }
            }
        };

        let store = content::ContentStore::load(&config)?;

        Ok(Self { config, store })
    }
}
