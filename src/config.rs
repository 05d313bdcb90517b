//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a biboutline.toml, and if present we load settings from there.
//! This provides file extension and header expansion preferences.

use facet::Facet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// File read from the working directory when present.
pub const CONFIG_FILE: &str = "biboutline.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from biboutline.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["md".to_string(), "bib".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = true)]
    /// Whether header nodes start expanded in the outline panel.
    pub expand_headers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extensions: vec!["md".to_string(), "bib".to_string()],
            expand_headers: true,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from biboutline.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&contents).unwrap_or_else(|| {
            warn!(path = %path.display(), "invalid configuration, using defaults");
            Self::default()
        })
    }

    #[must_use]
    /// Parse TOML configuration text, filling omitted fields with defaults.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
