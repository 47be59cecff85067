use super::{PatternConfig, smart_load};
use crate::patterns::{VersionPattern, find_pattern, list_patterns};
use anyhow::{Context, Result, bail};
use figment::{Figment, providers::{Env, Format, Toml}};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "VERSION_PATTERNS_";

impl PatternConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG));  // Embedded defaults

        if let Some(path) = path {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(smart_load::auto(path)?);
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        Self::from_figment(&figment)
    }

    /// Extract configuration from an already assembled figment
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        figment
            .extract()
            .context("Failed to parse version pattern configuration")
    }

    /// Resolve the configured recognizers, in registry order
    pub fn select(&self) -> Result<Vec<&'static VersionPattern>> {
        for id in self.only.iter().chain(&self.skip) {
            if find_pattern(id).is_none() {
                let known: Vec<_> = list_patterns().iter().map(|p| p.id).collect();
                bail!("Unknown version pattern '{}' (known: {})", id, known.join(", "));
            }
        }

        let selected: Vec<_> = list_patterns()
            .iter()
            .filter(|p| self.only.is_empty() || self.only.iter().any(|id| id == p.id))
            .filter(|p| !self.skip.iter().any(|id| id == p.id))
            .collect();

        tracing::debug!(
            selected = selected.len(),
            total = list_patterns().len(),
            "resolved version patterns"
        );
        Ok(selected)
    }
}
