//! Pattern selection configuration
//!
//! Decides which recognizers a version bump applies. Configuration is merged
//! from embedded defaults, an optional TOML, JSON or YAML file, and
//! `VERSION_PATTERNS_*` environment variables, in that order of priority.
//!
//! Id lists accept either a sequence or a comma separated string, so both
//! `VERSION_PATTERNS_ONLY=json-version,ts-cli-version` and
//! `VERSION_PATTERNS_ONLY=[json-version,ts-cli-version]` work.

use serde::{Deserialize, Deserializer, Serialize};

mod core;
mod smart_load;


/// Recognizer selection by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Apply only these recognizers (all when empty)
    #[serde(deserialize_with = "id_list")]
    pub only: Vec<String>,

    /// Recognizers to leave out
    #[serde(deserialize_with = "id_list")]
    pub skip: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdList {
    Joined(String),
    Many(Vec<String>),
}

fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match IdList::deserialize(deserializer)? {
        IdList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect(),
        IdList::Many(ids) => ids,
    })
}
