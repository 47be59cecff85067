//! Version string recognizers
//!
//! This module holds the registry of known "version string appears in this
//! textual context" recognizers. The registry is a static table; each entry
//! pairs a stable id and a description with a function that compiles a fresh
//! [`VersionMatcher`] for a given old version.
//!
//! The old version is inserted into the pattern verbatim. Callers that accept
//! versions containing regex metacharacters must escape them first.

use anyhow::Result;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

pub mod matcher;


pub use matcher::{VersionMatch, VersionMatcher};

/// A named recognizer for one textual context a version string can appear in
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VersionPattern {
    /// Stable identifier used for selection and logging
    pub id: &'static str,

    /// What the recognizer matches
    pub description: &'static str,

    #[serde(skip)]
    build: fn(&str) -> Result<VersionMatcher>,
}

impl VersionPattern {
    /// Compile a matcher for `old_version`
    ///
    /// Every call returns an independent matcher.
    pub fn matcher(&self, old_version: &str) -> Result<VersionMatcher> {
        (self.build)(old_version)
    }
}

const JSON_VERSION: &str = "json-version";

/// All recognizers, in application order
pub static VERSION_PATTERNS: [VersionPattern; 8] = [
    VersionPattern {
        id: JSON_VERSION,
        description: "Matches version field in JSON files",
        build: json_version,
    },
    VersionPattern {
        id: "ts-export-const-version",
        description: "Matches exported version constant in TypeScript files",
        build: ts_export_const_version,
    },
    VersionPattern {
        id: "ts-const-version",
        description: "Matches version constant in TypeScript files",
        build: ts_const_version,
    },
    VersionPattern {
        id: "ts-version-field",
        description: "Matches version field in TypeScript object literals",
        build: ts_version_field,
    },
    VersionPattern {
        id: "ts-version-constant",
        description: "Matches VERSION constant in TypeScript files",
        build: ts_version_constant,
    },
    VersionPattern {
        id: "ts-export-cli-version",
        description: "Matches exported CLI version constant in TypeScript files",
        build: ts_export_cli_version,
    },
    VersionPattern {
        id: "ts-cli-version",
        description: "Matches CLI version constant in TypeScript files",
        build: ts_cli_version,
    },
    VersionPattern {
        id: "ts-package-version",
        description: "Matches packageVersion field in TypeScript files",
        build: ts_package_version,
    },
];

lazy_static! {
    static ref PATTERN_INDEX: HashMap<&'static str, &'static VersionPattern> =
        VERSION_PATTERNS.iter().map(|pattern| (pattern.id, pattern)).collect();
}

/// Every recognizer in declaration order
pub fn list_patterns() -> &'static [VersionPattern] {
    &VERSION_PATTERNS
}

/// Look up a recognizer by id
pub fn find_pattern(id: &str) -> Option<&'static VersionPattern> {
    PATTERN_INDEX.get(id).copied()
}

fn json_version(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::whole(JSON_VERSION, format!(r#""version"\s*:\s*"(?:{old})""#))
}

fn ts_export_const_version(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-export-const-version", r"export\s+const\s+version\s*=\s*", old)
}

fn ts_const_version(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-const-version", r"const\s+version\s*=\s*", old)
}

fn ts_version_field(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-version-field", r"version\s*:\s*", old)
}

fn ts_version_constant(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-version-constant", r"VERSION\s*=\s*", old)
}

fn ts_export_cli_version(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-export-cli-version", r"export\s+const\s+cliVersion\s*=\s*", old)
}

fn ts_cli_version(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-cli-version", r"const\s+cliVersion\s*=\s*", old)
}

// Case sensitive, so `packageVersion` never collides with `version:` fields.
fn ts_package_version(old: &str) -> Result<VersionMatcher> {
    VersionMatcher::quoted("ts-package-version", r"packageVersion\s*:\s*", old)
}
