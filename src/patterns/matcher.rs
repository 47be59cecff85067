//! Compiled version matchers
//!
//! A [`VersionMatcher`] wraps one compiled regex built for a single old version.
//! Quoted recognizers compile to two alternation branches, one per quote
//! character, so an opening quote always pairs with the same closing quote.
//! The branches use distinct named groups; [`VersionMatch`] hides which one fired.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::ops::Range;

const PREFIX_GROUPS: [&str; 2] = ["prefix_dq", "prefix_sq"];
const SUFFIX_GROUPS: [&str; 2] = ["suffix_dq", "suffix_sq"];

/// A compiled recognizer for one old version string
#[derive(Debug, Clone)]
pub struct VersionMatcher {
    regex: Regex,
}

impl VersionMatcher {
    /// Compile a recognizer whose whole match is the replaceable span
    pub(crate) fn whole(id: &str, pattern: String) -> Result<Self> {
        Self::compile(id, &pattern)
    }

    /// Compile a recognizer for `<context><quote><old><quote>`
    ///
    /// `context` is a regex fragment ending right before the opening quote.
    /// `old` is interpolated verbatim inside a non-capturing group.
    pub(crate) fn quoted(id: &str, context: &str, old: &str) -> Result<Self> {
        let pattern = format!(
            concat!(
                r#"(?P<prefix_dq>{context}")(?:{old})(?P<suffix_dq>")"#,
                "|",
                r#"(?P<prefix_sq>{context}')(?:{old})(?P<suffix_sq>')"#,
            ),
            context = context,
            old = old,
        );
        Self::compile(id, &pattern)
    }

    fn compile(id: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid regex pattern for {}: {}", id, pattern))?;
        tracing::debug!(pattern = id, regex = %regex, "compiled version matcher");
        Ok(Self { regex })
    }

    /// The underlying compiled regex
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether the text contains at least one occurrence
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Number of non-overlapping occurrences in the text
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Iterate over every non-overlapping occurrence, left to right
    pub fn find_iter<'t>(&self, text: &'t str) -> impl Iterator<Item = VersionMatch<'t>> {
        self.regex
            .captures_iter(text)
            .map(|caps| VersionMatch::from_captures(&caps))
    }
}

/// A single occurrence of a version string in its surrounding context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMatch<'t> {
    text: &'t str,
    start: usize,
    prefix: Option<&'t str>,
    suffix: Option<&'t str>,
}

impl<'t> VersionMatch<'t> {
    pub(crate) fn from_captures(caps: &Captures<'t>) -> Self {
        let whole = caps.get_match();
        let pick = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| caps.name(name))
                .map(|m| m.as_str())
        };

        Self {
            text: whole.as_str(),
            start: whole.start(),
            prefix: pick(&PREFIX_GROUPS[..]),
            suffix: pick(&SUFFIX_GROUPS[..]),
        }
    }

    /// The full matched text
    pub fn as_str(&self) -> &'t str {
        self.text
    }

    /// Byte range of the match within the scanned text
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    /// Byte offset where the match begins
    pub fn start(&self) -> usize {
        self.start
    }

    /// Leading context up to and including the opening quote
    pub fn prefix(&self) -> Option<&'t str> {
        self.prefix
    }

    /// The closing quote
    pub fn suffix(&self) -> Option<&'t str> {
        self.suffix
    }

    /// The version text between prefix and suffix, for delimited matches
    pub fn version(&self) -> Option<&'t str> {
        let (prefix, suffix) = (self.prefix?, self.suffix?);
        self.text.get(prefix.len()..self.text.len() - suffix.len())
    }
}
