//! In-memory version rewriting
//!
//! Helpers that apply registry recognizers to text the caller has already
//! loaded. Nothing here touches the filesystem.

use crate::patterns::{VersionMatch, VersionPattern};
use anyhow::Result;
use std::borrow::Cow;
use std::ops::Range;

/// One occurrence of an old version in a body of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOccurrence {
    /// Id of the recognizer that matched
    pub pattern_id: &'static str,

    /// Line number (1-based)
    pub line_number: usize,

    /// Column number (1-based, in characters)
    pub column: usize,

    /// The matched content
    pub content: String,
}

/// Result of applying one recognizer
#[derive(Debug)]
pub struct Replacement<'t> {
    pub text: Cow<'t, str>,
    pub count: usize,
}

/// Result of applying a list of recognizers in order
#[derive(Debug, Clone, Default)]
pub struct RewriteSummary {
    pub text: String,

    /// Replacements made, per recognizer id, in application order
    pub replacements: Vec<(&'static str, usize)>,

    modified: bool,
}

impl RewriteSummary {
    /// Total replacements across all recognizers
    pub fn total(&self) -> usize {
        self.replacements.iter().map(|(_, count)| count).sum()
    }

    /// Whether the output differs from the input text
    pub fn changed(&self) -> bool {
        self.modified
    }
}

/// Find every occurrence of `old_version` for each pattern
///
/// Results are grouped by pattern, in the order given, then by position.
pub fn find_occurrences(
    text: &str,
    patterns: &[&VersionPattern],
    old_version: &str,
) -> Result<Vec<VersionOccurrence>> {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect();

    let mut occurrences = Vec::new();

    for pattern in patterns {
        let matcher = pattern.matcher(old_version)?;
        for m in matcher.find_iter(text) {
            let line_index = line_starts.partition_point(|&start| start <= m.start()) - 1;
            let line_start = line_starts[line_index];
            let occurrence = VersionOccurrence {
                pattern_id: pattern.id,
                line_number: line_index + 1,
                column: text[line_start..m.start()].chars().count() + 1,
                content: m.as_str().to_string(),
            };
            tracing::trace!(
                pattern = pattern.id,
                line = occurrence.line_number,
                column = occurrence.column,
                "found version occurrence"
            );
            occurrences.push(occurrence);
        }
    }

    Ok(occurrences)
}

/// Replace every occurrence of `old_version` matched by `pattern` with `new_version`
///
/// Delimited matches keep their prefix and suffix exactly as written. The
/// JSON recognizer has no captures, so its span becomes `"version": "<new>"`.
pub fn replace_version<'t>(
    text: &'t str,
    pattern: &VersionPattern,
    old_version: &str,
    new_version: &str,
) -> Result<Replacement<'t>> {
    let matcher = pattern.matcher(old_version)?;
    let mut count = 0;

    let replaced = matcher.as_regex().replace_all(text, |caps: &regex::Captures<'_>| {
        count += 1;
        splice(&VersionMatch::from_captures(caps), new_version)
    });

    tracing::debug!(pattern = pattern.id, count, "replaced version occurrences");

    Ok(Replacement {
        text: replaced,
        count,
    })
}

/// Apply each pattern in turn and rewrite every occurrence once
///
/// All patterns scan the original text. A match overlapping a span already
/// claimed by an earlier pattern is skipped, so `export const version = ".."`
/// is counted for `ts-export-const-version` only, never again for
/// `ts-const-version`.
pub fn bump_text(
    text: &str,
    patterns: &[&VersionPattern],
    old_version: &str,
    new_version: &str,
) -> Result<RewriteSummary> {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    let mut replacements = Vec::with_capacity(patterns.len());

    for pattern in patterns {
        let matcher = pattern.matcher(old_version)?;
        let mut count = 0;

        for m in matcher.find_iter(text) {
            let range = m.range();
            let claimed = edits
                .iter()
                .any(|(edit, _)| range.start < edit.end && edit.start < range.end);
            if claimed {
                tracing::trace!(
                    pattern = pattern.id,
                    start = range.start,
                    "span already rewritten"
                );
                continue;
            }
            edits.push((range, splice(&m, new_version)));
            count += 1;
        }

        tracing::debug!(pattern = pattern.id, count, "replaced version occurrences");
        replacements.push((pattern.id, count));
    }

    edits.sort_by_key(|(range, _)| range.start);

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, replacement) in &edits {
        output.push_str(&text[cursor..range.start]);
        output.push_str(replacement);
        cursor = range.end;
    }
    output.push_str(&text[cursor..]);

    let summary = RewriteSummary {
        modified: output != text,
        text: output,
        replacements,
    };

    tracing::debug!(
        total = summary.total(),
        from = old_version,
        to = new_version,
        "version bump applied"
    );

    Ok(summary)
}

fn splice(m: &VersionMatch<'_>, new_version: &str) -> String {
    match (m.prefix(), m.suffix()) {
        (Some(prefix), Some(suffix)) => format!("{prefix}{new_version}{suffix}"),
        _ => format!(r#""version": "{new_version}""#),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{find_pattern, list_patterns};

    fn pattern(id: &str) -> &'static VersionPattern {
        find_pattern(id).unwrap()
    }

    #[test]
    fn test_replace_preserves_quotes_and_spacing() {
        let text = "export const version   =  '1.0.0';\n";
        let result =
            replace_version(text, pattern("ts-export-const-version"), "1.0.0", "1.1.0").unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.text, "export const version   =  '1.1.0';\n");
    }

    #[test]
    fn test_replace_json_builds_fragment() {
        let text = "{\n  \"name\": \"pkg\",\n  \"version\"  :\"1.0.0\"\n}";
        let result = replace_version(text, pattern("json-version"), "1.0.0", "2.0.0").unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.text, "{\n  \"name\": \"pkg\",\n  \"version\": \"2.0.0\"\n}");
    }

    #[test]
    fn test_replace_without_match_borrows() {
        let text = "const version = '0.9.0';";
        let result = replace_version(text, pattern("ts-const-version"), "1.0.0", "1.1.0").unwrap();
        assert_eq!(result.count, 0);
        assert!(matches!(result.text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_replace_same_version_is_identity() {
        let text = r#"export const version = "1.0.0";"#;
        let result =
            replace_version(text, pattern("ts-export-const-version"), "1.0.0", "1.0.0").unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.text, text);
    }

    #[test]
    fn test_find_occurrences_positions() {
        let text = "// header\nconst meta = { version: \"1.0.0\" };\n  VERSION = '1.0.0';\n";
        let patterns: Vec<_> = list_patterns().iter().collect();
        let found = find_occurrences(text, &patterns, "1.0.0").unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].pattern_id, "ts-version-field");
        assert_eq!(found[0].line_number, 2);
        assert_eq!(found[0].column, 16);
        assert_eq!(found[0].content, "version: \"1.0.0\"");

        assert_eq!(found[1].pattern_id, "ts-version-constant");
        assert_eq!(found[1].line_number, 3);
        assert_eq!(found[1].column, 3);
    }

    #[test]
    fn test_find_occurrences_counts_characters() {
        let text = "/* é */ VERSION = \"1.0.0\"";
        let found = find_occurrences(text, &[pattern("ts-version-constant")], "1.0.0").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].column, 9);
    }

    #[test]
    fn test_bump_text_counts_per_pattern() {
        let text = concat!(
            "export const version = \"1.0.0\";\n",
            "const cliVersion = '1.0.0';\n",
            "const info = { packageVersion: \"1.0.0\", version: '1.0.0' };\n",
        );
        let patterns: Vec<_> = list_patterns().iter().collect();
        let summary = bump_text(text, &patterns, "1.0.0", "1.2.0").unwrap();

        assert_eq!(
            summary.text,
            concat!(
                "export const version = \"1.2.0\";\n",
                "const cliVersion = '1.2.0';\n",
                "const info = { packageVersion: \"1.2.0\", version: '1.2.0' };\n",
            )
        );
        assert_eq!(summary.total(), 4);
        assert!(summary.changed());

        let counts: Vec<_> = summary
            .replacements
            .iter()
            .filter(|(_, c)| *c > 0)
            .copied()
            .collect();
        assert_eq!(
            counts,
            vec![
                ("ts-export-const-version", 1),
                ("ts-version-field", 1),
                ("ts-cli-version", 1),
                ("ts-package-version", 1),
            ]
        );
    }

    #[test]
    fn test_bump_text_same_version_counts_once() {
        let patterns: Vec<_> = list_patterns().iter().collect();

        let text = "export const version = \"1.0.0\";";
        let summary = bump_text(text, &patterns, "1.0.0", "1.0.0").unwrap();
        assert_eq!(summary.text, text);
        assert_eq!(summary.total(), 1);
        assert!(!summary.changed());

        let text = "export const version = \"1.0.0\";\nexport const cliVersion = '1.0.0';\n";
        let summary = bump_text(text, &patterns, "1.0.0", "1.0.0").unwrap();
        assert_eq!(summary.text, text);
        assert_eq!(summary.total(), 2);
        assert!(!summary.changed());

        let counts: Vec<_> = summary
            .replacements
            .iter()
            .filter(|(_, c)| *c > 0)
            .copied()
            .collect();
        assert_eq!(
            counts,
            vec![("ts-export-const-version", 1), ("ts-export-cli-version", 1)]
        );
    }

    #[test]
    fn test_bump_text_new_version_matching_old_pattern() {
        // The unescaped dots in 1.0.0 also match 1x0y0.
        let patterns: Vec<_> = list_patterns().iter().collect();
        let text = "export const version = '1.0.0';";
        let summary = bump_text(text, &patterns, "1.0.0", "1x0y0").unwrap();

        assert_eq!(summary.text, "export const version = '1x0y0';");
        assert_eq!(summary.total(), 1);
        assert!(summary.changed());
    }

    #[test]
    fn test_bump_text_without_matches() {
        let patterns: Vec<_> = list_patterns().iter().collect();
        let summary = bump_text("nothing here", &patterns, "1.0.0", "2.0.0").unwrap();
        assert_eq!(summary.text, "nothing here");
        assert_eq!(summary.replacements.len(), 8);
        assert!(!summary.changed());
    }
}
