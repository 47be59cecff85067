//! # version-patterns - Version String Recognizers for Release Tooling
//!
//! A static table of regular-expression recognizers used by version-bump tooling
//! to find and rewrite version strings in JSON manifests and TypeScript sources.
//!
//! ## Features
//!
//! - **Declarative registry**: eight named recognizers in a fixed order
//! - **Quote fidelity**: single and double quoted literals, never mixed
//! - **Format preserving rewrites**: prefix and suffix captures are spliced back unchanged
//! - **Selectable**: pick recognizers by id from TOML, JSON, YAML or environment
//!
//! ## Quick Start
//!
//! ```
//! use version_patterns::{find_pattern, rewrite::replace_version};
//!
//! let pattern = find_pattern("ts-const-version").unwrap();
//! let result = replace_version("const version = '1.0.0';", pattern, "1.0.0", "1.1.0")?;
//! assert_eq!(result.text, "const version = '1.1.0';");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod logging;
pub mod patterns;
pub mod rewrite;

pub use config::PatternConfig;
pub use patterns::{VersionMatch, VersionMatcher, VersionPattern, find_pattern, list_patterns};

/// Result type alias for version-patterns operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
