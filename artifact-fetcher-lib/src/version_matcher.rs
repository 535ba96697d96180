use crate::github::Release;
use anyhow::{Context, Result};
use regex::Regex;

/// Selects release tags that belong to a base version.
///
/// A tag matches when it is the base version, optionally prefixed with `v`,
/// optionally followed by a `-<suffix>` of letters, digits, `.`, `_` or `-`,
/// and optionally ending in `-hotfix`. The whole tag must match and the
/// comparison is case-sensitive.
#[derive(Debug, Clone)]
pub struct VersionMatcher {
    pattern: Regex,
}

impl VersionMatcher {
    pub fn new(base_version: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"^(v)?{}(?:-[a-zA-Z0-9._-]+)?(-hotfix)?$",
            regex::escape(base_version)
        ))
        .with_context(|| format!("Invalid base version: {base_version}"))?;

        Ok(Self { pattern })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.pattern.is_match(tag)
    }

    /// True for published releases whose tag matches. Releases without a tag never match.
    pub fn selects(&self, release: &Release) -> bool {
        if !release.is_published() {
            return false;
        }

        release
            .tag_name
            .as_deref()
            .is_some_and(|tag| self.matches(tag))
    }
}
