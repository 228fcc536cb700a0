//! Glob-style include/exclude pattern matching
//!
//! Patterns support `**` (matches across path separators), `*` (matches
//! within a single segment) and `?` (exactly one character). Matching is
//! case-sensitive and anchored to the start of the relative path; there is
//! no implicit end anchor, so a pattern matches any path it is a prefix of.

use regex::Regex;

/// A compiled glob pattern
///
/// Compilation is total: every input string yields a matcher. The pattern is
/// regex-escaped before wildcard substitution, so metacharacters in the glob
/// are treated literally.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a glob pattern into a matcher
    pub fn compile(pattern: &str) -> Self {
        let mut escaped = regex::escape(pattern);
        // Substitution order matters: `**` first so it is not consumed by `*`
        escaped = escaped.replace(r"\*\*", ".*");
        escaped = escaped.replace(r"\*", "[^/]*");
        escaped = escaped.replace(r"\?", ".");

        let anchored = format!("^{}", escaped);
        Self {
            // Escaping keeps the translation well-formed; a failure still
            // yields a matcher (one that matches nothing)
            regex: Regex::new(&anchored).ok(),
        }
    }

    /// Check whether a `/`-separated relative path matches this pattern
    pub fn matches(&self, relative_path: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(relative_path),
            None => false,
        }
    }
}

/// Compile a list of glob patterns
pub fn compile_all(patterns: &[String]) -> Vec<Pattern> {
    patterns.iter().map(|p| Pattern::compile(p)).collect()
}

/// Exclude-then-include policy used by the file collector
///
/// A path matching any exclude pattern is rejected regardless of include
/// matches; otherwise it must match at least one include pattern.
pub fn is_included(relative_path: &str, include: &[Pattern], exclude: &[Pattern]) -> bool {
    if exclude.iter().any(|p| p.matches(relative_path)) {
        return false;
    }
    include.iter().any(|p| p.matches(relative_path))
}
