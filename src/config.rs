//! Environment-driven configuration and analysis defaults

/// Default maximum file size in bytes (100KB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100_000;

/// Default include patterns: the source families the extractor understands
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.py", "*.js", "*.ts", "*.jsx", "*.tsx"];

/// Default exclude patterns: dependency trees, bytecode caches, git internals
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
    &["**/node_modules/**", "**/__pycache__/**", "**/.git/**"];

/// Default include patterns as owned strings (serde default)
pub fn default_include_patterns() -> Vec<String> {
    DEFAULT_INCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

/// Default exclude patterns as owned strings (serde default)
pub fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

/// Default size ceiling (serde default)
pub fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Access token for cloning private repositories, if configured
///
/// Read from `GITHUB_TOKEN`; the token is injected into https clone URLs.
pub fn github_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty())
}

/// Size ceiling override from the environment, falling back to the default
pub fn max_file_size() -> u64 {
    std::env::var("REPOGRAPH_MAX_FILE_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}
