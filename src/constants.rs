//! Global Constants
//!
//! Centralized constants for analysis, generation, and linting.
//! All magic numbers should be defined here with documentation.

/// Repository analysis constants
pub mod analysis {
    /// Directory basenames never traversed or recorded
    pub const EXCLUDED_DIRS: &[&str] = &[
        ".git",
        "node_modules",
        "venv",
        "env",
        "__pycache__",
        "build",
        "dist",
        "target",
    ];

    /// Directory basenames treated as source directories regardless of content
    pub const SRC_DIR_NAMES: &[&str] = &["src", "lib", "app", "core"];

    /// Directory basenames treated as documentation directories
    pub const DOC_DIR_NAMES: &[&str] = &["docs", "doc", "documentation", "wiki"];

    /// Directory basenames treated as test directories
    pub const TEST_DIR_NAMES: &[&str] = &["test", "tests", "testing", "specs"];

    /// Branch names probed when no active branch or remote HEAD resolves
    pub const FALLBACK_BRANCHES: &[&str] = &["main", "master"];
}

/// Documentation generation constants
pub mod docgen {
    /// Maximum source files documented per source directory
    pub const API_FILES_PER_DIR: usize = 10;

    /// Extensions the API generator extracts code elements from
    pub const API_SOURCE_EXTENSIONS: &[&str] = &["py", "js", "ts", "jsx", "tsx", "java"];

    /// File names (lowercase) recognized as existing API documentation
    pub const API_DOC_NAMES: &[&str] = &["api.md", "api-reference.md", "api-docs.md", "reference.md"];

    /// File names (lowercase) recognized as existing development documentation
    pub const DEV_DOC_NAMES: &[&str] = &["development.md", "developers.md", "dev-guide.md", "hacking.md"];
}

/// Markdown linting constants
pub mod lint {
    /// Characters of context captured on each side of a lint match
    pub const SNIPPET_CONTEXT: usize = 20;

    /// Blank-line run length that triggers a multiple-blanks warning
    pub const MAX_CONSECUTIVE_BLANKS: usize = 2;
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}
