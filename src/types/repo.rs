//! Repository Metadata Types
//!
//! The `RepoInfo` record produced by a single analysis pass. It is
//! constructed once by the analyzer and treated as read-only by every
//! downstream consumer (section generators, site writer, practices).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

// =============================================================================
// Key File Roles
// =============================================================================

/// Logical roles a repository file can fulfil, recognized by name pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFileRole {
    Readme,
    License,
    Contributing,
    CodeOfConduct,
    Changelog,
}

impl std::fmt::Display for KeyFileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Readme => write!(f, "readme"),
            Self::License => write!(f, "license"),
            Self::Contributing => write!(f, "contributing"),
            Self::CodeOfConduct => write!(f, "code_of_conduct"),
            Self::Changelog => write!(f, "changelog"),
        }
    }
}

// =============================================================================
// Repository Info
// =============================================================================

/// Everything the documentation pipeline knows about a repository.
///
/// `files` and `directories` preserve traversal order (filesystem-walk
/// order, not sorted). `key_files` holds at most one path per role; the
/// first match during traversal wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Project name (manifest > setup script > README > directory name)
    pub project_name: String,
    /// One-line project description, empty if undiscoverable
    pub description: String,
    /// Canonical repository URL, empty if undiscoverable
    pub repo_url: String,
    /// Hosting organization name, empty if undiscoverable
    pub org_name: String,
    /// Default branch name, empty if undiscoverable
    pub default_branch: String,

    /// Repository-relative file paths, in traversal order
    pub files: Vec<String>,
    /// Repository-relative directory paths, in traversal order
    pub directories: Vec<String>,
    /// Role -> relative path of the first matching file
    pub key_files: HashMap<KeyFileRole, String>,

    /// Directories classified as source code
    pub src_dirs: Vec<String>,
    /// Directories classified as documentation
    pub doc_dirs: Vec<String>,
    /// Directories classified as tests
    pub test_dirs: Vec<String>,

    /// Human-readable language labels detected from file extensions
    pub languages: BTreeSet<String>,
}

impl RepoInfo {
    /// Relative path of the README, if one was found.
    pub fn readme_path(&self) -> Option<&str> {
        self.key_files.get(&KeyFileRole::Readme).map(String::as_str)
    }

    /// True when the repository contains a file with this exact relative path.
    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }

    /// Repo URL with a placeholder fallback for synthesized shell snippets.
    pub fn repo_url_or_placeholder(&self) -> String {
        if self.repo_url.is_empty() {
            format!("[REPO_URL]/{}", self.project_name)
        } else {
            self.repo_url.clone()
        }
    }
}

// =============================================================================
// Language Detection
// =============================================================================

/// Map a file extension (without the dot, lowercase) to a language label.
///
/// Extension coverage is intentionally broad and flat; classification of a
/// directory as "source" keys off the same table.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let label = match ext {
        "py" => "Python",
        "js" => "JavaScript",
        "jsx" => "React",
        "ts" => "TypeScript",
        "tsx" => "React",
        "java" => "Java",
        "c" => "C",
        "cpp" => "C++",
        "h" => "C/C++",
        "go" => "Go",
        "rs" => "Rust",
        "rb" => "Ruby",
        "php" => "PHP",
        "swift" => "Swift",
        "kt" => "Kotlin",
        "scala" => "Scala",
        "cs" => "C#",
        "r" => "R",
        "sh" => "Shell",
        "html" => "HTML",
        "css" => "CSS",
        "md" => "Markdown",
        _ => return None,
    };
    Some(label)
}
