//! Section Generators
//!
//! Five independent strategies, one per documentation section. Each
//! consumes the shared [`RepoInfo`] and emits one markdown section
//! through the same three-tier strategy:
//!
//! 1. **Recover** existing human-authored content (purpose-specific file
//!    in a documentation directory, or a matching README section)
//! 2. **Synthesize** from repository structure
//! 3. **Fallback placeholder** - never an empty section
//!
//! Generators are infallible: file reads degrade to the next tier.

mod api;
mod contributing;
mod development;
mod installation;
mod overview;

pub use api::ApiGenerator;
pub use contributing::ContributingGenerator;
pub use development::DevelopmentGenerator;
pub use installation::InstallationGenerator;
pub use overview::OverviewGenerator;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::docgen::fsio::read_to_string_opt;
use crate::docgen::section::SectionKind;
use crate::types::RepoInfo;

/// Common contract for all section generators.
pub trait SectionGenerator: Send + Sync {
    /// Which section this generator produces.
    fn kind(&self) -> SectionKind;

    /// Generate the section's markdown. Never fails and never returns an
    /// empty string: recovery and synthesis failures degrade to an
    /// explicit placeholder notice.
    fn generate(&self, repo_info: &RepoInfo) -> String;
}

// =============================================================================
// Shared Recovery Helpers
// =============================================================================

/// Extract a `##`-level section matched by one of the candidate heading
/// names (case-sensitive), taking content up to the next `##` heading or
/// end of document. The heading line itself is stripped from the result.
pub(crate) fn extract_heading_section(content: &str, heading_names: &[&str]) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();

    for name in heading_names {
        let Some(start) = lines.iter().position(|line| {
            line.strip_prefix("## ")
                .is_some_and(|rest| rest.trim_start().starts_with(name))
        }) else {
            continue;
        };

        // A section can be the last one in the document: take content to
        // end-of-string when no further same-level heading exists.
        let end = lines
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|(_, line)| line.starts_with("## "))
            .map(|(i, _)| i)
            .unwrap_or(lines.len());

        let body = lines[start + 1..end].join("\n");
        let body = body.trim();
        if !body.is_empty() {
            return Some(body.to_string());
        }
    }

    None
}

/// Strip a leading `---` frontmatter block, if present.
pub(crate) fn strip_frontmatter(content: &str) -> String {
    let Some(rest) = content.strip_prefix("---\n") else {
        return content.to_string();
    };
    match rest.find("\n---\n") {
        Some(end) => rest[end + 5..].trim_start().to_string(),
        None => content.to_string(),
    }
}

/// Look for a purpose-specific file (by lowercase name) in the
/// repository's documentation directories and return its content with
/// frontmatter removed.
pub(crate) fn find_doc_file(
    repo_path: &Path,
    repo_info: &RepoInfo,
    file_names: &[&str],
) -> Option<String> {
    for doc_dir in &repo_info.doc_dirs {
        let dir_path = repo_path.join(doc_dir);
        let Ok(entries) = std::fs::read_dir(&dir_path) else {
            warn!("Error listing documentation directory {}", dir_path.display());
            continue;
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if file_names.contains(&name.as_str()) {
                if let Some(content) = read_to_string_opt(&entry.path()) {
                    return Some(strip_frontmatter(&content));
                }
            }
        }
    }
    None
}

/// Resolve the README's absolute path from the analysis record.
pub(crate) fn readme_abs_path(repo_path: &Path, repo_info: &RepoInfo) -> Option<PathBuf> {
    repo_info.readme_path().map(|rel| repo_path.join(rel))
}

/// Read the README and extract a `##`-level section by candidate names.
pub(crate) fn recover_readme_section(
    repo_path: &Path,
    repo_info: &RepoInfo,
    heading_names: &[&str],
) -> Option<String> {
    let path = readme_abs_path(repo_path, repo_info)?;
    let content = read_to_string_opt(&path)?;
    extract_heading_section(&content, heading_names)
}

// =============================================================================
// Tests
// =============================================================================
