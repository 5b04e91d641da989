//! Content Extraction
//!
//! Pulls project metadata out of individual sources: package manifests,
//! Python-style setup scripts, README headings, and git remotes. Every
//! extractor fails silently and independently - a parse failure in one
//! source must never abort the analysis pass, so each function logs a
//! warning and leaves the affected fields untouched.
//!
//! Source layering is enforced by only filling fields that are still
//! empty: manifest > setup script > README.

use std::path::Path;
use std::process::Command;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::analysis::FALLBACK_BRANCHES;
use crate::types::RepoInfo;

// =============================================================================
// Manifest Extraction
// =============================================================================

/// Extract project name, description, and repository URL from package.json.
///
/// The `repository` field may be a plain string or an object with a `url`
/// member; both forms are accepted. Missing or malformed fields are
/// tolerated individually.
pub fn extract_from_package_json(path: &Path, info: &mut RepoInfo) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Error reading package.json: {}", e);
            return;
        }
    };

    let data: Value = match serde_json::from_str(&content) {
        Ok(data) => data,
        Err(e) => {
            warn!("Error parsing package.json: {}", e);
            return;
        }
    };

    if info.project_name.is_empty()
        && let Some(name) = data.get("name").and_then(Value::as_str)
    {
        info.project_name = name.to_string();
    }

    if info.description.is_empty()
        && let Some(description) = data.get("description").and_then(Value::as_str)
    {
        info.description = description.to_string();
    }

    if info.repo_url.is_empty()
        && let Some(repository) = data.get("repository")
    {
        if let Some(url) = repository.as_str() {
            info.repo_url = url.to_string();
        } else if let Some(url) = repository.get("url").and_then(Value::as_str) {
            info.repo_url = url.to_string();
        }
    }
}

/// Extract metadata from a setup.py build script.
///
/// Tolerant pattern matching over `name=`, `description=`, and `url=`
/// string assignments - not a Python parser. First match per field wins.
pub fn extract_from_setup_py(path: &Path, info: &mut RepoInfo) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Error reading setup.py: {}", e);
            return;
        }
    };

    let fields: [(&str, &str); 3] = [
        ("name", r#"name\s*=\s*['"]([^'"]+)['"]"#),
        ("description", r#"description\s*=\s*['"]([^'"]+)['"]"#),
        ("url", r#"url\s*=\s*['"]([^'"]+)['"]"#),
    ];

    for (field, pattern) in fields {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                warn!("Invalid setup.py pattern for {}: {}", field, e);
                continue;
            }
        };

        let Some(value) = re.captures(&content).map(|c| c[1].to_string()) else {
            continue;
        };

        match field {
            "name" if info.project_name.is_empty() => info.project_name = value,
            "description" if info.description.is_empty() => info.description = value,
            "url" if info.repo_url.is_empty() => info.repo_url = value,
            _ => {}
        }
    }
}

// =============================================================================
// README Extraction
// =============================================================================

/// Extract project name and description from a README.
///
/// The first `#` heading becomes the project name and the first paragraph
/// after it becomes the description - in both cases only when the field
/// has not already been set by an earlier source.
pub fn extract_from_readme(path: &Path, info: &mut RepoInfo) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Error reading README: {}", e);
            return;
        }
    };

    let lines: Vec<&str> = content.lines().collect();

    let Some(heading_idx) = lines
        .iter()
        .position(|l| l.starts_with("# ") || (l.starts_with('#') && !l.starts_with("##")))
    else {
        return;
    };

    if info.project_name.is_empty() {
        let title = lines[heading_idx].trim_start_matches('#').trim();
        if !title.is_empty() {
            info.project_name = title.to_string();
        }
    }

    if info.description.is_empty() {
        // First paragraph after the heading: skip blanks, then collect
        // until the next blank line or heading.
        let mut paragraph = Vec::new();
        for line in lines.iter().skip(heading_idx + 1) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if paragraph.is_empty() {
                    continue;
                }
                break;
            }
            if trimmed.starts_with('#') {
                break;
            }
            paragraph.push(trimmed);
        }
        if !paragraph.is_empty() {
            info.description = paragraph.join(" ");
        }
    }
}

// =============================================================================
// Git Extraction
// =============================================================================

/// Extract org/repo identity and the default branch from git.
///
/// Shells out to the `git` binary; any subprocess failure degrades to
/// empty fields. The default branch resolves through a three-tier
/// fallback: active branch, symbolic remote HEAD, then conventional
/// branch names.
pub fn extract_git_info(repo_path: &Path, info: &mut RepoInfo) {
    let github_re = match Regex::new(r"github\.com[:/]([^/]+)/([^/.]+)") {
        Ok(re) => re,
        Err(e) => {
            warn!("Invalid git remote pattern: {}", e);
            return;
        }
    };

    // Org and canonical URL from the first remote matching a known host
    if let Some(remotes) = git_output(repo_path, &["remote"]) {
        'remotes: for remote in remotes.lines() {
            let Some(url) = git_output(repo_path, &["remote", "get-url", remote.trim()]) else {
                continue;
            };
            if let Some(caps) = github_re.captures(&url) {
                info.org_name = caps[1].to_string();
                info.repo_url = format!("https://github.com/{}/{}", &caps[1], &caps[2]);
                break 'remotes;
            }
        }
    } else {
        warn!("Error listing git remotes for {}", repo_path.display());
    }

    if let Some(branch) = resolve_default_branch(repo_path) {
        info.default_branch = branch;
    }
}

/// Three-tier default branch resolution.
fn resolve_default_branch(repo_path: &Path) -> Option<String> {
    // Tier 1: active branch (detached HEAD reports the literal "HEAD")
    if let Some(branch) = git_output(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
        && branch != "HEAD"
    {
        return Some(branch);
    }

    // Tier 2: symbolic remote HEAD reference
    if let Some(symref) = git_output(repo_path, &["symbolic-ref", "refs/remotes/origin/HEAD"]) {
        return Some(
            symref
                .trim_start_matches("refs/remotes/origin/")
                .to_string(),
        );
    }

    // Tier 3: first conventional branch name that resolves
    for branch in FALLBACK_BRANCHES {
        if git_output(repo_path, &["rev-parse", "--verify", branch]).is_some() {
            return Some((*branch).to_string());
        }
    }

    debug!("No default branch resolved for {}", repo_path.display());
    None
}

/// Run a git command in the repository, returning trimmed stdout on success.
fn git_output(repo_path: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() { None } else { Some(stdout) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_package_json_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name":"foo","description":"bar"}"#).unwrap();

        let mut info = RepoInfo::default();
        extract_from_package_json(&path, &mut info);
        assert_eq!(info.project_name, "foo");
        assert_eq!(info.description, "bar");
        assert!(info.repo_url.is_empty());
    }

    #[test]
    fn test_package_json_repository_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name":"foo","repository":{"url":"https://github.com/org/foo"}}"#,
        )
        .unwrap();

        let mut info = RepoInfo::default();
        extract_from_package_json(&path, &mut info);
        assert_eq!(info.repo_url, "https://github.com/org/foo");
    }

    #[test]
    fn test_package_json_malformed_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{not json").unwrap();

        let mut info = RepoInfo::default();
        extract_from_package_json(&path, &mut info);
        assert!(info.project_name.is_empty());
    }

    #[test]
    fn test_setup_py_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("setup.py");
        fs::write(
            &path,
            "setup(\n    name='mytool',\n    description=\"A tool\",\n    url='https://example.com/mytool',\n)",
        )
        .unwrap();

        let mut info = RepoInfo::default();
        extract_from_setup_py(&path, &mut info);
        assert_eq!(info.project_name, "mytool");
        assert_eq!(info.description, "A tool");
        assert_eq!(info.repo_url, "https://example.com/mytool");
    }

    #[test]
    fn test_readme_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(
            &path,
            "# My Project\n\nA useful description\nspread over two lines.\n\n## Install\n",
        )
        .unwrap();

        let mut info = RepoInfo::default();
        extract_from_readme(&path, &mut info);
        assert_eq!(info.project_name, "My Project");
        assert_eq!(
            info.description,
            "A useful description spread over two lines."
        );
    }

    #[test]
    fn test_readme_does_not_overwrite_earlier_sources() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Other Name\n\nOther description\n").unwrap();

        let mut info = RepoInfo {
            project_name: "manifest-name".to_string(),
            description: "manifest description".to_string(),
            ..Default::default()
        };
        extract_from_readme(&path, &mut info);
        assert_eq!(info.project_name, "manifest-name");
        assert_eq!(info.description, "manifest description");
    }

    #[test]
    fn test_git_info_on_plain_directory() {
        let dir = TempDir::new().unwrap();
        let mut info = RepoInfo::default();
        extract_git_info(dir.path(), &mut info);
        assert!(info.org_name.is_empty());
        assert!(info.default_branch.is_empty());
    }
}
