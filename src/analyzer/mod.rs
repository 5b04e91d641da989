//! Repository Analyzer
//!
//! Single-pass filesystem walk producing a [`RepoInfo`] record: project
//! metadata layered from manifest, setup script, README, and git, plus
//! file/directory inventories classified by name and content heuristics.
//!
//! The analyzer is read-only. Its only fatal error is a target path that
//! does not exist; every extraction sub-step recovers locally.

pub mod extractor;

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::constants::analysis::{DOC_DIR_NAMES, EXCLUDED_DIRS, SRC_DIR_NAMES, TEST_DIR_NAMES};
use crate::types::{KeyFileRole, RepoInfo, Result, ScribeError, language_for_extension};

/// Analyzes a repository tree and extracts structure and metadata.
pub struct RepoAnalyzer {
    repo_path: PathBuf,
    key_file_patterns: Vec<(KeyFileRole, Regex)>,
}

impl RepoAnalyzer {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            key_file_patterns: key_file_patterns(),
        }
    }

    /// Analyze the repository and return the extracted information.
    ///
    /// The non-existence of the repository path is the single fatal error
    /// of the documentation pipeline and is checked here, before any
    /// extraction begins.
    pub fn analyze(&self) -> Result<RepoInfo> {
        if !self.repo_path.is_dir() {
            return Err(ScribeError::RepoNotFound(self.repo_path.clone()));
        }

        info!("Analyzing repository: {}", self.repo_path.display());

        let mut repo_info = RepoInfo {
            project_name: self
                .repo_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            ..Default::default()
        };

        self.extract_project_info(&mut repo_info);
        self.scan_filesystem(&mut repo_info);

        debug!(
            "Completed repository analysis: {} files, {} directories",
            repo_info.files.len(),
            repo_info.directories.len()
        );
        Ok(repo_info)
    }

    /// Layered metadata extraction: manifest > setup script > README > git.
    ///
    /// Each source only fills fields still empty, and each failure is
    /// recovered inside the extractor itself.
    fn extract_project_info(&self, repo_info: &mut RepoInfo) {
        // The directory name seeds project_name; clear it so the layered
        // sources can claim the field, then restore the seed if none did.
        let seed_name = std::mem::take(&mut repo_info.project_name);

        let package_json = self.repo_path.join("package.json");
        if package_json.exists() {
            extractor::extract_from_package_json(&package_json, repo_info);
        }

        let setup_py = self.repo_path.join("setup.py");
        if setup_py.exists() {
            extractor::extract_from_setup_py(&setup_py, repo_info);
        }

        let readme = self.repo_path.join("README.md");
        if readme.exists() {
            extractor::extract_from_readme(&readme, repo_info);
        }

        if repo_info.project_name.is_empty() {
            repo_info.project_name = seed_name;
        }

        if self.repo_path.join(".git").exists() {
            extractor::extract_git_info(&self.repo_path, repo_info);
        }
    }

    /// Walk the tree once, pruning excluded directories before descending.
    fn scan_filesystem(&self, repo_info: &mut RepoInfo) {
        let walker = WalkBuilder::new(&self.repo_path)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if !is_dir {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !EXCLUDED_DIRS.contains(&name.as_ref())
            })
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            if entry.depth() == 0 {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(&self.repo_path) else {
                continue;
            };
            let rel = rel_path.to_string_lossy().to_string();

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                repo_info.directories.push(rel.clone());
                self.classify_directory(entry.path(), &rel, repo_info);
            } else {
                self.record_file(entry.path(), &rel, repo_info);
            }
        }
    }

    /// Classify a directory into zero or more of {src, doc, test}.
    ///
    /// A directory is a source directory when its basename is one of a
    /// fixed set of conventional names OR it directly contains a file
    /// with a recognized source extension. The content check does not
    /// recurse: a nested source tree only classifies the directories
    /// that independently match.
    fn classify_directory(&self, abs_path: &Path, rel: &str, repo_info: &mut RepoInfo) {
        let dir_name = abs_path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if SRC_DIR_NAMES.contains(&dir_name.as_str()) || directly_contains_source(abs_path) {
            repo_info.src_dirs.push(rel.to_string());
        }
        if DOC_DIR_NAMES.contains(&dir_name.as_str()) {
            repo_info.doc_dirs.push(rel.to_string());
        }
        if TEST_DIR_NAMES.contains(&dir_name.as_str()) {
            repo_info.test_dirs.push(rel.to_string());
        }
    }

    /// Record a file: inventory, key-file role matching, language lookup.
    fn record_file(&self, abs_path: &Path, rel: &str, repo_info: &mut RepoInfo) {
        repo_info.files.push(rel.to_string());

        let file_name = abs_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // First occurrence during traversal wins per role.
        for (role, pattern) in &self.key_file_patterns {
            if !repo_info.key_files.contains_key(role) && pattern.is_match(&file_name) {
                repo_info.key_files.insert(*role, rel.to_string());
            }
        }

        if let Some(ext) = abs_path.extension().and_then(|e| e.to_str())
            && let Some(language) = language_for_extension(&ext.to_lowercase())
        {
            repo_info.languages.insert(language.to_string());
        }
    }
}

/// True when the directory directly contains a file with a recognized
/// source extension (non-recursive).
fn directly_contains_source(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        warn!("Error listing directory {}", dir.display());
        return false;
    };

    entries.filter_map(|e| e.ok()).any(|entry| {
        entry.file_type().is_ok_and(|t| t.is_file())
            && entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| language_for_extension(&ext.to_lowercase()).is_some())
    })
}

/// Case-insensitive name patterns for key-file roles.
fn key_file_patterns() -> Vec<(KeyFileRole, Regex)> {
    let patterns: [(KeyFileRole, &str); 5] = [
        (KeyFileRole::Readme, r"(?i)^readme\.md$"),
        (KeyFileRole::License, r"(?i)^license(\.md|\.txt)?$"),
        (KeyFileRole::Contributing, r"(?i)^contributing\.md$"),
        (KeyFileRole::CodeOfConduct, r"(?i)^code[-_]of[-_]conduct\.md$"),
        (KeyFileRole::Changelog, r"(?i)^changelog\.md$"),
    ];

    patterns
        .into_iter()
        .filter_map(|(role, pattern)| match Regex::new(pattern) {
            Ok(re) => Some((role, re)),
            Err(e) => {
                warn!("Invalid key-file pattern for {}: {}", role, e);
                None
            }
        })
        .collect()
}

/// Quick check used by callers that need to know whether a path is
/// version-controlled without running the full analysis.
pub fn is_repository(path: &Path) -> bool {
    path.join(".git").exists()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_nonexistent_path_is_fatal() {
        let analyzer = RepoAnalyzer::new("/definitely/not/a/real/path");
        let err = analyzer.analyze().unwrap_err();
        assert!(matches!(err, ScribeError::RepoNotFound(_)));
    }

    #[test]
    fn test_manifest_fields_extracted() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name":"foo","description":"bar"}"#,
        )
        .unwrap();

        let info = RepoAnalyzer::new(dir.path()).analyze().unwrap();
        assert_eq!(info.project_name, "foo");
        assert_eq!(info.description, "bar");
    }

    #[test]
    fn test_directory_name_seeds_project_name() {
        let dir = TempDir::new().unwrap();
        let repo = dir.path().join("bare-repo");
        fs::create_dir(&repo).unwrap();

        let info = RepoAnalyzer::new(&repo).analyze().unwrap();
        assert_eq!(info.project_name, "bare-repo");
    }

    #[test]
    fn test_excluded_dirs_never_recorded() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join(".git/config"));
        touch(&dir.path().join("node_modules/pkg/index.js"));
        touch(&dir.path().join("src/main.py"));

        let info = RepoAnalyzer::new(dir.path()).analyze().unwrap();
        assert!(info.files.iter().all(|f| !f.starts_with(".git")));
        assert!(info.files.iter().all(|f| !f.starts_with("node_modules")));
        assert!(info.directories.iter().all(|d| !d.contains("node_modules")));
        assert!(info.files.iter().any(|f| f.ends_with("main.py")));
    }

    #[test]
    fn test_directory_classification() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("src/main.py"));
        touch(&dir.path().join("docs/guide.md"));
        touch(&dir.path().join("tests/test_main.py"));
        touch(&dir.path().join("scripts/run.sh"));

        let info = RepoAnalyzer::new(dir.path()).analyze().unwrap();
        assert!(info.src_dirs.contains(&"src".to_string()));
        assert!(info.doc_dirs.contains(&"docs".to_string()));
        assert!(info.test_dirs.contains(&"tests".to_string()));
        // Content-based: scripts/ holds a shell file, so it counts as source
        assert!(info.src_dirs.contains(&"scripts".to_string()));
    }

    #[test]
    fn test_classification_is_shallow() {
        let dir = TempDir::new().unwrap();
        // tools/ holds no source file directly; tools/inner does
        touch(&dir.path().join("tools/README.txt"));
        touch(&dir.path().join("tools/inner/util.py"));

        let info = RepoAnalyzer::new(dir.path()).analyze().unwrap();
        assert!(!info.src_dirs.contains(&"tools".to_string()));
        assert!(info.src_dirs.iter().any(|d| d.ends_with("inner")));
    }

    #[test]
    fn test_key_file_roles() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("README.md"));
        touch(&dir.path().join("LICENSE"));
        touch(&dir.path().join("CONTRIBUTING.md"));
        touch(&dir.path().join("CODE_OF_CONDUCT.md"));
        touch(&dir.path().join("CHANGELOG.md"));

        let info = RepoAnalyzer::new(dir.path()).analyze().unwrap();
        assert_eq!(info.key_files.len(), 5);
        assert_eq!(info.key_files[&KeyFileRole::Readme], "README.md");
        assert_eq!(info.key_files[&KeyFileRole::License], "LICENSE");
    }

    #[test]
    fn test_key_file_first_match_is_deterministic() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("README.md"));
        touch(&dir.path().join("docs/readme.md"));

        let analyzer = RepoAnalyzer::new(dir.path());
        let first = analyzer.analyze().unwrap();
        let second = analyzer.analyze().unwrap();
        // One path per role, stable across runs for a fixed traversal order
        assert_eq!(
            first.key_files[&KeyFileRole::Readme],
            second.key_files[&KeyFileRole::Readme]
        );
    }

    #[test]
    fn test_language_detection() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.py"));
        touch(&dir.path().join("b.rs"));
        touch(&dir.path().join("c.tsx"));
        touch(&dir.path().join("d.unknownext"));

        let info = RepoAnalyzer::new(dir.path()).analyze().unwrap();
        assert!(info.languages.contains("Python"));
        assert!(info.languages.contains("Rust"));
        assert!(info.languages.contains("React"));
        assert_eq!(info.languages.len(), 3);
    }
}
