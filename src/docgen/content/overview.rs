//! Overview Section Generator

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SectionGenerator, extract_heading_section, readme_abs_path};
use crate::docgen::fsio::read_to_string_opt;
use crate::docgen::section::SectionKind;
use crate::types::RepoInfo;

/// Generates the project overview from the README and the repository
/// structure.
pub struct OverviewGenerator {
    repo_path: PathBuf,
}

impl OverviewGenerator {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Recover README prose for the overview: prefer a Features section,
    /// otherwise the whole document with the title heading removed.
    fn recover_from_readme(&self, repo_info: &RepoInfo) -> Option<String> {
        let path = readme_abs_path(&self.repo_path, repo_info)?;
        let content = read_to_string_opt(&path)?;

        if let Some(features) = extract_heading_section(&content, &["Features"]) {
            return Some(format!("## Features\n\n{}", features));
        }

        // Drop the title heading (it duplicates the page title) and the
        // description paragraph already emitted above it.
        let mut remainder: Vec<&str> = Vec::new();
        let mut skipped_title = false;
        for line in content.lines() {
            if !skipped_title && line.starts_with("# ") {
                skipped_title = true;
                continue;
            }
            if !repo_info.description.is_empty() && line.trim() == repo_info.description {
                continue;
            }
            remainder.push(line);
        }

        let body = remainder.join("\n").trim().to_string();
        if body.is_empty() { None } else { Some(body) }
    }

    /// Structure and technology listings synthesized from the analysis.
    fn synthesize_structure(&self, repo_info: &RepoInfo, content: &mut Vec<String>) {
        content.push("\n## Repository Structure\n".to_string());
        content.push("This project contains the following key directories:\n".to_string());

        if !repo_info.src_dirs.is_empty() {
            content.push("\n### Source Code\n".to_string());
            for dir in &repo_info.src_dirs {
                content.push(format!("- `{}/`: Source code directory", dir));
            }
        }

        if !repo_info.doc_dirs.is_empty() {
            content.push("\n### Documentation\n".to_string());
            for dir in &repo_info.doc_dirs {
                content.push(format!("- `{}/`: Documentation directory", dir));
            }
        }

        if !repo_info.test_dirs.is_empty() {
            content.push("\n### Tests\n".to_string());
            for dir in &repo_info.test_dirs {
                content.push(format!("- `{}/`: Test directory", dir));
            }
        }

        if !repo_info.languages.is_empty() {
            content.push("\n## Technologies\n".to_string());
            content.push(
                "This project is implemented using the following languages and technologies:\n"
                    .to_string(),
            );
            for language in &repo_info.languages {
                content.push(format!("- {}", language));
            }
        }
    }
}

impl SectionGenerator for OverviewGenerator {
    fn kind(&self) -> SectionKind {
        SectionKind::Overview
    }

    fn generate(&self, repo_info: &RepoInfo) -> String {
        let mut content = Vec::new();
        content.push(format!("# {} Overview\n", repo_info.project_name));

        if !repo_info.description.is_empty() {
            content.push(format!("{}\n", repo_info.description));
        }

        match self.recover_from_readme(repo_info) {
            Some(recovered) => content.push(recovered),
            None => debug!("No README content recovered for overview"),
        }

        self.synthesize_structure(repo_info, &mut content);

        content.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyFileRole;
    use std::fs;
    use tempfile::TempDir;

    fn repo_with_readme(readme: &str) -> (TempDir, RepoInfo) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), readme).unwrap();
        let mut info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };
        info.key_files
            .insert(KeyFileRole::Readme, "README.md".to_string());
        (dir, info)
    }

    #[test]
    fn test_overview_prefers_features_section() {
        let (dir, info) = repo_with_readme(
            "# demo\n\nIntro text\n\n## Features\n\n- fast\n- small\n\n## License\n\nMIT\n",
        );
        let output = OverviewGenerator::new(dir.path()).generate(&info);
        assert!(output.starts_with("# demo Overview"));
        assert!(output.contains("- fast"));
        assert!(!output.contains("MIT"));
    }

    #[test]
    fn test_overview_structure_synthesis() {
        let dir = TempDir::new().unwrap();
        let mut info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };
        info.src_dirs.push("src".to_string());
        info.test_dirs.push("tests".to_string());
        info.languages.insert("Rust".to_string());

        let output = OverviewGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("## Repository Structure"));
        assert!(output.contains("`src/`"));
        assert!(output.contains("`tests/`"));
        assert!(output.contains("## Technologies"));
        assert!(output.contains("- Rust"));
    }

    #[test]
    fn test_overview_is_idempotent() {
        let (dir, info) = repo_with_readme("# demo\n\nSome intro\n\n## Features\n\n- one\n");
        let generator = OverviewGenerator::new(dir.path());
        assert_eq!(generator.generate(&info), generator.generate(&info));
    }
}
