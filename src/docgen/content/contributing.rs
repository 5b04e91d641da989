//! Contributing Section Generator

use std::path::{Path, PathBuf};

use super::{SectionGenerator, recover_readme_section};
use crate::docgen::fsio::read_to_string_opt;
use crate::docgen::section::SectionKind;
use crate::types::{KeyFileRole, RepoInfo};

/// README headings accepted as contributing documentation.
const README_HEADINGS: &[&str] = &["Contributing", "Contribution", "How to Contribute"];

/// Generates contribution guidelines, reusing an existing
/// CONTRIBUTING.md or README section when present.
pub struct ContributingGenerator {
    repo_path: PathBuf,
}

impl ContributingGenerator {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Recover the repository's own CONTRIBUTING.md, normalizing the
    /// title heading to avoid duplication.
    fn recover_contributing_file(&self, repo_info: &RepoInfo) -> Option<String> {
        let rel = repo_info.key_files.get(&KeyFileRole::Contributing)?;
        let content = read_to_string_opt(&self.repo_path.join(rel))?;

        let body = content
            .strip_prefix("# Contributing\n")
            .unwrap_or(&content)
            .trim_start();
        Some(format!("# Contributing\n\n{}", body))
    }

    fn default_guidelines(&self, repo_info: &RepoInfo, content: &mut Vec<String>) {
        content.push(
            "\nThank you for considering contributing to this project! Here's how you can help:\n"
                .to_string(),
        );

        content.push("## Getting Started\n".to_string());
        content.push("1. Fork the repository".to_string());
        content.push("2. Clone your fork locally".to_string());
        content.push("3. Create a new branch for your work".to_string());
        content.push("4. Make your changes".to_string());
        content.push("5. Test your changes".to_string());
        content.push("6. Submit a pull request\n".to_string());

        content.push("## Contact\n".to_string());
        content.push(format!(
            "If you have any questions, please open an issue on the [repository]({}/issues).\n",
            repo_info.repo_url_or_placeholder()
        ));
    }
}

impl SectionGenerator for ContributingGenerator {
    fn kind(&self) -> SectionKind {
        SectionKind::Contributing
    }

    fn generate(&self, repo_info: &RepoInfo) -> String {
        // Tier 1a: a dedicated CONTRIBUTING.md wins outright.
        if let Some(recovered) = self.recover_contributing_file(repo_info) {
            return recovered;
        }

        let mut content = Vec::new();
        content.push("# Contributing\n".to_string());
        content.push("This page provides guidelines for contributing to this project.\n".to_string());

        // Tier 1b: a Contributing section inside the README.
        if let Some(section) = recover_readme_section(&self.repo_path, repo_info, README_HEADINGS) {
            content.push(section);
            return content.join("\n");
        }

        // Tier 2: fixed fork/clone/branch/PR workflow template.
        self.default_guidelines(repo_info, &mut content);
        content.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tier1_contributing_file_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("CONTRIBUTING.md"),
            "# Contributing\n\nSign the CLA first.\n",
        )
        .unwrap();

        let mut info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };
        info.key_files
            .insert(KeyFileRole::Contributing, "CONTRIBUTING.md".to_string());

        let output = ContributingGenerator::new(dir.path()).generate(&info);
        assert!(output.starts_with("# Contributing\n"));
        assert!(output.contains("Sign the CLA first."));
        // Heading is not duplicated
        assert_eq!(output.matches("# Contributing").count(), 1);
    }

    #[test]
    fn test_tier1b_readme_section() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("README.md"),
            "# demo\n\n## Contributing\n\nSend patches by mail.\n",
        )
        .unwrap();

        let mut info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };
        info.key_files
            .insert(KeyFileRole::Readme, "README.md".to_string());

        let output = ContributingGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("Send patches by mail."));
        assert!(!output.contains("Fork the repository"));
    }

    #[test]
    fn test_tier2_default_template() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            repo_url: "https://github.com/org/demo".to_string(),
            ..Default::default()
        };

        let output = ContributingGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("1. Fork the repository"));
        assert!(output.contains("https://github.com/org/demo/issues"));
    }

    #[test]
    fn test_recovery_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("CONTRIBUTING.md"),
            "# Contributing\n\nStable content.\n",
        )
        .unwrap();

        let mut info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };
        info.key_files
            .insert(KeyFileRole::Contributing, "CONTRIBUTING.md".to_string());

        let generator = ContributingGenerator::new(dir.path());
        assert_eq!(generator.generate(&info), generator.generate(&info));
    }
}
