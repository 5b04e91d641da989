//! Installation Section Generator

use std::path::{Path, PathBuf};

use super::{SectionGenerator, recover_readme_section};
use crate::docgen::section::SectionKind;
use crate::types::RepoInfo;

/// README headings accepted as installation documentation, in preference
/// order.
const README_HEADINGS: &[&str] = &["Installation", "Getting Started", "Setup", "Usage"];

/// Suffixes of files treated as configuration templates.
const CONFIG_TEMPLATE_SUFFIXES: &[&str] = &[
    ".env.example",
    ".env.sample",
    "config.example.json",
    "config.example.yaml",
    "config.example.yml",
];

/// Generates installation instructions, inferring the package-manager
/// type from manifest files when no human-authored section exists.
pub struct InstallationGenerator {
    repo_path: PathBuf,
}

impl InstallationGenerator {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    fn synthesize_by_type(
        &self,
        content: &mut Vec<String>,
        repo_info: &RepoInfo,
        has_npm: bool,
        has_pip: bool,
        has_docker: bool,
    ) {
        let project_name = &repo_info.project_name;
        let repo_url = repo_info.repo_url_or_placeholder();

        if has_npm {
            content.push("\n## Installation with npm\n".to_string());
            content.push(format!(
                "```bash\n# Clone the repository\ngit clone {}\ncd {}\n\n# Install dependencies\nnpm install\n```\n",
                repo_url, project_name
            ));
        }

        if has_pip {
            content.push("\n## Installation with pip\n".to_string());

            if repo_info.has_file("requirements.txt") {
                content.push(format!(
                    "```bash\n# Clone the repository\ngit clone {}\ncd {}\n\n# Create and activate a virtual environment\npython -m venv venv\nsource venv/bin/activate  # On Windows: venv\\Scripts\\activate\n\n# Install dependencies\npip install -r requirements.txt\n```\n",
                    repo_url, project_name
                ));
            }

            if repo_info.has_file("setup.py") {
                content
                    .push("```bash\n# Install in development mode\npip install -e .\n```\n".to_string());
            }
        }

        if has_docker {
            content.push("\n## Installation with Docker\n".to_string());
            let mut block = format!(
                "```bash\n# Clone the repository\ngit clone {}\ncd {}\n\n",
                repo_url, project_name
            );
            if repo_info.has_file("docker-compose.yml") {
                block.push_str("# Build and run with Docker Compose\ndocker-compose up -d\n```\n");
            } else {
                block.push_str(&format!(
                    "# Build and run with Docker\ndocker build -t {} .\ndocker run -p 8000:8000 {}\n```\n",
                    project_name.to_lowercase(),
                    project_name.to_lowercase()
                ));
            }
            content.push(block);
        }

        if !has_npm && !has_pip && !has_docker {
            // Fallback tier: no recognized package manager, emit an
            // explicit manual notice with actionable next steps.
            content.push("\n## Manual Installation\n".to_string());
            content.push(format!(
                "```bash\n# Clone the repository\ngit clone {}\ncd {}\n```\n",
                repo_url, project_name
            ));
            content.push(
                "\n*No package manager configuration was detected for this project.*\n"
                    .to_string(),
            );
            content.push("\nRefer to the README for specific installation instructions.\n".to_string());
        }
    }

    fn add_prerequisites(
        &self,
        content: &mut Vec<String>,
        repo_info: &RepoInfo,
        has_npm: bool,
        has_pip: bool,
        has_docker: bool,
    ) {
        let mut prerequisites: Vec<String> = Vec::new();

        if has_npm {
            prerequisites.push("- [Node.js](https://nodejs.org/) (>=12.x)".to_string());
            prerequisites
                .push("- [npm](https://www.npmjs.com/) or [yarn](https://yarnpkg.com/)".to_string());
        }

        if has_pip {
            prerequisites.push("- [Python](https://www.python.org/) (>=3.7)".to_string());
            prerequisites.push("- [pip](https://pip.pypa.io/en/stable/)".to_string());
        }

        if has_docker {
            prerequisites.push("- [Docker](https://www.docker.com/)".to_string());
            if repo_info.has_file("docker-compose.yml") {
                prerequisites.push(
                    "- [Docker Compose](https://docs.docker.com/compose/) (for docker-compose.yml)"
                        .to_string(),
                );
            }
        }

        if !prerequisites.is_empty() {
            content.push("\n## Prerequisites\n".to_string());
            content.extend(prerequisites);
            content.push("\n".to_string());
        }
    }

    fn add_configuration(&self, content: &mut Vec<String>, repo_info: &RepoInfo) {
        content.push("\n## Configuration\n".to_string());

        let config_files: Vec<&String> = repo_info
            .files
            .iter()
            .filter(|f| CONFIG_TEMPLATE_SUFFIXES.iter().any(|s| f.ends_with(s)))
            .collect();

        if config_files.is_empty() {
            content.push(
                "After installation, you may need to configure the application. Refer to the project documentation for specific configuration options."
                    .to_string(),
            );
            return;
        }

        content.push(
            "After installation, you may need to configure the application. Check for the following configuration files:\n"
                .to_string(),
        );
        for file in config_files {
            let base_name = Path::new(file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.to_string());
            let target_name = base_name.replace(".example", "").replace(".sample", "");
            content.push(format!(
                "- Copy `{}` to `{}` and update the values as needed.",
                base_name, target_name
            ));
        }
    }
}

impl SectionGenerator for InstallationGenerator {
    fn kind(&self) -> SectionKind {
        SectionKind::Installation
    }

    fn generate(&self, repo_info: &RepoInfo) -> String {
        let mut content = Vec::new();
        content.push("# Installation\n".to_string());
        content.push(
            "This page provides instructions for installing and setting up the project.\n"
                .to_string(),
        );

        // Tier 1: recover a human-authored section from the README.
        if let Some(section) = recover_readme_section(&self.repo_path, repo_info, README_HEADINGS) {
            content.push(section);
            return content.join("\n");
        }

        // Tier 2: synthesize from manifest presence.
        let has_npm = repo_info.has_file("package.json");
        let has_pip = repo_info.has_file("setup.py") || repo_info.has_file("requirements.txt");
        let has_docker =
            repo_info.has_file("Dockerfile") || repo_info.has_file("docker-compose.yml");

        self.synthesize_by_type(&mut content, repo_info, has_npm, has_pip, has_docker);
        self.add_prerequisites(&mut content, repo_info, has_npm, has_pip, has_docker);
        self.add_configuration(&mut content, repo_info);

        content.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyFileRole;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tier1_recovers_readme_section_exactly() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("README.md"),
            "# X\n\n## Installation\n\nRun npm install\n\n## Usage\n\nSee docs\n",
        )
        .unwrap();
        let mut info = RepoInfo {
            project_name: "x".to_string(),
            ..Default::default()
        };
        info.key_files
            .insert(KeyFileRole::Readme, "README.md".to_string());

        let recovered =
            recover_readme_section(dir.path(), &info, README_HEADINGS).unwrap();
        assert_eq!(recovered, "Run npm install");

        let output = InstallationGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("Run npm install"));
        assert!(!output.contains("## Usage"));
    }

    #[test]
    fn test_tier2_npm_synthesis() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            repo_url: "https://github.com/org/demo".to_string(),
            files: vec!["package.json".to_string()],
            ..Default::default()
        };

        let output = InstallationGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("## Installation with npm"));
        assert!(output.contains("npm install"));
        assert!(output.contains("git clone https://github.com/org/demo"));
        assert!(output.contains("[Node.js](https://nodejs.org/)"));
    }

    #[test]
    fn test_tier2_pip_with_requirements() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            files: vec!["requirements.txt".to_string()],
            ..Default::default()
        };

        let output = InstallationGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("## Installation with pip"));
        assert!(output.contains("pip install -r requirements.txt"));
    }

    #[test]
    fn test_tier3_manual_fallback_never_empty() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };

        let output = InstallationGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("## Manual Installation"));
        assert!(output.contains("No package manager configuration was detected"));
        assert!(!output.trim().is_empty());
    }

    #[test]
    fn test_configuration_template_listing() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            files: vec![".env.example".to_string(), "package.json".to_string()],
            ..Default::default()
        };

        let output = InstallationGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("Copy `.env.example` to `.env`"));
    }
}
