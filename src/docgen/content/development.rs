//! Development Section Generator

use std::path::{Path, PathBuf};

use super::{SectionGenerator, find_doc_file};
use crate::constants::docgen::DEV_DOC_NAMES;
use crate::docgen::section::SectionKind;
use crate::types::RepoInfo;

/// Top-level directory names whose subdirectories are worth listing in
/// the project-structure tree.
const TREE_ROOTS: &[&str] = &["src", "docs", "tests", "examples"];

/// Generates the developer guide: structure tree, environment setup,
/// testing, and coding standards.
pub struct DevelopmentGenerator {
    repo_path: PathBuf,
}

impl DevelopmentGenerator {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    fn add_project_structure(&self, content: &mut Vec<String>, repo_info: &RepoInfo) {
        content.push("\n## Project Structure\n".to_string());
        content.push(
            "Below is an overview of the key directories and files in this project:\n".to_string(),
        );
        content.push("```".to_string());

        let mut directories: Vec<&String> = repo_info
            .directories
            .iter()
            .filter(|d| {
                !d.contains('/')
                    || d.split('/')
                        .next()
                        .is_some_and(|root| TREE_ROOTS.contains(&root))
            })
            .collect();
        directories.sort();
        for dir in directories {
            content.push(format!("{}/", dir));
        }

        let mut key_files: Vec<&String> = repo_info
            .files
            .iter()
            .filter(|f| {
                !f.contains('/')
                    && (f.starts_with('.') || f.starts_with("README") || f.starts_with("LICENSE"))
            })
            .collect();
        key_files.sort();
        for file in key_files {
            content.push(file.to_string());
        }

        content.push("```\n".to_string());

        if !repo_info.src_dirs.is_empty() {
            content.push("### Source Code\n".to_string());
            for dir in &repo_info.src_dirs {
                content.push(format!("- `{}/`: Contains the main source code", dir));
            }
        }

        if !repo_info.test_dirs.is_empty() {
            content.push("\n### Tests\n".to_string());
            for dir in &repo_info.test_dirs {
                content.push(format!("- `{}/`: Contains tests for the project", dir));
            }
        }
    }

    fn add_development_workflow(&self, content: &mut Vec<String>, repo_info: &RepoInfo) {
        content.push("\n## Development Workflow\n".to_string());
        content.push("### Setup Development Environment\n".to_string());
        content.push("To set up your development environment, follow these steps:\n".to_string());
        content.push("```bash".to_string());
        content.push("# Clone the repository".to_string());
        content.push(format!("git clone {}", repo_info.repo_url_or_placeholder()));
        content.push(format!("cd {}", repo_info.project_name));
        content.push(String::new());

        if repo_info.has_file("package.json") {
            content.push("# Install dependencies".to_string());
            content.push("npm install".to_string());
        } else if repo_info.has_file("requirements.txt") {
            content.push("# Create a virtual environment".to_string());
            content.push("python -m venv venv".to_string());
            content.push("source venv/bin/activate  # On Windows: venv\\Scripts\\activate".to_string());
            content.push(String::new());
            content.push("# Install dependencies".to_string());
            content.push("pip install -r requirements.txt".to_string());
        } else if repo_info.has_file("setup.py") {
            content.push("# Create a virtual environment".to_string());
            content.push("python -m venv venv".to_string());
            content.push("source venv/bin/activate  # On Windows: venv\\Scripts\\activate".to_string());
            content.push(String::new());
            content.push("# Install in development mode".to_string());
            content.push("pip install -e .".to_string());
        }

        content.push("```\n".to_string());
    }

    fn add_testing_info(&self, content: &mut Vec<String>, repo_info: &RepoInfo) {
        content.push("\n## Testing\n".to_string());

        if repo_info.test_dirs.is_empty() {
            content.push("*No testing information available.*".to_string());
            return;
        }

        content.push(
            "This project includes tests to ensure code quality and functionality.\n".to_string(),
        );

        if repo_info.has_file("package.json") {
            content.push("```bash\n# Run tests\nnpm test\n```\n".to_string());
        } else if repo_info.files.iter().any(|f| f.starts_with("pytest")) {
            content.push("```bash\n# Run tests with pytest\npytest\n```\n".to_string());
        } else {
            content.push("```bash\n# Run Python tests\npython -m unittest discover\n```\n".to_string());
        }
    }

    fn add_coding_standards(&self, content: &mut Vec<String>, repo_info: &RepoInfo) {
        content.push("\n## Coding Standards\n".to_string());

        let has_eslint = repo_info.has_file(".eslintrc.js")
            || repo_info.has_file(".eslintrc")
            || repo_info.has_file(".eslintrc.json");
        let has_prettier = repo_info.has_file(".prettierrc")
            || repo_info.has_file(".prettierrc.js")
            || repo_info.has_file(".prettierrc.json");
        let has_flake8 = repo_info.has_file(".flake8") || repo_info.has_file("setup.cfg");
        let has_black = repo_info.has_file("pyproject.toml");

        if !(has_eslint || has_prettier || has_flake8 || has_black) {
            content.push(
                "Refer to the repository's contribution guidelines for information on coding standards and style."
                    .to_string(),
            );
            return;
        }

        content.push(
            "This project maintains consistent coding standards using the following tools:\n"
                .to_string(),
        );

        if has_eslint {
            content.push("### ESLint\n".to_string());
            content.push(
                "This project uses ESLint to enforce consistent code style in JavaScript files.\n"
                    .to_string(),
            );
        }
        if has_prettier {
            content.push("### Prettier\n".to_string());
            content.push("Prettier is used to format code consistently.\n".to_string());
        }
        if has_flake8 {
            content.push("### Flake8\n".to_string());
            content.push("Flake8 is used to check Python code style.\n".to_string());
        }
        if has_black {
            content.push("### Black\n".to_string());
            content.push("Black is used to format Python code consistently.\n".to_string());
        }
    }
}

impl SectionGenerator for DevelopmentGenerator {
    fn kind(&self) -> SectionKind {
        SectionKind::Development
    }

    fn generate(&self, repo_info: &RepoInfo) -> String {
        let mut content = Vec::new();
        content.push("# Development\n".to_string());
        content.push(
            "This page provides information for developers working on this project.\n".to_string(),
        );

        // Tier 1: dedicated development guide in a docs directory.
        if let Some(dev_docs) = find_doc_file(&self.repo_path, repo_info, DEV_DOC_NAMES) {
            content.push(dev_docs);
            return content.join("\n");
        }

        // Tier 2: synthesize from repository structure.
        self.add_project_structure(&mut content, repo_info);
        self.add_development_workflow(&mut content, repo_info);
        self.add_testing_info(&mut content, repo_info);
        self.add_coding_standards(&mut content, repo_info);

        content.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tier1_dev_guide_recovered() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("development.md"), "## Local Setup\n\nUse make\n").unwrap();

        let info = RepoInfo {
            project_name: "demo".to_string(),
            doc_dirs: vec!["docs".to_string()],
            ..Default::default()
        };

        let output = DevelopmentGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("Use make"));
        assert!(!output.contains("## Project Structure"));
    }

    #[test]
    fn test_tier2_structure_and_workflow() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            repo_url: "https://github.com/org/demo".to_string(),
            files: vec!["package.json".to_string(), "README.md".to_string()],
            directories: vec!["src".to_string(), "src/utils".to_string(), "misc/deep".to_string()],
            src_dirs: vec!["src".to_string()],
            test_dirs: vec![],
            ..Default::default()
        };

        let output = DevelopmentGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("## Project Structure"));
        assert!(output.contains("src/utils/"));
        // Nested directories outside conventional roots stay out of the tree
        assert!(!output.contains("misc/deep/"));
        assert!(output.contains("npm install"));
        assert!(output.contains("*No testing information available.*"));
    }

    #[test]
    fn test_coding_standards_detection() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            files: vec![".eslintrc.json".to_string(), "pyproject.toml".to_string()],
            ..Default::default()
        };

        let output = DevelopmentGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("### ESLint"));
        assert!(output.contains("### Black"));
        assert!(!output.contains("### Flake8"));
    }
}
