//! Best Practices
//!
//! A closed set of tagged practice variants dispatched by a lookup
//! table keyed on a string alias - no runtime discovery. Three
//! implementations exist: templated governance/documentation artifacts,
//! secrets-detection configs, and the generated documentation site.
//!
//! Template placeholders (`[INSERT_PROJECT_NAME]` and friends) are
//! substituted from the analysis record; AI customization is optional
//! and non-destructive.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::ai::AiEnhancer;
use crate::docgen::fsio::write_output;
use crate::docgen::{DocPipeline, PipelineOptions};
use crate::types::{RepoInfo, Result, ScribeError};

// =============================================================================
// Apply Context
// =============================================================================

/// Explicit context threaded into every practice application.
pub struct ApplyContext<'a> {
    /// Target repository root
    pub repo_path: &'a Path,
    /// Analysis record for placeholder substitution
    pub repo_info: &'a RepoInfo,
    /// Output directory for practices that generate a site
    pub output_dir: &'a Path,
    /// Report what would be written without writing it
    pub dry_run: bool,
    /// Optional AI customization pass
    pub enhancer: Option<&'a AiEnhancer>,
}

// =============================================================================
// Practice Trait
// =============================================================================

/// A named, templated artifact applicable to a repository.
#[async_trait]
pub trait BestPractice: Send + Sync + std::fmt::Debug {
    /// Registry alias this practice is dispatched by.
    fn alias(&self) -> &str;

    /// Human-readable title.
    fn title(&self) -> &str;

    /// Apply the practice, returning the paths it wrote (or would write
    /// on a dry run).
    async fn apply(&self, ctx: &ApplyContext<'_>) -> Result<Vec<PathBuf>>;
}

// =============================================================================
// Standard Practice (templated single-file artifacts)
// =============================================================================

/// Writes one templated governance or documentation artifact into the
/// repository, with placeholders filled from the analysis record.
#[derive(Debug)]
pub struct StandardPractice {
    alias: &'static str,
    title: &'static str,
    target: &'static str,
    template: &'static str,
}

#[async_trait]
impl BestPractice for StandardPractice {
    fn alias(&self) -> &str {
        self.alias
    }

    fn title(&self) -> &str {
        self.title
    }

    async fn apply(&self, ctx: &ApplyContext<'_>) -> Result<Vec<PathBuf>> {
        let mut content = substitute_placeholders(self.template, ctx.repo_info);

        if let Some(enhancer) = ctx.enhancer {
            let instruction = format!(
                "Customize this {} template for the project described below. Keep the document structure, replace remaining placeholders, output markdown only.",
                self.title
            );
            content = enhancer.enhance_with_instruction(&instruction, &content).await;
        }

        let path = ctx.repo_path.join(self.target);
        if ctx.dry_run {
            info!("Dry run: would write {}", path.display());
        } else {
            write_output(&path, &content)?;
            info!("Applied best practice '{}' to {}", self.alias, path.display());
        }
        Ok(vec![path])
    }
}

// =============================================================================
// Secrets Detection Practice
// =============================================================================

/// Sets up detect-secrets scanning, either as a GitHub workflow or as a
/// pre-commit hook configuration.
#[derive(Debug)]
pub struct SecretsDetectionPractice {
    alias: &'static str,
    title: &'static str,
    target: &'static str,
    template: &'static str,
}

#[async_trait]
impl BestPractice for SecretsDetectionPractice {
    fn alias(&self) -> &str {
        self.alias
    }

    fn title(&self) -> &str {
        self.title
    }

    async fn apply(&self, ctx: &ApplyContext<'_>) -> Result<Vec<PathBuf>> {
        let path = ctx.repo_path.join(self.target);
        if ctx.dry_run {
            info!("Dry run: would write {}", path.display());
        } else {
            write_output(&path, self.template)?;
            info!("Applied best practice '{}' to {}", self.alias, path.display());
        }
        Ok(vec![path])
    }
}

// =============================================================================
// Docs Website Practice
// =============================================================================

/// Generates the full documentation site through the docgen pipeline.
#[derive(Debug)]
pub struct DocsWebsitePractice;

#[async_trait]
impl BestPractice for DocsWebsitePractice {
    fn alias(&self) -> &str {
        "docs-website"
    }

    fn title(&self) -> &str {
        "Documentation Website"
    }

    async fn apply(&self, ctx: &ApplyContext<'_>) -> Result<Vec<PathBuf>> {
        if ctx.enhancer.is_some() {
            // The pipeline owns its enhancer; direct callers should use
            // the generate-docs command for AI-enhanced sites.
            warn!("docs-website ignores the apply-level enhancer; pass --use-ai to generate-docs");
        }

        let pipeline = DocPipeline::new(
            ctx.repo_path,
            PipelineOptions {
                output_dir: ctx.output_dir.to_path_buf(),
                dry_run: ctx.dry_run,
            },
        );
        let site = pipeline.run().await?;
        Ok(site.written)
    }
}

// =============================================================================
// Alias Dispatch
// =============================================================================

/// Resolve a registry alias to its practice implementation.
pub fn practice_for_alias(alias: &str) -> Result<Box<dyn BestPractice>> {
    let practice: Box<dyn BestPractice> = match alias {
        "governance-small" | "governance-medium" | "governance-large" => {
            Box::new(StandardPractice {
                alias: "governance",
                title: "Governance Model",
                target: "GOVERNANCE.md",
                template: GOVERNANCE_TEMPLATE,
            })
        }
        "readme" => Box::new(StandardPractice {
            alias: "readme",
            title: "README",
            target: "README.md",
            template: README_TEMPLATE,
        }),
        "contributing" => Box::new(StandardPractice {
            alias: "contributing",
            title: "Contributing Guide",
            target: "CONTRIBUTING.md",
            template: CONTRIBUTING_TEMPLATE,
        }),
        "code-of-conduct" => Box::new(StandardPractice {
            alias: "code-of-conduct",
            title: "Code of Conduct",
            target: "CODE_OF_CONDUCT.md",
            template: CODE_OF_CONDUCT_TEMPLATE,
        }),
        "changelog" => Box::new(StandardPractice {
            alias: "changelog",
            title: "Changelog",
            target: "CHANGELOG.md",
            template: CHANGELOG_TEMPLATE,
        }),
        "testing-plan" => Box::new(StandardPractice {
            alias: "testing-plan",
            title: "Testing Plan",
            target: "TESTING.md",
            template: TESTING_TEMPLATE,
        }),
        "secrets-github" => Box::new(SecretsDetectionPractice {
            alias: "secrets-github",
            title: "Secrets Detection (GitHub Action)",
            target: ".github/workflows/secrets-detection.yml",
            template: SECRETS_WORKFLOW_TEMPLATE,
        }),
        "secrets-precommit" => Box::new(SecretsDetectionPractice {
            alias: "secrets-precommit",
            title: "Secrets Detection (pre-commit)",
            target: ".pre-commit-config.yaml",
            template: SECRETS_PRECOMMIT_TEMPLATE,
        }),
        "docs-website" => Box::new(DocsWebsitePractice),
        _ => return Err(ScribeError::UnknownPractice(alias.to_string())),
    };
    Ok(practice)
}

/// Aliases accepted by [`practice_for_alias`], for help output.
pub fn known_aliases() -> &'static [&'static str] {
    &[
        "governance-small",
        "governance-medium",
        "governance-large",
        "readme",
        "contributing",
        "code-of-conduct",
        "changelog",
        "testing-plan",
        "secrets-github",
        "secrets-precommit",
        "docs-website",
    ]
}

/// Fill template placeholders from the analysis record. Unknown values
/// keep their placeholder so a human pass can finish them.
fn substitute_placeholders(template: &str, repo_info: &RepoInfo) -> String {
    let mut content = template.to_string();
    let substitutions: [(&str, &str); 4] = [
        ("[INSERT_PROJECT_NAME]", repo_info.project_name.as_str()),
        ("[INSERT_PROJECT_DESCRIPTION]", repo_info.description.as_str()),
        ("[INSERT_REPO_URL]", repo_info.repo_url.as_str()),
        ("[INSERT_ORG_NAME]", repo_info.org_name.as_str()),
    ];
    for (placeholder, value) in substitutions {
        if !value.is_empty() {
            content = content.replace(placeholder, value);
        }
    }
    content
}

// =============================================================================
// Built-in Templates
// =============================================================================

const GOVERNANCE_TEMPLATE: &str = "# [INSERT_PROJECT_NAME] Governance\n\n\
This document describes the governance model for [INSERT_PROJECT_NAME].\n\n\
## Roles\n\n\
- **Users**: anyone using the project\n\
- **Contributors**: anyone submitting changes\n\
- **Committers**: contributors with merge rights\n\
- **Project Lead**: responsible for roadmap and releases\n\n\
## Decision Making\n\n\
Decisions are made by lazy consensus among committers. Disputes escalate\n\
to the Project Lead.\n";

const README_TEMPLATE: &str = "# [INSERT_PROJECT_NAME]\n\n\
[INSERT_PROJECT_DESCRIPTION]\n\n\
## Installation\n\n\
See the documentation for installation instructions.\n\n\
## Contributing\n\n\
Contributions are welcome - see [CONTRIBUTING.md](CONTRIBUTING.md).\n\n\
## License\n\n\
See [LICENSE](LICENSE).\n";

const CONTRIBUTING_TEMPLATE: &str = "# Contributing to [INSERT_PROJECT_NAME]\n\n\
Thank you for considering contributing!\n\n\
## Getting Started\n\n\
1. Fork the repository at [INSERT_REPO_URL]\n\
2. Clone your fork locally\n\
3. Create a new branch for your work\n\
4. Make and test your changes\n\
5. Submit a pull request\n";

const CODE_OF_CONDUCT_TEMPLATE: &str = "# Code of Conduct\n\n\
[INSERT_PROJECT_NAME] follows the Contributor Covenant.\n\n\
We are committed to providing a welcoming and harassment-free experience\n\
for everyone. Report unacceptable behavior to the maintainers at\n\
[INSERT_REPO_URL]/issues.\n";

const CHANGELOG_TEMPLATE: &str = "# Changelog\n\n\
All notable changes to [INSERT_PROJECT_NAME] will be documented in this\n\
file. The format is based on [Keep a Changelog](https://keepachangelog.com/).\n\n\
## [Unreleased]\n";

const TESTING_TEMPLATE: &str = "# [INSERT_PROJECT_NAME] Testing Plan\n\n\
This document describes the testing approach for [INSERT_PROJECT_NAME].\n\n\
## Test Levels\n\n\
- Unit tests, run on every change\n\
- Integration tests, run before release\n";

const SECRETS_WORKFLOW_TEMPLATE: &str = "name: Secrets Detection\n\n\
on: [push, pull_request]\n\n\
jobs:\n\
  detect-secrets:\n\
    runs-on: ubuntu-latest\n\
    steps:\n\
      - uses: actions/checkout@v4\n\
      - uses: actions/setup-python@v5\n\
        with:\n\
          python-version: '3.11'\n\
      - name: Install detect-secrets\n\
        run: pip install detect-secrets\n\
      - name: Scan for secrets\n\
        run: detect-secrets scan --baseline .secrets.baseline\n";

const SECRETS_PRECOMMIT_TEMPLATE: &str = "repos:\n\
  - repo: https://github.com/Yelp/detect-secrets\n\
    rev: v1.5.0\n\
    hooks:\n\
      - id: detect-secrets\n\
        args: ['--baseline', '.secrets.baseline']\n";

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn demo_info() -> RepoInfo {
        RepoInfo {
            project_name: "demo".to_string(),
            description: "A demo project".to_string(),
            repo_url: "https://github.com/org/demo".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_alias_dispatch_closed_set() {
        assert!(practice_for_alias("governance-small").is_ok());
        assert!(practice_for_alias("secrets-precommit").is_ok());
        assert!(practice_for_alias("docs-website").is_ok());

        let err = practice_for_alias("not-a-practice").unwrap_err();
        assert!(matches!(err, ScribeError::UnknownPractice(_)));
    }

    #[test]
    fn test_every_known_alias_resolves() {
        for alias in known_aliases() {
            assert!(practice_for_alias(alias).is_ok(), "alias {} failed", alias);
        }
    }

    #[test]
    fn test_placeholder_substitution() {
        let rendered = substitute_placeholders(GOVERNANCE_TEMPLATE, &demo_info());
        assert!(rendered.contains("# demo Governance"));
        assert!(!rendered.contains("[INSERT_PROJECT_NAME]"));
    }

    #[test]
    fn test_unresolved_placeholders_are_kept() {
        let info = RepoInfo::default();
        let rendered = substitute_placeholders(CONTRIBUTING_TEMPLATE, &info);
        assert!(rendered.contains("[INSERT_REPO_URL]"));
    }

    #[tokio::test]
    async fn test_standard_practice_writes_target() {
        let repo = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let info = demo_info();

        let practice = practice_for_alias("governance-medium").unwrap();
        let written = practice
            .apply(&ApplyContext {
                repo_path: repo.path(),
                repo_info: &info,
                output_dir: out.path(),
                dry_run: false,
                enhancer: None,
            })
            .await
            .unwrap();

        assert_eq!(written.len(), 1);
        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert!(content.contains("demo"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let repo = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let info = demo_info();

        let practice = practice_for_alias("secrets-github").unwrap();
        let written = practice
            .apply(&ApplyContext {
                repo_path: repo.path(),
                repo_info: &info,
                output_dir: out.path(),
                dry_run: true,
                enhancer: None,
            })
            .await
            .unwrap();

        assert_eq!(written.len(), 1);
        assert!(!written[0].exists());
    }
}
