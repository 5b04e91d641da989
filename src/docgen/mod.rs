//! Documentation Generation Pipeline
//!
//! Orchestrates the multi-stage content assembly:
//!
//! 1. Analyze the target repository once (the only fatal error lives
//!    here: a non-existent repository path)
//! 2. Run the five section generators in fixed order
//! 3. Optionally revise each section through the AI enhancer
//! 4. Lint every final section against the MDX syntax subset
//! 5. Write the assembled site to disk
//!
//! Each stage fully completes before the next begins. `RepoInfo` is
//! constructed once and read-only afterwards; the site write is the
//! pipeline's only filesystem write and happens last.

pub mod content;
pub mod fsio;
pub mod section;
pub mod site;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::ai::AiEnhancer;
use crate::analyzer::RepoAnalyzer;
use crate::lint::{LintOutcome, MarkdownLinter};
use crate::types::{RepoInfo, Result};
use content::{
    ApiGenerator, ContributingGenerator, DevelopmentGenerator, InstallationGenerator,
    OverviewGenerator, SectionGenerator,
};
use section::SectionKind;
use site::SiteWriter;

// =============================================================================
// Pipeline Options & Results
// =============================================================================

/// Explicit run configuration threaded through the pipeline - never
/// ambient global state.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory the assembled site is written into
    pub output_dir: PathBuf,
    /// Skip the final write, keeping everything in memory
    pub dry_run: bool,
}

/// One generated section with its lint outcome.
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub kind: SectionKind,
    pub content: String,
    pub lint: LintOutcome,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct GeneratedSite {
    pub repo_info: RepoInfo,
    /// All five sections, in fixed order, each non-empty
    pub sections: Vec<SectionReport>,
    /// Paths written to disk (empty on dry runs)
    pub written: Vec<PathBuf>,
}

impl GeneratedSite {
    /// Total number of lint diagnostics across sections.
    pub fn lint_error_count(&self) -> usize {
        self.sections.iter().map(|s| s.lint.errors.len()).sum()
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// The documentation-generation pipeline for one target repository.
pub struct DocPipeline {
    repo_path: PathBuf,
    options: PipelineOptions,
    enhancer: Option<AiEnhancer>,
}

impl DocPipeline {
    pub fn new<P: AsRef<Path>>(repo_path: P, options: PipelineOptions) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            options,
            enhancer: None,
        }
    }

    /// Attach an AI enhancer; sections are revised one at a time, and a
    /// failed revision keeps the generated content.
    pub fn with_enhancer(mut self, enhancer: AiEnhancer) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Run the full pipeline. A successful run always produces all five
    /// sections, even if several fell back to placeholder text.
    pub async fn run(&self) -> Result<GeneratedSite> {
        let repo_info = RepoAnalyzer::new(&self.repo_path).analyze()?;

        let generators: Vec<Box<dyn SectionGenerator>> = vec![
            Box::new(OverviewGenerator::new(&self.repo_path)),
            Box::new(InstallationGenerator::new(&self.repo_path)),
            Box::new(ApiGenerator::new(&self.repo_path)),
            Box::new(DevelopmentGenerator::new(&self.repo_path)),
            Box::new(ContributingGenerator::new(&self.repo_path)),
        ];

        let mut sections = Vec::with_capacity(generators.len());
        for generator in &generators {
            let kind = generator.kind();
            let mut content = generator.generate(&repo_info);

            if let Some(enhancer) = &self.enhancer {
                content = enhancer.enhance(&content, kind).await;
            }

            sections.push(SectionReport {
                kind,
                content,
                lint: LintOutcome::checked(Vec::new()),
            });
        }

        // Lint pass over the final content of every section.
        let linter = MarkdownLinter::new();
        for report in &mut sections {
            let errors = linter.lint_content(&report.content, report.kind.id());
            if !errors.is_empty() {
                warn!(
                    "{} lint finding(s) in {} section",
                    errors.len(),
                    report.kind.id()
                );
            }
            report.lint = LintOutcome::checked(errors);
        }

        // The write is the last step; nothing partial ever reaches disk.
        let written = if self.options.dry_run {
            info!("Dry run: skipping site write");
            Vec::new()
        } else {
            let pairs: Vec<(SectionKind, String)> = sections
                .iter()
                .map(|s| (s.kind, s.content.clone()))
                .collect();
            SiteWriter::new(&self.options.output_dir).write_site(&repo_info, &pairs)?
        };

        Ok(GeneratedSite {
            repo_info,
            sections,
            written,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
