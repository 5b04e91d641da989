//! generate-docs Command
//!
//! Runs the full documentation pipeline against a target repository and
//! reports per-section lint findings.

use std::path::PathBuf;

use tracing::warn;

use crate::ai::AiEnhancer;
use crate::cli::util::Output;
use crate::config::Config;
use crate::docgen::{DocPipeline, PipelineOptions};
use crate::lint::LintSeverity;
use crate::types::Result;

/// Explicit run options for the generate-docs command; never ambient
/// global state.
#[derive(Debug, Clone)]
pub struct GenerateDocsOptions {
    /// Target repository to document
    pub repo: PathBuf,
    /// Output directory override
    pub output: Option<PathBuf>,
    /// AI model identifier (`provider/model-name`) for enhancement
    pub use_ai: Option<String>,
    /// Generate in memory without writing the site
    pub dry_run: bool,
}

pub async fn run(options: GenerateDocsOptions, config: &Config) -> Result<()> {
    let out = Output::new();
    let output_dir = options
        .output
        .unwrap_or_else(|| config.docs.output_dir.clone());

    let mut pipeline = DocPipeline::new(
        &options.repo,
        PipelineOptions {
            output_dir: output_dir.clone(),
            dry_run: options.dry_run,
        },
    );

    // Enhancement is optional and never blocks generation: if the
    // provider cannot be constructed the run degrades to plain output.
    if let Some(model_id) = &options.use_ai {
        match AiEnhancer::new(model_id, config.llm.to_provider_config()) {
            Ok(enhancer) => {
                out.info(&format!("AI enhancement enabled via {}", model_id));
                pipeline = pipeline.with_enhancer(enhancer);
            }
            Err(e) => {
                warn!("AI enhancer unavailable: {}", e);
                out.warning(&format!(
                    "AI enhancer unavailable ({}); generating without enhancement",
                    e
                ));
            }
        }
    }

    let site = pipeline.run().await?;

    out.header(&format!("Documentation for {}", site.repo_info.project_name));
    for section in &site.sections {
        let errors = section
            .lint
            .errors
            .iter()
            .filter(|e| e.error_type.severity() == LintSeverity::Error)
            .count();
        let warnings = section.lint.errors.len() - errors;
        if section.lint.errors.is_empty() {
            out.success(&format!("{}: clean", section.kind.id()));
        } else {
            out.warning(&format!(
                "{}: {} error(s), {} warning(s)",
                section.kind.id(),
                errors,
                warnings
            ));
        }
    }

    if site.lint_error_count() > 0 {
        out.info(&format!(
            "{} total lint finding(s); run `reposcribe lint` on the output for details",
            site.lint_error_count()
        ));
    }

    if options.dry_run {
        out.info("Dry run: no files written");
    } else {
        out.success(&format!(
            "Documentation generated at {} ({} files)",
            output_dir.display(),
            site.written.len()
        ));
    }

    Ok(())
}
