//! apply Command
//!
//! Applies a best practice to a repository, dispatched by registry
//! alias.

use std::path::PathBuf;

use tracing::warn;

use crate::ai::AiEnhancer;
use crate::analyzer::RepoAnalyzer;
use crate::cli::util::Output;
use crate::config::Config;
use crate::practices::{ApplyContext, known_aliases, practice_for_alias};
use crate::types::Result;

/// Explicit run options for the apply command.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Best practice alias to apply
    pub practice: String,
    /// Target repository
    pub repo: PathBuf,
    /// Output directory for site-generating practices
    pub output: Option<PathBuf>,
    /// AI model identifier for template customization
    pub use_ai: Option<String>,
    /// Report what would be written without writing it
    pub dry_run: bool,
}

pub async fn run(options: ApplyOptions, config: &Config) -> Result<()> {
    let out = Output::new();
    let practice = practice_for_alias(&options.practice)?;

    let repo_info = RepoAnalyzer::new(&options.repo).analyze()?;

    let enhancer = options.use_ai.as_ref().and_then(|model_id| {
        match AiEnhancer::new(model_id, config.llm.to_provider_config()) {
            Ok(enhancer) => Some(enhancer),
            Err(e) => {
                warn!("AI enhancer unavailable: {}", e);
                out.warning(&format!(
                    "AI enhancer unavailable ({}); applying template as-is",
                    e
                ));
                None
            }
        }
    });

    let output_dir = options
        .output
        .unwrap_or_else(|| config.docs.output_dir.clone());

    let written = practice
        .apply(&ApplyContext {
            repo_path: &options.repo,
            repo_info: &repo_info,
            output_dir: &output_dir,
            dry_run: options.dry_run,
            enhancer: enhancer.as_ref(),
        })
        .await?;

    if options.dry_run {
        out.info(&format!(
            "Dry run: '{}' would write {} file(s)",
            practice.title(),
            written.len()
        ));
        for path in &written {
            out.info(&format!("  {}", path.display()));
        }
    } else {
        out.success(&format!(
            "Applied '{}' ({} file(s) written)",
            practice.title(),
            written.len()
        ));
    }

    Ok(())
}

/// Print the closed set of known practice aliases.
pub fn list() {
    let out = Output::new();
    out.header("Available best practices");
    for alias in known_aliases() {
        println!("  {}", alias);
    }
}
