//! Reposcribe - Best-Practice Templates and Documentation Sites
//!
//! Applies "best practice" document templates (governance policies,
//! secrets-detection configs, documentation sites) to git repositories,
//! optionally customizing them with AI-generated content.
//!
//! ## Core Pipeline
//!
//! - **Analyzer**: single-pass repository walk producing a `RepoInfo`
//!   record (metadata, inventories, directory classification)
//! - **Section Generators**: five recover-synthesize-fallback strategies
//!   (overview, installation, API, development, contributing)
//! - **AI Enhancer**: optional per-section revision through a closed set
//!   of provider adapters; failures keep the original content
//! - **MDX Linter**: positioned diagnostics for syntax that breaks a
//!   JSX-aware markdown compiler
//!
//! ## Quick Start
//!
//! ```ignore
//! use reposcribe::docgen::{DocPipeline, PipelineOptions};
//!
//! let pipeline = DocPipeline::new(
//!     "/path/to/repo",
//!     PipelineOptions {
//!         output_dir: "docs-site".into(),
//!         dry_run: false,
//!     },
//! );
//! let site = pipeline.run().await?;
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: repository analysis and metadata extraction
//! - [`docgen`]: section generation, site assembly, output
//! - [`ai`]: LLM provider abstraction and the enhancement pass
//! - [`lint`]: markdown/MDX compatibility linter
//! - [`practices`]: alias-dispatched best-practice variants
//! - [`config`]: layered configuration

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod docgen;
pub mod lint;
pub mod practices;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, DocsConfig, LlmConfig};

// Error Types
pub use types::error::{ErrorCategory, Result, ScribeError};

// Data Model
pub use types::repo::{KeyFileRole, RepoInfo};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use analyzer::RepoAnalyzer;
pub use docgen::section::SectionKind;
pub use docgen::{DocPipeline, GeneratedSite, PipelineOptions, SectionReport};
pub use lint::{LintError, LintErrorType, LintOutcome, LintSeverity, LintStatus, MarkdownLinter};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{AiEnhancer, LlmProvider, ProviderConfig, ProviderKind, SharedProvider};
