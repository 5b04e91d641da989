//! lint Command
//!
//! Lints one markdown file or every `.md`/`.mdx` file under a directory
//! and prints positioned diagnostics with fix suggestions. Unreadable
//! files are reported as skipped, never as clean.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::util::Output;
use crate::lint::{LintSeverity, LintStatus, MarkdownLinter, fix_suggestion};
use crate::types::Result;

/// Summary of a lint run across one or more files.
#[derive(Debug, Default)]
pub struct LintSummary {
    pub files_checked: usize,
    pub files_skipped: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

pub fn run(path: &Path) -> Result<LintSummary> {
    let out = Output::new();
    let linter = MarkdownLinter::new();
    let mut summary = LintSummary::default();

    for file in collect_targets(path) {
        let outcome = linter.lint_file(&file);

        if outcome.status == LintStatus::Skipped {
            summary.files_skipped += 1;
            out.warning(&format!("{}: skipped (could not read)", file.display()));
            continue;
        }

        summary.files_checked += 1;
        for diag in &outcome.errors {
            let severity = match diag.error_type.severity() {
                LintSeverity::Error => {
                    summary.error_count += 1;
                    "error"
                }
                LintSeverity::Warning => {
                    summary.warning_count += 1;
                    "warning"
                }
            };
            println!(
                "{}:{}:{}: {} [{}] {}",
                file.display(),
                diag.line_number,
                diag.column,
                severity,
                diag.error_type,
                diag.message
            );
            let fix = diag
                .suggested_fix
                .clone()
                .unwrap_or_else(|| fix_suggestion(diag.error_type).to_string());
            println!("    fix: {}", fix);
        }
    }

    out.section("Lint summary");
    out.info(&format!(
        "{} file(s) checked, {} skipped",
        summary.files_checked, summary.files_skipped
    ));
    if summary.error_count == 0 && summary.warning_count == 0 {
        out.success("No issues found");
    } else {
        out.warning(&format!(
            "{} error(s), {} warning(s)",
            summary.error_count, summary.warning_count
        ));
    }

    Ok(summary)
}

/// A single file is linted directly; a directory is scanned for
/// markdown files.
fn collect_targets(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut targets = Vec::new();
    for pattern in ["**/*.md", "**/*.mdx"] {
        let full = format!("{}/{}", path.display(), pattern);
        match glob::glob(&full) {
            Ok(paths) => targets.extend(paths.filter_map(|p| p.ok())),
            Err(e) => warn!("Invalid lint glob '{}': {}", full, e),
        }
    }
    targets.sort();
    targets
}
