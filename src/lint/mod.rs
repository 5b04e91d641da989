//! Markdown/MDX Linter
//!
//! Detects syntax patterns that break compilation under a JSX-aware
//! markdown compiler, without modifying content. Detection runs
//! line-by-line; lines inside fenced code blocks are exempt from every
//! check. Diagnostics carry 1-based positions, a trimmed context
//! snippet, and an occurrence-independent fix suggestion.
//!
//! The linter is purely advisory: it raises no errors of its own. A
//! file that cannot be read yields a `Skipped` outcome so "no errors
//! found" is never conflated with "linting was skipped".

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::constants::lint::{MAX_CONSECUTIVE_BLANKS, SNIPPET_CONTEXT};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Breaks MDX compilation
    Error,
    /// Style issue, non-fatal
    Warning,
}

/// Closed taxonomy of lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintErrorType {
    UnclosedTag,
    EmailAsJsx,
    UrlAsJsx,
    LooseAngleBracket,
    AtInTag,
    ComparisonOperator,
    UnclosedLink,
    MalformedLink,
    MultipleBlanks,
    Tabs,
    TrailingWhitespace,
    PotentialJsx,
}

impl LintErrorType {
    /// Stable snake_case tag for reports.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::UnclosedTag => "unclosed_tag",
            Self::EmailAsJsx => "email_as_jsx",
            Self::UrlAsJsx => "url_as_jsx",
            Self::LooseAngleBracket => "loose_angle_bracket",
            Self::AtInTag => "at_in_tag",
            Self::ComparisonOperator => "comparison_operator",
            Self::UnclosedLink => "unclosed_link",
            Self::MalformedLink => "malformed_link",
            Self::MultipleBlanks => "multiple_blanks",
            Self::Tabs => "tabs",
            Self::TrailingWhitespace => "trailing_whitespace",
            Self::PotentialJsx => "potential_jsx",
        }
    }

    /// Severity class of this finding type.
    pub fn severity(&self) -> LintSeverity {
        match self {
            Self::MultipleBlanks | Self::Tabs | Self::TrailingWhitespace => LintSeverity::Warning,
            _ => LintSeverity::Error,
        }
    }
}

impl std::fmt::Display for LintErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One positioned lint diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintError {
    /// 1-based line in the linted content
    pub line_number: usize,
    /// 1-based column (in characters) of the match
    pub column: usize,
    pub error_type: LintErrorType,
    pub message: String,
    /// Surrounding context, trimmed
    pub content_snippet: String,
    pub suggested_fix: Option<String>,
}

/// Whether linting actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintStatus {
    /// Content was scanned; an empty error list means verified clean
    Checked,
    /// Content could not be read; nothing was verified
    Skipped,
}

/// Result of linting one file or content buffer.
#[derive(Debug, Clone)]
pub struct LintOutcome {
    pub status: LintStatus,
    pub errors: Vec<LintError>,
}

impl LintOutcome {
    pub fn checked(errors: Vec<LintError>) -> Self {
        Self {
            status: LintStatus::Checked,
            errors,
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: LintStatus::Skipped,
            errors: Vec::new(),
        }
    }

    /// True when any error-severity finding is present.
    pub fn has_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.error_type.severity() == LintSeverity::Error)
    }
}

/// Fixed remediation string for an error type, independent of the
/// specific occurrence.
pub fn fix_suggestion(error_type: LintErrorType) -> &'static str {
    match error_type {
        LintErrorType::UnclosedTag => "Close the HTML/JSX tag or make it self-closing",
        LintErrorType::EmailAsJsx => "Wrap email in backticks or use [email](mailto:email) format",
        LintErrorType::UrlAsJsx => "Convert to markdown link: [url](url)",
        LintErrorType::LooseAngleBracket => {
            "Wrap in backticks or use words \"less than\"/\"greater than\""
        }
        LintErrorType::AtInTag => "Escape the @ symbol or restructure the content",
        LintErrorType::ComparisonOperator => "Wrap in backticks for code or use words",
        LintErrorType::UnclosedLink => "Add the URL part: [text](url)",
        LintErrorType::MalformedLink => "Fix the markdown link syntax",
        _ => "Fix the syntax error",
    }
}

// =============================================================================
// Linter
// =============================================================================

/// Validates markdown content for syntax that would break a JSX-aware
/// markdown compiler.
pub struct MarkdownLinter {
    email_re: Option<Regex>,
    url_re: Option<Regex>,
    at_tag_re: Option<Regex>,
    tag_re: Option<Regex>,
    link_re: Option<Regex>,
    malformed_link_re: Option<Regex>,
    trailing_re: Option<Regex>,
    tag_open_shape_re: Option<Regex>,
}

impl Default for MarkdownLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownLinter {
    pub fn new() -> Self {
        Self {
            // Email addresses that a JSX parser reads as tags
            email_re: compile(r"<([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})>"),
            // Bare URLs in angle brackets
            url_re: compile(r"<(https?://[^>]+)>"),
            // @-prefixed tag-like text
            at_tag_re: compile(r"<@[^>]*>"),
            // Tag-like construct, not self-closing
            tag_re: compile(r"<([A-Za-z][^>]*[^/>])>"),
            // Markdown link text, URL part checked separately
            link_re: compile(r"\[[^\]]+\]"),
            // Link whose URL part never terminates on the line
            malformed_link_re: compile(r"\[[^\]]*\]\([^)]*$"),
            trailing_re: compile(r"[ \t]+$"),
            // Well-formed tag-open shape after a `<`
            tag_open_shape_re: compile(r"^[A-Za-z]+[>/\s]"),
        }
    }

    /// Lint a markdown file. A read failure is logged and yields a
    /// `Skipped` outcome ("could not verify", not "verified clean").
    pub fn lint_file(&self, path: &Path) -> LintOutcome {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                LintOutcome::checked(self.lint_content(&content, &path.display().to_string()))
            }
            Err(e) => {
                error!("Error reading file {}: {}", path.display(), e);
                LintOutcome::skipped()
            }
        }
    }

    /// Lint markdown content, returning diagnostics sorted by
    /// `(line_number, column)`. An empty sequence means clean.
    pub fn lint_content(&self, content: &str, _name: &str) -> Vec<LintError> {
        let mut errors = Vec::new();
        let mut in_code_block = false;
        let mut blank_run = 0usize;

        for (idx, line) in content.lines().enumerate() {
            let line_number = idx + 1;

            // Fence markers toggle the exemption and are not themselves
            // checked.
            if line.trim_start().starts_with("```") {
                in_code_block = !in_code_block;
                blank_run = 0;
                continue;
            }

            if in_code_block {
                continue;
            }

            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run == MAX_CONSECUTIVE_BLANKS + 1 {
                    errors.push(LintError {
                        line_number,
                        column: 1,
                        error_type: LintErrorType::MultipleBlanks,
                        message: "Multiple consecutive blank lines".to_string(),
                        content_snippet: String::new(),
                        suggested_fix: None,
                    });
                }
                continue;
            }
            blank_run = 0;

            self.check_angle_constructs(line, line_number, &mut errors);
            self.check_links(line, line_number, &mut errors);
            self.check_whitespace(line, line_number, &mut errors);
            self.check_potential_jsx(line, line_number, &mut errors);
        }

        errors.sort_by_key(|e| (e.line_number, e.column));
        errors
    }

    /// Angle-bracket constructs: emails, URLs, @-tags, unclosed tags,
    /// loose brackets, and comparison operators.
    fn check_angle_constructs(&self, line: &str, line_number: usize, errors: &mut Vec<LintError>) {
        push_regex_matches(
            &self.email_re,
            line,
            line_number,
            LintErrorType::EmailAsJsx,
            "Email address interpreted as JSX",
            errors,
        );
        push_regex_matches(
            &self.url_re,
            line,
            line_number,
            LintErrorType::UrlAsJsx,
            "URL in angle brackets interpreted as JSX",
            errors,
        );
        push_regex_matches(
            &self.at_tag_re,
            line,
            line_number,
            LintErrorType::AtInTag,
            "@ symbol in tag-like structure",
            errors,
        );

        // Tag-like constructs with no matching close on the line. Emails,
        // URLs, and @-tags already carry their own category.
        if let Some(re) = &self.tag_re {
            for m in re.find_iter(line) {
                let inner = &line[m.start() + 1..m.end() - 1];
                if inner.contains('@') || inner.contains("://") {
                    continue;
                }
                let tag_name: String = inner
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .collect();
                let closing = format!("</{}>", tag_name);
                if !line[m.end()..].contains(&closing) {
                    errors.push(self.positioned(
                        line,
                        line_number,
                        m.start(),
                        m.end(),
                        LintErrorType::UnclosedTag,
                        "Unclosed HTML/JSX tag",
                        None,
                    ));
                }
            }
        }

        // Loose angle brackets and comparison operators need neighbor
        // context the regex engine cannot express, so scan by character.
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        for (k, &(byte_start, c)) in chars.iter().enumerate() {
            if c != '<' && c != '>' {
                continue;
            }
            let prev = if k > 0 { Some(chars[k - 1].1) } else { None };
            let mut end_k = k + 1;
            if chars.get(end_k).map(|t| t.1) == Some('=') {
                end_k += 1;
            }
            let next = chars.get(end_k).map(|t| t.1);
            let byte_end = chars.get(end_k).map(|t| t.0).unwrap_or(line.len());

            let prev_boundary = prev.is_none_or(|p| p.is_whitespace());
            let next_boundary = next.is_none_or(|n| n.is_whitespace());

            // Isolated bracket: whitespace (or line edge) on both sides
            if prev_boundary && next_boundary && end_k == k + 1 {
                errors.push(self.positioned(
                    line,
                    line_number,
                    byte_start,
                    byte_end,
                    LintErrorType::LooseAngleBracket,
                    "Loose angle bracket might be interpreted as JSX",
                    None,
                ));
            }

            // Bare comparison operator outside code spans
            let adjacent_backtick = prev == Some('`') || next == Some('`');
            if prev_boundary && next_boundary && !adjacent_backtick {
                errors.push(self.positioned(
                    line,
                    line_number,
                    byte_start,
                    byte_end,
                    LintErrorType::ComparisonOperator,
                    "Comparison operator outside code block",
                    None,
                ));
            }
        }
    }

    /// Markdown links missing a URL part or with an unterminated one.
    fn check_links(&self, line: &str, line_number: usize, errors: &mut Vec<LintError>) {
        if let Some(re) = &self.link_re {
            for m in re.find_iter(line) {
                // An image or inline link continues with `(`; anything
                // else leaves the link without a URL.
                if line[m.end()..].starts_with('(') {
                    continue;
                }
                errors.push(self.positioned(
                    line,
                    line_number,
                    m.start(),
                    m.end(),
                    LintErrorType::UnclosedLink,
                    "Markdown link missing URL",
                    None,
                ));
            }
        }

        push_regex_matches(
            &self.malformed_link_re,
            line,
            line_number,
            LintErrorType::MalformedLink,
            "Malformed markdown link",
            errors,
        );
    }

    /// Tab characters and trailing whitespace (warnings).
    fn check_whitespace(&self, line: &str, line_number: usize, errors: &mut Vec<LintError>) {
        for (i, _) in line.char_indices().filter(|(_, c)| *c == '\t') {
            errors.push(self.positioned(
                line,
                line_number,
                i,
                i + 1,
                LintErrorType::Tabs,
                "Tab character found (use spaces)",
                None,
            ));
        }

        push_regex_matches(
            &self.trailing_re,
            line,
            line_number,
            LintErrorType::TrailingWhitespace,
            "Trailing whitespace",
            errors,
        );
    }

    /// Heuristic pass: a `<` followed by a letter that does not continue
    /// into a well-formed tag-open shape.
    fn check_potential_jsx(&self, line: &str, line_number: usize, errors: &mut Vec<LintError>) {
        let Some(shape_re) = &self.tag_open_shape_re else {
            return;
        };

        for (i, c) in line.char_indices() {
            if c != '<' {
                continue;
            }
            let after = &line[i + 1..];
            let starts_alpha = after.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
            if starts_alpha && !shape_re.is_match(after) {
                errors.push(self.positioned(
                    line,
                    line_number,
                    i,
                    i + 1,
                    LintErrorType::PotentialJsx,
                    "Character \"<\" might be interpreted as JSX",
                    Some("Wrap in backticks: `<`".to_string()),
                ));
            }
        }
    }

    /// Build a diagnostic from byte offsets into the line.
    #[allow(clippy::too_many_arguments)]
    fn positioned(
        &self,
        line: &str,
        line_number: usize,
        start: usize,
        end: usize,
        error_type: LintErrorType,
        message: &str,
        suggested_fix: Option<String>,
    ) -> LintError {
        let column = line[..start.min(line.len())].chars().count() + 1;
        LintError {
            line_number,
            column,
            error_type,
            message: message.to_string(),
            content_snippet: snippet(line, start, end),
            suggested_fix,
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            error!("Invalid lint pattern: {}", e);
            None
        }
    }
}

/// Emit one diagnostic per regex match on the line.
fn push_regex_matches(
    re: &Option<Regex>,
    line: &str,
    line_number: usize,
    error_type: LintErrorType,
    message: &str,
    errors: &mut Vec<LintError>,
) {
    let Some(re) = re else { return };
    for m in re.find_iter(line) {
        let column = line[..m.start()].chars().count() + 1;
        errors.push(LintError {
            line_number,
            column,
            error_type,
            message: message.to_string(),
            content_snippet: snippet(line, m.start(), m.end()),
            suggested_fix: None,
        });
    }
}

/// ±20 characters of surrounding context, trimmed.
fn snippet(line: &str, start: usize, end: usize) -> String {
    let prefix_chars = line[..start.min(line.len())].chars().count();
    let match_chars = line[start.min(line.len())..end.min(line.len())].chars().count();
    let chars: Vec<char> = line.chars().collect();

    let from = prefix_chars.saturating_sub(SNIPPET_CONTEXT);
    let to = (prefix_chars + match_chars + SNIPPET_CONTEXT).min(chars.len());
    chars[from..to].iter().collect::<String>().trim().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn lint(content: &str) -> Vec<LintError> {
        MarkdownLinter::new().lint_content(content, "test.md")
    }

    #[test]
    fn test_email_as_jsx_single_diagnostic() {
        let errors = lint("Contact <user@example.com> for help");
        let emails: Vec<&LintError> = errors
            .iter()
            .filter(|e| e.error_type == LintErrorType::EmailAsJsx)
            .collect();
        assert_eq!(emails.len(), 1);
        // `<` is the 9th character
        assert_eq!(emails[0].column, 9);
        assert!(emails[0].content_snippet.contains("user@example.com"));
    }

    #[test]
    fn test_url_as_jsx() {
        let errors = lint("See <https://example.com> for details");
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::UrlAsJsx)
        );
    }

    #[test]
    fn test_at_in_tag() {
        let errors = lint("Ping <@maintainers> on the tracker");
        assert!(errors.iter().any(|e| e.error_type == LintErrorType::AtInTag));
    }

    #[test]
    fn test_unclosed_tag() {
        let errors = lint("This has a <div class=\"x\"> without closing");
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::UnclosedTag)
        );

        let closed = lint("Inline <em>text</em> is fine");
        assert!(
            !closed
                .iter()
                .any(|e| e.error_type == LintErrorType::UnclosedTag)
        );
    }

    #[test]
    fn test_loose_angle_bracket_and_comparison() {
        let errors = lint("value a < b holds");
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::LooseAngleBracket)
        );
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::ComparisonOperator)
        );
    }

    #[test]
    fn test_comparison_in_backticks_is_clean() {
        let errors = lint("use `<=` for comparison");
        assert!(
            !errors
                .iter()
                .any(|e| e.error_type == LintErrorType::ComparisonOperator)
        );
    }

    #[test]
    fn test_unclosed_link() {
        let errors = lint("See [the docs] for details");
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::UnclosedLink)
        );

        let closed = lint("See [the docs](https://example.com) for details");
        assert!(
            !closed
                .iter()
                .any(|e| e.error_type == LintErrorType::UnclosedLink)
        );
    }

    #[test]
    fn test_malformed_link() {
        let errors = lint("Broken [link](https://example");
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::MalformedLink)
        );
    }

    #[test]
    fn test_warning_severity_checks() {
        let errors = lint("line with tab\there\nline with trailing  \n\n\n\nnext");
        assert!(errors.iter().any(|e| e.error_type == LintErrorType::Tabs));
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::TrailingWhitespace)
        );
        assert!(
            errors
                .iter()
                .any(|e| e.error_type == LintErrorType::MultipleBlanks)
        );
        for e in &errors {
            assert_eq!(e.error_type.severity(), LintSeverity::Warning);
        }
    }

    #[test]
    fn test_code_block_exemption() {
        let fenced = "```\na < b\n```\n";
        assert!(lint(fenced).is_empty());

        let bare = "a < b\n";
        assert!(!lint(bare).is_empty());
    }

    #[test]
    fn test_potential_jsx_heuristic() {
        // `<T,` is not a well-formed tag-open shape
        let errors = lint("Generic Type<T, U)) parameters");
        let jsx: Vec<&LintError> = errors
            .iter()
            .filter(|e| e.error_type == LintErrorType::PotentialJsx)
            .collect();
        assert_eq!(jsx.len(), 1);
        assert_eq!(
            jsx[0].suggested_fix.as_deref(),
            Some("Wrap in backticks: `<`")
        );
    }

    #[test]
    fn test_sorted_by_line_and_column() {
        let errors = lint("bad [link] and <user@example.com>\nmore < here\n");
        let positions: Vec<(usize, usize)> =
            errors.iter().map(|e| (e.line_number, e.column)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_fix_suggestions_are_occurrence_independent() {
        assert_eq!(
            fix_suggestion(LintErrorType::EmailAsJsx),
            "Wrap email in backticks or use [email](mailto:email) format"
        );
        assert_eq!(
            fix_suggestion(LintErrorType::Tabs),
            "Fix the syntax error"
        );
    }

    #[test]
    fn test_lint_file_skipped_on_unreadable_path() {
        let dir = TempDir::new().unwrap();
        let outcome = MarkdownLinter::new().lint_file(&dir.path().join("missing.md"));
        assert_eq!(outcome.status, LintStatus::Skipped);
        assert!(outcome.errors.is_empty());
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_lint_file_checked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "clean content\n").unwrap();
        let outcome = MarkdownLinter::new().lint_file(&path);
        assert_eq!(outcome.status, LintStatus::Checked);
        assert!(outcome.errors.is_empty());
    }

    proptest! {
        /// Diagnostics are always non-decreasing in (line_number, column).
        #[test]
        fn prop_lint_output_is_sorted(content in "[ a-z<>\\[\\]()@`\n]{0,200}") {
            let errors = lint(&content);
            for pair in errors.windows(2) {
                prop_assert!(
                    (pair[0].line_number, pair[0].column) <= (pair[1].line_number, pair[1].column)
                );
            }
        }
    }
}
