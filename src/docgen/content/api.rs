//! API Reference Section Generator
//!
//! Synthesis extracts classes and functions from source files with
//! per-language regex heuristics. This is deliberately not a parser:
//! the patterns are documented below and will misclassify some valid
//! code, which is accepted behavior.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;
use tracing::warn;

use super::{SectionGenerator, find_doc_file};
use crate::constants::analysis::EXCLUDED_DIRS;
use crate::constants::docgen::{API_DOC_NAMES, API_FILES_PER_DIR, API_SOURCE_EXTENSIONS};
use crate::docgen::fsio::read_to_string_opt;
use crate::docgen::section::SectionKind;
use crate::types::RepoInfo;

/// A named code element with an optional one-line description.
type CodeElement = (String, String);

/// Generates API documentation from existing docs or source structure.
pub struct ApiGenerator {
    repo_path: PathBuf,
    patterns: LanguagePatterns,
}

/// Compiled per-language extraction heuristics.
///
/// - Python classes: `class Name(...):` with an optional docstring
/// - Python functions: top-of-line `def name(...):` with optional docstring
/// - JS/TS classes: `class Name ... {`, functions: declarations, const
///   function expressions, and object-literal members
/// - Java classes: access-modified `class Name`, methods: modifier chains
///   followed by a return type and parameter list
struct LanguagePatterns {
    python_class: Option<Regex>,
    python_function: Option<Regex>,
    js_class: Option<Regex>,
    js_function: Option<Regex>,
    java_class: Option<Regex>,
    java_method: Option<Regex>,
}

impl LanguagePatterns {
    fn compile() -> Self {
        Self {
            python_class: compile(r#"(?s)class\s+(\w+)(?:\(.*?\))?:\s*(?:"""(.*?)""")?"#),
            python_function: compile(r#"(?ms)^def\s+(\w+)\s*\(.*?\):\s*(?:"""(.*?)""")?"#),
            js_class: compile(r"class\s+(\w+)(?:\s+extends\s+\w+)?(?:\s+implements\s+\w+)?\s*\{"),
            js_function: compile(
                r"(?:function\s+(\w+)|const\s+(\w+)\s*=.*?function|(\w+)\s*:\s*function)",
            ),
            java_class: compile(r"(?:public|protected|private)?\s+(?:abstract|final)?\s*class\s+(\w+)"),
            java_method: compile(r"(?:public|protected|private|static|\s)+[\w<>\[\]]+\s+(\w+)\s*\([^)]*\)"),
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Invalid API extraction pattern: {}", e);
            None
        }
    }
}

impl ApiGenerator {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            patterns: LanguagePatterns::compile(),
        }
    }

    /// Tier 2: one subsection per source file, capped per directory.
    fn synthesize_from_source(&self, repo_info: &RepoInfo) -> String {
        let mut content = Vec::new();

        for src_dir in &repo_info.src_dirs {
            let dir_path = self.repo_path.join(src_dir);
            if !dir_path.is_dir() {
                continue;
            }

            let mut source_files = collect_source_files(&self.repo_path, &dir_path);
            if source_files.is_empty() {
                continue;
            }
            source_files.sort();

            let dir_title = capitalize(
                &Path::new(src_dir)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| src_dir.clone()),
            );
            content.push(format!("\n## {} Module\n", dir_title));

            for file_path in source_files.iter().take(API_FILES_PER_DIR) {
                let filename = Path::new(file_path)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file_path.clone());
                content.push(format!("\n### {}\n", filename));
                content.push(format!("Path: `{}`\n", file_path));

                let (classes, functions) =
                    self.extract_code_elements(&self.repo_path.join(file_path));

                if !classes.is_empty() {
                    content.push("**Classes:**\n".to_string());
                    for (name, desc) in &classes {
                        if desc.is_empty() {
                            content.push(format!("- `{}`", name));
                        } else {
                            content.push(format!("- `{}`: {}", name, desc));
                        }
                    }
                }

                if !functions.is_empty() {
                    content.push("\n**Functions:**\n".to_string());
                    for (name, desc) in &functions {
                        if desc.is_empty() {
                            content.push(format!("- `{}()`", name));
                        } else {
                            content.push(format!("- `{}()`: {}", name, desc));
                        }
                    }
                }
            }

            if source_files.len() > API_FILES_PER_DIR {
                content.push(format!(
                    "\n*...and {} more files*\n",
                    source_files.len() - API_FILES_PER_DIR
                ));
            }
        }

        content.join("\n")
    }

    /// Extract classes and functions from one source file. Unreadable
    /// files and unknown extensions yield empty lists.
    fn extract_code_elements(&self, file_path: &Path) -> (Vec<CodeElement>, Vec<CodeElement>) {
        let Some(content) = read_to_string_opt(file_path) else {
            return (Vec::new(), Vec::new());
        };

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        match ext {
            "py" => self.extract_python(&content),
            "js" | "ts" | "jsx" | "tsx" => self.extract_javascript(&content),
            "java" => self.extract_java(&content),
            _ => (Vec::new(), Vec::new()),
        }
    }

    fn extract_python(&self, content: &str) -> (Vec<CodeElement>, Vec<CodeElement>) {
        let mut classes = Vec::new();
        let mut functions = Vec::new();

        if let Some(re) = &self.patterns.python_class {
            for caps in re.captures_iter(content) {
                let name = caps[1].to_string();
                let desc = caps
                    .get(2)
                    .map(|m| first_line(m.as_str()))
                    .unwrap_or_default();
                classes.push((name, desc));
            }
        }

        if let Some(re) = &self.patterns.python_function {
            for caps in re.captures_iter(content) {
                let name = caps[1].to_string();
                // Language-private symbols stay out of the reference
                if name.starts_with('_') {
                    continue;
                }
                let desc = caps
                    .get(2)
                    .map(|m| first_line(m.as_str()))
                    .unwrap_or_default();
                functions.push((name, desc));
            }
        }

        (classes, functions)
    }

    fn extract_javascript(&self, content: &str) -> (Vec<CodeElement>, Vec<CodeElement>) {
        let mut classes = Vec::new();
        let mut functions = Vec::new();

        if let Some(re) = &self.patterns.js_class {
            for caps in re.captures_iter(content) {
                classes.push((caps[1].to_string(), String::new()));
            }
        }

        if let Some(re) = &self.patterns.js_function {
            for caps in re.captures_iter(content) {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string());
                if let Some(name) = name
                    && !name.starts_with('_')
                {
                    functions.push((name, String::new()));
                }
            }
        }

        (classes, functions)
    }

    fn extract_java(&self, content: &str) -> (Vec<CodeElement>, Vec<CodeElement>) {
        let mut classes = Vec::new();
        let mut methods = Vec::new();

        if let Some(re) = &self.patterns.java_class {
            for caps in re.captures_iter(content) {
                classes.push((caps[1].to_string(), String::new()));
            }
        }

        if let Some(re) = &self.patterns.java_method {
            for caps in re.captures_iter(content) {
                let name = caps[1].to_string();
                if !name.starts_with('_') {
                    methods.push((name, String::new()));
                }
            }
        }

        (classes, methods)
    }
}

impl SectionGenerator for ApiGenerator {
    fn kind(&self) -> SectionKind {
        SectionKind::Api
    }

    fn generate(&self, repo_info: &RepoInfo) -> String {
        let mut content = Vec::new();
        content.push("# API Reference\n".to_string());
        content.push("This page provides documentation for the API of this project.\n".to_string());

        // Tier 1: existing API documentation in a docs directory.
        if let Some(api_docs) = find_doc_file(&self.repo_path, repo_info, API_DOC_NAMES) {
            content.push(api_docs);
            return content.join("\n");
        }

        // Tier 2: synthesize from source structure.
        let api_content = self.synthesize_from_source(repo_info);
        if !api_content.trim().is_empty() {
            content.push(api_content);
        } else {
            // Tier 3: explicit notice, never an empty section.
            content.push("\n*No API documentation is available at this time.*\n".to_string());
            content.push("\nConsider adding API documentation to your project by:\n".to_string());
            content.push("- Adding a dedicated API.md file in your docs directory".to_string());
            content.push("- Using docstrings in your code".to_string());
            content.push(
                "- Implementing API documentation tools like Swagger, JSDoc, or Sphinx".to_string(),
            );
        }

        content.join("\n")
    }
}

/// Recursively collect API-relevant source files under a directory,
/// returned as repository-relative paths. Excluded directories are
/// pruned the same way the analyzer prunes them.
fn collect_source_files(repo_path: &Path, dir_path: &Path) -> Vec<String> {
    let walker = WalkBuilder::new(dir_path)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !EXCLUDED_DIRS.contains(&name.as_ref())
        })
        .build();

    walker
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| API_SOURCE_EXTENSIONS.contains(&ext))
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(repo_path)
                .ok()
                .map(|p| p.to_string_lossy().to_string())
        })
        .collect()
}

/// First line of a docstring, trimmed.
fn first_line(docstring: &str) -> String {
    docstring.trim().lines().next().unwrap_or("").trim().to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_python_extraction_skips_private() {
        let generator = ApiGenerator::new(".");
        let source = "class Widget:\n    \"\"\"A widget.\"\"\"\n\ndef render(x):\n    pass\n\ndef _hidden():\n    pass\n";
        let (classes, functions) = generator.extract_python(source);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].0, "Widget");
        assert_eq!(classes[0].1, "A widget.");
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].0, "render");
    }

    #[test]
    fn test_javascript_extraction() {
        let generator = ApiGenerator::new(".");
        let source = "class Store extends Base {\n}\nfunction load() {}\nconst save = async function() {};\n";
        let (classes, functions) = generator.extract_javascript(source);

        assert_eq!(classes[0].0, "Store");
        let names: Vec<&str> = functions.iter().map(|f| f.0.as_str()).collect();
        assert!(names.contains(&"load"));
        assert!(names.contains(&"save"));
    }

    #[test]
    fn test_java_extraction() {
        let generator = ApiGenerator::new(".");
        let source = "public final class Runner {\n    public void start(int n) {}\n}\n";
        let (classes, methods) = generator.extract_java(source);

        assert_eq!(classes[0].0, "Runner");
        assert!(methods.iter().any(|m| m.0 == "start"));
    }

    #[test]
    fn test_file_cap_with_more_files_note() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        for i in 0..15 {
            fs::write(src.join(format!("mod_{:02}.py", i)), "def run():\n    pass\n").unwrap();
        }

        let info = RepoInfo {
            project_name: "demo".to_string(),
            src_dirs: vec!["src".to_string()],
            ..Default::default()
        };

        let output = ApiGenerator::new(dir.path()).generate(&info);
        let subsections = output.matches("\n### ").count();
        assert_eq!(subsections, 10);
        assert!(output.contains("*...and 5 more files*"));
    }

    #[test]
    fn test_fallback_notice_when_no_sources() {
        let dir = TempDir::new().unwrap();
        let info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };

        let output = ApiGenerator::new(dir.path()).generate(&info);
        assert!(!output.is_empty());
        assert!(output.contains("*No API documentation is available at this time.*"));
    }

    #[test]
    fn test_tier1_existing_api_doc_with_frontmatter() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(
            docs.join("api.md"),
            "---\ntitle: API\n---\n\n## Endpoints\n\nGET /things\n",
        )
        .unwrap();

        let info = RepoInfo {
            project_name: "demo".to_string(),
            doc_dirs: vec!["docs".to_string()],
            ..Default::default()
        };

        let output = ApiGenerator::new(dir.path()).generate(&info);
        assert!(output.contains("GET /things"));
        assert!(!output.contains("title: API"));
    }
}
