//! Site Writer
//!
//! Persists the assembled documentation site: one markdown file per
//! section (with frontmatter), an index page, and the sidebar
//! configuration asset. Writing happens only after all generation and
//! linting complete, so no partial output is ever visible on disk.

use std::path::{Path, PathBuf};

use tracing::info;

use super::fsio::write_output;
use super::section::SectionKind;
use crate::types::{RepoInfo, Result};

/// Writes the generated site into a caller-specified output directory.
pub struct SiteWriter {
    output_dir: PathBuf,
}

impl SiteWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write all section files plus the index page and sidebar asset.
    /// Returns the paths written, in emission order.
    pub fn write_site(
        &self,
        repo_info: &RepoInfo,
        sections: &[(SectionKind, String)],
    ) -> Result<Vec<PathBuf>> {
        let docs_dir = self.output_dir.join("docs");
        let mut written = Vec::new();

        for (kind, content) in sections {
            let path = docs_dir.join(format!("{}.md", kind.id()));
            write_output(&path, &with_frontmatter(*kind, content))?;
            info!("Generated {} content", kind.id());
            written.push(path);
        }

        let index_path = docs_dir.join("index.md");
        let kinds: Vec<SectionKind> = sections.iter().map(|(k, _)| *k).collect();
        write_output(&index_path, &self.render_index(repo_info, &kinds))?;
        info!("Generated index.md");
        written.push(index_path);

        let sidebars_path = self.output_dir.join("sidebars.js");
        write_output(&sidebars_path, &render_sidebars(&kinds))?;
        info!("Generated sidebars.js");
        written.push(sidebars_path);

        Ok(written)
    }

    /// Landing page with link groups for the sections actually written.
    fn render_index(&self, repo_info: &RepoInfo, kinds: &[SectionKind]) -> String {
        let description = if repo_info.description.is_empty() {
            format!("{} documentation", repo_info.project_name)
        } else {
            repo_info.description.clone()
        };

        let mut content = vec![
            "---".to_string(),
            "slug: /".to_string(),
            "id: index".to_string(),
            format!("title: {} Documentation", repo_info.project_name),
            "---".to_string(),
            String::new(),
            format!("# {} Documentation", repo_info.project_name),
            String::new(),
            description,
            String::new(),
            "## Getting Started".to_string(),
            String::new(),
        ];

        if kinds.contains(&SectionKind::Overview) {
            content.push("- [Overview](overview.md)".to_string());
        }
        if kinds.contains(&SectionKind::Installation) {
            content.push("- [Installation](installation.md)".to_string());
        }

        content.push(String::new());
        content.push("## Reference".to_string());
        content.push(String::new());

        if kinds.contains(&SectionKind::Api) {
            content.push("- [API Reference](api.md)".to_string());
        }
        if kinds.contains(&SectionKind::Development) {
            content.push("- [Development](development.md)".to_string());
        }
        if kinds.contains(&SectionKind::Contributing) {
            content.push("- [Contributing](contributing.md)".to_string());
        }

        content.push(String::new());
        content.push(format!(
            "*Documentation generated on {}*",
            chrono::Utc::now().format("%Y-%m-%d")
        ));
        content.push(String::new());

        content.join("\n")
    }
}

/// Section file with Docusaurus-style frontmatter.
fn with_frontmatter(kind: SectionKind, content: &str) -> String {
    format!(
        "---\nid: {}\ntitle: {}\n---\n\n{}\n",
        kind.id(),
        kind.title(),
        content.trim_end()
    )
}

/// Sidebar configuration listing the written sections in fixed order.
fn render_sidebars(kinds: &[SectionKind]) -> String {
    let mut out = String::new();
    out.push_str("/** @type {import('@docusaurus/plugin-content-docs').SidebarsConfig} */\n");
    out.push_str("const sidebars = {\n");
    out.push_str("  tutorialSidebar: [\n");
    out.push_str("    {\n      type: 'doc',\n      id: 'index',\n      label: 'Home',\n    },\n");

    for kind in SectionKind::ORDER {
        if !kinds.contains(&kind) {
            continue;
        }
        out.push_str(&format!(
            "    {{\n      type: 'doc',\n      id: '{}',\n      label: '{}',\n    }},\n",
            kind.id(),
            kind.title()
        ));
    }

    out.push_str("  ],\n};\n\nmodule.exports = sidebars;\n");
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn all_sections() -> Vec<(SectionKind, String)> {
        SectionKind::ORDER
            .iter()
            .map(|k| (*k, format!("# {}\n\nBody", k.title())))
            .collect()
    }

    #[test]
    fn test_writes_one_file_per_section_plus_assets() {
        let dir = TempDir::new().unwrap();
        let repo_info = RepoInfo {
            project_name: "demo".to_string(),
            ..Default::default()
        };

        let written = SiteWriter::new(dir.path())
            .write_site(&repo_info, &all_sections())
            .unwrap();

        // five sections + index + sidebars
        assert_eq!(written.len(), 7);
        for kind in SectionKind::ORDER {
            assert!(dir.path().join("docs").join(format!("{}.md", kind.id())).exists());
        }
        assert!(dir.path().join("docs/index.md").exists());
        assert!(dir.path().join("sidebars.js").exists());
    }

    #[test]
    fn test_frontmatter_shape() {
        let rendered = with_frontmatter(SectionKind::Api, "# API Reference\n\nBody\n");
        assert!(rendered.starts_with("---\nid: api\ntitle: API Reference\n---\n\n"));
        assert!(rendered.ends_with("Body\n"));
    }

    #[test]
    fn test_index_links_reflect_written_sections() {
        let dir = TempDir::new().unwrap();
        let repo_info = RepoInfo {
            project_name: "demo".to_string(),
            description: "A demo project".to_string(),
            ..Default::default()
        };

        let sections = vec![
            (SectionKind::Overview, "# Overview".to_string()),
            (SectionKind::Api, "# API".to_string()),
        ];
        SiteWriter::new(dir.path())
            .write_site(&repo_info, &sections)
            .unwrap();

        let index = fs::read_to_string(dir.path().join("docs/index.md")).unwrap();
        assert!(index.contains("- [Overview](overview.md)"));
        assert!(index.contains("- [API Reference](api.md)"));
        assert!(!index.contains("(installation.md)"));
        assert!(index.contains("A demo project"));
    }

    #[test]
    fn test_sidebars_keep_fixed_order() {
        let rendered = render_sidebars(&[SectionKind::Contributing, SectionKind::Overview]);
        let overview_pos = rendered.find("id: 'overview'").unwrap();
        let contributing_pos = rendered.find("id: 'contributing'").unwrap();
        assert!(overview_pos < contributing_pos);
        assert!(!rendered.contains("id: 'api'"));
    }
}
