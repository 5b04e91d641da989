//! Documentation Sections
//!
//! The closed set of generated sections and their fixed assembly order.

use serde::{Deserialize, Serialize};

/// One top-level unit of generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Overview,
    Installation,
    Api,
    Development,
    Contributing,
}

impl SectionKind {
    /// Fixed assembly order for deterministic output.
    pub const ORDER: [SectionKind; 5] = [
        SectionKind::Overview,
        SectionKind::Installation,
        SectionKind::Api,
        SectionKind::Development,
        SectionKind::Contributing,
    ];

    /// Stable identifier used for file names and frontmatter ids.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Installation => "installation",
            Self::Api => "api",
            Self::Development => "development",
            Self::Contributing => "contributing",
        }
    }

    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Installation => "Installation",
            Self::Api => "API Reference",
            Self::Development => "Development",
            Self::Contributing => "Contributing",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order() {
        let ids: Vec<&str> = SectionKind::ORDER.iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec!["overview", "installation", "api", "development", "contributing"]
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(SectionKind::Api.title(), "API Reference");
        assert_eq!(SectionKind::Overview.title(), "Overview");
    }
}
