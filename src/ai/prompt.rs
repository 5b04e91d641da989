//! Enhancement Prompts
//!
//! Fixed system context plus per-section instruction templates. The
//! final prompt is: system context, section instruction, then the
//! original content.

use crate::docgen::section::SectionKind;

/// Documentation-specialist persona prepended to every enhancement
/// prompt.
pub const SYSTEM_CONTEXT: &str = "You are a technical documentation specialist helping to improve software documentation. \
Your job is to enhance the provided documentation while maintaining factual accuracy. \
Improve clarity, organization, and comprehensiveness. \
Add examples where helpful. Format using markdown. \
Fix any syntax that would break an MDX-based documentation website.";

/// Section-specific revision instruction.
fn instruction_for(section: SectionKind) -> &'static str {
    match section {
        SectionKind::Overview => {
            "Format markdown. Fix errors. Enhance this project overview to be more comprehensive and user-friendly \
             while maintaining accuracy. Add clear sections for features, use cases, and key \
             concepts if they're not already present:"
        }
        SectionKind::Installation => {
            "Format markdown. Fix errors. Improve this installation guide by adding clear prerequisites, \
             troubleshooting tips, and platform-specific instructions while maintaining accuracy:"
        }
        SectionKind::Api => {
            "Format markdown. Fix errors. Enhance this API documentation by adding more detailed descriptions, usage \
             examples, and parameter explanations while maintaining technical accuracy:"
        }
        SectionKind::Development => {
            "Format markdown. Fix errors. Improve this development guide by adding more context, best practices, \
             and workflow descriptions while maintaining accuracy:"
        }
        SectionKind::Contributing => {
            "Format markdown. Fix errors. Enhance these contributing guidelines by adding more specific examples, \
             workflow descriptions, and best practices while maintaining accuracy:"
        }
    }
}

/// Build the full enhancement prompt for a section.
pub fn enhancement_prompt(section: SectionKind, content: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        SYSTEM_CONTEXT,
        instruction_for(section),
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let prompt = enhancement_prompt(SectionKind::Api, "## Endpoints");
        assert!(prompt.starts_with(SYSTEM_CONTEXT));
        assert!(prompt.contains("API documentation"));
        assert!(prompt.ends_with("## Endpoints"));
    }

    #[test]
    fn test_each_section_has_distinct_instruction() {
        let prompts: Vec<&str> = SectionKind::ORDER.iter().map(|s| instruction_for(*s)).collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
