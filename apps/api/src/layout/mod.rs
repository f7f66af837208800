// Resume layout: line classification shared by both output formats,
// plus the font metrics the PDF writer uses for word wrap.

pub mod classify;
pub mod font_metrics;

// Re-export the public API consumed by the renderers and the pipeline.
pub use classify::{LineClassifier, LineRole};

/// Candidate identity printed above the rewritten resume.
///
/// Never derived from the resume text; it comes from configuration or the request form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub name: String,
    pub contact_line: String,
    pub links_line: String,
}

impl HeaderBlock {
    pub fn placeholder() -> Self {
        Self {
            name: "YOUR NAME".to_string(),
            contact_line: "City - you@example.com - +00-0000000000".to_string(),
            links_line: "linkedin.com/in/your-profile - github.com/your-handle".to_string(),
        }
    }

    /// Replaces fields with non-blank overrides, keeping the rest.
    pub fn with_overrides(
        mut self,
        name: Option<String>,
        contact_line: Option<String>,
        links_line: Option<String>,
    ) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        if let Some(name) = keep(name) {
            self.name = name;
        }
        if let Some(contact) = keep(contact_line) {
            self.contact_line = contact;
        }
        if let Some(links) = keep(links_line) {
            self.links_line = links;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_non_blank_fields() {
        let header = HeaderBlock::placeholder().with_overrides(
            Some("ADA LOVELACE".to_string()),
            Some("   ".to_string()),
            None,
        );
        assert_eq!(header.name, "ADA LOVELACE");
        assert_eq!(header.contact_line, HeaderBlock::placeholder().contact_line);
        assert_eq!(header.links_line, HeaderBlock::placeholder().links_line);
    }
}
