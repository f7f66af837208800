//! Word writer. Flow is left entirely to paragraph styles; there is no pagination logic.
//! Unlike the PDF path, text is written as-is without any re-encoding.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, SpecialIndentType, Style, StyleType};

use crate::layout::{HeaderBlock, LineClassifier, LineRole};
use crate::render::RenderError;

const NAME_STYLE: &str = "Heading1";
const SECTION_STYLE: &str = "Heading2";
/// Divider paragraph text; Word has no horizontal-rule run.
const RULE_TEXT: &str = "––––––––––––––––––––––––––––––––––––––––––";

// Twips.
const BULLET_LEFT_INDENT: i32 = 360;
const BULLET_HANGING_INDENT: i32 = 180;

/// Renders the header block and the rewritten resume text as a `.docx` archive.
pub fn render_docx(text: &str, header: &HeaderBlock) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new(NAME_STYLE, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new(SECTION_STYLE, StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        );

    docx = docx
        .add_paragraph(
            Paragraph::new()
                .style(NAME_STYLE)
                .add_run(Run::new().add_text(&header.name).bold()),
        )
        .add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(&header.contact_line)
                    .add_break(BreakType::TextWrapping)
                    .add_text(&header.links_line),
            ),
        )
        .add_paragraph(Paragraph::new())
        .add_paragraph(rule_paragraph());

    for line in LineClassifier::word().classify(text) {
        let paragraph = match line.role {
            LineRole::Blank => Paragraph::new(),
            LineRole::Heading => Paragraph::new()
                .style(SECTION_STYLE)
                .add_run(Run::new().add_text(line.content).bold()),
            LineRole::BulletItem => Paragraph::new()
                .indent(
                    Some(BULLET_LEFT_INDENT),
                    Some(SpecialIndentType::Hanging(BULLET_HANGING_INDENT)),
                    None,
                    None,
                )
                .add_run(Run::new().add_text(line.content)),
            LineRole::Divider => rule_paragraph(),
            LineRole::Body => Paragraph::new().add_run(Run::new().add_text(line.content)),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn rule_paragraph() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(RULE_TEXT))
}
