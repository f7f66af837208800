//! PDF writer — lays classified resume lines onto A4 pages and serialises them with lopdf.
//!
//! The layout is a single top-down flow. Every block checks whether it still fits above
//! the bottom margin and starts a new page if it does not; nothing else ever breaks a
//! page. Text is drawn with the base-14 Helvetica faces in `WinAnsiEncoding`, so it must
//! be prepared with `encoding::prepare_pdf_text` first (which is lossy).

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use tracing::debug;

use crate::layout::font_metrics::{get_metrics, FontFace, PT_PER_MM};
use crate::layout::{HeaderBlock, LineClassifier, LineRole};
use crate::render::encoding::{prepare_pdf_text, to_latin1_bytes};
use crate::render::RenderError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;
/// Horizontal padding inside a text cell.
const CELL_PADDING_MM: f32 = 1.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const RULE_WIDTH_MM: f32 = 0.2;

const NAME_SIZE_PT: f32 = 14.0;
const HEADING_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 11.0;

const NAME_LINE_MM: f32 = 10.0;
const HEADING_LINE_MM: f32 = 10.0;
const BODY_LINE_MM: f32 = 8.0;
const BLANK_GAP_MM: f32 = 4.0;
const HEADER_GAP_MM: f32 = 4.0;
const AFTER_HEADER_RULE_MM: f32 = 5.0;
const DIVIDER_PADDING_MM: f32 = 5.0;
const BULLET_INDENT_MM: f32 = 5.0;

/// Rendered PDF plus how many characters the encoding step discarded.
#[derive(Debug)]
pub struct PdfOutput {
    pub bytes: Vec<u8>,
    pub dropped_characters: usize,
    pub page_count: usize,
}

/// Renders the header block and the rewritten resume text as a PDF.
pub fn render_pdf(text: &str, header: &HeaderBlock) -> Result<PdfOutput, RenderError> {
    let name = prepare_pdf_text(&header.name);
    let contact = prepare_pdf_text(&header.contact_line);
    let links = prepare_pdf_text(&header.links_line);
    let body = prepare_pdf_text(text);

    let mut flow = PdfFlow::new();

    flow.set_font(FontFace::HelveticaBold, NAME_SIZE_PT);
    flow.paragraph(0.0, NAME_LINE_MM, &name.text);
    flow.set_font(FontFace::Helvetica, BODY_SIZE_PT);
    flow.paragraph(0.0, BODY_LINE_MM, &contact.text);
    flow.paragraph(0.0, BODY_LINE_MM, &links.text);
    flow.gap(HEADER_GAP_MM);
    flow.rule();
    flow.gap(AFTER_HEADER_RULE_MM);

    for line in LineClassifier::pdf().classify(&body.text) {
        match line.role {
            LineRole::Blank => flow.gap(BLANK_GAP_MM),
            LineRole::Heading => {
                flow.set_font(FontFace::HelveticaBold, HEADING_SIZE_PT);
                flow.paragraph(0.0, HEADING_LINE_MM, line.content);
                flow.set_font(FontFace::Helvetica, BODY_SIZE_PT);
            }
            LineRole::BulletItem => flow.paragraph(BULLET_INDENT_MM, BODY_LINE_MM, line.content),
            LineRole::Divider => {
                flow.advance(DIVIDER_PADDING_MM);
                flow.rule();
                flow.advance(DIVIDER_PADDING_MM);
            }
            LineRole::Body => flow.paragraph(0.0, BODY_LINE_MM, line.content),
        }
    }

    let dropped_characters = name.dropped + contact.dropped + links.dropped + body.dropped;
    let page_count = flow.pages.len();
    let bytes = flow.finish()?;
    debug!(page_count, bytes = bytes.len(), "PDF rendered");

    Ok(PdfOutput {
        bytes,
        dropped_characters,
        page_count,
    })
}

/// Top-down cursor over a growing list of pages.
/// `y` is the distance from the top edge of the current page in millimetres.
struct PdfFlow {
    pages: Vec<Vec<Operation>>,
    y: f32,
    face: FontFace,
    size_pt: f32,
}

impl PdfFlow {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: MARGIN_MM,
            face: FontFace::Helvetica,
            size_pt: BODY_SIZE_PT,
        }
    }

    fn set_font(&mut self, face: FontFace, size_pt: f32) {
        self.face = face;
        self.size_pt = size_pt;
    }

    fn page_bottom() -> f32 {
        PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM
    }

    /// Starts a new page when a block of `height` would cross the bottom margin.
    fn break_page_if_needed(&mut self, height: f32) {
        if self.y + height > Self::page_bottom() {
            self.pages.push(Vec::new());
            self.y = MARGIN_MM;
        }
    }

    /// Vertical space that may run past the bottom margin; the next block breaks instead.
    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    /// Vertical space that counts as a block of its own.
    fn advance(&mut self, height: f32) {
        self.break_page_if_needed(height);
        self.y += height;
    }

    /// Wraps `text` to the content width minus `indent` and draws one line per `line_height`.
    /// Continuation lines keep the indent.
    fn paragraph(&mut self, indent: f32, line_height: f32, text: &str) {
        let width = CONTENT_WIDTH_MM - indent - 2.0 * CELL_PADDING_MM;
        for line in get_metrics(self.face).wrap(text, self.size_pt, width) {
            self.break_page_if_needed(line_height);
            if !line.is_empty() {
                self.draw_text(MARGIN_MM + indent + CELL_PADDING_MM, line_height, &line);
            }
            self.y += line_height;
        }
    }

    /// Draws a single text line vertically centred in a cell of `line_height` at the cursor.
    fn draw_text(&mut self, x_mm: f32, line_height: f32, text: &str) {
        let baseline_mm = self.y + 0.5 * line_height + 0.3 * self.size_pt / PT_PER_MM;
        let operations = [
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![self.face.resource_name().into(), real(self.size_pt)],
            ),
            Operation::new("Td", vec![mm(x_mm), mm(PAGE_HEIGHT_MM - baseline_mm)]),
            Operation::new("Tj", vec![Object::string_literal(to_latin1_bytes(text))]),
            Operation::new("ET", vec![]),
        ];
        self.current_page().extend(operations);
    }

    /// Full-width horizontal rule at the cursor. Does not move the cursor.
    fn rule(&mut self) {
        self.break_page_if_needed(0.0);
        let y = mm(PAGE_HEIGHT_MM - self.y);
        let operations = [
            Operation::new("w", vec![mm(RULE_WIDTH_MM)]),
            Operation::new("m", vec![mm(MARGIN_MM), y.clone()]),
            Operation::new("l", vec![mm(MARGIN_MM + CONTENT_WIDTH_MM), y]),
            Operation::new("S", vec![]),
        ];
        self.current_page().extend(operations);
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        // `pages` starts with one page and only ever grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });
        let media_box: Vec<Object> = vec![0.into(), 0.into(), mm(PAGE_WIDTH_MM), mm(PAGE_HEIGHT_MM)];

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }
                .encode()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => media_box.clone(),
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(bytes)
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn mm(value_mm: f32) -> Object {
    real(value_mm * PT_PER_MM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> HeaderBlock {
        HeaderBlock {
            name: "JANE DOE".to_string(),
            contact_line: "Berlin - jane@example.com - +49-000".to_string(),
            links_line: "linkedin.com/in/janedoe - github.com/janedoe".to_string(),
        }
    }

    #[test]
    fn test_render_pdf_produces_loadable_document() {
        let text = "EXPERIENCE\n• Built a thing\n-----\nDid work.";
        let output = render_pdf(text, &header()).unwrap();
        assert!(output.bytes.starts_with(b"%PDF-1.4"));
        assert_eq!(output.page_count, 1);
        assert_eq!(output.dropped_characters, 0);

        let doc = Document::load_mem(&output.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_rendered_text_is_extractable() {
        let output = render_pdf("SKILLS\nRust and Go", &header()).unwrap();
        let doc = Document::load_mem(&output.bytes).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("SKILLS"), "extracted: {text:?}");
        assert!(text.contains("JANE DOE"), "extracted: {text:?}");
    }

    #[test]
    fn test_long_resume_flows_onto_more_pages() {
        let text = (0..120)
            .map(|i| format!("• Delivered project number {i} with measurable impact"))
            .collect::<Vec<_>>()
            .join("\n");
        let output = render_pdf(&text, &header()).unwrap();
        assert!(output.page_count > 1, "expected pagination, got {}", output.page_count);
        let doc = Document::load_mem(&output.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), output.page_count);
    }

    #[test]
    fn test_unrepresentable_characters_are_counted_not_fatal() {
        let output = render_pdf("SUMMARY\n\u{201c}Engineer\u{201d} 🚀", &header()).unwrap();
        assert_eq!(output.dropped_characters, 3);
    }

    fn stroke_count(output: &PdfOutput) -> usize {
        let doc = Document::load_mem(&output.bytes).unwrap();
        let page_id = doc.page_iter().next().unwrap();
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        content.operations.iter().filter(|op| op.operator == "S").count()
    }

    #[test]
    fn test_unicode_dash_dividers_draw_a_rule() {
        let hyphens = render_pdf("A\n-----\nB", &header()).unwrap();
        // One stroke for the header rule, one for the divider.
        assert_eq!(stroke_count(&hyphens), 2);

        for divider in ["—————", "–––––", "—–—–—"] {
            let output = render_pdf(&format!("A\n{divider}\nB"), &header()).unwrap();
            assert_eq!(stroke_count(&output), 2, "{divider:?} should draw a rule");
            assert_eq!(output.dropped_characters, 0);
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let text = "EDUCATION\nBSc Computer Science\n\n• Graduated with honours";
        let a = render_pdf(text, &header()).unwrap();
        let b = render_pdf(text, &header()).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_flow_breaks_before_crossing_bottom_margin() {
        let mut flow = PdfFlow::new();
        flow.y = PdfFlow::page_bottom() - 3.0;
        flow.paragraph(0.0, BODY_LINE_MM, "next line");
        assert_eq!(flow.pages.len(), 2);
        assert!((flow.y - (MARGIN_MM + BODY_LINE_MM)).abs() < 1e-4);
    }

    #[test]
    fn test_gap_alone_never_breaks_page() {
        let mut flow = PdfFlow::new();
        flow.y = PdfFlow::page_bottom() - 1.0;
        flow.gap(BLANK_GAP_MM);
        assert_eq!(flow.pages.len(), 1);
    }
}
