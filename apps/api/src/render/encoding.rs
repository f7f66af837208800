//! Lossy text preparation for the PDF target.
//!
//! The PDF writer only uses the base-14 Helvetica faces with `WinAnsiEncoding`, so every
//! string it draws must fit in one byte per character. Text is NFKD-normalised first
//! (which turns ligatures and full-width forms into plain letters and splits accents off
//! their base letters), then anything outside Latin-1 is discarded. Callers get the
//! count of discarded characters back so the loss can be logged and reported.

use unicode_normalization::UnicodeNormalization;

use crate::layout::classify::BULLET_GLYPH;

const EN_DASH: char = '\u{2013}';
const EM_DASH: char = '\u{2014}';

/// Text reduced to characters the PDF fonts can draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latin1Text {
    pub text: String,
    pub dropped: usize,
}

/// Rewrites `•`, en dashes and em dashes to `-`, normalises, and drops anything not
/// representable in Latin-1.
pub fn prepare_pdf_text(text: &str) -> Latin1Text {
    let mut dropped = 0;
    let text = text
        .replace([BULLET_GLYPH, EN_DASH, EM_DASH], "-")
        .nfkd()
        .filter(|&c| {
            let keep = is_latin1_printable(c);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    Latin1Text { text, dropped }
}

/// Encodes already-prepared text as single bytes. Characters that slipped past
/// `prepare_pdf_text` are skipped rather than mangled.
pub fn to_latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|&c| is_latin1_printable(c))
        .map(|c| c as u32 as u8)
        .collect()
}

// C1 controls map to unrelated glyphs under WinAnsi, so they go too.
fn is_latin1_printable(c: char) -> bool {
    let code = c as u32;
    code <= 0xFF && !(0x80..=0x9F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through_unchanged() {
        let prepared = prepare_pdf_text("EXPERIENCE\nDid work. (2019-2023) 100%");
        assert_eq!(prepared.text, "EXPERIENCE\nDid work. (2019-2023) 100%");
        assert_eq!(prepared.dropped, 0);
    }

    #[test]
    fn test_bullet_glyph_becomes_dash() {
        let prepared = prepare_pdf_text("• Built a thing");
        assert_eq!(prepared.text, "- Built a thing");
        assert_eq!(prepared.dropped, 0);
    }

    #[test]
    fn test_en_and_em_dashes_fold_to_hyphen() {
        let prepared = prepare_pdf_text("2019–2023 — Led the platform team");
        assert_eq!(prepared.text, "2019-2023 - Led the platform team");
        assert_eq!(prepared.dropped, 0);
    }

    #[test]
    fn test_dash_divider_lines_survive_as_hyphen_runs() {
        let prepared = prepare_pdf_text("A\n—————\n–––––\nB");
        assert_eq!(prepared.text, "A\n-----\n-----\nB");
        assert_eq!(prepared.dropped, 0);
    }

    #[test]
    fn test_emoji_and_curly_quotes_dropped_without_failure() {
        let prepared = prepare_pdf_text("Shipped 🚀 \u{201c}fast\u{201d}");
        assert_eq!(prepared.text, "Shipped  fast");
        assert_eq!(prepared.dropped, 3);
    }

    #[test]
    fn test_accents_decomposed_to_base_letter() {
        let prepared = prepare_pdf_text("Résumé");
        assert_eq!(prepared.text, "Resume");
        assert_eq!(prepared.dropped, 2);
    }

    #[test]
    fn test_compatibility_forms_fold_to_ascii() {
        // U+FB01 LATIN SMALL LIGATURE FI decomposes to "fi" under NFKD.
        let prepared = prepare_pdf_text("\u{FB01}nance");
        assert_eq!(prepared.text, "finance");
        assert_eq!(prepared.dropped, 0);
    }

    #[test]
    fn test_latin1_bytes_are_single_byte() {
        assert_eq!(to_latin1_bytes("A-z"), b"A-z".to_vec());
        assert_eq!(to_latin1_bytes("\u{00A3}5"), vec![0xA3, b'5']);
        assert_eq!(to_latin1_bytes("x\u{2014}y"), b"xy".to_vec());
    }
}
