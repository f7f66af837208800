//! Line classifier — assigns each line of a rewritten resume one structural role.
//!
//! Rules are an ordered list evaluated top to bottom; the first matching predicate
//! wins and `Body` is the fallback, so every line gets exactly one role.
//! Classification looks at the trimmed line only. No state crosses line boundaries.

use std::sync::LazyLock;

use regex::Regex;

/// Literal bullet glyph the rewrite prompt asks the model to use.
pub const BULLET_GLYPH: char = '•';

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z ]{3,}$").expect("heading pattern is valid"));

static DIVIDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-–—]{5,}$").expect("divider pattern is valid"));

/// Structural role of one resume line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Blank,
    Heading,
    BulletItem,
    Divider,
    Body,
}

/// A line paired with its role. `content` is the trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub role: LineRole,
    pub content: &'a str,
}

type Predicate = fn(&str) -> bool;

/// Ordered `(predicate, role)` rules with a `Body` fallback.
#[derive(Clone)]
pub struct LineClassifier {
    rules: Vec<(Predicate, LineRole)>,
}

impl LineClassifier {
    /// Rules for the Word target: only the literal `•` glyph marks a bullet.
    pub fn word() -> Self {
        Self::with_bullet_rule(starts_with_bullet_glyph)
    }

    /// Rules for the PDF target, whose text has had `•` rewritten to `-`.
    pub fn pdf() -> Self {
        Self::with_bullet_rule(starts_with_dash_marker)
    }

    fn with_bullet_rule(bullet: Predicate) -> Self {
        Self {
            rules: vec![
                (is_blank as Predicate, LineRole::Blank),
                (is_heading as Predicate, LineRole::Heading),
                (bullet, LineRole::BulletItem),
                (is_divider as Predicate, LineRole::Divider),
            ],
        }
    }

    pub fn classify_line<'a>(&self, line: &'a str) -> ClassifiedLine<'a> {
        let content = line.trim();
        let role = self
            .rules
            .iter()
            .find(|(matches, _)| matches(content))
            .map(|(_, role)| *role)
            .unwrap_or(LineRole::Body);
        ClassifiedLine { role, content }
    }

    /// Classifies every `\n`-separated line in document order.
    pub fn classify<'a>(&self, text: &'a str) -> Vec<ClassifiedLine<'a>> {
        text.split('\n').map(|line| self.classify_line(line)).collect()
    }
}

fn is_blank(line: &str) -> bool {
    line.is_empty()
}

fn is_heading(line: &str) -> bool {
    HEADING_RE.is_match(line)
}

fn is_divider(line: &str) -> bool {
    DIVIDER_RE.is_match(line)
}

fn starts_with_bullet_glyph(line: &str) -> bool {
    line.starts_with(BULLET_GLYPH)
}

// A run of dashes is a rule, not a bullet, even though it starts with '-'.
fn starts_with_dash_marker(line: &str) -> bool {
    (line.starts_with('-') || line.starts_with(BULLET_GLYPH))
        && !line.chars().all(|c| matches!(c, '-' | '–' | '—'))
}
