//! Match Highlighting
//!
//! Splits display text into plain and matched runs so a front end can decorate
//! every case-insensitive occurrence of the query. This is independent string
//! processing, not a reuse of the SQL matcher, but it folds case the way SQLite
//! `LIKE` does: ASCII letters only. `É` and `é` are different characters here.

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Matched(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Matched(text) => text,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Matched(_))
    }
}

/// Compiled highlighter for one query.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// A blank (or uncompilable) query highlights nothing.
    pub fn new(query: &str) -> Self {
        let needle = query.trim();
        if needle.is_empty() {
            return Self { pattern: None };
        }

        let pattern = Regex::new(&ascii_fold_pattern(needle))
            .map_err(|e| tracing::warn!("Cannot highlight '{}': {}", needle, e))
            .ok();

        Self { pattern }
    }

    pub fn segments(&self, text: &str) -> Vec<Segment> {
        let text = text.trim();

        let Some(pattern) = &self.pattern else {
            return vec![Segment::Plain(text.to_string())];
        };

        let mut segments = Vec::new();
        let mut cursor = 0;
        for m in pattern.find_iter(text) {
            if m.start() > cursor {
                segments.push(Segment::Plain(text[cursor..m.start()].to_string()));
            }
            segments.push(Segment::Matched(m.as_str().to_string()));
            cursor = m.end();
        }
        if cursor < text.len() || segments.is_empty() {
            segments.push(Segment::Plain(text[cursor..].to_string()));
        }

        segments
    }

    /// Renders `text` with each match wrapped in `open`/`close`.
    pub fn render(&self, text: &str, open: &str, close: &str) -> String {
        self.segments(text)
            .iter()
            .map(|segment| match segment {
                Segment::Plain(text) => text.clone(),
                Segment::Matched(text) => format!("{open}{text}{close}"),
            })
            .collect()
    }
}

/// Literal pattern for `needle` where only ASCII letters match either case.
fn ascii_fold_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() * 4);
    for c in needle.chars() {
        if c.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(c.to_ascii_lowercase());
            pattern.push(c.to_ascii_uppercase());
            pattern.push(']');
        } else {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    pattern
}

/// One-shot form of [`Highlighter::segments`].
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    Highlighter::new(query).segments(text)
}
