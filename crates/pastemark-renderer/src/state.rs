//! HTML escaping and transient per-render state.

use std::borrow::Cow;

use pulldown_cmark::Alignment;

/// Escape `&`, `<`, `>` and `"` to their named HTML entities.
///
/// Single-pass, so an ampersand emitted as part of an entity is never
/// re-escaped. Used for element content and attribute values alike.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Column alignments and cursor for the table currently being rendered.
///
/// Scoped to a single table traversal; [`TableState::finish`] clears it when
/// the table closes.
#[derive(Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    column: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.column = 0;
    }

    pub(crate) fn finish(&mut self) {
        self.alignments.clear();
    }

    pub(crate) fn begin_head(&mut self) {
        self.in_head = true;
        self.column = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn begin_row(&mut self) {
        self.column = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.column += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current column, or `""` when the
    /// column has no declared alignment.
    pub(crate) fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.column) {
            Some(Alignment::Left) => r#" style="text-align: left;""#,
            Some(Alignment::Center) => r#" style="text-align: center;""#,
            Some(Alignment::Right) => r#" style="text-align: right;""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Buffered fenced/indented code block content.
pub(crate) struct CodeBlockState {
    pub(crate) language: Option<String>,
    pub(crate) content: String,
}

impl CodeBlockState {
    pub(crate) fn new(language: Option<String>) -> Self {
        Self {
            language,
            content: String::new(),
        }
    }
}

/// Alt-text collection for an image currently being rendered.
pub(crate) struct ImageState {
    pub(crate) src: String,
    pub(crate) alt: String,
}

impl ImageState {
    pub(crate) fn new(src: String) -> Self {
        Self {
            src,
            alt: String::new(),
        }
    }
}
