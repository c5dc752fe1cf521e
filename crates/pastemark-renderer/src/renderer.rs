//! Event-stream HTML renderer.

use std::fmt::Write;

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::document::wrap_document;
use crate::state::{CodeBlockState, ImageState, TableState, escape_html};

/// Checked ballot box, rendered for `- [x]` items.
const CHECKBOX_CHECKED: &str = "&#x2611;";
/// Empty ballot box, rendered for `- [ ]` items.
const CHECKBOX_UNCHECKED: &str = "&#x2610;";

/// Thematic break placeholder. `<hr>` is frequently dropped during HTML→RTF
/// conversion; a border-top on a near-invisible paragraph survives.
const THEMATIC_BREAK: &str = "<p style=\"border-top: 1px solid #ddd; margin: 1em 0; \
                              padding: 0; font-size: 1px; line-height: 0;\">&nbsp;</p>\n";

/// Block container the renderer is currently inside.
///
/// Tracks just enough nesting to decide whether a paragraph is a direct
/// child of a task-list item (and must lose its `<p>` wrapper so the glyph
/// and text share a line).
enum Container {
    Item,
    TaskItem,
    Blockquote,
}

/// Parser options matching the syntax the clipboard pipeline targets.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown into a complete styled HTML document.
///
/// `font_size` is the base body font size in pixels (typically 14).
#[must_use]
pub fn render(markdown: &str, font_size: u32) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    wrap_document(&render_fragment(parser), font_size)
}

/// Render an event stream into an HTML fragment (no document wrapper).
#[must_use]
pub fn render_fragment<'a, I>(events: I) -> String
where
    I: Iterator<Item = Event<'a>>,
{
    let mut renderer = HtmlRenderer::new();
    for event in events {
        renderer.process_event(event);
    }
    renderer.finish()
}

/// Depth-first HTML renderer over a markdown event stream.
///
/// One value per render call: the table, code-block and image state are
/// transient and never shared across calls, which keeps concurrent renders
/// on separate threads independent.
///
/// Unrecognized node kinds fall back to rendering their children with no
/// wrapping markup; rendering never fails for a structurally valid stream.
pub struct HtmlRenderer {
    output: String,
    table: TableState,
    code: Option<CodeBlockState>,
    images: Vec<ImageState>,
    containers: Vec<Container>,
    /// `<li>` emission is deferred until we know whether the item carries a
    /// task-list marker.
    item_pending: bool,
    /// Same deferral for the `<p>` of a loose list item, whose marker event
    /// arrives after the paragraph opens.
    paragraph_pending: bool,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            table: TableState::default(),
            code: None,
            images: Vec::new(),
            containers: Vec::new(),
            item_pending: false,
            paragraph_pending: false,
        }
    }

    /// Consume the renderer and return the accumulated fragment.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.flush_pending();
        std::mem::take(&mut self.output)
    }

    /// Destination for inline output: the innermost image's alt buffer if an
    /// image is being rendered, the main output otherwise.
    fn out(&mut self) -> &mut String {
        match self.images.last_mut() {
            Some(image) => &mut image.alt,
            None => &mut self.output,
        }
    }

    fn push(&mut self, content: &str) {
        self.out().push_str(content);
    }

    /// Emit deferred `<li>`/`<p>` openers for an item that turned out not to
    /// carry a task-list marker.
    fn flush_pending(&mut self) {
        if self.item_pending {
            self.item_pending = false;
            self.push("<li>");
        }
        if self.paragraph_pending {
            self.paragraph_pending = false;
            self.push("<p>");
        }
    }

    /// True when the current block is a direct child of a task-list item.
    fn in_task_item(&self) -> bool {
        matches!(self.containers.last(), Some(Container::TaskItem))
    }

    pub fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.hard_break(),
            Event::Rule => self.thematic_break(),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // No children to degrade to; render nothing.
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.item_pending {
                    // Loose list item: the task-list marker (if any) arrives
                    // after the paragraph opens, so defer this one too.
                    self.paragraph_pending = true;
                } else if !self.in_task_item() {
                    self.push("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                self.flush_pending();
                let _ = write!(self.out(), "<h{}>", heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => {
                self.flush_pending();
                self.containers.push(Container::Blockquote);
                self.push("<blockquote>");
            }
            Tag::CodeBlock(kind) => {
                self.flush_pending();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let lang = info.split_whitespace().next().unwrap_or("");
                        (!lang.is_empty()).then(|| lang.to_owned())
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBlockState::new(language));
            }
            Tag::List(start) => {
                self.flush_pending();
                // Start offsets are dropped on purpose: the RTF encoders this
                // output targets ignore the start attribute.
                self.push(if start.is_some() { "<ol>" } else { "<ul>" });
            }
            Tag::Item => {
                self.flush_pending();
                self.containers.push(Container::Item);
                self.item_pending = true;
            }
            Tag::Table(alignments) => {
                self.flush_pending();
                self.table.start(alignments);
                self.push("<table>");
            }
            Tag::TableHead => {
                self.table.begin_head();
                self.push("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.begin_row();
                self.push("<tr>");
            }
            Tag::TableCell => {
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let style = self.table.alignment_style();
                let _ = write!(self.out(), "<{tag}{style}>");
            }
            Tag::Emphasis => {
                self.flush_pending();
                self.push("<em>");
            }
            Tag::Strong => {
                self.flush_pending();
                self.push("<strong>");
            }
            Tag::Strikethrough => {
                self.flush_pending();
                self.push("<del>");
            }
            Tag::Link { dest_url, .. } => {
                self.flush_pending();
                let _ = write!(self.out(), "<a href=\"{}\">", escape_html(&dest_url));
            }
            Tag::Image { dest_url, .. } => {
                self.flush_pending();
                self.images.push(ImageState::new(dest_url.into_string()));
            }
            // Unrecognized block kinds: render children with no wrapping markup.
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.in_task_item() {
                    self.push("</p>\n");
                }
            }
            TagEnd::Heading(level) => {
                let _ = writeln!(self.out(), "</h{}>", heading_level_to_num(level));
            }
            TagEnd::BlockQuote(_) => {
                self.containers.pop();
                self.push("</blockquote>\n");
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    match code.language {
                        Some(language) => {
                            let _ = writeln!(
                                self.out(),
                                "<pre><code class=\"language-{}\">{}</code></pre>",
                                escape_html(&language),
                                escape_html(&code.content)
                            );
                        }
                        None => {
                            let _ = writeln!(
                                self.out(),
                                "<pre><code>{}</code></pre>",
                                escape_html(&code.content)
                            );
                        }
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.push(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => {
                self.flush_pending();
                self.containers.pop();
                self.push("</li>\n");
            }
            TagEnd::Table => {
                self.table.finish();
                self.push("</tbody>\n</table>\n");
            }
            TagEnd::TableHead => {
                self.table.end_head();
                self.push("</tr>\n</thead>\n<tbody>");
            }
            TagEnd::TableRow => {
                self.push("</tr>\n");
            }
            TagEnd::TableCell => {
                let close = if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                };
                self.push(close);
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push("</em>"),
            TagEnd::Strong => self.push("</strong>"),
            TagEnd::Strikethrough => self.push("</del>"),
            TagEnd::Link => self.push("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.images.pop() {
                    let _ = write!(
                        self.out(),
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_html(&image.src),
                        escape_html(&image.alt)
                    );
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.content.push_str(text);
            return;
        }
        self.flush_pending();
        self.push(&escape_html(text));
    }

    fn inline_code(&mut self, code: &str) {
        self.flush_pending();
        let _ = write!(self.out(), "<code>{}</code>", escape_html(code));
    }

    /// Raw HTML from the source document is trusted and passed through
    /// verbatim.
    fn raw_html(&mut self, html: &str) {
        self.flush_pending();
        self.push(html);
    }

    fn soft_break(&mut self) {
        self.flush_pending();
        self.push(" ");
    }

    fn hard_break(&mut self) {
        self.flush_pending();
        self.push("<br>");
    }

    fn thematic_break(&mut self) {
        self.flush_pending();
        self.push(THEMATIC_BREAK);
    }

    fn task_list_marker(&mut self, checked: bool) {
        if self.item_pending {
            self.item_pending = false;
            // Swallow the deferred paragraph opener: glyph and text must
            // share a line, and block spacing would push the text down.
            self.paragraph_pending = false;
            if let Some(slot) = self.containers.last_mut() {
                *slot = Container::TaskItem;
            }
            let glyph = if checked {
                CHECKBOX_CHECKED
            } else {
                CHECKBOX_UNCHECKED
            };
            let _ = write!(self.out(), "<li style=\"list-style: none;\">{glyph} ");
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Parser;

    use super::*;

    fn render_body(markdown: &str) -> String {
        render_fragment(Parser::new_ext(markdown, parser_options()))
    }

    #[test]
    fn headings_produce_matching_tags() {
        for level in 1..=6 {
            let markdown = format!("{} Heading {level}", "#".repeat(level));
            let html = render_body(&markdown);
            assert_eq!(html, format!("<h{level}>Heading {level}</h{level}>\n"));
        }
    }

    #[test]
    fn paragraph_is_wrapped_and_terminated() {
        assert_eq!(render_body("Hello, world!"), "<p>Hello, world!</p>\n");
    }

    #[test]
    fn bold_produces_strong() {
        assert_eq!(
            render_body("**bold text**"),
            "<p><strong>bold text</strong></p>\n"
        );
    }

    #[test]
    fn italic_produces_em() {
        assert_eq!(render_body("*italic text*"), "<p><em>italic text</em></p>\n");
    }

    #[test]
    fn strikethrough_produces_del() {
        assert_eq!(render_body("~~deleted~~"), "<p><del>deleted</del></p>\n");
    }

    #[test]
    fn nested_emphasis_nests_tags() {
        assert_eq!(
            render_body("**bold with *italic* inside**"),
            "<p><strong>bold with <em>italic</em> inside</strong></p>\n"
        );
    }

    #[test]
    fn link_produces_anchor() {
        assert_eq!(
            render_body("[Example](https://example.com)"),
            "<p><a href=\"https://example.com\">Example</a></p>\n"
        );
    }

    #[test]
    fn image_produces_img_with_alt() {
        assert_eq!(
            render_body("![Alt](image.png)"),
            "<p><img src=\"image.png\" alt=\"Alt\"></p>\n"
        );
    }

    #[test]
    fn inline_code_produces_code_tag() {
        assert_eq!(
            render_body("Use `print()`"),
            "<p>Use <code>print()</code></p>\n"
        );
    }

    #[test]
    fn code_block_with_language() {
        let html = render_body("```rust\nlet x = 42;\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">let x = 42;\n</code></pre>\n"
        );
    }

    #[test]
    fn code_block_without_language() {
        let html = render_body("```\nsome code\n```");
        assert_eq!(html, "<pre><code>some code\n</code></pre>\n");
    }

    #[test]
    fn code_block_content_is_escaped() {
        let html = render_body("```\nif a < b && c > d {}\n```");
        assert!(html.contains("a &lt; b &amp;&amp; c &gt; d"));
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            render_body("- Item 1\n- Item 2"),
            "<ul><li>Item 1</li>\n<li>Item 2</li>\n</ul>\n"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            render_body("1. First\n2. Second"),
            "<ol><li>First</li>\n<li>Second</li>\n</ol>\n"
        );
    }

    #[test]
    fn ordered_list_start_offset_is_dropped() {
        let html = render_body("3. Third\n4. Fourth");
        assert!(html.starts_with("<ol><li>"));
    }

    #[test]
    fn task_list_renders_glyphs_without_paragraphs() {
        let html = render_body("- [x] Done\n- [ ] Not done");
        assert_eq!(
            html,
            "<ul><li style=\"list-style: none;\">&#x2611; Done</li>\n\
             <li style=\"list-style: none;\">&#x2610; Not done</li>\n</ul>\n"
        );
    }

    #[test]
    fn loose_task_list_suppresses_paragraph_wrapper() {
        // Blank line between items makes the list loose; items become
        // paragraph-wrapped, which must be undone for task items.
        let html = render_body("- [x] Done\n\n- [ ] Not done");
        assert!(html.contains("<li style=\"list-style: none;\">&#x2611; Done</li>"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn plain_items_in_loose_lists_keep_paragraphs() {
        let html = render_body("- first\n\n- second");
        assert!(html.contains("<li><p>first</p>\n</li>"));
    }

    #[test]
    fn blockquote_wraps_inner_blocks() {
        assert_eq!(
            render_body("> A quote"),
            "<blockquote><p>A quote</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn thematic_break_is_a_bordered_paragraph() {
        let html = render_body("---");
        assert!(html.contains("border-top: 1px solid #ddd"));
        assert!(html.contains("&nbsp;"));
        assert!(!html.contains("<hr"));
    }

    #[test]
    fn table_produces_full_structure() {
        let html = render_body("| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1 | Cell 2 |");
        assert_eq!(
            html,
            "<table><thead><tr><th>Header 1</th><th>Header 2</th></tr>\n</thead>\n\
             <tbody><tr><td>Cell 1</td><td>Cell 2</td></tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn right_aligned_column_styles_every_cell() {
        let html = render_body("| a | b |\n|---|---:|\n| 1 | 2 |\n| 3 | 4 |");
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<th style=\"text-align: right;\">b</th>"));
        assert!(html.contains("<td style=\"text-align: right;\">2</td>"));
        assert!(html.contains("<td style=\"text-align: right;\">4</td>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<td>3</td>"));
    }

    #[test]
    fn center_and_left_alignments() {
        let html = render_body("| a | b |\n|:-:|:--|\n| 1 | 2 |");
        assert!(html.contains("<th style=\"text-align: center;\">a</th>"));
        assert!(html.contains("<th style=\"text-align: left;\">b</th>"));
        assert!(html.contains("<td style=\"text-align: center;\">1</td>"));
        assert!(html.contains("<td style=\"text-align: left;\">2</td>"));
    }

    #[test]
    fn text_content_is_escaped_once() {
        assert_eq!(render_body("A & B < C"), "<p>A &amp; B &lt; C</p>\n");
    }

    #[test]
    fn link_destination_is_escaped() {
        let html = render_body("[x](https://example.com/?a=1&b=2)");
        assert!(html.contains("href=\"https://example.com/?a=1&amp;b=2\""));
    }

    #[test]
    fn raw_inline_html_passes_through() {
        let html = render_body("before <kbd>K</kbd> after");
        assert!(html.contains("<kbd>K</kbd>"));
    }

    #[test]
    fn raw_html_block_passes_through() {
        let html = render_body("<div class=\"x\">\nraw\n</div>");
        assert!(html.contains("<div class=\"x\">"));
    }

    #[test]
    fn soft_break_renders_as_space() {
        assert_eq!(render_body("line one\nline two"), "<p>line one line two</p>\n");
    }

    #[test]
    fn hard_break_renders_as_br() {
        assert_eq!(
            render_body("line one  \nline two"),
            "<p>line one<br>line two</p>\n"
        );
    }

    #[test]
    fn nested_blockquote_lists() {
        let html = render_body("> quote\n>\n> - item");
        assert!(html.contains("<blockquote><p>quote</p>\n<ul><li>item</li>\n</ul>\n</blockquote>\n"));
    }

    #[test]
    fn end_to_end_document() {
        let html = render("# Title\n\n**bold** and *italic*.\n\n- item", 14);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>item</li>"));
        assert!(html.contains("font-size: 14px"));
    }
}
