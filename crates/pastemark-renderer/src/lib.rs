//! Markdown to HTML rendering tuned for rich-text conversion.
//!
//! This crate renders a [`pulldown_cmark`] event stream into a complete,
//! styled HTML document intended to be fed to an HTML→RTF encoder rather
//! than a browser. That target shapes several output choices:
//!
//! - thematic breaks render as a bordered near-invisible paragraph because
//!   `<hr>` is frequently dropped by rich-text encoders;
//! - task-list items render a unicode ballot-box glyph instead of an
//!   `<input>` element, with paragraph wrappers suppressed so the glyph and
//!   text share a line;
//! - table cells carry inline `text-align` styles rather than CSS classes.
//!
//! # Example
//!
//! ```
//! let html = pastemark_renderer::render("# Hello\n\n**Bold** text", 14);
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

mod document;
mod renderer;
mod state;

pub use document::wrap_document;
pub use renderer::{HtmlRenderer, parser_options, render, render_fragment};
pub use state::escape_html;
