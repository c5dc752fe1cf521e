//! Complete-document wrapper with the embedded stylesheet.

use std::fmt::Write;

/// Typography defaults applied to every converted document. Only the body
/// font size varies per call; everything below is static.
const STYLESHEET_STATIC: &str = "\
h1, h2, h3, h4, h5, h6 { margin-top: 1em; margin-bottom: 0.5em; font-weight: 600; }
h1 { font-size: 1.8em; } h2 { font-size: 1.5em; } h3 { font-size: 1.3em; }
code { background-color: #f0f0f0; padding: 2px 6px; border-radius: 3px; font-family: \"SF Mono\", Menlo, monospace; font-size: 0.9em; }
pre { background-color: #f6f8fa; padding: 12px; border-radius: 6px; overflow-x: auto; }
pre code { background: none; padding: 0; }
blockquote { border-left: 4px solid #ddd; margin: 0; padding: 0 1em; color: #666; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 8px 12px; text-align: left; }
th { background-color: #f6f8fa; font-weight: 600; }
hr { border: none; border-top: 1px solid #ddd; margin: 1.5em 0; }
a { color: #0366d6; text-decoration: none; }
img { max-width: 100%; }
del { color: #999; }
ul, ol { padding-left: 2em; }
";

/// Wrap a rendered body fragment in a minimal complete HTML document.
///
/// `font_size` is substituted into the body font-size declaration; the rest
/// of the stylesheet is identical across calls.
#[must_use]
pub fn wrap_document(body: &str, font_size: u32) -> String {
    let mut html = String::with_capacity(body.len() + STYLESHEET_STATIC.len() + 256);
    html.push_str("<!DOCTYPE html>\n<html>\n<head><style>\n");
    let _ = writeln!(
        html,
        "body {{ font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, \
         Arial, sans-serif; font-size: {font_size}px; line-height: 1.6; color: #333; }}"
    );
    html.push_str(STYLESHEET_STATIC);
    html.push_str("</style></head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_font_size() {
        let html = wrap_document("<p>x</p>\n", 18);
        assert!(html.contains("font-size: 18px"));
        assert!(!html.contains("font-size: 14px;"));
    }

    #[test]
    fn embeds_body_between_tags() {
        let html = wrap_document("<p>hello</p>\n", 14);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body>\n<p>hello</p>\n"));
        assert!(html.ends_with("</body>\n</html>"));
    }

    #[test]
    fn stylesheet_is_static_apart_from_font_size() {
        let a = wrap_document("", 14);
        let b = wrap_document("", 16);
        assert_eq!(
            a.replace("font-size: 14px", "font-size: 16px"),
            b
        );
    }
}
