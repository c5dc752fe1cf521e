//! Heuristic detection of Markdown syntax in plain text.
//!
//! Scores a text blob against a fixed table of weighted syntax patterns
//! (headings, emphasis, links, fenced code, tables, ...). Each pattern
//! contributes `min(matches, 3) * weight` to the total, so a wall of
//! identical markers cannot dominate the score. Callers compare the score
//! against a sensitivity threshold with [`detect`].
//!
//! Scoring is a pure function of the input: no state is kept between calls
//! and identical input always produces an identical score.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of matches a single pattern may contribute.
const MATCH_CAP: usize = 3;

/// A weighted syntax pattern.
struct PatternRule {
    regex: Regex,
    weight: u32,
}

impl PatternRule {
    /// Count matches, stopping at [`MATCH_CAP`].
    ///
    /// The scan resumes after capture group 1 when the pattern has one.
    /// Rules whose pattern consumes a boundary character around the
    /// construct (the italic rule) group the construct itself, so the
    /// trailing boundary stays available to the next match and adjacent
    /// occurrences each count.
    fn count_capped(&self, text: &str) -> usize {
        let mut count = 0;
        let mut at = 0;
        while count < MATCH_CAP {
            let Some(caps) = self.regex.captures_at(text, at) else {
                break;
            };
            let Some(span) = caps.get(1).or_else(|| caps.get(0)) else {
                break;
            };
            count += 1;
            at = span.end();
        }
        count
    }
}

fn rule(pattern: &str, weight: u32) -> PatternRule {
    PatternRule {
        regex: Regex::new(pattern).expect("invalid detection pattern"),
        weight,
    }
}

/// The detection rule table, compiled once.
///
/// Patterns that describe line-level constructs (headings, list items, fences,
/// blockquotes, task items, horizontal rules) are anchored per physical line
/// with `(?m)^`; the rest match anywhere in the text.
///
/// The italic pattern deliberately avoids look-around (unsupported by the
/// regex crate): the `(?:^|[^*])`/`(?:[^*]|$)` boundaries reject a lone `*`
/// and keep `**bold**` from double-counting as italic. The emphasized span
/// is grouped so counting resumes at its closing `*` and a shared boundary
/// character does not swallow the neighboring match.
static RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        // Headings: # through ######
        rule(r"(?m)^#{1,6}\s+.+", 3),
        // Bold: **text**
        rule(r"\*\*[^*]+\*\*", 2),
        // Italic: *text* with no adjacent asterisk
        rule(r"(?:^|[^*])(\*[^*]+\*)(?:[^*]|$)", 1),
        // Links: [text](url)
        rule(r"\[[^\]]+\]\([^)]+\)", 3),
        // Images: ![alt](url)
        rule(r"!\[[^\]]*\]\([^)]+\)", 3),
        // Unordered lists: - item, * item, + item
        rule(r"(?m)^\s*[-*+]\s+.+", 2),
        // Ordered lists: 1. item
        rule(r"(?m)^\s*\d+\.\s+.+", 2),
        // Fenced code block start
        rule(r"(?m)^```", 4),
        // Inline code: `code`
        rule(r"`[^`]+`", 2),
        // Blockquotes: > text
        rule(r"(?m)^>\s+.+", 2),
        // Table separator row: |---|
        rule(r"\|[-:]+\|", 4),
        // Task lists: - [ ] or - [x]
        rule(r"(?m)^\s*-\s+\[[ xX]\]\s+", 4),
        // Strikethrough: ~~text~~
        rule(r"~~[^~]+~~", 3),
        // Horizontal rules: --- or *** or ___
        rule(r"(?m)^-{3,}$|^\*{3,}$|^_{3,}$", 2),
        // Footnote references: [^1]
        rule(r"\[\^\d+\]", 3),
    ]
});

/// Score a text blob for Markdown-ness.
///
/// Returns the sum over all rules of `min(matches, 3) * weight`, where
/// matches are counted non-overlapping and leftmost-first. Empty input
/// scores 0.
#[must_use]
pub fn score(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }

    RULES
        .iter()
        .map(|rule| {
            let matches = rule.count_capped(text);
            u32::try_from(matches).unwrap_or(0) * rule.weight
        })
        .sum()
}

/// Decide whether `text` looks like Markdown.
///
/// Equivalent to `score(text) >= threshold`. Typical thresholds are 1-5;
/// a threshold of 0 accepts every input.
#[must_use]
pub fn detect(text: &str, threshold: u32) -> bool {
    score(text) >= threshold
}
