//! Clipboard markdown conversion pipeline.
//!
//! Ties the detector and renderer together into the flow the clipboard
//! monitor drives: size guard → detect → parse and render → optional RTF
//! encode. The pipeline owns no clipboard access itself; the monitor hands
//! it one complete text snapshot at a time and writes the returned
//! [`ClipboardPayload`] through a [`ClipboardSink`].
//!
//! RTF encoding is platform work (on macOS an `NSAttributedString` round
//! trip) and is abstracted behind [`RtfEncoder`]; encoders are best-effort
//! and may decline, in which case the payload carries HTML only.

use tracing::debug;

/// Maximum input size in bytes; larger clipboard snapshots are skipped.
pub const MAX_CONTENT_SIZE: usize = 100_000;

/// Default detection threshold (the "Normal" sensitivity).
pub const DEFAULT_THRESHOLD: u32 = 2;

/// Default base font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Result of converting one markdown snapshot.
#[derive(Clone, Debug)]
pub struct ConversionResult {
    /// Complete HTML document with the stylesheet embedded.
    pub html: String,
    /// Binary RTF, when an encoder is configured and succeeded.
    pub rtf: Option<Vec<u8>>,
}

/// The triple handed to the clipboard for an atomic multi-format write.
#[derive(Clone, Debug)]
pub struct ClipboardPayload {
    /// The original plain text, untouched.
    pub plain_text: String,
    /// Rendered HTML document.
    pub html: String,
    /// Binary RTF, if available.
    pub rtf: Option<Vec<u8>>,
}

/// Converts rendered HTML into binary rich text.
///
/// Returning `None` means the HTML could not be converted; callers must
/// treat RTF as best-effort and fall back to plain text + HTML.
pub trait RtfEncoder {
    fn encode(&self, html: &str) -> Option<Vec<u8>>;
}

/// Receives the final payload for an atomic multi-format clipboard write.
pub trait ClipboardSink {
    fn write(&mut self, payload: ClipboardPayload);
}

/// Human-facing sensitivity levels, mapped to detection thresholds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sensitivity {
    VeryAggressive,
    Normal,
    Moderate,
    Conservative,
    VeryConservative,
}

impl Sensitivity {
    /// The detection threshold this level maps to.
    #[must_use]
    pub fn threshold(self) -> u32 {
        match self {
            Self::VeryAggressive => 1,
            Self::Normal => 2,
            Self::Moderate => 3,
            Self::Conservative => 4,
            Self::VeryConservative => 5,
        }
    }

    /// Display label for settings UIs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryAggressive => "Very Aggressive",
            Self::Normal => "Normal",
            Self::Moderate => "Moderate",
            Self::Conservative => "Conservative",
            Self::VeryConservative => "Very Conservative",
        }
    }

    /// Map a raw threshold back to a level, if it corresponds to one.
    #[must_use]
    pub fn from_threshold(threshold: u32) -> Option<Self> {
        match threshold {
            1 => Some(Self::VeryAggressive),
            2 => Some(Self::Normal),
            3 => Some(Self::Moderate),
            4 => Some(Self::Conservative),
            5 => Some(Self::VeryConservative),
            _ => None,
        }
    }
}

/// The detect-and-convert pipeline.
///
/// Stateless between calls: every invocation scores and renders one
/// complete snapshot, so independent invocations from different threads
/// are safe.
pub struct Pipeline {
    threshold: u32,
    font_size: u32,
    include_rtf: bool,
    encoder: Option<Box<dyn RtfEncoder + Send + Sync>>,
}

impl Pipeline {
    /// Create a pipeline with default threshold and font size and no RTF
    /// encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            font_size: DEFAULT_FONT_SIZE,
            include_rtf: true,
            encoder: None,
        }
    }

    /// Set the detection threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the detection threshold from a sensitivity level.
    #[must_use]
    pub fn with_sensitivity(self, sensitivity: Sensitivity) -> Self {
        self.with_threshold(sensitivity.threshold())
    }

    /// Set the base font size in pixels.
    #[must_use]
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Enable or disable RTF generation. When disabled the payload carries
    /// HTML only, even with an encoder attached.
    #[must_use]
    pub fn with_rtf(mut self, include_rtf: bool) -> Self {
        self.include_rtf = include_rtf;
        self
    }

    /// Attach an RTF encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: Box<dyn RtfEncoder + Send + Sync>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Convert markdown unconditionally (no detection, no size guard).
    ///
    /// Never fails: the parser recovers from malformed input and rendering
    /// degrades gracefully on unrecognized constructs.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> ConversionResult {
        let html = pastemark_renderer::render(markdown, self.font_size);
        let rtf = if self.include_rtf {
            self.encoder
                .as_ref()
                .and_then(|encoder| encoder.encode(&html))
        } else {
            None
        };
        debug!(
            html_len = html.len(),
            has_rtf = rtf.is_some(),
            "converted markdown snapshot"
        );
        ConversionResult { html, rtf }
    }

    /// Process one clipboard snapshot.
    ///
    /// Returns `None` when the text is too large or does not look like
    /// Markdown; otherwise the full payload for the clipboard write.
    #[must_use]
    pub fn process(&self, text: &str) -> Option<ClipboardPayload> {
        if text.len() > MAX_CONTENT_SIZE {
            debug!(len = text.len(), "skipping oversized clipboard content");
            return None;
        }

        let score = pastemark_detector::score(text);
        if score < self.threshold {
            debug!(score, threshold = self.threshold, "not markdown, skipping");
            return None;
        }
        debug!(score, threshold = self.threshold, "markdown detected");

        let result = self.convert(text);
        Some(ClipboardPayload {
            plain_text: text.to_owned(),
            html: result.html,
            rtf: result.rtf,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
