//! `pastemark convert` - render markdown to a styled HTML document.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pastemark_config::{CliSettings, Config};
use pastemark_core::Pipeline;
use tracing::debug;

use crate::error::CliError;

/// Arguments for the `convert` command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (reads stdin when omitted).
    pub(crate) file: Option<PathBuf>,

    /// Path to a pastemark.toml config file.
    #[arg(long, env = "PASTEMARK_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Detection sensitivity threshold (1 = very aggressive, 5 = very conservative).
    #[arg(long)]
    pub(crate) sensitivity: Option<u32>,

    /// Base font size in pixels.
    #[arg(long)]
    pub(crate) font_size: Option<u32>,

    /// Skip RTF generation even when the config enables it.
    #[arg(long)]
    pub(crate) no_rtf: bool,

    /// Convert even when the input does not look like markdown.
    #[arg(long)]
    pub(crate) force: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let settings = CliSettings {
            sensitivity: self.sensitivity,
            font_size: self.font_size,
            include_rtf: self.no_rtf.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let text = super::read_input(self.file.as_deref())?;

        let threshold = config.detection.sensitivity;
        let score = pastemark_detector::score(&text);
        debug!(score, threshold, force = self.force, "scored input");
        if !self.force && score < threshold {
            return Err(CliError::NotMarkdown { score, threshold });
        }

        let pipeline = Pipeline::new()
            .with_threshold(threshold)
            .with_font_size(config.render.font_size)
            .with_rtf(config.render.include_rtf);
        let result = pipeline.convert(&text);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(result.html.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
