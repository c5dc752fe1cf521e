//! `pastemark score` - score text for Markdown-ness.

use std::path::PathBuf;

use clap::Args;
use pastemark_config::{CliSettings, Config};
use pastemark_core::Sensitivity;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `score` command.
#[derive(Args)]
pub(crate) struct ScoreArgs {
    /// Text file to score (reads stdin when omitted).
    pub(crate) file: Option<PathBuf>,

    /// Path to a pastemark.toml config file.
    #[arg(long, env = "PASTEMARK_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Detection sensitivity threshold (1 = very aggressive, 5 = very conservative).
    #[arg(long)]
    pub(crate) sensitivity: Option<u32>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ScoreArgs {
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            sensitivity: self.sensitivity,
            font_size: None,
            include_rtf: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let text = super::read_input(self.file.as_deref())?;

        let threshold = config.detection.sensitivity;
        let score = pastemark_detector::score(&text);
        let label = Sensitivity::from_threshold(threshold)
            .map_or("Custom", Sensitivity::label);

        output.info(&format!("score: {score}"));
        output.info(&format!("threshold: {threshold} ({label})"));
        if score >= threshold {
            output.success("markdown detected");
        } else {
            output.warning("not markdown");
        }
        Ok(())
    }
}
