//! CLI error types.

use pastemark_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(
        "input does not look like markdown (score {score} < threshold {threshold}); \
         use --force to convert anyway"
    )]
    NotMarkdown { score: u32, threshold: u32 },
}
