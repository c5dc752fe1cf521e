//! CLI command implementations.

mod convert;
mod score;

pub(crate) use convert::ConvertArgs;
pub(crate) use score::ScoreArgs;

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Read markdown from a file, or stdin when no path is given.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
