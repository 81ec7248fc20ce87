#![deny(missing_docs)]

//! # Convert Command
//!
//! Re-emits a JSON or YAML value through the free-form value writer.

use std::fs;
use std::path::{Path, PathBuf};

use oaswriter_core::{write_any, Any};

use crate::error::{CliError, CliResult};
use crate::output::OutputArgs;

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input file. `.yaml` and `.yml` are read as YAML, anything else as JSON.
    pub input: PathBuf,

    /// Output options.
    #[clap(flatten)]
    pub output: OutputArgs,
}

/// Executes the convert command.
pub fn execute(args: &ConvertArgs) -> CliResult<()> {
    if !args.input.exists() {
        return Err(CliError::General(format!(
            "Input file not found: {:?}",
            args.input
        )));
    }
    let text = fs::read_to_string(&args.input)?;
    let value = parse(&args.input, &text)?;
    tracing::debug!(input = %args.input.display(), "converting value");
    args.output.emit(|w| write_any(w, Some(&value)))
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

/// Parses `text` as YAML or JSON depending on the file extension.
pub fn parse(path: &Path, text: &str) -> CliResult<Any> {
    let value: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(text)?
    } else {
        serde_json::from_str(text)?
    };
    Ok(Any::from(value))
}
