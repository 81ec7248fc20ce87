#![deny(missing_docs)]

//! # OASWriter CLI
//!
//! Command Line Interface for the OpenAPI document writer.
//!
//! Supported Commands:
//! - `sample`: Renders the built-in pet store document as OpenAPI 3.0 or 2.0.
//! - `convert`: Re-emits a JSON or YAML value as JSON or YAML.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliResult;

mod convert;
mod error;
mod output;
mod sample;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI document writer")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the built-in pet store document.
    Sample(sample::SampleArgs),
    /// Re-emit a JSON or YAML file through the value writer.
    Convert(convert::ConvertArgs),
}

fn main() -> CliResult<()> {
    // Logs go to stderr so they never mix with rendered output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oaswriter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Sample(args) => sample::execute(args)?,
        Commands::Convert(args) => convert::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample_flags() {
        let cli = Cli::try_parse_from([
            "oaswriter",
            "sample",
            "--spec-version",
            "2.0",
            "--format",
            "yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Sample(args) => {
                assert_eq!(args.spec_version, oaswriter_core::SpecVersion::V2_0);
                assert_eq!(args.output.format, oaswriter_core::OpenApiFormat::Yaml);
                assert!(!args.output.terse);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
