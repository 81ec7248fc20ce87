#![deny(missing_docs)]

//! # Output Options
//!
//! Format and destination shared by every command.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use oaswriter_core::{
    AppResult, JsonWriter, JsonWriterSettings, OpenApiFormat, OpenApiWriter, YamlWriter,
};

use crate::error::CliResult;

/// Where and how output is written.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format (`json` or `yaml`).
    #[clap(long, env = "OASWRITER_FORMAT", default_value = "json")]
    pub format: OpenApiFormat,

    /// Emit compact JSON without newlines or indentation.
    #[clap(long, env = "OASWRITER_TERSE")]
    pub terse: bool,

    /// Spaces per indentation level. YAML uses at least 2.
    #[clap(long, default_value_t = 2)]
    pub indent_width: usize,

    /// Output file. Writes to stdout when absent.
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// The writer settings selected on the command line.
    pub fn settings(&self) -> JsonWriterSettings {
        let mut settings = JsonWriterSettings {
            terse: self.terse,
            ..JsonWriterSettings::default()
        };
        settings.common.indent_width = self.indent_width;
        settings
    }

    /// Opens the destination and hands a writer for the selected format to `action`.
    ///
    /// The output always ends with a newline.
    pub fn emit(
        &self,
        action: impl FnOnce(&mut dyn OpenApiWriter) -> AppResult<()>,
    ) -> CliResult<()> {
        let sink: Box<dyn Write> = match &self.output {
            Some(path) => {
                tracing::info!(path = %path.display(), format = %self.format, "writing output");
                Box::new(BufWriter::new(File::create(path)?))
            }
            None => Box::new(io::stdout().lock()),
        };

        let settings = self.settings();
        let mut sink = match self.format {
            OpenApiFormat::Json => {
                let mut writer = JsonWriter::with_settings(sink, settings);
                action(&mut writer)?;
                writer.into_inner()
            }
            OpenApiFormat::Yaml => {
                let mut writer = YamlWriter::with_settings(sink, settings.common);
                action(&mut writer)?;
                writer.into_inner()
            }
        };
        writeln!(sink)?;
        sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaswriter_core::write_any;
    use oaswriter_core::Any;

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let args = OutputArgs {
            format: OpenApiFormat::Json,
            terse: true,
            indent_width: 2,
            output: Some(path.clone()),
        };
        args.emit(|w| write_any(w, Some(&Any::from(true)))).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "true\n");
    }
}
