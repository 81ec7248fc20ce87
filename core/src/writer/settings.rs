//! # Writer Settings
//!
//! Layout options shared by the concrete writers.

/// Options common to every writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSettings {
    /// Spaces emitted per indentation level.
    pub indent_width: usize,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl WriterSettings {
    /// Sets the number of spaces per indentation level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

/// Options specific to the JSON writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonWriterSettings {
    /// Shared layout options.
    pub common: WriterSettings,
    /// Emit compact JSON without newlines or indentation.
    pub terse: bool,
}

impl JsonWriterSettings {
    /// Compact output.
    pub fn terse() -> Self {
        Self {
            terse: true,
            ..Self::default()
        }
    }
}
