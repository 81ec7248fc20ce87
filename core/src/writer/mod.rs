#![deny(missing_docs)]

//! # Streaming Writers
//!
//! Turns a sequence of structural and scalar calls into punctuated, indented text
//! without buffering the document.
//!
//! - **scope**: scope stack and indentation shared by every writer.
//! - **json** / **yaml**: the concrete formats.
//! - **escape**: string quoting rules.
//! - **extensions**: terse helpers used by model nodes to emit optional fields.
//! - **any**: recursive writer for free-form values.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use rust_decimal::Decimal;
use std::io::Write;

pub mod any;
pub mod escape;
pub mod extensions;
pub mod json;
pub mod scope;
pub mod settings;
pub mod yaml;

pub use any::write_any;
pub use extensions::{OpenApiWriterExt, ScalarValue};
pub use json::JsonWriter;
pub use scope::{Scope, ScopeKind, WriterState};
pub use settings::{JsonWriterSettings, WriterSettings};
pub use yaml::YamlWriter;

/// The writer contract every output format fulfils.
///
/// Structural calls must nest perfectly: every `write_start_*` is matched by the
/// `write_end_*` of the same kind. Violations surface as [`crate::AppError::Scope`].
pub trait OpenApiWriter {
    /// Opens an object scope.
    fn write_start_object(&mut self) -> AppResult<()>;

    /// Closes the current object scope.
    fn write_end_object(&mut self) -> AppResult<()>;

    /// Opens an array scope.
    fn write_start_array(&mut self) -> AppResult<()>;

    /// Closes the current array scope.
    fn write_end_array(&mut self) -> AppResult<()>;

    /// Writes a member name. Only valid directly inside an object scope.
    fn write_property_name(&mut self, name: &str) -> AppResult<()>;

    /// Writes a string value.
    fn write_str(&mut self, value: &str) -> AppResult<()>;

    /// Writes a `null` literal.
    fn write_null(&mut self) -> AppResult<()>;

    /// Writes pre-formatted text as a value.
    fn write_raw(&mut self, value: &str) -> AppResult<()>;

    /// Flushes the underlying sink.
    fn flush(&mut self) -> AppResult<()>;

    /// Number of open scopes.
    fn scope_depth(&self) -> usize;

    /// Current indentation level.
    fn indent_level(&self) -> usize;

    /// Writes a boolean value.
    fn write_bool(&mut self, value: bool) -> AppResult<()> {
        self.write_raw(if value { "true" } else { "false" })
    }

    /// Writes a 32-bit integer.
    fn write_i32(&mut self, value: i32) -> AppResult<()> {
        self.write_raw(&value.to_string())
    }

    /// Writes a 64-bit integer.
    fn write_i64(&mut self, value: i64) -> AppResult<()> {
        self.write_raw(&value.to_string())
    }

    /// Writes a single precision number. NaN and infinities have no literal form.
    fn write_f32(&mut self, value: f32) -> AppResult<()> {
        if !value.is_finite() {
            return Err(non_finite(value));
        }
        self.write_raw(&value.to_string())
    }

    /// Writes a double precision number. NaN and infinities have no literal form.
    fn write_f64(&mut self, value: f64) -> AppResult<()> {
        if !value.is_finite() {
            return Err(non_finite(value));
        }
        self.write_raw(&value.to_string())
    }

    /// Writes an exact decimal number.
    fn write_decimal(&mut self, value: Decimal) -> AppResult<()> {
        self.write_raw(&value.to_string())
    }

    /// Writes a timestamp as an RFC 3339 string.
    fn write_date_time(&mut self, value: &DateTime<FixedOffset>) -> AppResult<()> {
        self.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }
}

/// Byte sink with the small set of text operations the writers need.
#[derive(Debug)]
pub(crate) struct TextSink<W: Write> {
    inner: W,
    indent_unit: String,
}

impl<W: Write> TextSink<W> {
    pub(crate) fn new(inner: W, settings: &WriterSettings) -> Self {
        Self {
            inner,
            indent_unit: " ".repeat(settings.indent_width),
        }
    }

    pub(crate) fn write(&mut self, text: &str) -> AppResult<()> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }

    pub(crate) fn new_line(&mut self) -> AppResult<()> {
        self.write("\n")
    }

    pub(crate) fn indent(&mut self, units: usize) -> AppResult<()> {
        for _ in 0..units {
            self.inner.write_all(self.indent_unit.as_bytes())?;
        }
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> AppResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub(crate) fn get_ref(&self) -> &W {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}

fn non_finite(value: impl std::fmt::Display) -> AppError {
    AppError::Argument(format!("number `{}` cannot be written", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        writer.write_start_object().unwrap();
        writer.write_property_name("x").unwrap();
        assert!(matches!(writer.write_f64(f64::NAN), Err(AppError::Argument(_))));
        assert!(matches!(
            writer.write_f32(f32::INFINITY),
            Err(AppError::Argument(_))
        ));
        assert!(matches!(
            writer.write_f64(f64::NEG_INFINITY),
            Err(AppError::Argument(_))
        ));
    }

    #[test]
    fn test_scalar_defaults_render_literals() {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        writer.write_start_array().unwrap();
        writer.write_bool(false).unwrap();
        writer.write_i32(-3).unwrap();
        writer.write_i64(9_000_000_000).unwrap();
        writer.write_f64(1.5).unwrap();
        writer.write_decimal(Decimal::new(2500, 2)).unwrap();
        writer.write_end_array().unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "[false,-3,9000000000,1.5,25.00]");
    }

    #[test]
    fn test_date_time_round_trip_form() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let stamp = offset.with_ymd_and_hms(2019, 1, 2, 3, 4, 5).unwrap();
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_date_time(&stamp).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "\"2019-01-02T03:04:05+01:00\"");
    }
}
