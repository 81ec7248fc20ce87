//! # JSON Writer
//!
//! Indented (or terse) JSON emission on top of any `std::io::Write` sink.

use crate::error::AppResult;
use crate::writer::escape::json_compatible_string;
use crate::writer::scope::{ScopeKind, WriterState};
use crate::writer::settings::JsonWriterSettings;
use crate::writer::{OpenApiWriter, TextSink};
use std::io::Write;

/// Root members sit one level deep.
const BASE_INDENTATION: usize = 1;

/// Streaming JSON writer.
#[derive(Debug)]
pub struct JsonWriter<W: Write> {
    sink: TextSink<W>,
    state: WriterState,
    terse: bool,
}

impl<W: Write> JsonWriter<W> {
    /// Creates an indented writer.
    pub fn new(inner: W) -> Self {
        Self::with_settings(inner, JsonWriterSettings::default())
    }

    /// Creates a writer with explicit settings.
    pub fn with_settings(inner: W, settings: JsonWriterSettings) -> Self {
        Self {
            sink: TextSink::new(inner, &settings.common),
            state: WriterState::new(),
            terse: settings.terse,
        }
    }

    /// Borrows the underlying sink.
    pub fn get_ref(&self) -> &W {
        self.sink.get_ref()
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn new_line_and_indent(&mut self) -> AppResult<()> {
        if self.terse {
            return Ok(());
        }
        self.sink.new_line()?;
        let units = self.state.indentation_units(BASE_INDENTATION);
        self.sink.indent(units)
    }

    fn write_value_separator(&mut self) -> AppResult<()> {
        if !self.state.in_array() {
            return Ok(());
        }
        if self.state.bump_object_count() != 0 {
            self.sink.write(",")?;
        }
        self.new_line_and_indent()
    }

    fn start_scope(&mut self, kind: ScopeKind, token: &str) -> AppResult<()> {
        let parent = self.state.current().map(|s| (s.kind, s.object_count));
        let scope = self.state.start_scope(kind);
        if let Some((ScopeKind::Array, previous_count)) = parent {
            scope.is_in_array = true;
            if previous_count != 0 {
                self.sink.write(",")?;
            }
            self.new_line_and_indent()?;
        }
        self.sink.write(token)?;
        self.state.increase_indentation();
        Ok(())
    }

    fn end_scope(&mut self, kind: ScopeKind, token: &str) -> AppResult<()> {
        let scope = self.state.end_scope(kind)?;
        self.state.decrease_indentation()?;
        if scope.object_count != 0 {
            self.new_line_and_indent()?;
        } else if !self.terse {
            self.sink.write(" ")?;
        }
        self.sink.write(token)
    }
}

impl<W: Write> OpenApiWriter for JsonWriter<W> {
    fn write_start_object(&mut self) -> AppResult<()> {
        self.start_scope(ScopeKind::Object, "{")
    }

    fn write_end_object(&mut self) -> AppResult<()> {
        self.end_scope(ScopeKind::Object, "}")
    }

    fn write_start_array(&mut self) -> AppResult<()> {
        self.start_scope(ScopeKind::Array, "[")
    }

    fn write_end_array(&mut self) -> AppResult<()> {
        self.end_scope(ScopeKind::Array, "]")
    }

    fn write_property_name(&mut self, name: &str) -> AppResult<()> {
        self.state.verify_can_write_property_name(name)?;
        if self.state.bump_object_count() != 0 {
            self.sink.write(",")?;
        }
        self.new_line_and_indent()?;
        self.sink.write(&json_compatible_string(name))?;
        self.sink.write(if self.terse { ":" } else { ": " })
    }

    fn write_str(&mut self, value: &str) -> AppResult<()> {
        self.write_value_separator()?;
        self.sink.write(&json_compatible_string(value))
    }

    fn write_null(&mut self) -> AppResult<()> {
        self.write_value_separator()?;
        self.sink.write("null")
    }

    fn write_raw(&mut self, value: &str) -> AppResult<()> {
        self.write_value_separator()?;
        self.sink.write(value)
    }

    fn flush(&mut self) -> AppResult<()> {
        self.sink.flush()
    }

    fn scope_depth(&self) -> usize {
        self.state.depth()
    }

    fn indent_level(&self) -> usize {
        self.state.indent_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::writer::settings::WriterSettings;

    fn render(terse: bool, f: impl FnOnce(&mut JsonWriter<Vec<u8>>) -> AppResult<()>) -> String {
        let settings = JsonWriterSettings {
            terse,
            ..JsonWriterSettings::default()
        };
        let mut writer = JsonWriter::with_settings(Vec::new(), settings);
        f(&mut writer).unwrap();
        assert_eq!(writer.scope_depth(), 0);
        assert_eq!(writer.indent_level(), 0);
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_nested_object_layout() {
        let out = render(false, |w| {
            w.write_start_object()?;
            w.write_property_name("name")?;
            w.write_str("doggie")?;
            w.write_property_name("tags")?;
            w.write_start_array()?;
            w.write_str("a")?;
            w.write_start_object()?;
            w.write_property_name("id")?;
            w.write_i32(1)?;
            w.write_end_object()?;
            w.write_end_array()?;
            w.write_end_object()
        });
        let expected = "{\n  \"name\": \"doggie\",\n  \"tags\": [\n    \"a\",\n    {\n      \"id\": 1\n    }\n  ]\n}";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_containers_collapse() {
        let out = render(false, |w| {
            w.write_start_object()?;
            w.write_property_name("a")?;
            w.write_start_object()?;
            w.write_end_object()?;
            w.write_property_name("b")?;
            w.write_start_array()?;
            w.write_end_array()?;
            w.write_end_object()
        });
        assert_eq!(out, "{\n  \"a\": { },\n  \"b\": [ ]\n}");
    }

    #[test]
    fn test_terse_layout() {
        let out = render(true, |w| {
            w.write_start_object()?;
            w.write_property_name("list")?;
            w.write_start_array()?;
            w.write_null()?;
            w.write_bool(true)?;
            w.write_start_array()?;
            w.write_end_array()?;
            w.write_end_array()?;
            w.write_property_name("empty")?;
            w.write_start_object()?;
            w.write_end_object()?;
            w.write_end_object()
        });
        assert_eq!(out, r#"{"list":[null,true,[]],"empty":{}}"#);
    }

    #[test]
    fn test_custom_indent_width() {
        let settings = JsonWriterSettings {
            common: WriterSettings::default().with_indent_width(4),
            terse: false,
        };
        let mut writer = JsonWriter::with_settings(Vec::new(), settings);
        writer.write_start_object().unwrap();
        writer.write_property_name("a").unwrap();
        writer.write_raw("1").unwrap();
        writer.write_end_object().unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_property_name_outside_object_fails() {
        let mut writer = JsonWriter::new(Vec::new());
        assert!(matches!(
            writer.write_property_name("x"),
            Err(AppError::Scope(_))
        ));
        writer.write_start_array().unwrap();
        assert!(matches!(
            writer.write_property_name("x"),
            Err(AppError::Scope(_))
        ));
    }

    #[test]
    fn test_unbalanced_scopes_fail() {
        let mut writer = JsonWriter::new(Vec::new());
        assert!(matches!(writer.write_end_object(), Err(AppError::Scope(_))));
        writer.write_start_object().unwrap();
        assert!(matches!(writer.write_end_array(), Err(AppError::Scope(_))));
        writer.write_end_object().unwrap();
        assert!(matches!(writer.write_end_object(), Err(AppError::Scope(_))));
        assert_eq!(writer.scope_depth(), 0);
    }

    #[test]
    fn test_escaped_property_names() {
        let out = render(true, |w| {
            w.write_start_object()?;
            w.write_property_name("a\"b")?;
            w.write_str("line\nbreak")?;
            w.write_end_object()
        });
        assert_eq!(out, r#"{"a\"b":"line\nbreak"}"#);
    }
}
