//! # YAML Writer
//!
//! Block-style YAML emission. Objects nested in arrays start on the `- ` line,
//! empty containers render as `{ }` / `[ ]` and strings are quoted only when a
//! plain scalar would be ambiguous.

use crate::error::AppResult;
use crate::writer::escape::yaml_compatible_string;
use crate::writer::scope::{ScopeKind, WriterState};
use crate::writer::settings::WriterSettings;
use crate::writer::{OpenApiWriter, TextSink};
use std::io::Write;

/// Root members are not indented.
const BASE_INDENTATION: usize = 0;

/// Block nesting needs room for the `- ` sequence indicator.
const MIN_INDENT_WIDTH: usize = 2;

/// Streaming YAML writer.
///
/// The `- ` item indicator is padded to the indentation width so the keys of
/// an object inside a sequence share one column. Widths below 2 are raised to 2.
#[derive(Debug)]
pub struct YamlWriter<W: Write> {
    sink: TextSink<W>,
    state: WriterState,
    item_prefix: String,
}

impl<W: Write> YamlWriter<W> {
    /// Creates a writer with two-space indentation.
    pub fn new(inner: W) -> Self {
        Self::with_settings(inner, WriterSettings::default())
    }

    /// Creates a writer with explicit settings.
    pub fn with_settings(inner: W, settings: WriterSettings) -> Self {
        let width = settings.indent_width.max(MIN_INDENT_WIDTH);
        Self {
            sink: TextSink::new(inner, &settings.with_indent_width(width)),
            state: WriterState::new(),
            item_prefix: format!("-{}", " ".repeat(width - 1)),
        }
    }

    fn write_item_prefix(&mut self) -> AppResult<()> {
        self.write_indentation()?;
        self.sink.write(&self.item_prefix)
    }

    /// Borrows the underlying sink.
    pub fn get_ref(&self) -> &W {
        self.sink.get_ref()
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn write_indentation(&mut self) -> AppResult<()> {
        let units = self.state.indentation_units(BASE_INDENTATION);
        self.sink.indent(units)
    }

    fn write_value_separator(&mut self) -> AppResult<()> {
        if self.state.in_array() {
            let previous = self.state.bump_object_count();
            // The first item of a root array goes on the very first line.
            if !self.state.is_top_level() || previous != 0 {
                self.sink.new_line()?;
            }
            self.write_item_prefix()
        } else if self.state.depth() > 0 {
            self.sink.write(" ")
        } else {
            Ok(())
        }
    }

    fn start_scope(&mut self, kind: ScopeKind) -> AppResult<()> {
        let parent = self.state.current().map(|s| (s.kind, s.object_count));
        let scope = self.state.start_scope(kind);
        if let Some((ScopeKind::Array, previous_count)) = parent {
            scope.is_in_array = true;
            let parent_is_root = self.state.depth() == 2;
            if !parent_is_root || previous_count != 0 {
                self.sink.new_line()?;
            }
            self.write_item_prefix()?;
        }
        self.state.increase_indentation();
        Ok(())
    }

    fn end_scope(&mut self, kind: ScopeKind, empty_token: &str) -> AppResult<()> {
        let scope = self.state.end_scope(kind)?;
        self.state.decrease_indentation()?;
        if scope.object_count == 0 {
            if matches!(self.state.current(), Some(s) if s.kind == ScopeKind::Object) {
                self.sink.write(" ")?;
            }
            self.sink.write(empty_token)?;
        }
        Ok(())
    }
}

impl<W: Write> OpenApiWriter for YamlWriter<W> {
    fn write_start_object(&mut self) -> AppResult<()> {
        self.start_scope(ScopeKind::Object)
    }

    fn write_end_object(&mut self) -> AppResult<()> {
        self.end_scope(ScopeKind::Object, "{ }")
    }

    fn write_start_array(&mut self) -> AppResult<()> {
        self.start_scope(ScopeKind::Array)
    }

    fn write_end_array(&mut self) -> AppResult<()> {
        self.end_scope(ScopeKind::Array, "[ ]")
    }

    fn write_property_name(&mut self, name: &str) -> AppResult<()> {
        self.state.verify_can_write_property_name(name)?;
        let in_array = self.state.current().map(|s| s.is_in_array).unwrap_or(false);
        let previous = self.state.bump_object_count();
        if previous != 0 || (!self.state.is_top_level() && !in_array) {
            self.sink.new_line()?;
            self.write_indentation()?;
        }
        self.sink.write(&yaml_compatible_string(name))?;
        self.sink.write(":")
    }

    fn write_str(&mut self, value: &str) -> AppResult<()> {
        self.write_value_separator()?;
        self.sink.write(&yaml_compatible_string(value))
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

    fn render(f: impl FnOnce(&mut YamlWriter<Vec<u8>>) -> AppResult<()>) -> String {
        let mut writer = YamlWriter::new(Vec::new());
        f(&mut writer).unwrap();
        assert_eq!(writer.scope_depth(), 0);
        assert_eq!(writer.indent_level(), 0);
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_block_mapping_layout() {
        let out = render(|w| {
            w.write_start_object()?;
            w.write_property_name("swagger")?;
            w.write_str("2.0")?;
            w.write_property_name("info")?;
            w.write_start_object()?;
            w.write_property_name("title")?;
            w.write_str("Pets")?;
            w.write_property_name("version")?;
            w.write_str("1.0.0")?;
            w.write_end_object()?;
            w.write_end_object()
        });
        assert_eq!(
            out,
            "swagger: '2.0'\ninfo:\n  title: Pets\n  version: 1.0.0"
        );
    }

    #[test]
    fn test_sequences_and_objects_in_sequences() {
        let out = render(|w| {
            w.write_start_object()?;
            w.write_property_name("schemes")?;
            w.write_start_array()?;
            w.write_str("http")?;
            w.write_str("https")?;
            w.write_end_array()?;
            w.write_property_name("tags")?;
            w.write_start_array()?;
            w.write_start_object()?;
            w.write_property_name("name")?;
            w.write_str("pet")?;
            w.write_property_name("description")?;
            w.write_str("Everything about pets")?;
            w.write_end_object()?;
            w.write_end_array()?;
            w.write_end_object()
        });
        let expected = "schemes:\n  - http\n  - https\ntags:\n  - name: pet\n    description: Everything about pets";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_containers_and_null() {
        let out = render(|w| {
            w.write_start_object()?;
            w.write_property_name("paths")?;
            w.write_start_object()?;
            w.write_end_object()?;
            w.write_property_name("list")?;
            w.write_start_array()?;
            w.write_start_object()?;
            w.write_end_object()?;
            w.write_null()?;
            w.write_end_array()?;
            w.write_property_name("nothing")?;
            w.write_start_array()?;
            w.write_end_array()?;
            w.write_end_object()
        });
        assert_eq!(
            out,
            "paths: { }\nlist:\n  - { }\n  - null\nnothing: [ ]"
        );
    }

    #[test]
    fn test_root_array() {
        let out = render(|w| {
            w.write_start_array()?;
            w.write_raw("1")?;
            w.write_start_object()?;
            w.write_property_name("a")?;
            w.write_bool(true)?;
            w.write_end_object()?;
            w.write_end_array()
        });
        assert_eq!(out, "- 1\n- a: true");
    }

    #[test]
    fn test_root_scalar_has_no_leading_space() {
        let out = render(|w| w.write_str("hello"));
        assert_eq!(out, "hello");
    }

    fn tags_document(w: &mut YamlWriter<Vec<u8>>) -> AppResult<()> {
        w.write_start_object()?;
        w.write_property_name("tags")?;
        w.write_start_array()?;
        w.write_start_object()?;
        w.write_property_name("name")?;
        w.write_str("pet")?;
        w.write_property_name("id")?;
        w.write_i32(1)?;
        w.write_end_object()?;
        w.write_str("store")?;
        w.write_end_array()?;
        w.write_end_object()
    }

    #[test]
    fn test_wide_indentation_keeps_item_keys_aligned() {
        let mut writer =
            YamlWriter::with_settings(Vec::new(), WriterSettings::default().with_indent_width(4));
        tags_document(&mut writer).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "tags:\n    -   name: pet\n        id: 1\n    -   store");

        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value["tags"][0]["name"].as_str(), Some("pet"));
        assert_eq!(value["tags"][0]["id"].as_i64(), Some(1));
        assert_eq!(value["tags"][1].as_str(), Some("store"));
    }

    #[test]
    fn test_narrow_indentation_is_raised() {
        let mut writer =
            YamlWriter::with_settings(Vec::new(), WriterSettings::default().with_indent_width(1));
        tags_document(&mut writer).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "tags:\n  - name: pet\n    id: 1\n  - store");
        assert!(serde_yaml::from_str::<serde_yaml::Value>(&out).is_ok());
    }

    #[test]
    fn test_property_name_in_array_fails() {
        let mut writer = YamlWriter::new(Vec::new());
        writer.write_start_array().unwrap();
        assert!(matches!(
            writer.write_property_name("x"),
            Err(AppError::Scope(_))
        ));
    }
}
