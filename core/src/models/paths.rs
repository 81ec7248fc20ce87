//! # Paths
//!
//! The `paths` map and its path items. 2.0 has no `trace` operation and no
//! path-level summary or description, so those are dropped or moved to
//! `x-summary` / `x-description`.

use crate::error::AppResult;
use crate::models::interfaces::{impl_extensible, Extensions, OpenApiSerializable};
use crate::models::operation::Operation;
use crate::models::parameter::Parameter;
use crate::models::server::Server;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use derive_more::Display;
use indexmap::IndexMap;

/// HTTP methods an operation can be bound to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// `get`
    #[display("get")]
    Get,
    /// `put`
    #[display("put")]
    Put,
    /// `post`
    #[display("post")]
    Post,
    /// `delete`
    #[display("delete")]
    Delete,
    /// `options`
    #[display("options")]
    Options,
    /// `head`
    #[display("head")]
    Head,
    /// `patch`
    #[display("patch")]
    Patch,
    /// `trace`
    #[display("trace")]
    Trace,
}

/// The `paths` object: URL template to path item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paths {
    /// Path items keyed by URL template, in insertion order.
    pub items: IndexMap<String, PathItem>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Paths {
    /// Adds a path item.
    pub fn with(mut self, path: impl Into<String>, item: PathItem) -> Self {
        self.items.insert(path.into(), item);
        self
    }

    fn write(&self, writer: &mut dyn OpenApiWriter, v3: bool) -> AppResult<()> {
        writer.write_start_object()?;
        for (path, item) in &self.items {
            writer.write_required_object(path, Some(item), |w, p| {
                if v3 {
                    p.serialize_as_v3(w)
                } else {
                    p.serialize_as_v2(w)
                }
            })?;
        }
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Paths {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, true)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, false)
    }
}

/// The `pathItem` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    /// Summary for every operation of the path.
    pub summary: Option<String>,
    /// Description for every operation of the path.
    pub description: Option<String>,
    /// Operations keyed by method, in insertion order.
    pub operations: IndexMap<OperationType, Operation>,
    /// Servers overriding the document's servers.
    pub servers: Vec<Server>,
    /// Parameters shared by every operation of the path.
    pub parameters: Vec<Parameter>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl PathItem {
    /// Adds an operation.
    pub fn with(mut self, method: OperationType, operation: Operation) -> Self {
        self.operations.insert(method, operation);
        self
    }
}

impl OpenApiSerializable for PathItem {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("summary", self.summary.as_deref())?;
        writer.write_property("description", self.description.as_deref())?;
        for (method, operation) in &self.operations {
            writer.write_optional_object(&method.to_string(), Some(operation), |w, o| {
                o.serialize_as_v3(w)
            })?;
        }
        writer.write_optional_collection("servers", &self.servers, |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_collection("parameters", &self.parameters, |w, p| {
            p.serialize_as_v3(w)
        })?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        for (method, operation) in &self.operations {
            if *method == OperationType::Trace {
                continue;
            }
            writer.write_optional_object(&method.to_string(), Some(operation), |w, o| {
                o.serialize_as_v2(w)
            })?;
        }
        writer.write_optional_collection("parameters", &self.parameters, |w, p| {
            p.serialize_as_v2(w)
        })?;
        writer.write_property("x-summary", self.summary.as_deref())?;
        writer.write_property("x-description", self.description.as_deref())?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl_extensible!(Paths, PathItem);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::{Response, Responses};
    use crate::writer::{JsonWriter, JsonWriterSettings};

    fn item() -> PathItem {
        let op = Operation {
            responses: Responses::default().with("200", Response::described("OK")),
            ..Operation::default()
        };
        PathItem {
            summary: Some("Pets".into()),
            ..PathItem::default()
        }
        .with(OperationType::Get, op.clone())
        .with(OperationType::Trace, op)
    }

    fn terse(f: impl FnOnce(&mut dyn OpenApiWriter) -> AppResult<()>) -> String {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_v3_keeps_trace() {
        let paths = Paths::default().with("/pets", item());
        assert_eq!(
            terse(|w| paths.serialize_as_v3(w)),
            r#"{"/pets":{"summary":"Pets","get":{"responses":{"200":{"description":"OK"}}},"trace":{"responses":{"200":{"description":"OK"}}}}}"#
        );
    }

    #[test]
    fn test_v2_drops_trace_and_moves_summary() {
        let paths = Paths::default().with("/pets", item());
        assert_eq!(
            terse(|w| paths.serialize_as_v2(w)),
            r#"{"/pets":{"get":{"responses":{"200":{"description":"OK"}}},"x-summary":"Pets"}}"#
        );
    }
}
