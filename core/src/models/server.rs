//! # Servers
//!
//! 3.0 server entries. They have no 2.0 form of their own: a 2.0 document
//! derives `host`, `basePath` and `schemes` from them instead.

use crate::error::AppResult;
use crate::models::interfaces::{impl_extensible, Extensions, OpenApiSerializable};
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// The `server` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Server {
    /// Server URL, possibly templated with `{variable}` segments.
    pub url: String,
    /// Short description.
    pub description: Option<String>,
    /// Values for the URL template.
    pub variables: IndexMap<String, ServerVariable>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Server {
    /// Creates a server with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// The URL with every `{variable}` replaced by its default value.
    pub fn resolved_url(&self) -> String {
        self.variables
            .iter()
            .fold(self.url.clone(), |url, (name, variable)| {
                url.replace(&format!("{{{}}}", name), &variable.default)
            })
    }
}

impl OpenApiSerializable for Server {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("url", Some(self.url.as_str()))?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_map("variables", &self.variables, |w, v| v.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

/// The `serverVariable` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerVariable {
    /// Value used when nothing else is supplied.
    pub default: String,
    /// Short description.
    pub description: Option<String>,
    /// Allowed values.
    pub enum_values: Vec<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl OpenApiSerializable for ServerVariable {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("default", Some(self.default.as_str()))?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_collection("enum", &self.enum_values, |w, s| w.write_str(s))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl_extensible!(Server, ServerVariable);
