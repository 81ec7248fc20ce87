//! # Media Types
//!
//! Content entries of request bodies, responses and parameters, keyed by media
//! type. 3.0 only: 2.0 folds them into `consumes`/`produces` and body schemas.

use crate::any::Any;
use crate::error::AppResult;
use crate::models::example::Example;
use crate::models::header::Header;
use crate::models::interfaces::{impl_extensible, Extensions, OpenApiSerializable};
use crate::models::parameter::ParameterStyle;
use crate::models::schema::Schema;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// The `mediaType` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaType {
    /// Payload schema.
    pub schema: Option<Schema>,
    /// Example payload.
    pub example: Option<Any>,
    /// Named examples.
    pub examples: IndexMap<String, Example>,
    /// Per-property encoding of form and multipart payloads.
    pub encoding: IndexMap<String, Encoding>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl MediaType {
    /// A media type with only a schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
            ..Self::default()
        }
    }
}

impl OpenApiSerializable for MediaType {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_optional_object("schema", self.schema.as_ref(), |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_any("example", self.example.as_ref())?;
        writer.write_optional_map("examples", &self.examples, |w, e| e.serialize_as_v3(w))?;
        writer.write_optional_map("encoding", &self.encoding, |w, e| e.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

/// The `encoding` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Encoding {
    /// Content type of the property.
    pub content_type: Option<String>,
    /// Part headers for multipart payloads.
    pub headers: IndexMap<String, Header>,
    /// Serialization style.
    pub style: Option<ParameterStyle>,
    /// Explode flag.
    pub explode: bool,
    /// Whether reserved characters are sent unencoded.
    pub allow_reserved: bool,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl OpenApiSerializable for Encoding {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("contentType", self.content_type.as_deref())?;
        writer.write_optional_map("headers", &self.headers, |w, h| h.serialize_as_v3(w))?;
        writer.write_property("style", self.style.map(|s| s.to_string()))?;
        writer.write_property_or_default("explode", self.explode, false)?;
        writer.write_property_or_default("allowReserved", self.allow_reserved, false)?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl_extensible!(MediaType, Encoding);
