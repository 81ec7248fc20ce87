//! # Headers
//!
//! Response and encoding headers. In 2.0 a header is a flat `items`-style
//! object, so its schema keywords are inlined.

use crate::any::Any;
use crate::error::AppResult;
use crate::models::example::Example;
use crate::models::interfaces::{
    impl_extensible, write_extensions_except, write_v2, write_v3, Extensions,
    OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::media_type::MediaType;
use crate::models::parameter::ParameterStyle;
use crate::models::reference::Reference;
use crate::models::schema::Schema;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// The `header` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Whether the header is always sent.
    pub required: bool,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Whether an empty value may be sent.
    pub allow_empty_value: bool,
    /// Serialization style.
    pub style: Option<ParameterStyle>,
    /// Explode flag.
    pub explode: bool,
    /// Whether reserved characters are sent unencoded.
    pub allow_reserved: bool,
    /// Value schema.
    pub schema: Option<Schema>,
    /// Example value.
    pub example: Option<Any>,
    /// Named examples.
    pub examples: IndexMap<String, Example>,
    /// Alternative to `schema` for complex values.
    pub content: IndexMap<String, MediaType>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this header stands for a component header.
    pub reference: Option<Reference>,
}

impl OpenApiSerializable for Header {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v2(self, writer)
    }
}

impl OpenApiReferenceable for Header {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property_or_default("required", self.required, false)?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;
        writer.write_property_or_default("allowEmptyValue", self.allow_empty_value, false)?;
        writer.write_property("style", self.style.map(|s| s.to_string()))?;
        writer.write_property_or_default("explode", self.explode, false)?;
        writer.write_property_or_default("allowReserved", self.allow_reserved, false)?;
        writer.write_optional_object("schema", self.schema.as_ref(), |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_any("example", self.example.as_ref())?;
        writer.write_optional_map("examples", &self.examples, |w, e| e.serialize_as_v3(w))?;
        writer.write_optional_map("content", &self.content, |w, m| m.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property_or_default("required", self.required, false)?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;
        writer.write_property_or_default("allowEmptyValue", self.allow_empty_value, false)?;
        if let Some(schema) = &self.schema {
            schema.write_as_items_properties(writer)?;
        }
        writer.write_optional_any("example", self.example.as_ref())?;
        write_extensions_except(
            writer,
            &self.extensions,
            self.schema.as_ref().map(|s| &s.extensions),
        )?;
        writer.write_end_object()
    }
}

impl_extensible!(Header);
