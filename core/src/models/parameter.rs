//! # Parameters
//!
//! The `parameter` object. In 2.0 a parameter also carries the shapes that 3.0
//! moved into request bodies (`in: body` and `in: formData`); those are
//! synthesized during the 2.0 downgrade and never stored on the model.

use crate::any::Any;
use crate::error::AppResult;
use crate::models::example::Example;
use crate::models::interfaces::{
    impl_extensible, write_extensions_except, write_v3, Extensions, OpenApiReferenceable,
    OpenApiSerializable,
};
use crate::models::media_type::MediaType;
use crate::models::reference::{Reference, ReferenceType};
use crate::models::schema::Schema;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use derive_more::Display;
use indexmap::IndexMap;

/// Where a parameter is read from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    /// `query`
    #[display("query")]
    Query,
    /// `header`
    #[display("header")]
    Header,
    /// `path`
    #[display("path")]
    Path,
    /// `cookie`
    #[display("cookie")]
    Cookie,
}

/// Parameter serialization style.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterStyle {
    /// `matrix`
    #[display("matrix")]
    Matrix,
    /// `label`
    #[display("label")]
    Label,
    /// `form`
    #[display("form")]
    Form,
    /// `simple`
    #[display("simple")]
    Simple,
    /// `spaceDelimited`
    #[display("spaceDelimited")]
    SpaceDelimited,
    /// `pipeDelimited`
    #[display("pipeDelimited")]
    PipeDelimited,
    /// `deepObject`
    #[display("deepObject")]
    DeepObject,
}

/// The 2.0 shape a parameter is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum V2ParameterKind {
    /// `in` comes from the parameter's location.
    #[default]
    Standard,
    /// `in: body`, synthesized from a request body.
    Body,
    /// `in: formData`, synthesized from a form request body property.
    FormData,
}

/// The `parameter` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location (`in`).
    pub location: Option<ParameterLocation>,
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Whether an empty value may be sent.
    pub allow_empty_value: bool,
    /// Explicit style. When absent the location's default applies.
    pub style: Option<ParameterStyle>,
    /// Explicit explode flag. When absent it is true exactly for `form` style.
    pub explode: Option<bool>,
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
    /// Set when this parameter stands for a component parameter.
    pub reference: Option<Reference>,
}

impl Parameter {
    /// Creates a parameter with a name, location and schema.
    pub fn new(name: impl Into<String>, location: ParameterLocation, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location: Some(location),
            schema: Some(schema),
            ..Self::default()
        }
    }

    /// A placeholder for the component parameter `id`.
    pub fn reference_to(id: impl Into<String>) -> Self {
        Self {
            unresolved_reference: true,
            reference: Some(Reference::local(ReferenceType::Parameter, id)),
            ..Self::default()
        }
    }

    /// The explicit style, else the default of the location.
    pub fn effective_style(&self) -> Option<ParameterStyle> {
        if self.style.is_some() {
            return self.style;
        }
        match self.location? {
            ParameterLocation::Query | ParameterLocation::Cookie => Some(ParameterStyle::Form),
            ParameterLocation::Header | ParameterLocation::Path => Some(ParameterStyle::Simple),
        }
    }

    /// The explicit explode flag, else true for `form` style.
    pub fn effective_explode(&self) -> bool {
        self.explode
            .unwrap_or(self.effective_style() == Some(ParameterStyle::Form))
    }

    /// 2.0 `collectionFormat` for array query parameters.
    fn collection_format(&self) -> Option<&'static str> {
        if self.location != Some(ParameterLocation::Query) {
            return None;
        }
        if self.schema.as_ref()?.schema_type.as_deref() != Some("array") {
            return None;
        }
        match self.effective_style()? {
            ParameterStyle::Form if self.effective_explode() => Some("multi"),
            ParameterStyle::PipeDelimited => Some("pipes"),
            ParameterStyle::SpaceDelimited => Some("ssv"),
            _ => None,
        }
    }

    /// Writes the 2.0 form with the given shape.
    pub(crate) fn serialize_as_v2_kind(
        &self,
        writer: &mut dyn OpenApiWriter,
        kind: V2ParameterKind,
    ) -> AppResult<()> {
        match &self.reference {
            Some(reference) => reference.serialize_as_v2(writer),
            None => self.write_v2_body(writer, kind),
        }
    }

    fn write_v2_body(&self, writer: &mut dyn OpenApiWriter, kind: V2ParameterKind) -> AppResult<()> {
        writer.write_start_object()?;
        let location = match kind {
            V2ParameterKind::FormData => Some("formData".to_string()),
            V2ParameterKind::Body => Some("body".to_string()),
            V2ParameterKind::Standard => self.location.map(|l| l.to_string()),
        };
        writer.write_property("in", location)?;
        writer.write_property("name", Some(self.name.as_str()))?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property_or_default("required", self.required, false)?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;

        let mut written_from_schema = None;
        if kind == V2ParameterKind::Body {
            writer.write_optional_object("schema", self.schema.as_ref(), |w, s| s.serialize_as_v2(w))?;
        } else if self
            .schema
            .as_ref()
            .is_some_and(|s| s.unresolved_reference || s.is_object())
        {
            // Non-body 2.0 parameters cannot point at object schemas.
            writer.write_property("type", Some("string"))?;
        } else {
            if let Some(schema) = &self.schema {
                schema.write_as_items_properties(writer)?;
                written_from_schema = Some(&schema.extensions);
            }
            writer.write_property_or_default("allowEmptyValue", self.allow_empty_value, false)?;
            if kind == V2ParameterKind::Standard {
                writer.write_property("collectionFormat", self.collection_format())?;
            }
        }

        write_extensions_except(writer, &self.extensions, written_from_schema)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Parameter {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.serialize_as_v2_kind(writer, V2ParameterKind::Standard)
    }
}

impl OpenApiReferenceable for Parameter {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("name", Some(self.name.as_str()))?;
        writer.write_property("in", self.location.map(|l| l.to_string()))?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property_or_default("required", self.required, false)?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;
        writer.write_property_or_default("allowEmptyValue", self.allow_empty_value, false)?;
        writer.write_property("style", self.style.map(|s| s.to_string()))?;
        writer.write_optional_property_or_default(
            "explode",
            self.explode,
            self.effective_style() == Some(ParameterStyle::Form),
        )?;
        writer.write_property_or_default("allowReserved", self.allow_reserved, false)?;
        writer.write_optional_object("schema", self.schema.as_ref(), |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_any("example", self.example.as_ref())?;
        writer.write_optional_map("examples", &self.examples, |w, e| e.serialize_as_v3(w))?;
        writer.write_optional_map("content", &self.content, |w, m| m.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write_v2_body(writer, V2ParameterKind::Standard)
    }
}

impl_extensible!(Parameter);
