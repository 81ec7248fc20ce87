//! # Request Bodies
//!
//! 3.0 request bodies and their conversion into 2.0 parameters.
//!
//! A body becomes one `in: body` parameter named `body` (or the value of the
//! `x-bodyName` extension). Form payloads instead become one `in: formData`
//! parameter per schema property.

use crate::any::{Any, Primitive};
use crate::error::AppResult;
use crate::models::interfaces::{
    impl_extensible, write_v3, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::media_type::MediaType;
use crate::models::parameter::Parameter;
use crate::models::reference::{Reference, ReferenceType};
use crate::models::schema::Schema;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// Extension naming the synthesized 2.0 body parameter.
pub const BODY_NAME_EXTENSION: &str = "x-bodyName";

/// Media types whose payloads map to 2.0 `formData` parameters.
pub const FORM_MEDIA_TYPES: [&str; 2] = ["application/x-www-form-urlencoded", "multipart/form-data"];

/// The `requestBody` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestBody {
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Payload per media type.
    pub content: IndexMap<String, MediaType>,
    /// Whether the body is mandatory.
    pub required: bool,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this body stands for a component request body.
    pub reference: Option<Reference>,
}

impl RequestBody {
    /// A placeholder for the component request body `id`.
    pub fn reference_to(id: impl Into<String>) -> Self {
        Self {
            unresolved_reference: true,
            reference: Some(Reference::local(ReferenceType::RequestBody, id)),
            ..Self::default()
        }
    }

    /// True when any content entry is a form media type.
    pub fn is_form(&self) -> bool {
        self.content
            .keys()
            .any(|k| FORM_MEDIA_TYPES.contains(&k.as_str()))
    }

    /// The schema of the first content entry.
    fn first_schema(&self) -> Option<&Schema> {
        self.content.values().next().and_then(|m| m.schema.as_ref())
    }

    /// Converts to a single 2.0 body parameter.
    ///
    /// A referenced body keeps its reference, which 2.0 renders under `parameters`.
    pub fn convert_to_body_parameter(&self) -> Parameter {
        if self.reference.is_some() {
            return Parameter {
                unresolved_reference: self.unresolved_reference,
                reference: self.reference.clone(),
                ..Parameter::default()
            };
        }
        self.inline_body_parameter()
    }

    /// The body parameter built from this body's own fields, ignoring any reference.
    pub(crate) fn inline_body_parameter(&self) -> Parameter {
        let mut extensions = self.extensions.clone();
        let name = match extensions.shift_remove(BODY_NAME_EXTENSION) {
            Some(Any::Primitive(Primitive::String(name))) => name,
            _ => "body".to_string(),
        };
        Parameter {
            name,
            description: self.description.clone(),
            required: self.required,
            schema: Some(self.first_schema().cloned().unwrap_or_default()),
            extensions,
            ..Parameter::default()
        }
    }

    /// Converts to one 2.0 form parameter per property of the first content schema.
    ///
    /// Returns `None` when that schema has no properties to split.
    /// Binary strings become `type: file`.
    pub fn convert_to_form_data_parameters(&self) -> Option<Vec<Parameter>> {
        let schema = self.first_schema()?;
        if schema.properties.is_empty() {
            return None;
        }
        let parameters = schema
            .properties
            .iter()
            .map(|(name, property)| {
                let mut property = property.clone();
                let is_string = property
                    .schema_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("string"));
                let is_binary = property.format.as_deref().is_some_and(|f| {
                    f.eq_ignore_ascii_case("binary") || f.eq_ignore_ascii_case("base64")
                });
                if is_string && is_binary {
                    property.schema_type = Some("file".into());
                    property.format = None;
                }
                Parameter {
                    name: name.clone(),
                    description: property.description.clone(),
                    required: schema.required.contains(name),
                    schema: Some(property),
                    ..Parameter::default()
                }
            })
            .collect();
        Some(parameters)
    }
}

impl OpenApiSerializable for RequestBody {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl OpenApiReferenceable for RequestBody {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_required_map("content", &self.content, |w, m| m.serialize_as_v3(w))?;
        writer.write_property_or_default("required", self.required, false)?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl_extensible!(RequestBody);
