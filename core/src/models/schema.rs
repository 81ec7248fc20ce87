//! # Schemas
//!
//! The `schema` object with its `discriminator` and `xml` companions.
//!
//! 2.0 has a narrower schema dialect, so the 2.0 writer downgrades:
//! - `anyOf` / `oneOf` without `allOf` become a one-entry `allOf` (first alternative).
//! - `discriminator` is reduced to its property name.
//! - `readOnly` is dropped for properties the parent lists as required.
//! - `nullable` becomes `x-nullable`.

use crate::any::Any;
use crate::error::AppResult;
use crate::models::info::ExternalDocs;
use crate::models::interfaces::{
    impl_extensible, write_v3, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::reference::{Reference, ReferenceType};
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// The `schema` object.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Title.
    pub title: Option<String>,
    /// `type` keyword (`string`, `object`, `array`, ...).
    pub schema_type: Option<String>,
    /// `format` keyword (`int64`, `date-time`, `binary`, ...).
    pub format: Option<String>,
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Upper bound.
    pub maximum: Option<Decimal>,
    /// Whether the upper bound is exclusive.
    pub exclusive_maximum: Option<bool>,
    /// Lower bound.
    pub minimum: Option<Decimal>,
    /// Whether the lower bound is exclusive.
    pub exclusive_minimum: Option<bool>,
    /// Maximum string length.
    pub max_length: Option<i32>,
    /// Minimum string length.
    pub min_length: Option<i32>,
    /// ECMA 262 pattern.
    pub pattern: Option<String>,
    /// Numbers must be a multiple of this.
    pub multiple_of: Option<Decimal>,
    /// Default value.
    pub default: Option<Any>,
    /// Sent in responses only.
    pub read_only: bool,
    /// Sent in requests only.
    pub write_only: bool,
    /// Must match all of these.
    pub all_of: Vec<Schema>,
    /// Must match exactly one of these.
    pub one_of: Vec<Schema>,
    /// Must match at least one of these.
    pub any_of: Vec<Schema>,
    /// Must not match this.
    pub not: Option<Box<Schema>>,
    /// Required property names.
    pub required: Vec<String>,
    /// Element schema of an array.
    pub items: Option<Box<Schema>>,
    /// Maximum number of array elements.
    pub max_items: Option<i32>,
    /// Minimum number of array elements.
    pub min_items: Option<i32>,
    /// Whether array elements must be distinct.
    pub unique_items: Option<bool>,
    /// Object properties, in declaration order.
    pub properties: IndexMap<String, Schema>,
    /// Maximum number of object members.
    pub max_properties: Option<i32>,
    /// Minimum number of object members.
    pub min_properties: Option<i32>,
    /// When false, `additionalProperties: false` is written.
    pub additional_properties_allowed: bool,
    /// Schema of additional members.
    pub additional_properties: Option<Box<Schema>>,
    /// Polymorphism hint.
    pub discriminator: Option<Discriminator>,
    /// Example value.
    pub example: Option<Any>,
    /// Allowed values.
    pub enum_values: Vec<Any>,
    /// Whether `null` is allowed.
    pub nullable: bool,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Deprecation flag.
    pub deprecated: bool,
    /// XML mapping hints.
    pub xml: Option<Xml>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this schema stands for a component schema.
    pub reference: Option<Reference>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            title: None,
            schema_type: None,
            format: None,
            description: None,
            maximum: None,
            exclusive_maximum: None,
            minimum: None,
            exclusive_minimum: None,
            max_length: None,
            min_length: None,
            pattern: None,
            multiple_of: None,
            default: None,
            read_only: false,
            write_only: false,
            all_of: Vec::new(),
            one_of: Vec::new(),
            any_of: Vec::new(),
            not: None,
            required: Vec::new(),
            items: None,
            max_items: None,
            min_items: None,
            unique_items: None,
            properties: IndexMap::new(),
            max_properties: None,
            min_properties: None,
            additional_properties_allowed: true,
            additional_properties: None,
            discriminator: None,
            example: None,
            enum_values: Vec::new(),
            nullable: false,
            external_docs: None,
            deprecated: false,
            xml: None,
            extensions: Extensions::new(),
            unresolved_reference: false,
            reference: None,
        }
    }
}

impl Schema {
    /// A schema with only `type` set.
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// A placeholder for the component schema `id`.
    pub fn reference_to(id: impl Into<String>) -> Self {
        Self {
            unresolved_reference: true,
            reference: Some(Reference::local(ReferenceType::Schema, id)),
            ..Self::default()
        }
    }

    /// True when `type` is `object`.
    pub fn is_object(&self) -> bool {
        self.schema_type.as_deref() == Some("object")
    }

    /// Writes the 2.0 form as a member of a parent object schema.
    pub(crate) fn serialize_as_v2_in_parent(
        &self,
        writer: &mut dyn OpenApiWriter,
        parent_required: &[String],
        property_name: Option<&str>,
    ) -> AppResult<()> {
        match &self.reference {
            Some(reference) => reference.serialize_as_v2(writer),
            None => {
                writer.write_start_object()?;
                self.write_as_schema_properties(writer, parent_required, property_name)?;
                writer.write_end_object()
            }
        }
    }

    /// `format`, falling back to the first composed schema that declares one.
    fn effective_format(&self) -> Option<&str> {
        self.format
            .as_deref()
            .filter(|f| !f.is_empty())
            .or_else(|| {
                self.all_of
                    .iter()
                    .chain(&self.any_of)
                    .chain(&self.one_of)
                    .find_map(|s| s.format.as_deref())
            })
    }

    /// Writes the keywords a 2.0 non-body parameter, header or `items` object accepts.
    ///
    /// The caller owns the enclosing object scope.
    pub(crate) fn write_as_items_properties(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_property("type", self.schema_type.as_deref())?;
        writer.write_property("format", self.effective_format())?;
        writer.write_optional_object("items", self.items.as_deref(), |w, s| s.serialize_as_v2(w))?;
        writer.write_optional_any("default", self.default.as_ref())?;
        writer.write_property("maximum", self.maximum)?;
        writer.write_optional_property_or_default("exclusiveMaximum", self.exclusive_maximum, false)?;
        writer.write_property("minimum", self.minimum)?;
        writer.write_optional_property_or_default("exclusiveMinimum", self.exclusive_minimum, false)?;
        writer.write_property("maxLength", self.max_length)?;
        writer.write_property("minLength", self.min_length)?;
        writer.write_property("pattern", self.pattern.as_deref())?;
        writer.write_property("maxItems", self.max_items)?;
        writer.write_property("minItems", self.min_items)?;
        writer.write_optional_property_or_default("uniqueItems", self.unique_items, false)?;
        writer.write_optional_collection("enum", &self.enum_values, |w, a| w.write_any_value(Some(a)))?;
        writer.write_property("multipleOf", self.multiple_of)?;
        writer.write_extensions(&self.extensions)
    }

    fn write_as_schema_properties(
        &self,
        writer: &mut dyn OpenApiWriter,
        parent_required: &[String],
        property_name: Option<&str>,
    ) -> AppResult<()> {
        writer.write_property("format", self.format.as_deref())?;
        writer.write_property("title", self.title.as_deref())?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_any("default", self.default.as_ref())?;
        writer.write_property("multipleOf", self.multiple_of)?;
        writer.write_property("maximum", self.maximum)?;
        writer.write_optional_property_or_default("exclusiveMaximum", self.exclusive_maximum, false)?;
        writer.write_property("minimum", self.minimum)?;
        writer.write_optional_property_or_default("exclusiveMinimum", self.exclusive_minimum, false)?;
        writer.write_property("maxLength", self.max_length)?;
        writer.write_property("minLength", self.min_length)?;
        writer.write_property("pattern", self.pattern.as_deref())?;
        writer.write_property("maxItems", self.max_items)?;
        writer.write_property("minItems", self.min_items)?;
        writer.write_optional_property_or_default("uniqueItems", self.unique_items, false)?;
        writer.write_property("maxProperties", self.max_properties)?;
        writer.write_property("minProperties", self.min_properties)?;
        writer.write_optional_collection("required", &self.required, |w, s| w.write_str(s))?;
        writer.write_optional_collection("enum", &self.enum_values, |w, a| w.write_any_value(Some(a)))?;
        writer.write_property("type", self.schema_type.as_deref())?;
        writer.write_optional_object("items", self.items.as_deref(), |w, s| s.serialize_as_v2(w))?;
        writer.write_optional_collection("allOf", &self.all_of, |w, s| s.serialize_as_v2(w))?;

        if self.all_of.is_empty() {
            // Closest 2.0 equivalent of a union: the first alternative.
            let first = self.any_of.first().or_else(|| self.one_of.first());
            writer.write_optional_collection("allOf", first.as_slice(), |w, s| {
                s.serialize_as_v2(w)
            })?;
        }

        writer.write_optional_map_with_key("properties", &self.properties, |w, key, s| {
            s.serialize_as_v2_in_parent(w, &self.required, Some(key))
        })?;
        self.write_additional_properties(writer, false)?;
        writer.write_property(
            "discriminator",
            self.discriminator
                .as_ref()
                .and_then(|d| d.property_name.as_deref()),
        )?;

        let required_by_parent =
            property_name.is_some_and(|name| parent_required.iter().any(|r| r == name));
        if !required_by_parent {
            writer.write_property_or_default("readOnly", self.read_only, false)?;
        }

        writer.write_optional_object("xml", self.xml.as_ref(), |w, x| x.serialize_as_v2(w))?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            d.serialize_as_v2(w)
        })?;
        writer.write_optional_any("example", self.example.as_ref())?;
        if self.nullable {
            writer.write_property("x-nullable", Some(true))?;
        }
        writer.write_extensions(&self.extensions)
    }

    fn write_additional_properties(&self, writer: &mut dyn OpenApiWriter, v3: bool) -> AppResult<()> {
        if !self.additional_properties_allowed {
            return writer.write_property("additionalProperties", Some(false));
        }
        writer.write_optional_object(
            "additionalProperties",
            self.additional_properties.as_deref(),
            |w, s| {
                if v3 {
                    s.serialize_as_v3(w)
                } else {
                    s.serialize_as_v2(w)
                }
            },
        )
    }
}

impl OpenApiSerializable for Schema {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.serialize_as_v2_in_parent(writer, &[], None)
    }
}

impl OpenApiReferenceable for Schema {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("title", self.title.as_deref())?;
        writer.write_property("multipleOf", self.multiple_of)?;
        writer.write_property("maximum", self.maximum)?;
        writer.write_optional_property_or_default("exclusiveMaximum", self.exclusive_maximum, false)?;
        writer.write_property("minimum", self.minimum)?;
        writer.write_optional_property_or_default("exclusiveMinimum", self.exclusive_minimum, false)?;
        writer.write_property("maxLength", self.max_length)?;
        writer.write_property("minLength", self.min_length)?;
        writer.write_property("pattern", self.pattern.as_deref())?;
        writer.write_property("maxItems", self.max_items)?;
        writer.write_property("minItems", self.min_items)?;
        writer.write_optional_property_or_default("uniqueItems", self.unique_items, false)?;
        writer.write_property("maxProperties", self.max_properties)?;
        writer.write_property("minProperties", self.min_properties)?;
        writer.write_optional_collection("required", &self.required, |w, s| w.write_str(s))?;
        writer.write_optional_collection("enum", &self.enum_values, |w, a| w.write_any_value(Some(a)))?;
        writer.write_property("type", self.schema_type.as_deref())?;
        writer.write_optional_collection("allOf", &self.all_of, |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_collection("anyOf", &self.any_of, |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_collection("oneOf", &self.one_of, |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_object("not", self.not.as_deref(), |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_object("items", self.items.as_deref(), |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_map("properties", &self.properties, |w, s| s.serialize_as_v3(w))?;
        self.write_additional_properties(writer, true)?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property("format", self.format.as_deref())?;
        writer.write_optional_any("default", self.default.as_ref())?;
        writer.write_property_or_default("nullable", self.nullable, false)?;
        writer.write_optional_object("discriminator", self.discriminator.as_ref(), |w, d| {
            d.serialize_as_v3(w)
        })?;
        writer.write_property_or_default("readOnly", self.read_only, false)?;
        writer.write_property_or_default("writeOnly", self.write_only, false)?;
        writer.write_optional_object("xml", self.xml.as_ref(), |w, x| x.serialize_as_v3(w))?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            d.serialize_as_v3(w)
        })?;
        writer.write_optional_any("example", self.example.as_ref())?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        self.write_as_schema_properties(writer, &[], None)?;
        writer.write_end_object()
    }
}

/// The `discriminator` object. 2.0 keeps only the property name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Discriminator {
    /// Name of the property holding the type name.
    pub property_name: Option<String>,
    /// Payload values to schema names or references.
    pub mapping: IndexMap<String, String>,
}

impl OpenApiSerializable for Discriminator {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("propertyName", self.property_name.as_deref())?;
        writer.write_optional_map("mapping", &self.mapping, |w, s| w.write_str(s))?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

/// The `xml` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Xml {
    /// Element or attribute name.
    pub name: Option<String>,
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Name prefix.
    pub prefix: Option<String>,
    /// Rendered as an attribute instead of an element.
    pub attribute: bool,
    /// Arrays are wrapped in an outer element.
    pub wrapped: bool,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Xml {
    fn write(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("name", self.name.as_deref())?;
        writer.write_property("namespace", self.namespace.as_deref())?;
        writer.write_property("prefix", self.prefix.as_deref())?;
        writer.write_property_or_default("attribute", self.attribute, false)?;
        writer.write_property_or_default("wrapped", self.wrapped, false)?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Xml {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }
}

impl_extensible!(Schema, Xml);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{JsonWriter, JsonWriterSettings};

    fn terse(f: impl FnOnce(&mut dyn OpenApiWriter) -> AppResult<()>) -> String {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn pet() -> Schema {
        let mut properties = IndexMap::new();
        properties.insert("name".to_string(), Schema::of_type("string"));
        Schema {
            schema_type: Some("object".into()),
            properties,
            reference: Some(Reference::local(ReferenceType::Schema, "Pet")),
            ..Schema::default()
        }
    }

    #[test]
    fn test_referenced_schema_per_version() {
        let schema = pet();
        assert_eq!(
            terse(|w| schema.serialize_as_v3(w)),
            r##"{"$ref":"#/components/schemas/Pet"}"##
        );
        assert_eq!(
            terse(|w| schema.serialize_as_v2(w)),
            r##"{"$ref":"#/definitions/Pet"}"##
        );
        assert_eq!(
            terse(|w| schema.serialize_as_v3_without_reference(w)),
            r#"{"type":"object","properties":{"name":{"type":"string"}}}"#
        );
    }

    #[test]
    fn test_v2_union_downgrade() {
        let schema = Schema {
            one_of: vec![Schema::reference_to("Cat"), Schema::reference_to("Dog")],
            discriminator: Some(Discriminator {
                property_name: Some("petType".into()),
                ..Discriminator::default()
            }),
            ..Schema::default()
        };
        assert_eq!(
            terse(|w| schema.serialize_as_v2(w)),
            r##"{"allOf":[{"$ref":"#/definitions/Cat"}],"discriminator":"petType"}"##
        );
        assert_eq!(
            terse(|w| schema.serialize_as_v3(w)),
            r##"{"oneOf":[{"$ref":"#/components/schemas/Cat"},{"$ref":"#/components/schemas/Dog"}],"discriminator":{"propertyName":"petType"}}"##
        );
    }

    #[test]
    fn test_v2_read_only_dropped_for_required_properties() {
        let read_only = Schema {
            read_only: true,
            ..Schema::of_type("integer")
        };
        let mut properties = IndexMap::new();
        properties.insert("id".to_string(), read_only.clone());
        properties.insert("etag".to_string(), read_only);
        let schema = Schema {
            required: vec!["id".into()],
            properties,
            ..Schema::of_type("object")
        };
        assert_eq!(
            terse(|w| schema.serialize_as_v2(w)),
            r#"{"required":["id"],"type":"object","properties":{"id":{"type":"integer"},"etag":{"type":"integer","readOnly":true}}}"#
        );
    }

    #[test]
    fn test_nullable_and_closed_objects() {
        let schema = Schema {
            nullable: true,
            additional_properties_allowed: false,
            ..Schema::of_type("object")
        };
        assert_eq!(
            terse(|w| schema.serialize_as_v2(w)),
            r#"{"type":"object","additionalProperties":false,"x-nullable":true}"#
        );
        assert_eq!(
            terse(|w| schema.serialize_as_v3(w)),
            r#"{"type":"object","additionalProperties":false,"nullable":true}"#
        );
    }

    #[test]
    fn test_items_properties_inherit_composed_format() {
        let schema = Schema {
            all_of: vec![Schema {
                format: Some("int64".into()),
                ..Schema::default()
            }],
            maximum: Some(Decimal::new(100, 0)),
            ..Schema::of_type("integer")
        };
        let out = terse(|w| {
            w.write_start_object()?;
            schema.write_as_items_properties(w)?;
            w.write_end_object()
        });
        assert_eq!(out, r#"{"type":"integer","format":"int64","maximum":100}"#);
    }
}
