//! # Responses
//!
//! The `responses` map of an operation and the `response` object. The 2.0
//! form keeps a single schema (taken from the first media type) plus an
//! `examples` map keyed by media type.

use crate::error::AppResult;
use crate::models::header::Header;
use crate::models::interfaces::{
    impl_extensible, write_extensions_except, write_v2, write_v3, Extensions,
    OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::link::Link;
use crate::models::media_type::MediaType;
use crate::models::reference::{Reference, ReferenceType};
use crate::writer::{write_any, OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// The `responses` object: status code (or `default`) to response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Responses {
    /// Responses keyed by status code, in insertion order.
    pub responses: IndexMap<String, Response>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Responses {
    /// Adds a response for `status`.
    pub fn with(mut self, status: impl Into<String>, response: Response) -> Self {
        self.responses.insert(status.into(), response);
        self
    }

    /// Media types produced by any response, first occurrence order.
    pub fn produces(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for key in self.responses.values().flat_map(|r| r.content.keys()) {
            if !seen.contains(&key.as_str()) {
                seen.push(key);
            }
        }
        seen
    }

    fn write(&self, writer: &mut dyn OpenApiWriter, v3: bool) -> AppResult<()> {
        writer.write_start_object()?;
        for (status, response) in &self.responses {
            writer.write_required_object(status, Some(response), |w, r| {
                if v3 {
                    r.serialize_as_v3(w)
                } else {
                    r.serialize_as_v2(w)
                }
            })?;
        }
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Responses {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, true)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, false)
    }
}

/// The `response` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// Description. Required by both versions; absent renders as `null`.
    pub description: Option<String>,
    /// Response headers.
    pub headers: IndexMap<String, Header>,
    /// Payload per media type.
    pub content: IndexMap<String, MediaType>,
    /// Design-time links to other operations.
    pub links: IndexMap<String, Link>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this response stands for a component response.
    pub reference: Option<Reference>,
}

impl Response {
    /// A response with just a description.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// A placeholder for the component response `id`.
    pub fn reference_to(id: impl Into<String>) -> Self {
        Self {
            unresolved_reference: true,
            reference: Some(Reference::local(ReferenceType::Response, id)),
            ..Self::default()
        }
    }
}

impl OpenApiSerializable for Response {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v2(self, writer)
    }
}

impl OpenApiReferenceable for Response {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_required_property("description", self.description.as_deref())?;
        writer.write_optional_map("headers", &self.headers, |w, h| h.serialize_as_v3(w))?;
        writer.write_optional_map("content", &self.content, |w, m| m.serialize_as_v3(w))?;
        writer.write_optional_map("links", &self.links, |w, l| l.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_required_property("description", self.description.as_deref())?;

        let mut hoisted = None;
        if let Some(first) = self.content.values().next() {
            writer.write_optional_object("schema", first.schema.as_ref(), |w, s| {
                s.serialize_as_v2(w)
            })?;
            if self.content.values().any(|m| m.example.is_some()) {
                writer.write_property_name("examples")?;
                writer.write_start_object()?;
                for (media_type, entry) in &self.content {
                    if let Some(example) = &entry.example {
                        writer.write_property_name(media_type)?;
                        write_any(writer, Some(example))?;
                    }
                }
                writer.write_end_object()?;
            }
            writer.write_extensions(&first.extensions)?;
            hoisted = Some(&first.extensions);
        }

        writer.write_optional_map("headers", &self.headers, |w, h| h.serialize_as_v2(w))?;
        write_extensions_except(writer, &self.extensions, hoisted)?;
        writer.write_end_object()
    }
}

impl_extensible!(Responses, Response);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any::Any;
    use crate::models::schema::Schema;
    use crate::writer::{JsonWriter, JsonWriterSettings};

    fn terse(f: impl FnOnce(&mut dyn OpenApiWriter) -> AppResult<()>) -> String {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn pets_response() -> Response {
        let mut content = IndexMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                example: Some(Any::Array(vec![])),
                ..MediaType::with_schema(Schema::reference_to("Pets"))
            },
        );
        content.insert(
            "application/xml".to_string(),
            MediaType {
                example: Some(Any::from("<pets/>")),
                ..MediaType::with_schema(Schema::of_type("string"))
            },
        );
        Response {
            content,
            ..Response::described("A list of pets")
        }
    }

    #[test]
    fn test_v2_keeps_first_schema_and_collects_examples() {
        let response = pets_response();
        assert_eq!(
            terse(|w| response.serialize_as_v2(w)),
            r##"{"description":"A list of pets","schema":{"$ref":"#/definitions/Pets"},"examples":{"application/json":[],"application/xml":"<pets/>"}}"##
        );
    }

    #[test]
    fn test_missing_description_is_null() {
        let response = Response::default();
        assert_eq!(terse(|w| response.serialize_as_v3(w)), r#"{"description":null}"#);
    }

    #[test]
    fn test_responses_map_and_produces() {
        let responses = Responses::default()
            .with("200", pets_response())
            .with("404", Response::reference_to("NotFound"));
        assert_eq!(responses.produces(), vec!["application/json", "application/xml"]);
        assert_eq!(
            terse(|w| responses.serialize_as_v2(w))
                .split("\"404\"")
                .nth(1),
            Some(r##":{"$ref":"#/responses/NotFound"}}"##)
        );
    }
}
