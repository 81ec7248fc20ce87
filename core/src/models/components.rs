//! # Components
//!
//! The reusable pools of a 3.0 document. 2.0 spreads some of them over
//! top-level sections instead (see the document's 2.0 form).

use crate::error::{AppError, AppResult};
use crate::models::example::Example;
use crate::models::header::Header;
use crate::models::interfaces::{
    impl_extensible, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::link::{Callback, Link};
use crate::models::parameter::Parameter;
use crate::models::reference::ReferenceType;
use crate::models::request_body::RequestBody;
use crate::models::response::Response;
use crate::models::schema::Schema;
use crate::models::security::SecurityScheme;
use crate::version::SpecVersion;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// The `components` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Components {
    /// Reusable schemas.
    pub schemas: IndexMap<String, Schema>,
    /// Reusable responses.
    pub responses: IndexMap<String, Response>,
    /// Reusable parameters.
    pub parameters: IndexMap<String, Parameter>,
    /// Reusable examples.
    pub examples: IndexMap<String, Example>,
    /// Reusable request bodies.
    pub request_bodies: IndexMap<String, RequestBody>,
    /// Reusable headers.
    pub headers: IndexMap<String, Header>,
    /// Reusable security schemes.
    pub security_schemes: IndexMap<String, SecurityScheme>,
    /// Reusable links.
    pub links: IndexMap<String, Link>,
    /// Reusable callbacks.
    pub callbacks: IndexMap<String, Callback>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Writes a pool entry.
///
/// An entry whose reference points at its own key is the definition itself, so
/// its body is written; any other reference is written as a pointer. Security
/// schemes are only referenced by name, so a pool entry pointing elsewhere is
/// an `Argument` error.
pub(crate) fn write_component<T: OpenApiReferenceable>(
    writer: &mut dyn OpenApiWriter,
    key: &str,
    node: &T,
    reference_type: ReferenceType,
    version: SpecVersion,
) -> AppResult<()> {
    let is_self = node.reference().is_some_and(|r| {
        r.is_local() && r.reference_type == Some(reference_type) && r.id.as_deref() == Some(key)
    });
    if reference_type == ReferenceType::SecurityScheme && !is_self {
        if let Some(reference) = node.reference() {
            return Err(AppError::Argument(format!(
                "security scheme `{}` points at `{}` and cannot be written as a pointer",
                key,
                reference.id.as_deref().unwrap_or_default()
            )));
        }
    }
    match (version, is_self) {
        (SpecVersion::V3_0, true) => node.serialize_as_v3_without_reference(writer),
        (SpecVersion::V3_0, false) => node.serialize_as_v3(writer),
        (SpecVersion::V2_0, true) => node.serialize_as_v2_without_reference(writer),
        (SpecVersion::V2_0, false) => node.serialize_as_v2(writer),
    }
}

/// Writes `name: {key: component}` through [`write_component`].
pub(crate) fn write_component_map<T: OpenApiReferenceable>(
    writer: &mut dyn OpenApiWriter,
    name: &str,
    pool: &IndexMap<String, T>,
    reference_type: ReferenceType,
    version: SpecVersion,
) -> AppResult<()> {
    writer.write_optional_map_with_key(name, pool, |w, key, node| {
        write_component(w, key, node, reference_type, version)
    })
}

impl OpenApiSerializable for Components {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let v3 = SpecVersion::V3_0;
        writer.write_start_object()?;
        write_component_map(writer, "schemas", &self.schemas, ReferenceType::Schema, v3)?;
        write_component_map(writer, "responses", &self.responses, ReferenceType::Response, v3)?;
        write_component_map(writer, "parameters", &self.parameters, ReferenceType::Parameter, v3)?;
        write_component_map(writer, "examples", &self.examples, ReferenceType::Example, v3)?;
        write_component_map(
            writer,
            "requestBodies",
            &self.request_bodies,
            ReferenceType::RequestBody,
            v3,
        )?;
        write_component_map(writer, "headers", &self.headers, ReferenceType::Header, v3)?;
        write_component_map(
            writer,
            "securitySchemes",
            &self.security_schemes,
            ReferenceType::SecurityScheme,
            v3,
        )?;
        write_component_map(writer, "links", &self.links, ReferenceType::Link, v3)?;
        write_component_map(writer, "callbacks", &self.callbacks, ReferenceType::Callback, v3)?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl_extensible!(Components);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reference::Reference;
    use crate::writer::{JsonWriter, JsonWriterSettings};

    #[test]
    fn test_self_references_write_bodies() {
        let mut components = Components::default();
        components.schemas.insert(
            "Pet".into(),
            Schema {
                reference: Some(Reference::local(ReferenceType::Schema, "Pet")),
                ..Schema::of_type("object")
            },
        );
        components.schemas.insert("Pets".into(), Schema::reference_to("Pet"));
        components
            .responses
            .insert("NotFound".into(), Response::described("Not found"));

        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        components.serialize_as_v3(&mut writer).unwrap();
        components.serialize_as_v2(&mut writer).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            r##"{"schemas":{"Pet":{"type":"object"},"Pets":{"$ref":"#/components/schemas/Pet"}},"responses":{"NotFound":{"description":"Not found"}}}"##
        );
    }

    #[test]
    fn test_security_scheme_pointing_elsewhere_fails() {
        let mut components = Components::default();
        components
            .security_schemes
            .insert("b".into(), SecurityScheme::default());
        components
            .security_schemes
            .insert("a".into(), SecurityScheme::reference_to("b"));

        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        assert!(matches!(
            components.serialize_as_v3(&mut writer),
            Err(AppError::Argument(_))
        ));

        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        let mut own = Components::default();
        own.security_schemes.insert(
            "api_key".into(),
            SecurityScheme {
                reference: Some(Reference::local(ReferenceType::SecurityScheme, "api_key")),
                ..SecurityScheme::default()
            },
        );
        own.serialize_as_v3(&mut writer).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.starts_with(r#"{"securitySchemes":{"api_key":{"type":"apiKey""#));
    }
}
