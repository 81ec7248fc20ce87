//! # Operations
//!
//! A single API operation on a path. The 2.0 form has no request body, so the
//! body is turned into parameters and its media types into `consumes`; the
//! response media types become `produces`.

use crate::error::AppResult;
use crate::models::info::ExternalDocs;
use crate::models::interfaces::{impl_extensible, Extensions, OpenApiSerializable};
use crate::models::link::Callback;
use crate::models::parameter::{Parameter, V2ParameterKind};
use crate::models::request_body::RequestBody;
use crate::models::response::Responses;
use crate::models::security::SecurityRequirement;
use crate::models::server::Server;
use crate::models::tag::Tag;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;
use std::borrow::Cow;

/// The `operation` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    /// Tags used for grouping, usually references to document tags.
    pub tags: Vec<Tag>,
    /// Short summary.
    pub summary: Option<String>,
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Parameters, overriding path-level ones.
    pub parameters: Vec<Parameter>,
    /// Request payload.
    pub request_body: Option<RequestBody>,
    /// Possible responses.
    pub responses: Responses,
    /// Out-of-band callbacks keyed by name.
    pub callbacks: IndexMap<String, Callback>,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Security alternatives for this operation.
    pub security: Vec<SecurityRequirement>,
    /// Servers overriding the path's servers.
    pub servers: Vec<Server>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Operation {
    /// Parameters as 2.0 sees them: the declared ones followed by the ones
    /// synthesized from the request body.
    fn v2_parameters(&self) -> Vec<(V2ParameterKind, Cow<'_, Parameter>)> {
        let mut parameters: Vec<_> = self
            .parameters
            .iter()
            .map(|p| (V2ParameterKind::Standard, Cow::Borrowed(p)))
            .collect();
        let Some(body) = &self.request_body else {
            return parameters;
        };
        // Nothing to describe without a media type or a reference.
        if body.content.is_empty() && body.reference.is_none() {
            return parameters;
        }
        let form = if body.is_form() {
            body.convert_to_form_data_parameters()
        } else {
            None
        };
        match form {
            Some(fields) => parameters.extend(
                fields
                    .into_iter()
                    .map(|p| (V2ParameterKind::FormData, Cow::Owned(p))),
            ),
            None => parameters.push((
                V2ParameterKind::Body,
                Cow::Owned(body.convert_to_body_parameter()),
            )),
        }
        parameters
    }

    /// Distinct schemes of the absolute operation-level server URLs.
    fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = Vec::new();
        for server in &self.servers {
            if let Ok(url) = url::Url::parse(&server.resolved_url()) {
                if !schemes.iter().any(|s| s == url.scheme()) {
                    schemes.push(url.scheme().to_string());
                }
            }
        }
        schemes
    }
}

impl OpenApiSerializable for Operation {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_optional_collection("tags", &self.tags, |w, t| t.serialize_as_v3(w))?;
        writer.write_property("summary", self.summary.as_deref())?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            d.serialize_as_v3(w)
        })?;
        writer.write_property("operationId", self.operation_id.as_deref())?;
        writer.write_optional_collection("parameters", &self.parameters, |w, p| {
            p.serialize_as_v3(w)
        })?;
        writer.write_optional_object("requestBody", self.request_body.as_ref(), |w, b| {
            b.serialize_as_v3(w)
        })?;
        writer.write_required_object("responses", Some(&self.responses), |w, r| {
            r.serialize_as_v3(w)
        })?;
        writer.write_optional_map("callbacks", &self.callbacks, |w, c| c.serialize_as_v3(w))?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;
        writer.write_optional_collection("security", &self.security, |w, s| s.serialize_as_v3(w))?;
        writer.write_optional_collection("servers", &self.servers, |w, s| s.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_optional_collection("tags", &self.tags, |w, t| t.serialize_as_v2(w))?;
        writer.write_property("summary", self.summary.as_deref())?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            d.serialize_as_v2(w)
        })?;
        writer.write_property("operationId", self.operation_id.as_deref())?;

        if let Some(body) = &self.request_body {
            let consumes: Vec<&str> = body.content.keys().map(String::as_str).collect();
            writer.write_optional_collection("consumes", &consumes, |w, c| w.write_str(c))?;
        }
        let produces = self.responses.produces();
        writer.write_optional_collection("produces", &produces, |w, p| w.write_str(p))?;

        let parameters = self.v2_parameters();
        writer.write_optional_collection("parameters", &parameters, |w, (kind, p)| {
            p.serialize_as_v2_kind(w, *kind)
        })?;
        writer.write_required_object("responses", Some(&self.responses), |w, r| {
            r.serialize_as_v2(w)
        })?;
        let schemes = self.schemes();
        writer.write_optional_collection("schemes", &schemes, |w, s| w.write_str(s))?;
        writer.write_property_or_default("deprecated", self.deprecated, false)?;
        writer.write_optional_collection("security", &self.security, |w, s| s.serialize_as_v2(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl_extensible!(Operation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media_type::MediaType;
    use crate::models::parameter::ParameterLocation;
    use crate::models::response::Response;
    use crate::models::schema::Schema;
    use crate::writer::{JsonWriter, JsonWriterSettings};

    fn terse(f: impl FnOnce(&mut dyn OpenApiWriter) -> AppResult<()>) -> String {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn pet_schema() -> Schema {
        let mut properties = IndexMap::new();
        properties.insert("name".to_string(), Schema::of_type("string"));
        Schema {
            properties,
            ..Schema::of_type("object")
        }
    }

    fn with_body(media_type: &str) -> Operation {
        let mut content = IndexMap::new();
        content.insert(media_type.to_string(), MediaType::with_schema(pet_schema()));
        Operation {
            request_body: Some(RequestBody {
                content,
                ..RequestBody::default()
            }),
            responses: Responses::default().with("200", Response::described("OK")),
            ..Operation::default()
        }
    }

    #[test]
    fn test_v2_json_body_becomes_body_parameter() {
        let op = with_body("application/json");
        assert_eq!(
            terse(|w| op.serialize_as_v2(w)),
            r#"{"consumes":["application/json"],"parameters":[{"in":"body","name":"body","schema":{"type":"object","properties":{"name":{"type":"string"}}}}],"responses":{"200":{"description":"OK"}}}"#
        );
    }

    #[test]
    fn test_v2_form_body_becomes_form_parameters() {
        let op = with_body("application/x-www-form-urlencoded");
        assert_eq!(
            terse(|w| op.serialize_as_v2(w)),
            r#"{"consumes":["application/x-www-form-urlencoded"],"parameters":[{"in":"formData","name":"name","type":"string"}],"responses":{"200":{"description":"OK"}}}"#
        );
    }

    #[test]
    fn test_v2_empty_body_adds_no_parameter() {
        let op = Operation {
            request_body: Some(RequestBody {
                description: Some("nothing".into()),
                ..RequestBody::default()
            }),
            responses: Responses::default().with("200", Response::described("OK")),
            ..Operation::default()
        };
        assert!(op.v2_parameters().is_empty());
        assert_eq!(
            terse(|w| op.serialize_as_v2(w)),
            r#"{"responses":{"200":{"description":"OK"}}}"#
        );
    }

    #[test]
    fn test_v2_referenced_body_keeps_reference() {
        let op = Operation {
            request_body: Some(RequestBody::reference_to("NewPet")),
            ..Operation::default()
        };
        let parameters = op.v2_parameters();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].0, V2ParameterKind::Body);
        assert!(parameters[0].1.reference.is_some());
    }

    #[test]
    fn test_v2_declared_parameters_come_first() {
        let mut op = with_body("application/json");
        op.parameters
            .push(Parameter::new("id", ParameterLocation::Path, Schema::of_type("string")));
        let kinds: Vec<_> = op.v2_parameters().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![V2ParameterKind::Standard, V2ParameterKind::Body]);
    }

    #[test]
    fn test_v2_produces_and_schemes() {
        let mut content = IndexMap::new();
        content.insert("application/json".to_string(), MediaType::default());
        let op = Operation {
            responses: Responses::default().with(
                "200",
                Response {
                    content,
                    ..Response::described("OK")
                },
            ),
            servers: vec![
                Server::new("https://api.example.com/v1"),
                Server::new("http://api.example.com/v1"),
                Server::new("https://mirror.example.com"),
                Server::new("/relative"),
            ],
            deprecated: true,
            ..Operation::default()
        };
        assert_eq!(
            terse(|w| op.serialize_as_v2(w)),
            r#"{"produces":["application/json"],"responses":{"200":{"description":"OK"}},"schemes":["https","http"],"deprecated":true}"#
        );
    }

    #[test]
    fn test_v3_field_order() {
        let op = Operation {
            tags: vec![Tag::reference_to("pet")],
            summary: Some("Add a pet".into()),
            operation_id: Some("addPet".into()),
            ..with_body("application/json")
        };
        assert_eq!(
            terse(|w| op.serialize_as_v3(w)),
            r#"{"tags":["pet"],"summary":"Add a pet","operationId":"addPet","requestBody":{"content":{"application/json":{"schema":{"type":"object","properties":{"name":{"type":"string"}}}}}},"responses":{"200":{"description":"OK"}}}"#
        );
    }
}
