//! # Document
//!
//! The root of an OpenAPI description.
//!
//! The 2.0 form derives `host`, `basePath` and `schemes` from the first
//! server and flattens the component pools into `definitions`, `parameters`,
//! `responses` and `securityDefinitions`.

use crate::error::AppResult;
use crate::models::components::{write_component, write_component_map, Components};
use crate::models::info::{ExternalDocs, Info};
use crate::models::interfaces::{
    impl_extensible, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::parameter::{Parameter, V2ParameterKind};
use crate::models::paths::Paths;
use crate::models::reference::ReferenceType;
use crate::models::security::SecurityRequirement;
use crate::models::server::Server;
use crate::models::tag::Tag;
use crate::version::SpecVersion;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;
use std::borrow::Cow;
use url::Url;

/// The root `openapi` / `swagger` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// API metadata.
    pub info: Info,
    /// Servers hosting the API.
    pub servers: Vec<Server>,
    /// Available paths and operations.
    pub paths: Paths,
    /// Reusable component pools.
    pub components: Option<Components>,
    /// Security alternatives applying to every operation.
    pub security_requirements: Vec<SecurityRequirement>,
    /// Tag declarations.
    pub tags: Vec<Tag>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// `host`, `basePath` and `schemes` of a 2.0 document.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct HostInfo {
    pub(crate) host: Option<String>,
    pub(crate) base_path: Option<String>,
    pub(crate) schemes: Vec<String>,
}

impl HostInfo {
    /// Derives the host info from the first server; the other servers only
    /// contribute schemes when they share its host, port and path.
    pub(crate) fn from_servers(servers: &[Server]) -> Self {
        let Some(first) = servers.first() else {
            return Self::default();
        };
        let first_url = first.resolved_url();
        let Ok(absolute) = Url::parse(&first_url) else {
            return Self::from_relative(&first_url);
        };

        let mut info = Self {
            host: absolute.host_str().map(|host| match absolute.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            }),
            base_path: Some(absolute.path().to_string()).filter(|p| p != "/"),
            schemes: Vec::new(),
        };
        for server in servers {
            let Ok(url) = Url::parse(&server.resolved_url()) else {
                continue;
            };
            if same_location(&url, &absolute) && !info.schemes.iter().any(|s| s == url.scheme()) {
                info.schemes.push(url.scheme().to_string());
            }
        }
        info
    }

    /// `//host/path` and `/path` forms.
    fn from_relative(url: &str) -> Self {
        let mut rest = url;
        let mut host = None;
        if let Some(stripped) = url.strip_prefix("//") {
            let (authority, path) = match stripped.find('/') {
                Some(index) => stripped.split_at(index),
                None => (stripped, ""),
            };
            host = Some(authority.to_string()).filter(|a| !a.is_empty());
            rest = path;
        }
        Self {
            host,
            base_path: Some(rest.to_string()).filter(|p| !p.is_empty() && p != "/"),
            schemes: Vec::new(),
        }
    }
}

fn same_location(a: &Url, b: &Url) -> bool {
    let host_a = a.host_str().unwrap_or_default();
    let host_b = b.host_str().unwrap_or_default();
    host_a.eq_ignore_ascii_case(host_b)
        && a.port() == b.port()
        && a.path().eq_ignore_ascii_case(b.path())
}

impl Document {
    fn write_host_info_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let info = HostInfo::from_servers(&self.servers);
        writer.write_property("host", info.host.as_deref())?;
        writer.write_property("basePath", info.base_path.as_deref())?;
        writer.write_optional_collection("schemes", &info.schemes, |w, s| w.write_str(s))
    }

    /// Component parameters plus component request bodies as body parameters,
    /// unless a parameter already uses the same key.
    fn v2_parameters(components: &Components) -> IndexMap<String, (V2ParameterKind, Cow<'_, Parameter>)> {
        let mut parameters: IndexMap<_, _> = components
            .parameters
            .iter()
            .map(|(key, p)| (key.clone(), (V2ParameterKind::Standard, Cow::Borrowed(p))))
            .collect();
        for (key, body) in &components.request_bodies {
            if !parameters.contains_key(key) {
                parameters.insert(
                    key.clone(),
                    (V2ParameterKind::Body, Cow::Owned(body.inline_body_parameter())),
                );
            }
        }
        parameters
    }

    fn write_components_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let Some(components) = &self.components else {
            return Ok(());
        };
        let v2 = SpecVersion::V2_0;
        write_component_map(writer, "definitions", &components.schemas, ReferenceType::Schema, v2)?;

        let parameters = Self::v2_parameters(components);
        writer.write_optional_map_with_key("parameters", &parameters, |w, key, (kind, p)| {
            match kind {
                V2ParameterKind::Standard => {
                    write_component(w, key, &**p, ReferenceType::Parameter, v2)
                }
                _ => p.serialize_as_v2_kind(w, *kind),
            }
        })?;

        write_component_map(writer, "responses", &components.responses, ReferenceType::Response, v2)?;
        write_component_map(
            writer,
            "securityDefinitions",
            &components.security_schemes,
            ReferenceType::SecurityScheme,
            v2,
        )
    }
}

impl OpenApiSerializable for Document {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("openapi", Some(SpecVersion::V3_0.document_version()))?;
        writer.write_required_object("info", Some(&self.info), |w, i| i.serialize_as_v3(w))?;
        writer.write_optional_collection("servers", &self.servers, |w, s| s.serialize_as_v3(w))?;
        writer.write_required_object("paths", Some(&self.paths), |w, p| p.serialize_as_v3(w))?;
        writer.write_optional_object("components", self.components.as_ref(), |w, c| {
            c.serialize_as_v3(w)
        })?;
        writer.write_optional_collection("security", &self.security_requirements, |w, s| {
            s.serialize_as_v3(w)
        })?;
        writer.write_optional_collection("tags", &self.tags, |w, t| {
            t.serialize_as_v3_without_reference(w)
        })?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            d.serialize_as_v3(w)
        })?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("swagger", Some(SpecVersion::V2_0.document_version()))?;
        writer.write_required_object("info", Some(&self.info), |w, i| i.serialize_as_v2(w))?;
        self.write_host_info_v2(writer)?;
        writer.write_required_object("paths", Some(&self.paths), |w, p| p.serialize_as_v2(w))?;
        self.write_components_v2(writer)?;
        writer.write_optional_collection("security", &self.security_requirements, |w, s| {
            s.serialize_as_v2(w)
        })?;
        writer.write_optional_collection("tags", &self.tags, |w, t| {
            t.serialize_as_v2_without_reference(w)
        })?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            d.serialize_as_v2(w)
        })?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl_extensible!(Document);
