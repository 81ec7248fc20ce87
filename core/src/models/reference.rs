//! # References
//!
//! A [`Reference`] either points into another resource (external) or at a named
//! entry of the document's component pools (local). The rendered pointer is a
//! pure function of the target version, the reference type and the id.

use crate::error::{AppError, AppResult};
use crate::models::interfaces::OpenApiSerializable;
use crate::version::SpecVersion;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use derive_more::Display;

/// The component pool a local reference points into.
///
/// The display form is the 3.0 pool name used in `#/components/<pool>/<id>`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    /// `schemas`
    #[display("schemas")]
    Schema,
    /// `responses`
    #[display("responses")]
    Response,
    /// `parameters`
    #[display("parameters")]
    Parameter,
    /// `examples`
    #[display("examples")]
    Example,
    /// `requestBodies`
    #[display("requestBodies")]
    RequestBody,
    /// `headers`
    #[display("headers")]
    Header,
    /// `securitySchemes`
    #[display("securitySchemes")]
    SecurityScheme,
    /// `links`
    #[display("links")]
    Link,
    /// `callbacks`
    #[display("callbacks")]
    Callback,
    /// `tags`
    #[display("tags")]
    Tag,
}

impl ReferenceType {
    /// The 2.0 top-level section holding this kind of node.
    pub fn v2_location(&self) -> AppResult<&'static str> {
        match self {
            ReferenceType::Schema => Ok("definitions"),
            ReferenceType::Parameter | ReferenceType::RequestBody => Ok("parameters"),
            ReferenceType::Response => Ok("responses"),
            ReferenceType::Header => Ok("headers"),
            ReferenceType::Tag => Ok("tags"),
            ReferenceType::SecurityScheme => Ok("securityDefinitions"),
            other => Err(AppError::Argument(format!(
                "Local reference with type '{}' is not supported in OpenAPI 2.0.",
                other
            ))),
        }
    }
}

/// A pointer to a node defined elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reference {
    /// The external document, e.g. `common.yaml`.
    pub external_resource: Option<String>,
    /// The pool of a local reference.
    pub reference_type: Option<ReferenceType>,
    /// The key inside the pool, or the fragment of an external reference.
    pub id: Option<String>,
}

impl Reference {
    /// Creates a local reference to `id` in the `reference_type` pool.
    pub fn local(reference_type: ReferenceType, id: impl Into<String>) -> Self {
        Self {
            external_resource: None,
            reference_type: Some(reference_type),
            id: Some(id.into()),
        }
    }

    /// Creates a reference into another resource.
    pub fn external(resource: impl Into<String>, id: Option<String>) -> Self {
        Self {
            external_resource: Some(resource.into()),
            reference_type: None,
            id,
        }
    }

    /// True when the reference points into another resource.
    pub fn is_external(&self) -> bool {
        self.external_resource.is_some()
    }

    /// True when the reference points into this document.
    pub fn is_local(&self) -> bool {
        self.external_resource.is_none()
    }

    /// The pointer string for 3.0 documents.
    pub fn reference_v3(&self) -> AppResult<String> {
        self.pointer(SpecVersion::V3_0)
    }

    /// The pointer string for 2.0 documents.
    pub fn reference_v2(&self) -> AppResult<String> {
        self.pointer(SpecVersion::V2_0)
    }

    fn pointer(&self, version: SpecVersion) -> AppResult<String> {
        if let Some(resource) = &self.external_resource {
            return Ok(match &self.id {
                Some(id) => format!("{}#/{}", resource, id),
                None => resource.clone(),
            });
        }
        let reference_type = self
            .reference_type
            .ok_or_else(|| AppError::Argument("The reference type is not set.".into()))?;
        let id = self.id.as_deref().unwrap_or_default();
        match reference_type {
            ReferenceType::Tag | ReferenceType::SecurityScheme => Ok(id.to_string()),
            _ => match version {
                SpecVersion::V3_0 => Ok(format!("#/components/{}/{}", reference_type, id)),
                SpecVersion::V2_0 => Ok(format!("#/{}/{}", reference_type.v2_location()?, id)),
            },
        }
    }

    fn write_pointer(&self, writer: &mut dyn OpenApiWriter, pointer: &str) -> AppResult<()> {
        match self.reference_type {
            // Tags are referenced by value, security schemes by member name.
            Some(ReferenceType::Tag) => writer.write_str(pointer),
            Some(ReferenceType::SecurityScheme) => writer.write_property_name(pointer),
            _ => {
                writer.write_start_object()?;
                writer.write_property("$ref", Some(pointer))?;
                writer.write_end_object()
            }
        }
    }
}

impl OpenApiSerializable for Reference {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let pointer = self.reference_v3()?;
        self.write_pointer(writer, &pointer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let pointer = self.reference_v2()?;
        self.write_pointer(writer, &pointer)
    }
}
