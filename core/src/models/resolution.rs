//! # Reference Resolution
//!
//! Looks up the node a local reference points at. Resolution is a pure lookup
//! that borrows from the document; [`Document::stamp_reference`] is the
//! separate, explicit write for callers that want the found node to carry the
//! reference afterwards.

use crate::error::{AppError, AppResult};
use crate::models::components::Components;
use crate::models::document::Document;
use crate::models::example::Example;
use crate::models::header::Header;
use crate::models::interfaces::OpenApiReferenceable;
use crate::models::link::{Callback, Link};
use crate::models::parameter::Parameter;
use crate::models::reference::{Reference, ReferenceType};
use crate::models::request_body::RequestBody;
use crate::models::response::Response;
use crate::models::schema::Schema;
use crate::models::security::SecurityScheme;
use crate::models::tag::Tag;

/// A node found by [`Document::resolve_reference`], borrowed from the document.
#[derive(Debug, Clone, Copy)]
pub enum ReferencedNode<'a> {
    /// An entry of `components.schemas`.
    Schema(&'a Schema),
    /// An entry of `components.responses`.
    Response(&'a Response),
    /// An entry of `components.parameters`.
    Parameter(&'a Parameter),
    /// An entry of `components.examples`.
    Example(&'a Example),
    /// An entry of `components.requestBodies`.
    RequestBody(&'a RequestBody),
    /// An entry of `components.headers`.
    Header(&'a Header),
    /// An entry of `components.securitySchemes`.
    SecurityScheme(&'a SecurityScheme),
    /// An entry of `components.links`.
    Link(&'a Link),
    /// An entry of `components.callbacks`.
    Callback(&'a Callback),
    /// A tag declared on the document.
    Tag(&'a Tag),
}

impl<'a> ReferencedNode<'a> {
    /// The node seen through its referenceable capability.
    pub fn as_referenceable(&self) -> &'a dyn OpenApiReferenceable {
        match *self {
            ReferencedNode::Schema(n) => n,
            ReferencedNode::Response(n) => n,
            ReferencedNode::Parameter(n) => n,
            ReferencedNode::Example(n) => n,
            ReferencedNode::RequestBody(n) => n,
            ReferencedNode::Header(n) => n,
            ReferencedNode::SecurityScheme(n) => n,
            ReferencedNode::Link(n) => n,
            ReferencedNode::Callback(n) => n,
            ReferencedNode::Tag(n) => n,
        }
    }

    /// The reference currently carried by the node.
    pub fn reference(&self) -> Option<&'a Reference> {
        self.as_referenceable().reference()
    }

    /// The pool the node lives in.
    pub fn reference_type(&self) -> ReferenceType {
        match self {
            ReferencedNode::Schema(_) => ReferenceType::Schema,
            ReferencedNode::Response(_) => ReferenceType::Response,
            ReferencedNode::Parameter(_) => ReferenceType::Parameter,
            ReferencedNode::Example(_) => ReferenceType::Example,
            ReferencedNode::RequestBody(_) => ReferenceType::RequestBody,
            ReferencedNode::Header(_) => ReferenceType::Header,
            ReferencedNode::SecurityScheme(_) => ReferenceType::SecurityScheme,
            ReferencedNode::Link(_) => ReferenceType::Link,
            ReferencedNode::Callback(_) => ReferenceType::Callback,
            ReferencedNode::Tag(_) => ReferenceType::Tag,
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// The node the reference points at.
    pub node: ReferencedNode<'a>,
    /// True when the node already carries an equal reference.
    pub already_resolved: bool,
}

/// Checks that `reference` can be resolved inside a single document.
fn local_target(reference: &Reference) -> AppResult<(ReferenceType, &str)> {
    if reference.is_external() {
        return Err(AppError::Argument(
            "Resolving external references is not supported.".into(),
        ));
    }
    let reference_type = reference
        .reference_type
        .ok_or_else(|| AppError::Argument("Local reference must have type specified.".into()))?;
    let id = reference
        .id
        .as_deref()
        .ok_or_else(|| AppError::Argument("Local reference must have an id.".into()))?;
    Ok((reference_type, id))
}

fn missing_components(id: &str) -> AppError {
    AppError::Reference {
        id: id.to_string(),
        message: format!("The document has no components to resolve '{}' against.", id),
    }
}

fn find<'a, T>(pool: &'a indexmap::IndexMap<String, T>, id: &str) -> AppResult<&'a T> {
    pool.get(id).ok_or_else(|| AppError::invalid_reference_id(id))
}

impl Document {
    fn pools(&self, id: &str) -> AppResult<&Components> {
        self.components.as_ref().ok_or_else(|| missing_components(id))
    }

    /// Finds the node `reference` points at.
    ///
    /// Only local references with a type and an id can be resolved. Tags are
    /// looked up by name in the document's tag list; everything else in the
    /// matching component pool. The same `(type, id)` always yields the same
    /// node instance.
    pub fn resolve_reference(&self, reference: &Reference) -> AppResult<Resolution<'_>> {
        let (reference_type, id) = local_target(reference)?;
        tracing::trace!(%reference_type, id, "resolving reference");

        let node = match reference_type {
            ReferenceType::Tag => ReferencedNode::Tag(
                self.tags
                    .iter()
                    .find(|t| t.name == id)
                    .ok_or_else(|| AppError::invalid_reference_id(id))?,
            ),
            ReferenceType::Schema => ReferencedNode::Schema(find(&self.pools(id)?.schemas, id)?),
            ReferenceType::Response => {
                ReferencedNode::Response(find(&self.pools(id)?.responses, id)?)
            }
            ReferenceType::Parameter => {
                ReferencedNode::Parameter(find(&self.pools(id)?.parameters, id)?)
            }
            ReferenceType::Example => ReferencedNode::Example(find(&self.pools(id)?.examples, id)?),
            ReferenceType::RequestBody => {
                ReferencedNode::RequestBody(find(&self.pools(id)?.request_bodies, id)?)
            }
            ReferenceType::Header => ReferencedNode::Header(find(&self.pools(id)?.headers, id)?),
            ReferenceType::SecurityScheme => {
                ReferencedNode::SecurityScheme(find(&self.pools(id)?.security_schemes, id)?)
            }
            ReferenceType::Link => ReferencedNode::Link(find(&self.pools(id)?.links, id)?),
            ReferenceType::Callback => {
                ReferencedNode::Callback(find(&self.pools(id)?.callbacks, id)?)
            }
        };

        let already_resolved = node.reference() == Some(reference);
        Ok(Resolution {
            node,
            already_resolved,
        })
    }

    /// Resolves `reference` and records it on the found node.
    ///
    /// Returns whether the node already carried it.
    pub fn stamp_reference(&mut self, reference: &Reference) -> AppResult<bool> {
        let (reference_type, id) = local_target(reference)?;
        tracing::trace!(%reference_type, id, "stamping reference");

        macro_rules! stamp {
            ($node:expr) => {{
                let node = $node;
                let already = node.reference.as_ref() == Some(reference);
                node.reference = Some(reference.clone());
                node.unresolved_reference = false;
                Ok(already)
            }};
        }
        macro_rules! stamp_in {
            ($pool:ident) => {{
                let components = self
                    .components
                    .as_mut()
                    .ok_or_else(|| missing_components(id))?;
                stamp!(components
                    .$pool
                    .get_mut(id)
                    .ok_or_else(|| AppError::invalid_reference_id(id))?)
            }};
        }

        match reference_type {
            ReferenceType::Tag => stamp!(self
                .tags
                .iter_mut()
                .find(|t| t.name == id)
                .ok_or_else(|| AppError::invalid_reference_id(id))?),
            ReferenceType::Schema => stamp_in!(schemas),
            ReferenceType::Response => stamp_in!(responses),
            ReferenceType::Parameter => stamp_in!(parameters),
            ReferenceType::Example => stamp_in!(examples),
            ReferenceType::RequestBody => stamp_in!(request_bodies),
            ReferenceType::Header => stamp_in!(headers),
            ReferenceType::SecurityScheme => stamp_in!(security_schemes),
            ReferenceType::Link => stamp_in!(links),
            ReferenceType::Callback => stamp_in!(callbacks),
        }
    }
}
