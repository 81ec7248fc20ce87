#![deny(missing_docs)]

//! # OpenAPI Model
//!
//! The document graph and its versioned serialization.
//!
//! Every node implements [`OpenApiSerializable`] for both 3.0 and 2.0.
//! Nodes that can stand in for a component also implement
//! [`OpenApiReferenceable`], and nodes with vendor extensions implement
//! [`OpenApiExtensible`].

pub mod components;
pub mod document;
pub mod example;
pub mod expression;
pub mod header;
pub mod info;
pub mod interfaces;
pub mod link;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod paths;
pub mod reference;
pub mod request_body;
pub mod resolution;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod tag;

pub use components::Components;
pub use document::Document;
pub use example::Example;
pub use expression::{RuntimeExpression, RuntimeExpressionAnyWrapper, SourceExpression};
pub use header::Header;
pub use info::{Contact, ExternalDocs, Info, License};
pub use interfaces::{Extensions, OpenApiExtensible, OpenApiReferenceable, OpenApiSerializable};
pub use link::{Callback, Link};
pub use media_type::{Encoding, MediaType};
pub use operation::Operation;
pub use parameter::{Parameter, ParameterLocation, ParameterStyle};
pub use paths::{OperationType, PathItem, Paths};
pub use reference::{Reference, ReferenceType};
pub use request_body::RequestBody;
pub use resolution::{ReferencedNode, Resolution};
pub use response::{Response, Responses};
pub use schema::{Discriminator, Schema, Xml};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme, SecuritySchemeType};
pub use server::{Server, ServerVariable};
pub use tag::Tag;
