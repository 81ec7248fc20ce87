//! # Links and Callbacks
//!
//! Design-time relations between operations. Both are 3.0 only.

use crate::error::AppResult;
use crate::models::expression::{RuntimeExpression, RuntimeExpressionAnyWrapper};
use crate::models::interfaces::{
    impl_extensible, write_v3, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::paths::PathItem;
use crate::models::reference::Reference;
use crate::models::server::Server;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use indexmap::IndexMap;

/// The `link` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Link {
    /// URI reference to the target operation.
    pub operation_ref: Option<String>,
    /// `operationId` of the target operation.
    pub operation_id: Option<String>,
    /// Parameter values for the target operation.
    pub parameters: IndexMap<String, RuntimeExpressionAnyWrapper>,
    /// Request body for the target operation.
    pub request_body: Option<RuntimeExpressionAnyWrapper>,
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Server overriding the target operation's servers.
    pub server: Option<Server>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this link stands for a component link.
    pub reference: Option<Reference>,
}

impl OpenApiSerializable for Link {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl OpenApiReferenceable for Link {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("operationRef", self.operation_ref.as_deref())?;
        writer.write_property("operationId", self.operation_id.as_deref())?;
        writer.write_optional_map("parameters", &self.parameters, |w, p| p.write_value(w))?;
        writer.write_optional_object("requestBody", self.request_body.as_ref(), |w, b| {
            b.write_value(w)
        })?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_object("server", self.server.as_ref(), |w, s| s.serialize_as_v3(w))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

/// The `callback` object: runtime expression to path item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Callback {
    /// Path items keyed by the expression producing the callback URL.
    pub path_items: IndexMap<RuntimeExpression, PathItem>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this callback stands for a component callback.
    pub reference: Option<Reference>,
}

impl OpenApiSerializable for Callback {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl OpenApiReferenceable for Callback {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        for (expression, path_item) in &self.path_items {
            writer.write_required_object(&expression.to_string(), Some(path_item), |w, p| {
                p.serialize_as_v3(w)
            })?;
        }
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

impl_extensible!(Link, Callback);
