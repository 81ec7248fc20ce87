//! # Node Capabilities
//!
//! Every node composes the capabilities it needs instead of inheriting from a
//! common base: serializable under both versions, referenceable, extensible.

use crate::any::Any;
use crate::error::AppResult;
use crate::models::reference::Reference;
use crate::writer::{write_any, OpenApiWriter};
use indexmap::IndexMap;

/// Vendor extensions (`x-...`) attached to a node, in insertion order.
pub type Extensions = IndexMap<String, Any>;

/// A node that can render itself for both supported OpenAPI versions.
///
/// Nodes without a 2.0 counterpart implement [`OpenApiSerializable::serialize_as_v2`]
/// as a no-op so callers can treat every node uniformly.
pub trait OpenApiSerializable {
    /// Renders the node as OpenAPI 3.0.
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()>;

    /// Renders the node as OpenAPI 2.0.
    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()>;
}

/// A node that may stand in for another node through a [`Reference`].
///
/// When a reference is set, `serialize_as_v*` emits only the pointer; the
/// `*_without_reference` variants always emit the node's own body.
pub trait OpenApiReferenceable: OpenApiSerializable {
    /// True when the node is a placeholder that was never resolved.
    fn unresolved_reference(&self) -> bool;

    /// The pointer this node stands for, if any.
    fn reference(&self) -> Option<&Reference>;

    /// Renders the full 3.0 body, ignoring the reference.
    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()>;

    /// Renders the full 2.0 body, ignoring the reference.
    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()>;
}

/// A node carrying vendor extensions.
pub trait OpenApiExtensible {
    /// The node's extensions.
    fn extensions(&self) -> &Extensions;
}

/// Writes the 3.0 form of a referenceable node: the pointer when set, else the body.
pub(crate) fn write_v3<T: OpenApiReferenceable + ?Sized>(
    node: &T,
    writer: &mut dyn OpenApiWriter,
) -> AppResult<()> {
    match node.reference() {
        Some(reference) => reference.serialize_as_v3(writer),
        None => node.serialize_as_v3_without_reference(writer),
    }
}

/// Writes the 2.0 form of a referenceable node: the pointer when set, else the body.
pub(crate) fn write_v2<T: OpenApiReferenceable + ?Sized>(
    node: &T,
    writer: &mut dyn OpenApiWriter,
) -> AppResult<()> {
    match node.reference() {
        Some(reference) => reference.serialize_as_v2(writer),
        None => node.serialize_as_v2_without_reference(writer),
    }
}

/// Writes extensions, skipping keys already emitted from `written`.
pub(crate) fn write_extensions_except(
    writer: &mut dyn OpenApiWriter,
    extensions: &Extensions,
    written: Option<&Extensions>,
) -> AppResult<()> {
    for (key, value) in extensions {
        if written.is_some_and(|w| w.contains_key(key)) {
            continue;
        }
        writer.write_property_name(key)?;
        write_any(writer, Some(value))?;
    }
    Ok(())
}

/// Implements [`OpenApiExtensible`] for nodes with an `extensions` field.
macro_rules! impl_extensible {
    ($($node:ty),+ $(,)?) => {
        $(
            impl $crate::models::interfaces::OpenApiExtensible for $node {
                fn extensions(&self) -> &$crate::models::interfaces::Extensions {
                    &self.extensions
                }
            }
        )+
    };
}

pub(crate) use impl_extensible;
