#![deny(missing_docs)]

//! # OASWriter Core
//!
//! Streaming JSON/YAML writer and the OpenAPI document model it renders.
//!
//! A document is built as a plain graph of model nodes and written for
//! OpenAPI 3.0 or 2.0 in a single depth-first pass. Nothing is buffered by
//! the writers beyond what the sink itself buffers.

/// Shared error types.
pub mod error;

/// Target versions and output formats.
pub mod version;

/// Free-form values.
pub mod any;

/// Streaming writers and formatting helpers.
pub mod writer;

/// OpenAPI document model.
pub mod models;

/// Versioned serialization entry points.
pub mod serialize;

pub use any::{Any, Primitive};
pub use error::{AppError, AppResult};
pub use models::{Document, OpenApiReferenceable, OpenApiSerializable};
#[cfg(feature = "async")]
pub use serialize::serialize_async;
pub use serialize::{
    serialize, serialize_as_terse_json, serialize_to_string, serialize_with_settings,
    write_element,
};
pub use version::{OpenApiFormat, SpecVersion};
pub use writer::{
    write_any, JsonWriter, JsonWriterSettings, OpenApiWriter, OpenApiWriterExt, WriterSettings,
    YamlWriter,
};
