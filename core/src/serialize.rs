//! # Serialization Entry Points
//!
//! Renders any node for a chosen version and format into a byte sink or a
//! string. The async entry point renders through the same synchronous core
//! and only hands the finished text to the async sink, so both paths emit
//! identical output.

use crate::error::{AppError, AppResult};
use crate::models::interfaces::OpenApiSerializable;
use crate::version::{OpenApiFormat, SpecVersion};
use crate::writer::{JsonWriter, JsonWriterSettings, OpenApiWriter, YamlWriter};
use std::io::Write;

/// Writes `element` for `version` into an existing writer.
pub fn write_element<E: OpenApiSerializable + ?Sized>(
    element: &E,
    writer: &mut dyn OpenApiWriter,
    version: SpecVersion,
) -> AppResult<()> {
    match version {
        SpecVersion::V3_0 => element.serialize_as_v3(writer)?,
        SpecVersion::V2_0 => element.serialize_as_v2(writer)?,
    }
    writer.flush()
}

/// Serializes `element` into `sink` with the default layout.
pub fn serialize<E, W>(element: &E, sink: W, version: SpecVersion, format: OpenApiFormat) -> AppResult<()>
where
    E: OpenApiSerializable + ?Sized,
    W: Write,
{
    serialize_with_settings(element, sink, version, format, &JsonWriterSettings::default())
}

/// Serializes `element` into `sink`.
///
/// `settings.terse` only applies to JSON; the indent width applies to both formats.
pub fn serialize_with_settings<E, W>(
    element: &E,
    sink: W,
    version: SpecVersion,
    format: OpenApiFormat,
    settings: &JsonWriterSettings,
) -> AppResult<()>
where
    E: OpenApiSerializable + ?Sized,
    W: Write,
{
    tracing::debug!(%version, %format, terse = settings.terse, "serializing element");
    match format {
        OpenApiFormat::Json => {
            let mut writer = JsonWriter::with_settings(sink, settings.clone());
            write_element(element, &mut writer, version)
        }
        OpenApiFormat::Yaml => {
            let mut writer = YamlWriter::with_settings(sink, settings.common.clone());
            write_element(element, &mut writer, version)
        }
    }
}

/// Serializes `element` into a string with the default layout.
pub fn serialize_to_string<E: OpenApiSerializable + ?Sized>(
    element: &E,
    version: SpecVersion,
    format: OpenApiFormat,
) -> AppResult<String> {
    render(element, version, format, &JsonWriterSettings::default())
}

/// Serializes `element` into compact JSON.
pub fn serialize_as_terse_json<E: OpenApiSerializable + ?Sized>(
    element: &E,
    version: SpecVersion,
) -> AppResult<String> {
    render(element, version, OpenApiFormat::Json, &JsonWriterSettings::terse())
}

fn render<E: OpenApiSerializable + ?Sized>(
    element: &E,
    version: SpecVersion,
    format: OpenApiFormat,
    settings: &JsonWriterSettings,
) -> AppResult<String> {
    let mut buffer = Vec::new();
    serialize_with_settings(element, &mut buffer, version, format, settings)?;
    String::from_utf8(buffer).map_err(|e| AppError::General(e.to_string()))
}

/// Serializes `element` into an async sink.
///
/// The text is produced in memory first and written with a single
/// `write_all` followed by `flush`. A failure leaves the sink partially written.
#[cfg(feature = "async")]
pub async fn serialize_async<E, S>(
    element: &E,
    sink: &mut S,
    version: SpecVersion,
    format: OpenApiFormat,
    settings: &JsonWriterSettings,
) -> AppResult<()>
where
    E: OpenApiSerializable + ?Sized,
    S: tokio::io::AsyncWrite + Unpin,
{
    use tokio::io::AsyncWriteExt;

    let text = render(element, version, format, settings)?;
    sink.write_all(text.as_bytes()).await?;
    sink.flush().await?;
    Ok(())
}
