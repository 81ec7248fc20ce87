//! # Info
//!
//! Document metadata: `info`, `contact`, `license` and `externalDocs`.
//! These nodes render identically under both versions.

use crate::error::AppResult;
use crate::models::interfaces::{impl_extensible, Extensions, OpenApiSerializable};
use crate::writer::{OpenApiWriter, OpenApiWriterExt};

/// The `info` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Info {
    /// API title.
    pub title: String,
    /// Short description, CommonMark allowed.
    pub description: Option<String>,
    /// URL of the terms of service.
    pub terms_of_service: Option<String>,
    /// Contact information.
    pub contact: Option<Contact>,
    /// License information.
    pub license: Option<License>,
    /// Version of the described API (not of the OpenAPI format).
    pub version: String,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Info {
    fn write(&self, writer: &mut dyn OpenApiWriter, v3: bool) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("title", Some(self.title.as_str()))?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property("termsOfService", self.terms_of_service.as_deref())?;
        writer.write_optional_object("contact", self.contact.as_ref(), |w, c| {
            if v3 {
                c.serialize_as_v3(w)
            } else {
                c.serialize_as_v2(w)
            }
        })?;
        writer.write_optional_object("license", self.license.as_ref(), |w, l| {
            if v3 {
                l.serialize_as_v3(w)
            } else {
                l.serialize_as_v2(w)
            }
        })?;
        writer.write_property("version", Some(self.version.as_str()))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Info {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, true)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, false)
    }
}

/// The `contact` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    /// Person or organisation name.
    pub name: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
    /// Contact e-mail address.
    pub email: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Contact {
    fn write(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("name", self.name.as_deref())?;
        writer.write_property("url", self.url.as_deref())?;
        writer.write_property("email", self.email.as_deref())?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Contact {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }
}

/// The `license` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct License {
    /// License name, e.g. `Apache 2.0`.
    pub name: String,
    /// License URL.
    pub url: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl License {
    fn write(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("name", Some(self.name.as_str()))?;
        writer.write_property("url", self.url.as_deref())?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for License {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }
}

/// The `externalDocs` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExternalDocs {
    /// Short description of the target documentation.
    pub description: Option<String>,
    /// URL of the target documentation.
    pub url: String,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl ExternalDocs {
    fn write(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_property("url", Some(self.url.as_str()))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for ExternalDocs {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer)
    }
}

impl_extensible!(Info, Contact, License, ExternalDocs);
