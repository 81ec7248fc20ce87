//! # Tags
//!
//! Tags are declared once at document level and referenced by name from
//! operations. An operation's tag renders as the bare name; the document's
//! `tags` list renders the full objects.

use crate::error::AppResult;
use crate::models::info::ExternalDocs;
use crate::models::interfaces::{
    impl_extensible, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::reference::{Reference, ReferenceType};
use crate::writer::{OpenApiWriter, OpenApiWriterExt};

/// The `tag` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Short description.
    pub description: Option<String>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this tag stands for a tag declared on the document.
    pub reference: Option<Reference>,
}

impl Tag {
    /// Creates a placeholder referencing the document tag `name`.
    pub fn reference_to(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reference: Some(Reference::local(ReferenceType::Tag, name.clone())),
            unresolved_reference: true,
            name,
            ..Self::default()
        }
    }

    fn write_body(&self, writer: &mut dyn OpenApiWriter, v3: bool) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("name", Some(self.name.as_str()))?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_object("externalDocs", self.external_docs.as_ref(), |w, d| {
            if v3 {
                d.serialize_as_v3(w)
            } else {
                d.serialize_as_v2(w)
            }
        })?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Tag {
    /// Inside an operation a tag is written by name.
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        match &self.reference {
            Some(reference) => reference.serialize_as_v3(writer),
            None => writer.write_str(&self.name),
        }
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        match &self.reference {
            Some(reference) => reference.serialize_as_v2(writer),
            None => writer.write_str(&self.name),
        }
    }
}

impl OpenApiReferenceable for Tag {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write_body(writer, true)
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write_body(writer, false)
    }
}

impl_extensible!(Tag);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{JsonWriter, JsonWriterSettings};

    fn terse(f: impl FnOnce(&mut dyn OpenApiWriter) -> AppResult<()>) -> String {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_operation_position_writes_name() {
        let tag = Tag {
            name: "pet".into(),
            description: Some("Pets".into()),
            ..Tag::default()
        };
        assert_eq!(terse(|w| tag.serialize_as_v3(w)), r#""pet""#);
        assert_eq!(terse(|w| Tag::reference_to("store").serialize_as_v2(w)), r#""store""#);
    }

    #[test]
    fn test_body_form() {
        let tag = Tag {
            name: "pet".into(),
            description: Some("Pets".into()),
            external_docs: Some(ExternalDocs {
                url: "https://example.com".into(),
                ..ExternalDocs::default()
            }),
            ..Tag::default()
        };
        assert_eq!(
            terse(|w| tag.serialize_as_v2_without_reference(w)),
            r#"{"name":"pet","description":"Pets","externalDocs":{"url":"https://example.com"}}"#
        );
    }
}
