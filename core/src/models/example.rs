//! # Examples
//!
//! Named example payloads. 2.0 has no standalone example object, so only the
//! 3.0 pools and maps reference these; the 2.0 form mirrors the 3.0 body.

use crate::any::Any;
use crate::error::AppResult;
use crate::models::interfaces::{
    impl_extensible, write_v2, write_v3, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::reference::Reference;
use crate::writer::{OpenApiWriter, OpenApiWriterExt};

/// The `example` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Example {
    /// Short summary.
    pub summary: Option<String>,
    /// Long description, CommonMark allowed.
    pub description: Option<String>,
    /// Embedded example value.
    pub value: Option<Any>,
    /// URL of an example that cannot be embedded.
    pub external_value: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this example stands for a component example.
    pub reference: Option<Reference>,
}

impl Example {
    fn write_body(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("summary", self.summary.as_deref())?;
        writer.write_property("description", self.description.as_deref())?;
        writer.write_optional_any("value", self.value.as_ref())?;
        writer.write_property("externalValue", self.external_value.as_deref())?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

impl OpenApiSerializable for Example {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v2(self, writer)
    }
}

impl OpenApiReferenceable for Example {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write_body(writer)
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write_body(writer)
    }
}

impl_extensible!(Example);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any::AnyObject;
    use crate::error::AppError;
    use crate::models::reference::ReferenceType;
    use crate::writer::{JsonWriter, JsonWriterSettings};

    #[test]
    fn test_example_body() {
        let mut value = AnyObject::new();
        value.insert("name".into(), Any::from("doggie"));
        let example = Example {
            summary: Some("A dog".into()),
            value: Some(Any::Object(value)),
            ..Example::default()
        };
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        example.serialize_as_v3(&mut writer).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, r#"{"summary":"A dog","value":{"name":"doggie"}}"#);
    }

    #[test]
    fn test_referenced_example_has_no_v2_pointer() {
        let example = Example {
            reference: Some(Reference::local(ReferenceType::Example, "dog")),
            ..Example::default()
        };
        let mut writer = JsonWriter::new(Vec::new());
        assert!(matches!(
            example.serialize_as_v2(&mut writer),
            Err(AppError::Argument(_))
        ));
    }
}
