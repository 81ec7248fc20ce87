//! # Any Writer
//!
//! Renders [`Any`] trees. Objects keep member order, arrays keep element order
//! and primitives dispatch on their declared kind.

use crate::any::{Any, AnyArray, AnyObject, Primitive};
use crate::error::AppResult;
use crate::writer::OpenApiWriter;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Writes a free-form value at the current position. `None` writes `null`.
pub fn write_any<W: OpenApiWriter + ?Sized>(writer: &mut W, value: Option<&Any>) -> AppResult<()> {
    match value {
        None | Some(Any::Null) => writer.write_null(),
        Some(Any::Array(items)) => write_array(writer, items),
        Some(Any::Object(members)) => write_object(writer, members),
        Some(Any::Primitive(primitive)) => write_primitive(writer, primitive),
    }
}

fn write_array<W: OpenApiWriter + ?Sized>(writer: &mut W, items: &AnyArray) -> AppResult<()> {
    writer.write_start_array()?;
    for item in items {
        write_any(writer, Some(item))?;
    }
    writer.write_end_array()
}

fn write_object<W: OpenApiWriter + ?Sized>(writer: &mut W, members: &AnyObject) -> AppResult<()> {
    writer.write_start_object()?;
    for (name, value) in members {
        writer.write_property_name(name)?;
        write_any(writer, Some(value))?;
    }
    writer.write_end_object()
}

fn write_primitive<W: OpenApiWriter + ?Sized>(
    writer: &mut W,
    primitive: &Primitive,
) -> AppResult<()> {
    match primitive {
        Primitive::Integer(v) => writer.write_i32(*v),
        Primitive::Long(v) => writer.write_i64(*v),
        Primitive::Float(v) => writer.write_f32(*v),
        Primitive::Double(v) => writer.write_f64(*v),
        Primitive::Decimal(v) => writer.write_decimal(*v),
        Primitive::String(v) | Primitive::Password(v) => writer.write_str(v),
        Primitive::Byte(bytes) => writer.write_str(&STANDARD.encode(bytes)),
        Primitive::Binary(bytes) => writer.write_str(&String::from_utf8_lossy(bytes)),
        Primitive::Boolean(v) => writer.write_bool(*v),
        Primitive::Date(v) => writer.write_str(&v.format("%Y-%m-%d").to_string()),
        Primitive::DateTime(v) => writer.write_date_time(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::json::JsonWriter;
    use crate::writer::settings::JsonWriterSettings;
    use crate::writer::yaml::YamlWriter;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn terse_json(value: Option<&Any>) -> String {
        let mut writer = JsonWriter::with_settings(Vec::new(), JsonWriterSettings::terse());
        write_any(&mut writer, value).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_top_level_absent_and_null() {
        assert_eq!(terse_json(None), "null");
        assert_eq!(terse_json(Some(&Any::Null)), "null");
    }

    #[test]
    fn test_object_member_null() {
        let mut members = AnyObject::new();
        members.insert("key".into(), Any::Null);
        assert_eq!(terse_json(Some(&Any::Object(members))), r#"{"key":null}"#);
    }

    #[test]
    fn test_primitive_kinds() {
        let stamp = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2020, 5, 6, 7, 8, 9)
            .unwrap();
        let items = vec![
            Any::from(Primitive::Byte(b"hello".to_vec())),
            Any::from(Primitive::Binary(b"raw".to_vec())),
            Any::from(Primitive::Date(NaiveDate::from_ymd_opt(2021, 3, 4).unwrap())),
            Any::from(Primitive::DateTime(stamp)),
            Any::from(Primitive::Password("secret".into())),
            Any::from(Primitive::Long(-1)),
            Any::from(Primitive::Float(0.5)),
        ];
        assert_eq!(
            terse_json(Some(&Any::Array(items))),
            r#"["aGVsbG8=","raw","2021-03-04","2020-05-06T07:08:09+00:00","secret",-1,0.5]"#
        );
    }

    #[test]
    fn test_nested_yaml() {
        let mut inner = AnyObject::new();
        inner.insert("id".into(), Any::from(1));
        inner.insert("tags".into(), Any::Array(vec![Any::from("a"), Any::from("b")]));
        let mut root = AnyObject::new();
        root.insert("pet".into(), Any::Object(inner));
        root.insert("empty".into(), Any::Array(vec![]));

        let mut writer = YamlWriter::new(Vec::new());
        write_any(&mut writer, Some(&Any::Object(root))).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "pet:\n  id: 1\n  tags:\n    - a\n    - b\nempty: [ ]");
    }
}
