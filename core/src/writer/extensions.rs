//! # Writer Extensions
//!
//! Helpers that let model nodes emit optional fields in one line each.
//!
//! Absent values are never written as `null`: an omitted field is simply missing
//! from the output. The `*_or_default` helpers additionally drop values equal to
//! their documented default so generated documents stay minimal.

use crate::any::Any;
use crate::error::{AppError, AppResult};
use crate::writer::any::write_any;
use crate::writer::OpenApiWriter;
use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A scalar that knows which writer primitive renders it.
pub trait ScalarValue {
    /// Writes the value at the current position.
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()>;
}

impl ScalarValue for str {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_str(self)
    }
}

impl ScalarValue for String {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_str(self)
    }
}

impl ScalarValue for bool {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_bool(*self)
    }
}

impl ScalarValue for i32 {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_i32(*self)
    }
}

impl ScalarValue for i64 {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_i64(*self)
    }
}

impl ScalarValue for f32 {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_f32(*self)
    }
}

impl ScalarValue for f64 {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_f64(*self)
    }
}

impl ScalarValue for Decimal {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_decimal(*self)
    }
}

impl ScalarValue for DateTime<FixedOffset> {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        writer.write_date_time(self)
    }
}

impl<T: ScalarValue + ?Sized> ScalarValue for &T {
    fn write_scalar<W: OpenApiWriter + ?Sized>(&self, writer: &mut W) -> AppResult<()> {
        (**self).write_scalar(writer)
    }
}

/// Conditional emission helpers available on every writer, including `dyn OpenApiWriter`.
pub trait OpenApiWriterExt: OpenApiWriter {
    /// Writes `name: value`, or nothing when the value is absent.
    fn write_property<T: ScalarValue>(&mut self, name: &str, value: Option<T>) -> AppResult<()> {
        match value {
            Some(v) => {
                self.write_property_name(name)?;
                v.write_scalar(self)
            }
            None => Ok(()),
        }
    }

    /// Writes `name: value`, or `name: null` when the value is absent.
    fn write_required_property(&mut self, name: &str, value: Option<&str>) -> AppResult<()> {
        self.write_property_name(name)?;
        match value {
            Some(v) => self.write_str(v),
            None => self.write_null(),
        }
    }

    /// Writes `name: value` unless the value equals its default.
    fn write_property_or_default<T: ScalarValue + PartialEq>(
        &mut self,
        name: &str,
        value: T,
        default: T,
    ) -> AppResult<()> {
        if value == default {
            return Ok(());
        }
        self.write_property_name(name)?;
        value.write_scalar(self)
    }

    /// Writes `name: value` unless the value is absent or equals its default.
    fn write_optional_property_or_default<T: ScalarValue + PartialEq>(
        &mut self,
        name: &str,
        value: Option<T>,
        default: T,
    ) -> AppResult<()> {
        match value {
            Some(v) => self.write_property_or_default(name, v, default),
            None => Ok(()),
        }
    }

    /// Writes `name` followed by the object produced by `action`, or nothing when absent.
    fn write_optional_object<T: ?Sized, F>(
        &mut self,
        name: &str,
        value: Option<&T>,
        action: F,
    ) -> AppResult<()>
    where
        F: FnOnce(&mut Self, &T) -> AppResult<()>,
    {
        match value {
            Some(v) => self.write_required_object(name, Some(v), action),
            None => Ok(()),
        }
    }

    /// Writes `name` followed by the object produced by `action`, or `{}` when absent.
    fn write_required_object<T: ?Sized, F>(
        &mut self,
        name: &str,
        value: Option<&T>,
        action: F,
    ) -> AppResult<()>
    where
        F: FnOnce(&mut Self, &T) -> AppResult<()>,
    {
        self.write_property_name(name)?;
        match value {
            Some(v) => action(self, v),
            None => {
                self.write_start_object()?;
                self.write_end_object()
            }
        }
    }

    /// Writes a free-form value under `name`, skipping absent values and empty arrays/objects.
    fn write_optional_any(&mut self, name: &str, value: Option<&Any>) -> AppResult<()> {
        match value {
            Some(v) if !v.is_empty_container() => {
                self.write_property_name(name)?;
                write_any(self, Some(v))
            }
            _ => Ok(()),
        }
    }

    /// Writes a free-form value at the current position.
    fn write_any_value(&mut self, value: Option<&Any>) -> AppResult<()> {
        write_any(self, value)
    }

    /// Writes `name: [..]` when `elements` is non-empty.
    fn write_optional_collection<T, F>(
        &mut self,
        name: &str,
        elements: &[T],
        action: F,
    ) -> AppResult<()>
    where
        F: FnMut(&mut Self, &T) -> AppResult<()>,
    {
        if elements.is_empty() {
            return Ok(());
        }
        write_collection_internal(self, name, elements.iter().map(Some), action)
    }

    /// Writes `name: [..]`, emitting `[]` for an empty slice.
    fn write_required_collection<T, F>(
        &mut self,
        name: &str,
        elements: &[T],
        action: F,
    ) -> AppResult<()>
    where
        F: FnMut(&mut Self, &T) -> AppResult<()>,
    {
        write_collection_internal(self, name, elements.iter().map(Some), action)
    }

    /// Like [`OpenApiWriterExt::write_optional_collection`] but absent elements
    /// are written as `null` so positions are kept.
    fn write_optional_nullable_collection<T, F>(
        &mut self,
        name: &str,
        elements: &[Option<T>],
        action: F,
    ) -> AppResult<()>
    where
        F: FnMut(&mut Self, &T) -> AppResult<()>,
    {
        if elements.is_empty() {
            return Ok(());
        }
        write_collection_internal(self, name, elements.iter().map(Option::as_ref), action)
    }

    /// Writes `name: {key: ..}` when the map is non-empty. Keys keep insertion order.
    fn write_optional_map<T, F>(
        &mut self,
        name: &str,
        elements: &IndexMap<String, T>,
        mut action: F,
    ) -> AppResult<()>
    where
        F: FnMut(&mut Self, &T) -> AppResult<()>,
    {
        if elements.is_empty() {
            return Ok(());
        }
        write_map_internal(self, name, elements, |w, _, v| action(w, v))
    }

    /// Writes `name: {key: ..}`, emitting `{}` for an empty map.
    fn write_required_map<T, F>(
        &mut self,
        name: &str,
        elements: &IndexMap<String, T>,
        mut action: F,
    ) -> AppResult<()>
    where
        F: FnMut(&mut Self, &T) -> AppResult<()>,
    {
        write_map_internal(self, name, elements, |w, _, v| action(w, v))
    }

    /// Like [`OpenApiWriterExt::write_optional_map`] with the key handed to `action`.
    fn write_optional_map_with_key<T, F>(
        &mut self,
        name: &str,
        elements: &IndexMap<String, T>,
        action: F,
    ) -> AppResult<()>
    where
        F: FnMut(&mut Self, &str, &T) -> AppResult<()>,
    {
        if elements.is_empty() {
            return Ok(());
        }
        write_map_internal(self, name, elements, action)
    }

    /// Writes vendor extensions as trailing members of the current object.
    fn write_extensions(&mut self, extensions: &IndexMap<String, Any>) -> AppResult<()> {
        for (key, value) in extensions {
            self.write_property_name(key)?;
            write_any(self, Some(value))?;
        }
        Ok(())
    }

    /// Writes a value whose concrete type is only known at runtime.
    ///
    /// Strings, booleans, integers, floats, decimals and timestamps are
    /// supported; anything else fails with [`AppError::UnsupportedType`].
    fn write_dynamic_value<T: std::any::Any>(&mut self, value: &T) -> AppResult<()> {
        let value = value as &dyn std::any::Any;
        if let Some(v) = value.downcast_ref::<String>() {
            self.write_str(v)
        } else if let Some(v) = value.downcast_ref::<&str>() {
            self.write_str(v)
        } else if let Some(v) = value.downcast_ref::<bool>() {
            self.write_bool(*v)
        } else if let Some(v) = value.downcast_ref::<i32>() {
            self.write_i32(*v)
        } else if let Some(v) = value.downcast_ref::<i64>() {
            self.write_i64(*v)
        } else if let Some(v) = value.downcast_ref::<f32>() {
            self.write_f32(*v)
        } else if let Some(v) = value.downcast_ref::<f64>() {
            self.write_f64(*v)
        } else if let Some(v) = value.downcast_ref::<Decimal>() {
            self.write_decimal(*v)
        } else if let Some(v) = value.downcast_ref::<DateTime<FixedOffset>>() {
            self.write_date_time(v)
        } else if let Some(v) = value.downcast_ref::<DateTime<Utc>>() {
            self.write_date_time(&v.fixed_offset())
        } else if let Some(v) = value.downcast_ref::<Any>() {
            write_any(self, Some(v))
        } else if value.downcast_ref::<()>().is_some() {
            self.write_null()
        } else {
            Err(AppError::UnsupportedType(
                std::any::type_name::<T>().to_string(),
            ))
        }
    }
}

impl<W: OpenApiWriter + ?Sized> OpenApiWriterExt for W {}

fn write_collection_internal<'a, W, T, I, F>(
    writer: &mut W,
    name: &str,
    elements: I,
    mut action: F,
) -> AppResult<()>
where
    W: OpenApiWriter + ?Sized,
    T: 'a,
    I: Iterator<Item = Option<&'a T>>,
    F: FnMut(&mut W, &T) -> AppResult<()>,
{
    writer.write_property_name(name)?;
    writer.write_start_array()?;
    for element in elements {
        match element {
            Some(item) => action(writer, item)?,
            None => writer.write_null()?,
        }
    }
    writer.write_end_array()
}

fn write_map_internal<W, T, F>(
    writer: &mut W,
    name: &str,
    elements: &IndexMap<String, T>,
    mut action: F,
) -> AppResult<()>
where
    W: OpenApiWriter + ?Sized,
    F: FnMut(&mut W, &str, &T) -> AppResult<()>,
{
    writer.write_property_name(name)?;
    writer.write_start_object()?;
    for (key, value) in elements {
        writer.write_property_name(key)?;
        action(writer, key, value)?;
    }
    writer.write_end_object()
}
