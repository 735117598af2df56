//! Structural validation of builder input against a [`Schema`].

use serde_json::Value;

use crate::schema::{Kind, Schema};

/// Checks whether `value` has the shape described by `schema`.
///
/// Only the shape is checked, never the contents: `-5` is a valid number and
/// any string is a valid string. The rules are:
///
/// - a primitive schema accepts any value of that primitive kind;
/// - an array schema accepts a **non-empty** array whose elements all match;
/// - an object schema accepts an object whose keys all appear in the schema
///   and whose values match the declared schemas. Declared keys may be absent.
///
/// `null` matches nothing. This function never panics.
pub fn is_valid(value: &Value, schema: &Schema) -> bool {
    match (schema, value) {
        (Schema::Primitive(kind), value) => Kind::of(value) == Some(*kind),
        (Schema::ArrayOf(element), Value::Array(items)) => {
            !items.is_empty() && items.iter().all(|item| is_valid(item, element))
        }
        (Schema::ObjectOf(_), Value::Object(entries)) => {
            entries.iter().all(|(key, item)| {
                schema
                    .field(key)
                    .is_some_and(|field_schema| is_valid(item, field_schema))
            })
        }
        _ => false,
    }
}
