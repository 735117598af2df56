//! Structural descriptions of acceptable builder input.
//!
//! A [`Schema`] is a small recursive shape language: a primitive kind, a
//! non-empty array of some element shape, or an object whose keys are drawn
//! from a fixed set. See [`crate::validate`] for the matching rules.

use std::{fmt, sync::LazyLock};

use serde_json::{json, Map, Value};

/// Primitive value kinds a schema can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Boolean,
    Number,
}

impl Kind {
    /// Primitive kind of a JSON value, `None` for arrays, objects and null.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(Kind::String),
            Value::Bool(_) => Some(Kind::Boolean),
            Value::Number(_) => Some(Kind::Number),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
        }
    }

    /// A sample value of this kind, used when a schema is rendered as JSON.
    fn exemplar(self) -> Value {
        match self {
            Kind::String => json!("string"),
            Kind::Boolean => json!(true),
            Kind::Number => json!(0),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of acceptable input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// Any value of the given primitive kind.
    Primitive(Kind),
    /// A non-empty array whose elements all match the inner schema.
    ArrayOf(Box<Schema>),
    /// An object whose keys all appear in this list, in declaration order.
    ObjectOf(Vec<(String, Schema)>),
}

impl Schema {
    pub const fn string() -> Self {
        Schema::Primitive(Kind::String)
    }

    pub const fn boolean() -> Self {
        Schema::Primitive(Kind::Boolean)
    }

    pub const fn number() -> Self {
        Schema::Primitive(Kind::Number)
    }

    pub fn array_of(element: Schema) -> Self {
        Schema::ArrayOf(Box::new(element))
    }

    /// Builds an object schema. A repeated key replaces the earlier entry
    /// but keeps its position.
    pub fn object_of<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let mut entries: Vec<(String, Schema)> = Vec::new();
        for (key, schema) in fields {
            let key = key.into();
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = schema,
                None => entries.push((key, schema)),
            }
        }
        Schema::ObjectOf(entries)
    }

    /// Schema of an object field, if this is an object schema declaring it.
    pub fn field(&self, key: &str) -> Option<&Schema> {
        match self {
            Schema::ObjectOf(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    /// Renders the schema as an exemplar JSON value.
    ///
    /// Primitives become a sample of their kind, so `["string"]` describes a
    /// list of strings and `0` describes a number.
    pub fn to_json(&self) -> Value {
        match self {
            Schema::Primitive(kind) => kind.exemplar(),
            Schema::ArrayOf(element) => Value::Array(vec![element.to_json()]),
            Schema::ObjectOf(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, schema)| (key.clone(), schema.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }

    /// Whether `value` has this shape.
    pub fn matches(&self, value: &Value) -> bool {
        crate::validate::is_valid(value, self)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// One or more field names.
pub static FIELDS_SCHEMA: LazyLock<Schema> = LazyLock::new(|| Schema::array_of(Schema::string()));

/// Sort specification: ascending and/or descending field lists.
pub static SORT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::object_of([
        ("$asc", Schema::array_of(Schema::string())),
        ("$dsc", Schema::array_of(Schema::string())),
    ])
});

/// Limit and offset.
pub static COUNT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| Schema::number());
