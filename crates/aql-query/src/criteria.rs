//! The opaque filter payload passed to `find`.
//!
//! [`Criteria`] is an ordered mapping of top-level keys to values. Cloning it
//! copies the mapping: primitives are copied by value while objects and
//! arrays are shared through a [`Node`]. A builder that stores a clone is
//! therefore insulated from the caller inserting, removing or rebinding
//! top-level keys, while changes made inside a nested object or array are
//! visible on both sides.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, PoisonError, RwLock, RwLockWriteGuard},
};

use indexmap::IndexMap;
use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{QueryError, Result};

#[derive(Clone)]
enum Shared {
    Object(Arc<RwLock<Map<String, Value>>>),
    Array(Arc<RwLock<Vec<Value>>>),
}

/// A shared handle onto a nested object or array of a criteria.
///
/// Only the contents can be changed through a node; the container itself
/// stays an object or an array for as long as the key is bound to it.
#[derive(Clone)]
pub struct Node(Shared);

impl Node {
    /// Wraps containers, handing primitives back unchanged.
    fn wrap(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(Shared::Object(Arc::new(RwLock::new(map))))),
            Value::Array(items) => Ok(Self(Shared::Array(Arc::new(RwLock::new(items))))),
            other => Err(other),
        }
    }

    /// Snapshot of the current contents.
    pub fn get(&self) -> Value {
        match &self.0 {
            Shared::Object(map) => {
                Value::Object(map.read().unwrap_or_else(PoisonError::into_inner).clone())
            }
            Shared::Array(items) => {
                Value::Array(items.read().unwrap_or_else(PoisonError::into_inner).clone())
            }
        }
    }

    /// Write access to the entries, `None` if this node holds an array.
    pub fn object_mut(&self) -> Option<RwLockWriteGuard<'_, Map<String, Value>>> {
        match &self.0 {
            Shared::Object(map) => Some(map.write().unwrap_or_else(PoisonError::into_inner)),
            Shared::Array(_) => None,
        }
    }

    /// Write access to the elements, `None` if this node holds an object.
    pub fn array_mut(&self) -> Option<RwLockWriteGuard<'_, Vec<Value>>> {
        match &self.0 {
            Shared::Array(items) => Some(items.write().unwrap_or_else(PoisonError::into_inner)),
            Shared::Object(_) => None,
        }
    }

    /// Whether both handles point at the same container.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (&self.0, &other.0) {
            (Shared::Object(a), Shared::Object(b)) => Arc::ptr_eq(a, b),
            (Shared::Array(a), Shared::Array(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.get())
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Value(Value),
    Node(Node),
}

impl Entry {
    fn new(value: Value) -> Self {
        match Node::wrap(value) {
            Ok(node) => Entry::Node(node),
            Err(value) => Entry::Value(value),
        }
    }

    fn get(&self) -> Value {
        match self {
            Entry::Value(value) => value.clone(),
            Entry::Node(node) => node.get(),
        }
    }
}

/// Filter predicate for `find`, accepted without validation.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    entries: IndexMap<String, Entry>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `value`.
    ///
    /// Copies of this criteria taken earlier keep their old binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), Entry::new(value.into()));
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key).map(|entry| entry.get())
    }

    /// Snapshot of the value bound to `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(Entry::get)
    }

    /// Shared handle onto the object or array bound to `key`.
    ///
    /// Primitives have no handle: they can only be rebound with
    /// [`Criteria::insert`].
    pub fn node(&self, key: &str) -> Option<Node> {
        match self.entries.get(key)? {
            Entry::Node(node) => Some(node.clone()),
            Entry::Value(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the whole criteria as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.get()))
                .collect(),
        )
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl From<Map<String, Value>> for Criteria {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, Entry::new(value)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        for (key, value) in iter {
            criteria.insert(key, value);
        }
        criteria
    }
}

impl TryFrom<Value> for Criteria {
    type Error = QueryError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into()),
            Value::Null => Err(QueryError::CriteriaNotObject("null")),
            Value::Bool(_) => Err(QueryError::CriteriaNotObject("a boolean")),
            Value::Number(_) => Err(QueryError::CriteriaNotObject("a number")),
            Value::String(_) => Err(QueryError::CriteriaNotObject("a string")),
            Value::Array(_) => Err(QueryError::CriteriaNotObject("an array")),
        }
    }
}

impl FromStr for Criteria {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str::<Value>(s)?.try_into()
    }
}

impl Serialize for Criteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, &entry.get())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Criteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Criteria::from)
    }
}
