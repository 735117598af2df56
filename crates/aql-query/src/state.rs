//! Accumulated configuration of a [`DomainQuery`](crate::DomainQuery).

use serde_json::{Map, Number, Value};

use crate::criteria::Criteria;

/// Everything a builder has collected so far.
///
/// Fields are only written by the builder's validated mutators; callers get
/// read access through the accessors below.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub(crate) domain: String,
    pub(crate) fields: Vec<String>,
    pub(crate) criteria: Option<Criteria>,
    pub(crate) sort: Option<Map<String, Value>>,
    pub(crate) limit: Option<Number>,
    pub(crate) offset: Option<Number>,
}

impl QueryState {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            fields: vec![],
            criteria: None,
            sort: None,
            limit: None,
            offset: None,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Included fields in insertion order, duplicates kept.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    pub fn sort(&self) -> Option<&Map<String, Value>> {
        self.sort.as_ref()
    }

    pub fn limit(&self) -> Option<&Number> {
        self.limit.as_ref()
    }

    pub fn offset(&self) -> Option<&Number> {
        self.offset.as_ref()
    }
}

/// Stores integral floats as integers so `10.0` renders as `10`.
pub(crate) fn normalize_number(number: Number) -> Number {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
                return Number::from(float as i64);
            }
        }
    }
    number
}

/// Applies [`normalize_number`] to every number inside `value`.
pub(crate) fn normalize_value(value: Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(normalize_number(number)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, normalize_value(item)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = QueryState::new("items");

        assert_eq!(state.domain(), "items");
        assert!(state.fields().is_empty());
        assert!(state.criteria().is_none());
        assert!(state.sort().is_none());
        assert!(state.limit().is_none());
        assert!(state.offset().is_none());
    }

    #[test]
    fn test_normalize_number() {
        let whole = Number::from_f64(10.0).unwrap();
        assert_eq!(normalize_number(whole).to_string(), "10");

        let negative = Number::from_f64(-3.0).unwrap();
        assert_eq!(normalize_number(negative).to_string(), "-3");

        let fractional = Number::from_f64(2.5).unwrap();
        assert_eq!(normalize_number(fractional).to_string(), "2.5");

        assert_eq!(normalize_number(Number::from(7u64)).to_string(), "7");
    }

    #[test]
    fn test_normalize_value_is_recursive() {
        let value = serde_json::json!({
            "size": {"$gt": 1024.0},
            "any": [1.0, 2.5, "3.0", {"n": -0.0}],
            "flag": true
        });

        assert_eq!(
            normalize_value(value).to_string(),
            r#"{"size":{"$gt":1024},"any":[1,2.5,"3.0",{"n":0}],"flag":true}"#
        );
    }
}
