//! Rendering of a [`QueryState`] into query-language text.
//!
//! Clauses always come out in the same order, whatever order the builder
//! methods were called in:
//!
//! ```text
//! <domain>.find(<criteria>).include(...).sort(...).offset(...).limit(...)
//! ```

use serde_json::{Number, Value};

use crate::state::{normalize_value, QueryState};

/// Renders the query string for `state`.
///
/// - `find` is always present; its argument is the criteria JSON, or empty.
///   Integral floats in the criteria are written as integers, e.g. `1024`.
/// - `include` is present when at least one field was included.
/// - `sort` is present once a sort was accepted, even an empty one.
/// - `offset` is present only when it is strictly positive.
/// - `limit` is present when it is set and non-zero, so `limit(0)` is stored
///   but never rendered.
pub fn render(state: &QueryState) -> String {
    let criteria = state
        .criteria
        .as_ref()
        .map(|criteria| normalize_value(criteria.to_value()).to_string())
        .unwrap_or_default();

    let mut query = format!("{}.find({})", state.domain, criteria);

    if !state.fields.is_empty() {
        let fields = state
            .fields
            .iter()
            .map(|field| Value::from(field.as_str()).to_string())
            .collect::<Vec<_>>();
        query.push_str(&format!(".include({})", fields.join(", ")));
    }

    if let Some(sort) = &state.sort {
        query.push_str(&format!(".sort({})", Value::Object(sort.clone())));
    }

    if let Some(offset) = state.offset.as_ref().filter(|n| is_positive(n)) {
        query.push_str(&format!(".offset({offset})"));
    }

    if let Some(limit) = state.limit.as_ref().filter(|n| !is_zero(n)) {
        query.push_str(&format!(".limit({limit})"));
    }

    query
}

fn is_positive(number: &Number) -> bool {
    number.as_f64().is_some_and(|n| n > 0.0)
}

fn is_zero(number: &Number) -> bool {
    number.as_f64().is_some_and(|n| n == 0.0)
}
