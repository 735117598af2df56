//! The query builder.

use std::{fmt, sync::Arc};

use aql_events::{DiagnosticSinkHandle, QueryDiagnostic, TracingSink};
use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::{
    criteria::Criteria,
    render::render,
    schema::{Schema, COUNT_SCHEMA, FIELDS_SCHEMA, SORT_SCHEMA},
    state::{normalize_number, QueryState},
    validate::is_valid,
};

/// A fluent builder for artifact repository queries.
///
/// Obtained from [`DomainQuery::items`], [`DomainQuery::builds`],
/// [`DomainQuery::archives`] or [`DomainQuery::new`], then chained with
/// `.find()`, `.include()`, `.sort()`, `.offset()` and `.limit()`.
///
/// Every mutator except `find` checks its input against a [`Schema`]. Input
/// that does not fit is reported to the builder's diagnostic sink and
/// otherwise ignored, so the chain never breaks.
///
/// # Example
///
/// ```rust
/// use aql_query::{Criteria, DomainQuery};
/// use serde_json::json;
///
/// let criteria = Criteria::try_from(json!({"repo": "libs-release"})).unwrap();
/// let query = DomainQuery::items()
///     .find(&criteria)
///     .include(["name", "path"])
///     .sort(json!({"$dsc": ["created"]}))
///     .limit(10)
///     .query();
///
/// assert_eq!(
///     query,
///     r#"items.find({"repo":"libs-release"}).include("name", "path").sort({"$dsc":["created"]}).limit(10)"#
/// );
/// ```
#[derive(Clone)]
pub struct DomainQuery {
    state: QueryState,
    sink: DiagnosticSinkHandle,
}

impl DomainQuery {
    /// Starts a query on an arbitrary domain, reporting to [`TracingSink`].
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            state: QueryState::new(domain),
            sink: Arc::new(TracingSink),
        }
    }

    /// Routes diagnostics for rejected input to `sink`.
    pub fn with_sink(mut self, sink: DiagnosticSinkHandle) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the filter criteria.
    ///
    /// The builder keeps a shallow copy: later top-level changes to
    /// `criteria` are not seen, changes inside its nested objects and arrays
    /// are. `None` keeps
    /// whatever was set before.
    pub fn find<'c>(mut self, criteria: impl Into<Option<&'c Criteria>>) -> Self {
        if let Some(criteria) = criteria.into() {
            self.state.criteria = Some(criteria.clone());
        }
        self
    }

    /// Appends fields to the include list.
    ///
    /// The whole sequence must be one or more strings; otherwise nothing is
    /// appended.
    pub fn include<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let fields = Value::Array(fields.into_iter().map(Into::into).collect());

        if !is_valid(&fields, &FIELDS_SCHEMA) {
            self.warn("Field configuration is not valid", &fields, &FIELDS_SCHEMA);
            return self;
        }

        if let Value::Array(items) = fields {
            self.state
                .fields
                .extend(items.into_iter().filter_map(|item| match item {
                    Value::String(field) => Some(field),
                    _ => None,
                }));
        }
        self
    }

    /// Replaces the sort specification, e.g. `{"$asc": ["name"]}`.
    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        let sort = sort.into();

        if !is_valid(&sort, &SORT_SCHEMA) {
            self.warn("Sort configuration is not valid", &sort, &SORT_SCHEMA);
            return self;
        }

        if let Value::Object(spec) = sort {
            self.state.sort = Some(spec);
        }
        self
    }

    /// Limit the number of results.
    ///
    /// `NaN` and infinities have no JSON form; they arrive as `null` and are
    /// rejected like any other non-number.
    pub fn limit(mut self, limit: impl Into<Value>) -> Self {
        if let Some(limit) = self.count("Limit configuration is not valid", limit.into()) {
            self.state.limit = Some(limit);
        }
        self
    }

    /// Set query offset
    pub fn offset(mut self, offset: impl Into<Value>) -> Self {
        if let Some(offset) = self.count("Offset configuration is not valid", offset.into()) {
            self.state.offset = Some(offset);
        }
        self
    }

    /// The query string for the current state.
    pub fn query(&self) -> String {
        let query = render(&self.state);
        trace!(domain = %self.state.domain, "rendered {query}");
        query
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn domain(&self) -> &str {
        self.state.domain()
    }

    pub fn fields(&self) -> &[String] {
        self.state.fields()
    }

    pub fn criteria(&self) -> Option<&Criteria> {
        self.state.criteria()
    }

    pub fn sort_spec(&self) -> Option<&Map<String, Value>> {
        self.state.sort()
    }

    pub fn limit_value(&self) -> Option<&Number> {
        self.state.limit()
    }

    pub fn offset_value(&self) -> Option<&Number> {
        self.state.offset()
    }

    /// Validates a limit or offset, reporting it under `message` when rejected.
    fn count(&self, message: &str, value: Value) -> Option<Number> {
        if !is_valid(&value, &COUNT_SCHEMA) {
            self.warn(message, &value, &COUNT_SCHEMA);
            return None;
        }

        match value {
            Value::Number(n) => Some(normalize_number(n)),
            _ => None,
        }
    }

    fn warn(&self, message: &str, value: &Value, schema: &Schema) {
        self.sink
            .report(QueryDiagnostic::new(message, value, &schema.to_json()));
    }
}

impl fmt::Display for DomainQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

impl fmt::Debug for DomainQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainQuery")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
