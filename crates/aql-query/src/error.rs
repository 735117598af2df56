//! Error types for aql-query.
//!
//! Builder mutators never fail; these errors only come from parsing
//! caller-supplied text into query inputs.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    #[error("Criteria must be a JSON object, got {0}")]
    #[diagnostic(
        code(aql_query::criteria_not_object),
        help("Pass the filter as an object keyed by field name")
    )]
    CriteriaNotObject(&'static str),

    #[error("Invalid criteria JSON: {0}")]
    #[diagnostic(
        code(aql_query::criteria_json),
        help("Check the criteria for unbalanced braces or unquoted keys")
    )]
    CriteriaJson(#[from] serde_json::Error),

    #[error("Unknown domain: {0}")]
    #[diagnostic(
        code(aql_query::unknown_domain),
        help("Known domains are `items`, `builds` and `archive.entries`")
    )]
    UnknownDomain(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
