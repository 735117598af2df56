//! Query builder for the artifact repository query language.
//!
//! Queries are plain strings of the form
//!
//! ```text
//! items.find({"repo":"libs-release"}).include("name", "path").sort({"$dsc":["created"]}).limit(10)
//! ```
//!
//! and are produced by chaining methods on a [`DomainQuery`]. Input to the
//! builder is checked against a structural [`Schema`]; rejected input is
//! reported to an injectable [`aql_events::DiagnosticSink`] and the builder
//! carries on unchanged.
//!
//! # Overview
//!
//! - [`schema`]: The shape language used to describe acceptable input.
//! - [`validate`]: Matching of JSON values against a schema.
//! - [`criteria`]: The opaque filter payload given to `find`.
//! - [`state`]: What a builder has accumulated.
//! - [`query`]: The fluent [`DomainQuery`] builder.
//! - [`render`]: Turning state into query text.
//! - [`domain`]: The canonical domains and their factory functions.

pub mod criteria;
pub mod domain;
pub mod error;
pub mod query;
pub mod render;
pub mod schema;
pub mod state;
pub mod validate;

pub use criteria::{Criteria, Node};
pub use domain::Domain;
pub use error::{QueryError, Result};
pub use query::DomainQuery;
pub use schema::{Kind, Schema};
pub use state::QueryState;
pub use validate::is_valid;
