//! The repository's canonical query domains.

use std::{fmt, str::FromStr};

use crate::{
    error::{QueryError, Result},
    query::DomainQuery,
};

/// A named collection in the artifact repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Items,
    Builds,
    Archives,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Items, Domain::Builds, Domain::Archives];

    pub const fn as_str(self) -> &'static str {
        match self {
            Domain::Items => "items",
            Domain::Builds => "builds",
            Domain::Archives => "archive.entries",
        }
    }

    /// A fresh builder bound to this domain.
    pub fn query(self) -> DomainQuery {
        DomainQuery::new(self.as_str())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "items" => Ok(Domain::Items),
            "builds" => Ok(Domain::Builds),
            "archive.entries" | "archives" => Ok(Domain::Archives),
            other => Err(QueryError::UnknownDomain(other.to_string())),
        }
    }
}

impl DomainQuery {
    /// Query over `items`.
    pub fn items() -> Self {
        Domain::Items.query()
    }

    /// Query over `builds`.
    pub fn builds() -> Self {
        Domain::Builds.query()
    }

    /// Query over `archive.entries`.
    pub fn archives() -> Self {
        Domain::Archives.query()
    }
}
