use aql_events::DiagnosticSinkHandle;
use aql_query::{Criteria, Domain, DomainQuery};
use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named query kept in the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Preset {
    /// Domain the preset queries: "items", "builds", "archive.entries",
    /// or any other domain the repository exposes.
    pub domain: String,

    /// Fields to include in the results.
    pub include: Option<Vec<Value>>,

    /// Number of results to skip.
    pub offset: Option<Value>,

    /// Maximum number of results.
    pub limit: Option<Value>,

    /// Sort specification with `$asc` and/or `$dsc` field lists.
    pub sort: Option<Value>,

    /// Filter criteria passed to `find`, written as a table.
    pub criteria: Option<Map<String, Value>>,
}

impl Preset {
    /// Domain string to query, with aliases such as `archives` expanded.
    pub fn resolved_domain(&self) -> String {
        self.domain
            .parse::<Domain>()
            .map(|domain| domain.as_str().to_string())
            .unwrap_or_else(|_| self.domain.trim().to_string())
    }

    /// Builds the preset's query, reporting rejected values to `sink`.
    ///
    /// Values come straight from the configuration file, so they go through
    /// the same validation as any other builder input.
    pub fn to_query(&self, sink: DiagnosticSinkHandle) -> DomainQuery {
        let criteria = self.criteria.clone().map(Criteria::from);
        let mut query = DomainQuery::new(self.resolved_domain())
            .with_sink(sink)
            .find(criteria.as_ref());

        if let Some(include) = &self.include {
            query = query.include(include.iter().cloned());
        }
        if let Some(sort) = &self.sort {
            query = query.sort(sort.clone());
        }
        if let Some(offset) = &self.offset {
            query = query.offset(offset.clone());
        }
        if let Some(limit) = &self.limit {
            query = query.limit(limit.clone());
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aql_events::CollectorSink;
    use serde_json::json;

    use super::*;

    fn parse(toml_str: &str) -> Preset {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_minimal_preset() {
        let preset = parse("domain = \"builds\"");
        let sink = Arc::new(CollectorSink::default());

        assert_eq!(preset.to_query(sink.clone()).query(), "builds.find()");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_full_preset() {
        let preset = parse(
            r#"
            domain = "items"
            include = ["name", "repo"]
            offset = 10
            limit = 5
            sort = { "$dsc" = ["created"] }

            [criteria]
            repo = "libs-release"
            size = { "$gt" = 1024 }
            "#,
        );
        let sink = Arc::new(CollectorSink::default());

        assert_eq!(
            preset.to_query(sink.clone()).query(),
            r#"items.find({"repo":"libs-release","size":{"$gt":1024}}).include("name", "repo").sort({"$dsc":["created"]}).offset(10).limit(5)"#
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_domain_alias() {
        let preset = parse("domain = \"archives\"");
        assert_eq!(preset.resolved_domain(), "archive.entries");

        let preset = parse("domain = \"items.properties\"");
        assert_eq!(preset.resolved_domain(), "items.properties");
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let preset = parse(
            r#"
            domain = "items"
            include = ["name", 3]
            sort = { "$up" = ["name"] }
            limit = "ten"
            "#,
        );
        let sink = Arc::new(CollectorSink::default());

        assert_eq!(preset.to_query(sink.clone()).query(), "items.find()");

        let messages: Vec<_> = sink.diagnostics().into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec![
                "Field configuration is not valid",
                "Sort configuration is not valid",
                "Limit configuration is not valid",
            ]
        );
    }

    #[test]
    fn test_preset_roundtrip() {
        let preset = Preset {
            domain: "builds".into(),
            include: Some(vec![json!("number")]),
            offset: None,
            limit: Some(json!(3)),
            sort: Some(json!({"$dsc": ["number"]})),
            criteria: json!({"name": "service"}).as_object().cloned(),
        };

        let text = toml::to_string(&preset).unwrap();
        let back: Preset = toml::from_str(&text).unwrap();
        assert_eq!(back, preset);
    }
}
