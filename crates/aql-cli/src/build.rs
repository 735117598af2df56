use std::{io::Write, sync::Arc};

use aql_config::config::Config;
use aql_events::{DiagnosticSinkHandle, TracingSink};
use aql_query::{Criteria, Domain, DomainQuery};
use tracing::debug;

use crate::{
    error::CliResult,
    utils::{parse_value, write_output},
};

/// Raw `build` arguments, as typed on the command line.
#[derive(Debug, Default)]
pub struct BuildArgs {
    pub domain: Option<String>,
    pub find: Option<String>,
    pub include: Vec<String>,
    pub sort: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

fn resolve_domain(domain: Option<&str>, config: &Config) -> String {
    match domain {
        Some(domain) => domain
            .parse::<Domain>()
            .map(|domain| domain.as_str().to_string())
            .unwrap_or_else(|_| domain.trim().to_string()),
        None => config.default_domain(),
    }
}

/// Turns command line arguments into a query.
///
/// Malformed `--find` JSON is a hard error; every other value goes through
/// the builder and is reported to `sink` when it does not fit its schema.
pub fn build_query(
    args: &BuildArgs,
    config: &Config,
    sink: DiagnosticSinkHandle,
) -> CliResult<DomainQuery> {
    let domain = resolve_domain(args.domain.as_deref(), config);
    debug!("Building query for domain {domain}");

    let criteria = args
        .find
        .as_deref()
        .map(str::parse::<Criteria>)
        .transpose()?;

    let mut query = DomainQuery::new(domain)
        .with_sink(sink)
        .find(criteria.as_ref());

    if !args.include.is_empty() {
        query = query.include(args.include.iter().map(|field| parse_value(field)));
    }
    if let Some(sort) = &args.sort {
        query = query.sort(parse_value(sort));
    }
    if let Some(offset) = &args.offset {
        query = query.offset(parse_value(offset));
    }
    if let Some(limit) = &args.limit {
        query = query.limit(parse_value(limit));
    }

    Ok(query)
}

pub fn print_query(args: &BuildArgs, config: &Config, out: &mut impl Write) -> CliResult<()> {
    let query = build_query(args, config, Arc::new(TracingSink))?;
    write_output(out, &query.query())
}

#[cfg(test)]
mod tests {
    use aql_events::CollectorSink;
    use aql_query::QueryError;

    use super::*;
    use crate::error::CliError;

    fn args() -> BuildArgs {
        BuildArgs::default()
    }

    #[test]
    fn test_default_domain_from_config() {
        let mut config = Config::default_config();
        config.default_domain = Some("archives".into());
        let sink = Arc::new(CollectorSink::default());

        let query = build_query(&args(), &config, sink.clone()).unwrap();

        assert_eq!(query.query(), "archive.entries.find()");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_full_build() {
        let args = BuildArgs {
            domain: Some("items".into()),
            find: Some(r#"{"repo":"libs-release","name":{"$match":"*.jar"}}"#.into()),
            include: vec!["name".into(), "repo".into()],
            sort: Some(r#"{"$asc":["name"]}"#.into()),
            offset: Some("20".into()),
            limit: Some("10".into()),
        };
        let sink = Arc::new(CollectorSink::default());

        let query = build_query(&args, &Config::default_config(), sink.clone()).unwrap();

        assert_eq!(
            query.query(),
            r#"items.find({"repo":"libs-release","name":{"$match":"*.jar"}}).include("name", "repo").sort({"$asc":["name"]}).offset(20).limit(10)"#
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_domain_is_passed_through() {
        let args = BuildArgs {
            domain: Some("items.properties".into()),
            ..args()
        };
        let query =
            build_query(&args, &Config::default_config(), Arc::new(CollectorSink::default()))
                .unwrap();

        assert_eq!(query.query(), "items.properties.find()");
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let args = BuildArgs {
            domain: Some("builds".into()),
            sort: Some("name".into()),
            limit: Some("ten".into()),
            ..args()
        };
        let sink = Arc::new(CollectorSink::default());

        let query = build_query(&args, &Config::default_config(), sink.clone()).unwrap();

        assert_eq!(query.query(), "builds.find()");
        let messages: Vec<_> = sink.diagnostics().into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec![
                "Sort configuration is not valid",
                "Limit configuration is not valid"
            ]
        );
    }

    #[test]
    fn test_print_query_writes_plain_text() {
        let args = BuildArgs {
            domain: Some("builds".into()),
            limit: Some("3".into()),
            ..args()
        };
        let mut out = Vec::new();

        print_query(&args, &Config::default_config(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "builds.find().limit(3)\n");
    }

    #[test]
    fn test_malformed_find_is_an_error() {
        let args = BuildArgs {
            find: Some("{\"name\":".into()),
            ..args()
        };
        let result = build_query(
            &args,
            &Config::default_config(),
            Arc::new(CollectorSink::default()),
        );

        assert!(matches!(
            result,
            Err(CliError::Query(QueryError::CriteriaJson(_)))
        ));
    }

    #[test]
    fn test_non_object_find_is_an_error() {
        let args = BuildArgs {
            find: Some("[1, 2]".into()),
            ..args()
        };
        let result = build_query(
            &args,
            &Config::default_config(),
            Arc::new(CollectorSink::default()),
        );

        assert!(matches!(
            result,
            Err(CliError::Query(QueryError::CriteriaNotObject(_)))
        ));
    }
}
