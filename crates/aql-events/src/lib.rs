mod diagnostic;
mod sink;

use std::sync::Arc;

pub use diagnostic::*;
pub use sink::*;

/// Shared handle to a diagnostic sink.
pub type DiagnosticSinkHandle = Arc<dyn DiagnosticSink>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn limit_diagnostic(value: serde_json::Value) -> QueryDiagnostic {
        QueryDiagnostic::new("Limit configuration is not valid", &value, &json!(0))
    }

    #[test]
    fn test_null_sink() {
        let sink = NullSink;
        sink.report(limit_diagnostic(json!("ten")));
    }

    #[test]
    fn test_tracing_sink() {
        let sink = TracingSink;
        sink.report(limit_diagnostic(json!(null)));
    }

    #[test]
    fn test_diagnostic_json_text() {
        let diagnostic = QueryDiagnostic::new(
            "Sort configuration is not valid",
            &json!({"$bogus": ["x"]}),
            &json!({"$asc": ["string"], "$dsc": ["string"]}),
        );

        assert_eq!(diagnostic.value, r#"{"$bogus":["x"]}"#);
        assert_eq!(diagnostic.schema, r#"{"$asc":["string"],"$dsc":["string"]}"#);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = limit_diagnostic(json!("ten"));
        let rendered = diagnostic.to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#"AQL: Limit configuration is not valid: "ten""#);
        assert_eq!(lines[1], r#"     Provided object : "ten""#);
        assert_eq!(lines[2], "     Schema object   : 0");
    }

    #[test]
    fn test_channel_sink() {
        let (sink, rx) = ChannelSink::new();
        sink.report(limit_diagnostic(json!("ten")));
        sink.report(limit_diagnostic(json!(true)));

        let diagnostics: Vec<_> = rx.try_iter().collect();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].value, r#""ten""#);
        assert_eq!(diagnostics[1].value, "true");
    }

    #[test]
    fn test_channel_sink_receiver_dropped() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.report(limit_diagnostic(json!("orphaned")));
    }

    #[test]
    fn test_collector_sink() {
        let sink = CollectorSink::default();
        assert!(sink.is_empty());

        sink.report(limit_diagnostic(json!("ten")));
        sink.report(QueryDiagnostic::new(
            "Field configuration is not valid",
            &json!([5]),
            &json!(["string"]),
        ));

        assert_eq!(sink.len(), 2);
        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics[0].message, "Limit configuration is not valid");
        assert_eq!(diagnostics[1].message, "Field configuration is not valid");
        assert_eq!(diagnostics[1].schema, r#"["string"]"#);
    }

    #[test]
    fn test_diagnostic_sink_handle() {
        let sink: DiagnosticSinkHandle = Arc::new(NullSink);
        sink.report(limit_diagnostic(json!(null)));

        let collector = Arc::new(CollectorSink::default());
        let sink: DiagnosticSinkHandle = collector.clone();
        sink.report(limit_diagnostic(json!(null)));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_diagnostic_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NullSink>();
        assert_send_sync::<TracingSink>();
        assert_send_sync::<ChannelSink>();
        assert_send_sync::<CollectorSink>();
    }
}
