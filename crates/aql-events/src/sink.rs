use std::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex, PoisonError,
};

use tracing::warn;

use crate::QueryDiagnostic;

/// Trait for consuming diagnostics.
///
/// Each frontend provides its own implementation.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: QueryDiagnostic);
}

/// Default sink: writes every diagnostic as a `WARN` event.
///
/// Where the event ends up is decided by whatever `tracing` subscriber
/// the host process installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: QueryDiagnostic) {
        warn!(
            value = %diagnostic.value,
            schema = %diagnostic.schema,
            "{diagnostic}"
        );
    }
}

/// Channel-based diagnostic sink.
///
/// Sends diagnostics through a standard mpsc channel. The receiver end
/// can be polled by any consumer (interactive flow, test harness, etc.).
pub struct ChannelSink {
    sender: Sender<QueryDiagnostic>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<QueryDiagnostic>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                sender,
            },
            receiver,
        )
    }
}

impl DiagnosticSink for ChannelSink {
    fn report(&self, diagnostic: QueryDiagnostic) {
        let _ = self.sender.send(diagnostic);
    }
}

/// No-op sink for headless use.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: QueryDiagnostic) {}
}

/// Collector sink that stores all diagnostics for inspection.
///
/// Useful in tests to verify that expected diagnostics were reported.
#[derive(Default)]
pub struct CollectorSink {
    diagnostics: Mutex<Vec<QueryDiagnostic>>,
}

impl CollectorSink {
    pub fn diagnostics(&self) -> Vec<QueryDiagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectorSink {
    fn report(&self, diagnostic: QueryDiagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
