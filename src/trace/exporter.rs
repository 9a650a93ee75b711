//! Span export decoupled from the request path.
//!
//! Handlers hand finished spans to a [`SpanSink`]; a spawned worker drains
//! the bounded queue into whatever [`SpanExporter`] the process was started
//! with. Submission never blocks: when the queue is full the newest record
//! is dropped and counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::trace::span::SpanRecord;

/// Destination for finished spans.
pub trait SpanExporter: Send + Sync + 'static {
    fn export(&self, span: &SpanRecord);
}

/// Exporter that writes spans to the structured log, tagged with the
/// project identifier. Stands in for a real trace backend.
pub struct LoggingExporter {
    project_id: String,
}

impl LoggingExporter {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }
}

impl SpanExporter for LoggingExporter {
    fn export(&self, span: &SpanRecord) {
        let parent = span
            .parent_span_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        tracing::info!(
            target: "price_chain::span_export",
            project_id = %self.project_id,
            name = %span.name,
            trace_id = %span.trace_id,
            span_id = %span.span_id,
            parent_span_id = %parent,
            duration_us = span.duration().as_micros() as u64,
            attributes = ?span.attributes,
            "Span finished"
        );
    }
}

/// Exporter that collects spans in memory, for assertions in tests.
#[derive(Default)]
pub struct InMemoryExporter {
    spans: Mutex<Vec<SpanRecord>>,
}

impl InMemoryExporter {
    pub fn finished(&self) -> Vec<SpanRecord> {
        self.spans.lock().expect("exporter lock poisoned").clone()
    }
}

impl SpanExporter for InMemoryExporter {
    fn export(&self, span: &SpanRecord) {
        self.spans
            .lock()
            .expect("exporter lock poisoned")
            .push(span.clone());
    }
}

/// Handle for submitting finished spans from request handlers.
#[derive(Clone)]
pub struct SpanSink {
    tx: mpsc::Sender<SpanRecord>,
    dropped: Arc<AtomicU64>,
}

impl SpanSink {
    /// Queue a span for export. Never blocks; drops the span if the
    /// buffer is full or the worker is gone.
    pub fn submit(&self, span: SpanRecord) {
        if self.tx.try_send(span).is_err() {
            let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(dropped_total = total, "Span buffer full, dropping span");
        }
    }

    /// Number of spans dropped because the buffer was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Spawn the export worker and return the sink feeding it.
///
/// The worker runs until every sink clone is dropped.
pub fn spawn_export_worker(
    exporter: Arc<dyn SpanExporter>,
    queue_capacity: usize,
) -> (SpanSink, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel(queue_capacity.max(1));
    let worker = tokio::spawn(async move {
        while let Some(span) = rx.recv().await {
            exporter.export(&span);
        }
    });
    (
        SpanSink {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        },
        worker,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::context::{SpanId, TraceId};
    use std::time::SystemTime;

    fn span(n: u64) -> SpanRecord {
        SpanRecord {
            trace_id: TraceId(1),
            span_id: SpanId(n),
            parent_span_id: None,
            name: "test".to_string(),
            start_time: SystemTime::now(),
            end_time: SystemTime::now(),
            attributes: vec![],
        }
    }

    #[tokio::test]
    async fn test_worker_drains_into_exporter() {
        let exporter = Arc::new(InMemoryExporter::default());
        let (sink, worker) = spawn_export_worker(exporter.clone(), 8);

        sink.submit(span(1));
        sink.submit(span(2));
        drop(sink);
        worker.await.unwrap();

        let finished = exporter.finished();
        assert_eq!(finished.len(), 2);
        assert_eq!(finished[0].span_id, SpanId(1));
    }

    #[tokio::test]
    async fn test_overflow_drops_newest_without_blocking() {
        // No worker attached, so nothing drains the queue.
        let (tx, _rx) = mpsc::channel(2);
        let sink = SpanSink {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        };

        for n in 0..5 {
            sink.submit(span(n));
        }
        assert_eq!(sink.dropped_count(), 3);
    }
}
