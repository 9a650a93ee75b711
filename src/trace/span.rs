//! Finished-span records handed to the exporter.

use std::time::{Duration, SystemTime};

use crate::trace::context::{SpanId, TraceId};

/// One hop's unit of recorded work, emitted when the hop's response is done.
#[derive(Debug, Clone)]
pub struct SpanRecord {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub parent_span_id: Option<SpanId>,
    /// Name of the recording service.
    pub name: String,
    pub start_time: SystemTime,
    pub end_time: SystemTime,
    /// Flat key/value annotations (method, path, status).
    pub attributes: Vec<(&'static str, String)>,
}

impl SpanRecord {
    pub fn duration(&self) -> Duration {
        self.end_time
            .duration_since(self.start_time)
            .unwrap_or_default()
    }
}
