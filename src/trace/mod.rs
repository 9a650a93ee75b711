//! Trace-context propagation subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → middleware.rs (extract parent from `traceparent`, or mint a root)
//!     → handler sees this hop's TraceContext via request extensions
//!     → propagation.rs injects a child context into outbound calls
//!     → on completion, middleware submits the finished SpanRecord
//!     → exporter.rs (bounded queue → exporter worker, fire-and-forget)
//! ```
//!
//! # Design Decisions
//! - One exported span per hop; the wire span id is the callee's parent
//! - Sampling is decided once at the trace root and inherited verbatim
//! - Span handoff never blocks a request; overflow drops the newest record

pub mod context;
pub mod exporter;
pub mod middleware;
pub mod propagation;
pub mod sampler;
pub mod span;

pub use context::{SpanId, TraceContext, TraceId};
pub use exporter::{spawn_export_worker, InMemoryExporter, LoggingExporter, SpanExporter, SpanSink};
pub use middleware::RequestTraceLayer;
pub use propagation::{extract, inject, TRACEPARENT};
pub use sampler::{sampler_for_ratio, AlwaysSampler, ProbabilitySampler, Sampler};
pub use span::SpanRecord;
