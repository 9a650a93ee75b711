//! Trace-propagating lookup chain.
//!
//! Two cooperating HTTP services resolve a query in hops while carrying one
//! distributed-trace context end to end:
//!
//! ```text
//!  caller ──▶ resolver (B) ──▶ pricing (C)
//!               │                 │
//!               │  item → providers, encoded as item/p1/p2   (envelope)
//!               │                 │  providers × price table → lines
//!               ◀─── response relayed verbatim ───┘
//!
//!  traceparent header: extracted or minted at every hop, re-injected on
//!  the resolver's outbound call; finished spans drain to an exporter off
//!  the request path.
//! ```
//!
//! The binaries in `src/bin/` wire configuration, datasets and the trace
//! layer together; everything reusable lives in the library modules below.

// Core pipeline
pub mod dataset;
pub mod envelope;
pub mod pricing;
pub mod resolver;
pub mod trace;

// Cross-cutting concerns
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use envelope::Envelope;
pub use lifecycle::Shutdown;
pub use trace::TraceContext;
