//! Observability subsystem.
//!
//! Structured logging is initialized by each binary via
//! `tracing-subscriber`; span export lives in the `trace` module because it
//! is part of the propagation contract, not a side concern. What remains
//! here is metrics exposition.

pub mod metrics;
