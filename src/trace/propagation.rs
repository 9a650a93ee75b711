//! Reading and writing the trace carrier on HTTP requests.

use axum::http::{HeaderMap, HeaderValue};

use crate::trace::context::TraceContext;

/// The single propagation header the chain relies on.
pub const TRACEPARENT: &str = "traceparent";

/// Pull the remote trace context out of inbound headers.
///
/// Malformed values are indistinguishable from an absent header: the
/// caller starts a fresh root either way, never failing the request.
pub fn extract(headers: &HeaderMap) -> Option<TraceContext> {
    headers
        .get(TRACEPARENT)?
        .to_str()
        .ok()
        .and_then(TraceContext::parse_traceparent)
}

/// Attach a derived context to an outbound carrier.
///
/// Mints a child of `context` (fresh span id, current span as parent),
/// writes it as `traceparent`, and returns it so the caller can log or
/// record the outbound span identity.
pub fn inject(context: &TraceContext, headers: &mut HeaderMap) -> TraceContext {
    let child = context.child();
    if let Ok(value) = HeaderValue::from_str(&child.to_traceparent()) {
        headers.insert(TRACEPARENT, value);
    }
    child
}
