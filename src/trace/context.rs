//! Trace and span identity, and the text form they travel in.

use std::fmt;

use rand::Rng;

use crate::trace::sampler::Sampler;

/// 128-bit trace identifier shared by every span of one trace. Non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(pub u128);

/// 64-bit span identifier, unique per hop within a trace. Non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(pub u64);

impl TraceId {
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let value = rng.gen::<u128>();
            if value != 0 {
                return Self(value);
            }
        }
    }
}

impl SpanId {
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let value = rng.gen::<u64>();
            if value != 0 {
                return Self(value);
            }
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The per-request trace state carried across service boundaries.
///
/// `trace_id` and `sampled` are fixed at the trace root and inherited by
/// every derived context; each hop and each outbound call gets its own
/// `span_id` with the previous span recorded as parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub sampled: bool,
    pub parent_span_id: Option<SpanId>,
}

impl TraceContext {
    /// Start a brand-new trace; the sampling decision is made here, once.
    pub fn root(sampler: &dyn Sampler) -> Self {
        let trace_id = TraceId::random();
        Self {
            trace_id,
            span_id: SpanId::random(),
            sampled: sampler.should_sample(trace_id),
            parent_span_id: None,
        }
    }

    /// Derive a child context: fresh span id, same trace id and sampling
    /// decision, current span recorded as parent.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: SpanId::random(),
            sampled: self.sampled,
            parent_span_id: Some(self.span_id),
        }
    }

    /// Parse a W3C-style `traceparent` value: `version-traceid-spanid-flags`.
    ///
    /// Returns `None` for anything malformed; callers treat that the same
    /// as an absent header and start a fresh root.
    pub fn parse_traceparent(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let version = parts.next()?;
        let trace_id = parts.next()?;
        let span_id = parts.next()?;
        let flags = parts.next()?;

        if version.len() != 2 || trace_id.len() != 32 || span_id.len() != 16 || flags.len() != 2 {
            return None;
        }
        let version = u8::from_str_radix(version, 16).ok()?;
        if version == 0xff {
            return None;
        }
        // Version 00 has exactly four fields; later versions may append more.
        if version == 0 && parts.next().is_some() {
            return None;
        }

        let trace_id = u128::from_str_radix(trace_id, 16).ok()?;
        let span_id = u64::from_str_radix(span_id, 16).ok()?;
        if trace_id == 0 || span_id == 0 {
            return None;
        }
        let flags = u8::from_str_radix(flags, 16).ok()?;

        Some(Self {
            trace_id: TraceId(trace_id),
            span_id: SpanId(span_id),
            sampled: flags & 0x01 == 0x01,
            parent_span_id: None,
        })
    }

    /// Render as a version-00 `traceparent` value.
    pub fn to_traceparent(&self) -> String {
        format!(
            "00-{:032x}-{:016x}-{:02x}",
            self.trace_id.0,
            self.span_id.0,
            u8::from(self.sampled)
        )
    }
}
