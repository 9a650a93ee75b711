//! Tower layer owning each hop's span lifecycle.
//!
//! # Responsibilities
//! - Extract the parent context from inbound headers, or mint a root
//! - Derive this hop's span and expose it to handlers via extensions
//! - Submit the finished span to the export sink once the response is built
//!
//! Sampling is honored here: an unsampled context flows through untouched
//! and produces no span record.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::SystemTime;

use axum::{body::Body, http::Request, response::Response};
use tower::{Layer, Service};

use crate::trace::context::TraceContext;
use crate::trace::exporter::SpanSink;
use crate::trace::propagation;
use crate::trace::sampler::Sampler;
use crate::trace::span::SpanRecord;

/// Layer that wraps a service router with per-request trace handling.
#[derive(Clone)]
pub struct RequestTraceLayer {
    service_name: &'static str,
    sampler: Arc<dyn Sampler>,
    sink: SpanSink,
}

impl RequestTraceLayer {
    pub fn new(service_name: &'static str, sampler: Arc<dyn Sampler>, sink: SpanSink) -> Self {
        Self {
            service_name,
            sampler,
            sink,
        }
    }
}

impl<S> Layer<S> for RequestTraceLayer {
    type Service = RequestTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTraceService {
            inner,
            service_name: self.service_name,
            sampler: self.sampler.clone(),
            sink: self.sink.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RequestTraceService<S> {
    inner: S,
    service_name: &'static str,
    sampler: Arc<dyn Sampler>,
    sink: SpanSink,
}

impl<S> Service<Request<Body>> for RequestTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let context = match propagation::extract(req.headers()) {
            Some(parent) => parent.child(),
            None => TraceContext::root(self.sampler.as_ref()),
        };
        req.extensions_mut().insert(context.clone());

        tracing::debug!(
            trace_id = %context.trace_id,
            span_id = %context.span_id,
            sampled = context.sampled,
            "Request span started"
        );

        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let name = self.service_name;
        let sink = self.sink.clone();
        let start_time = SystemTime::now();
        let future = self.inner.call(req);

        Box::pin(async move {
            let response = future.await?;
            if context.sampled {
                sink.submit(SpanRecord {
                    trace_id: context.trace_id,
                    span_id: context.span_id,
                    parent_span_id: context.parent_span_id,
                    name: name.to_string(),
                    start_time,
                    end_time: SystemTime::now(),
                    attributes: vec![
                        ("http.method", method),
                        ("http.path", path),
                        ("http.status", response.status().as_u16().to_string()),
                    ],
                });
            }
            Ok(response)
        })
    }
}
