//! Resolver request handling.
//!
//! # Responsibilities
//! - Map the request path to an item and look up its providers
//! - Answer unknown items locally, without dialing downstream
//! - Encode the envelope and forward to the pricing service with the
//!   trace context injected
//! - Relay the downstream response verbatim; scope downstream failures
//!   to the single request (502, process keeps serving)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Extension, Path, State},
    http::{Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use crate::dataset::VendorTable;
use crate::envelope::Envelope;
use crate::observability::metrics;
use crate::trace::{propagation, RequestTraceLayer, TraceContext};

const SERVICE: &str = "resolver";

/// Application state injected into the resolver handler.
#[derive(Clone)]
pub struct ResolverState {
    vendors: Arc<VendorTable>,
    client: Client<HttpConnector, Body>,
    pricing_base: Url,
}

impl ResolverState {
    /// Build the state around a loaded table and the pricing endpoint.
    pub fn new(vendors: Arc<VendorTable>, mut pricing_base: Url) -> Self {
        // A base path without a trailing slash would swallow its last
        // segment on join().
        if !pricing_base.path().ends_with('/') {
            let path = format!("{}/", pricing_base.path());
            pricing_base.set_path(&path);
        }
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            vendors,
            client,
            pricing_base,
        }
    }
}

/// Build the resolver router with its middleware stack.
pub fn router(state: ResolverState, trace: RequestTraceLayer, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(resolve_root))
        .route("/{*item}", get(resolve))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace)
        .layer(TraceLayer::new_for_http())
}

async fn resolve_root(
    State(state): State<ResolverState>,
    Extension(context): Extension<TraceContext>,
) -> Response {
    resolve_item(state, context, String::new()).await
}

async fn resolve(
    State(state): State<ResolverState>,
    Extension(context): Extension<TraceContext>,
    Path(item): Path<String>,
) -> Response {
    resolve_item(state, context, item).await
}

async fn resolve_item(state: ResolverState, context: TraceContext, item: String) -> Response {
    let start = Instant::now();

    let Some(providers) = state.vendors.providers_for(&item) else {
        tracing::debug!(item = %item, "No vendor entry, answering locally");
        metrics::record_request(SERVICE, StatusCode::OK.as_u16(), start);
        return (
            StatusCode::OK,
            format!("Service B: No vendor info about {item}\n"),
        )
            .into_response();
    };

    let envelope = Envelope::new(item, providers.to_vec());
    let encoded = match envelope.encode() {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::error!(item = %envelope.item, error = %e, "Vendor data does not encode");
            return internal_error(start);
        }
    };

    let target = match state.pricing_base.join(&encoded) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(path = %encoded, error = %e, "Pricing target URL does not build");
            return internal_error(start);
        }
    };
    let uri = match target.as_str().parse::<Uri>() {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(target = %target, error = %e, "Pricing target URI does not parse");
            return internal_error(start);
        }
    };
    let mut request = match Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
    {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(target = %target, error = %e, "Outbound request does not build");
            return internal_error(start);
        }
    };

    let outbound = propagation::inject(&context, request.headers_mut());
    tracing::debug!(
        trace_id = %outbound.trace_id,
        span_id = %outbound.span_id,
        target = %target,
        "Forwarding to pricing service"
    );

    match state.client.request(request).await {
        Ok(response) => {
            metrics::record_request(SERVICE, response.status().as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(
                trace_id = %outbound.trace_id,
                target = %target,
                error = %e,
                "Pricing request failed"
            );
            metrics::record_downstream_failure(SERVICE);
            metrics::record_request(SERVICE, StatusCode::BAD_GATEWAY.as_u16(), start);
            (
                StatusCode::BAD_GATEWAY,
                "Service B: pricing request failed\n",
            )
                .into_response()
        }
    }
}

fn internal_error(start: Instant) -> Response {
    metrics::record_request(SERVICE, StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start);
    (StatusCode::INTERNAL_SERVER_ERROR, "Service B: internal error\n").into_response()
}
