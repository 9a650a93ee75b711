//! Shared utilities for integration testing the service chain.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;
use url::Url;

use price_chain::dataset::{PriceTable, VendorTable};
use price_chain::http::serve;
use price_chain::lifecycle::Shutdown;
use price_chain::pricing::{self, PricingState};
use price_chain::resolver::{self, ResolverState};
use price_chain::trace::{
    spawn_export_worker, AlwaysSampler, InMemoryExporter, RequestTraceLayer,
};

/// One request as seen by the downstream stand-in.
pub struct CapturedRequest {
    pub path: String,
    pub traceparent: Option<String>,
}

/// Start a downstream stand-in that records every request it receives and
/// answers with a fixed body.
pub async fn start_capture_backend(
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured: Arc<Mutex<Vec<CapturedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let log = captured.clone();

    let app = Router::new().fallback(move |req: Request<Body>| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(CapturedRequest {
                path: req.uri().path().to_string(),
                traceparent: req
                    .headers()
                    .get("traceparent")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
            });
            body
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    (addr, captured)
}

/// Serve a router on an ephemeral port the same way the binaries do.
pub async fn spawn_service(router: Router) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        serve(listener, router, rx).await.unwrap();
    });
    (addr, shutdown)
}

/// Always-sampling trace layer backed by an in-memory exporter.
pub fn trace_layer(service: &'static str) -> (RequestTraceLayer, Arc<InMemoryExporter>) {
    let exporter = Arc::new(InMemoryExporter::default());
    let (sink, _worker) = spawn_export_worker(exporter.clone(), 64);
    (
        RequestTraceLayer::new(service, Arc::new(AlwaysSampler), sink),
        exporter,
    )
}

/// Start a pricing service over the given dataset text.
pub async fn start_pricing(dataset: &str) -> (SocketAddr, Shutdown, Arc<InMemoryExporter>) {
    let (layer, exporter) = trace_layer("pricing");
    let state = PricingState::new(Arc::new(PriceTable::parse(dataset)));
    let router = pricing::router(state, layer, Duration::from_secs(5));
    let (addr, shutdown) = spawn_service(router).await;
    (addr, shutdown, exporter)
}

/// Start a resolver service over the given dataset text, pointed at
/// `pricing_addr` for its downstream calls.
pub async fn start_resolver(dataset: &str, pricing_addr: SocketAddr) -> (SocketAddr, Shutdown) {
    let (layer, _exporter) = trace_layer("resolver");
    let pricing_base = Url::parse(&format!("http://{pricing_addr}")).unwrap();
    let state = ResolverState::new(Arc::new(VendorTable::parse(dataset)), pricing_base);
    let router = resolver::router(state, layer, Duration::from_secs(5));
    spawn_service(router).await
}

/// HTTP client that ignores any ambient proxy configuration.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
