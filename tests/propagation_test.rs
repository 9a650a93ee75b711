//! Trace-context behavior across live hops.

mod common;

use std::time::Duration;

use price_chain::trace::TraceContext;

const VENDOR_DATA: &str = "apple storeA storeB\n";
const PRICE_DATA: &str = "storeA apple 2\n";

const SAMPLED: &str = "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01";
const UNSAMPLED: &str = "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-00";

#[tokio::test]
async fn test_unsampled_trace_is_never_resampled_downstream() {
    let (backend_addr, captured) = common::start_capture_backend("ok").await;
    let (resolver_addr, shutdown) = common::start_resolver(VENDOR_DATA, backend_addr).await;

    common::client()
        .get(format!("http://{resolver_addr}/apple"))
        .header("traceparent", UNSAMPLED)
        .send()
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    let header = captured[0].traceparent.as_deref().expect("context propagated");
    let outbound = TraceContext::parse_traceparent(header).unwrap();
    let inbound = TraceContext::parse_traceparent(UNSAMPLED).unwrap();

    assert!(!outbound.sampled, "an unsampled trace must stay unsampled");
    assert_eq!(outbound.trace_id, inbound.trace_id);
    assert_ne!(outbound.span_id, inbound.span_id, "every hop mints its own span");

    shutdown.trigger();
}

#[tokio::test]
async fn test_sampled_trace_keeps_its_identity() {
    let (backend_addr, captured) = common::start_capture_backend("ok").await;
    let (resolver_addr, shutdown) = common::start_resolver(VENDOR_DATA, backend_addr).await;

    common::client()
        .get(format!("http://{resolver_addr}/apple"))
        .header("traceparent", SAMPLED)
        .send()
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    let outbound =
        TraceContext::parse_traceparent(captured[0].traceparent.as_deref().unwrap()).unwrap();
    let inbound = TraceContext::parse_traceparent(SAMPLED).unwrap();

    assert!(outbound.sampled);
    assert_eq!(outbound.trace_id, inbound.trace_id);
    assert_ne!(outbound.span_id, inbound.span_id);

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_header_starts_a_fresh_root() {
    let (backend_addr, captured) = common::start_capture_backend("ok").await;
    let (resolver_addr, shutdown) = common::start_resolver(VENDOR_DATA, backend_addr).await;

    let res = common::client()
        .get(format!("http://{resolver_addr}/apple"))
        .header("traceparent", "not-a-context")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200, "a bad header never fails the request");

    let captured = captured.lock().unwrap();
    let outbound =
        TraceContext::parse_traceparent(captured[0].traceparent.as_deref().unwrap()).unwrap();
    assert!(outbound.sampled, "fresh root follows the always-on sampler");

    shutdown.trigger();
}

#[tokio::test]
async fn test_sampled_hop_exports_a_span_with_the_wire_parent() {
    let (pricing_addr, shutdown, exporter) = common::start_pricing(PRICE_DATA).await;

    let res = common::client()
        .get(format!("http://{pricing_addr}/apple/storeA"))
        .header("traceparent", SAMPLED)
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "2 dollar at storeA\n");

    // Export runs off the request path; give the worker a moment to drain.
    let mut spans = exporter.finished();
    for _ in 0..100 {
        if !spans.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        spans = exporter.finished();
    }

    let inbound = TraceContext::parse_traceparent(SAMPLED).unwrap();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].trace_id, inbound.trace_id);
    assert_eq!(spans[0].parent_span_id, Some(inbound.span_id));
    assert_ne!(spans[0].span_id, inbound.span_id);
    assert_eq!(spans[0].name, "pricing");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unsampled_hop_exports_nothing() {
    let (pricing_addr, shutdown, exporter) = common::start_pricing(PRICE_DATA).await;

    let res = common::client()
        .get(format!("http://{pricing_addr}/apple/storeA"))
        .header("traceparent", UNSAMPLED)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200, "unsampled requests are still served");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(exporter.finished().is_empty());

    shutdown.trigger();
}
