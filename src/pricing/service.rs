//! Pricing request handling.
//!
//! The terminal hop: everything is answered from the local price table.
//! All lookup outcomes are 200 with a human-readable body; a provider
//! without a price entry loses its line and nothing else.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::dataset::PriceTable;
use crate::envelope::Envelope;
use crate::observability::metrics;
use crate::trace::RequestTraceLayer;

const SERVICE: &str = "pricing";

/// Application state injected into the pricing handler.
#[derive(Clone)]
pub struct PricingState {
    prices: Arc<PriceTable>,
}

impl PricingState {
    pub fn new(prices: Arc<PriceTable>) -> Self {
        Self { prices }
    }
}

/// Build the pricing router with its middleware stack.
pub fn router(state: PricingState, trace: RequestTraceLayer, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(price_root))
        .route("/{*query}", get(price_info))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace)
        .layer(TraceLayer::new_for_http())
}

async fn price_root(State(state): State<PricingState>) -> Response {
    price_query(state, String::new()).await
}

async fn price_info(State(state): State<PricingState>, Path(query): Path<String>) -> Response {
    price_query(state, query).await
}

async fn price_query(state: PricingState, query: String) -> Response {
    let start = Instant::now();

    let body = match Envelope::decode(&query) {
        Ok(envelope) => match price_lines(&state.prices, &envelope) {
            Some(lines) => lines,
            None => {
                tracing::debug!(item = %envelope.item, "No price entries for item");
                "Service C: Not finding vendors for this item\n".to_string()
            }
        },
        Err(e) => {
            tracing::debug!(query = %query, error = %e, "Query does not decode to an envelope");
            "Service C fails to find enough info\n".to_string()
        }
    };

    metrics::record_request(SERVICE, StatusCode::OK.as_u16(), start);
    (StatusCode::OK, body).into_response()
}

/// One `"<price> dollar at <provider>"` line per priced provider, in
/// envelope order. `None` when the item itself is unknown.
fn price_lines(prices: &PriceTable, envelope: &Envelope) -> Option<String> {
    let item_prices = prices.prices_for(&envelope.item)?;

    let mut lines = String::new();
    for provider in &envelope.providers {
        match item_prices.get(provider) {
            Some(price) => {
                lines.push_str(price);
                lines.push_str(" dollar at ");
                lines.push_str(provider);
                lines.push('\n');
            }
            None => {
                tracing::warn!(
                    item = %envelope.item,
                    provider = %provider,
                    "No price for provider, skipping"
                );
            }
        }
    }
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PriceTable {
        PriceTable::parse("storeA apple 2\nstoreB apple 3\n")
    }

    #[test]
    fn test_lines_follow_envelope_order() {
        let envelope = Envelope::decode("apple/storeB/storeA").unwrap();
        let lines = price_lines(&table(), &envelope).unwrap();
        assert_eq!(lines, "3 dollar at storeB\n2 dollar at storeA\n");
    }

    #[test]
    fn test_unpriced_provider_is_skipped() {
        let envelope = Envelope::decode("apple/storeA/storeC").unwrap();
        let lines = price_lines(&table(), &envelope).unwrap();
        assert_eq!(lines, "2 dollar at storeA\n");
    }

    #[test]
    fn test_unknown_item_is_none() {
        let envelope = Envelope::decode("pear/storeA").unwrap();
        assert!(price_lines(&table(), &envelope).is_none());
    }

    #[test]
    fn test_all_providers_unpriced_is_empty_body() {
        let envelope = Envelope::decode("apple/storeX/storeY").unwrap();
        assert_eq!(price_lines(&table(), &envelope).unwrap(), "");
    }
}
