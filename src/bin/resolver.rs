//! Resolver service binary (hop B).
//!
//! Maps item names to candidate providers and forwards the encoded
//! envelope to the pricing service, propagating the trace context.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use price_chain::config::{load_config, ServiceConfig};
use price_chain::dataset::VendorTable;
use price_chain::http::serve;
use price_chain::lifecycle::Shutdown;
use price_chain::observability::metrics;
use price_chain::resolver::{self, ResolverState};
use price_chain::trace::{sampler_for_ratio, spawn_export_worker, LoggingExporter, RequestTraceLayer};

#[derive(Parser)]
#[command(name = "resolver")]
#[command(about = "Item-to-provider resolver hop", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults are used when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "price_chain=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::resolver_defaults(),
    };
    config.apply_env();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        dataset = %config.dataset.path.display(),
        pricing_url = %config.downstream.pricing_url,
        "Configuration loaded"
    );

    let vendors = Arc::new(VendorTable::load(&config.dataset.path)?);
    tracing::info!(items = vendors.len(), "Vendor dataset loaded");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let exporter = Arc::new(LoggingExporter::new(config.trace.project_id.clone()));
    let (sink, _export_worker) = spawn_export_worker(exporter, config.trace.queue_capacity);
    let trace_layer = RequestTraceLayer::new(
        "resolver",
        sampler_for_ratio(config.trace.sample_ratio),
        sink,
    );

    let pricing_base = Url::parse(&config.downstream.pricing_url)?;
    let state = ResolverState::new(vendors, pricing_base);
    let router = resolver::router(
        state,
        trace_layer,
        Duration::from_secs(config.timeouts.request_secs),
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    serve(listener, router, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
