//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for one hop of
//! the chain. All types derive Serde traits for deserialization from config
//! files; both service binaries share the schema and differ only in their
//! built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a chain service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Dataset the service loads at startup.
    pub dataset: DatasetConfig,

    /// Downstream endpoint; only the resolver dials out.
    pub downstream: DownstreamConfig,

    /// Trace propagation and export settings.
    pub trace: TraceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Built-in defaults for the resolver service (hop B).
    pub fn resolver_defaults() -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: "0.0.0.0:7777".to_string(),
            },
            dataset: DatasetConfig {
                path: PathBuf::from("data/vendor.txt"),
            },
            observability: ObservabilityConfig {
                metrics_address: "0.0.0.0:9091".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Built-in defaults for the pricing service (hop C).
    pub fn pricing_defaults() -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: "0.0.0.0:7778".to_string(),
            },
            dataset: DatasetConfig {
                path: PathBuf::from("data/price.txt"),
            },
            observability: ObservabilityConfig {
                metrics_address: "0.0.0.0:9092".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Apply environment overrides on top of file or built-in values.
    ///
    /// `PORT` rewrites the listening port; `PROJECT_ID` tags exported spans.
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.listener.bind_address = format!("0.0.0.0:{port}"),
                Err(_) => tracing::warn!(port = %port, "Ignoring unparseable PORT override"),
            }
        }
        if let Ok(project_id) = std::env::var("PROJECT_ID") {
            if !project_id.is_empty() {
                self.trace.project_id = project_id;
            }
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7777").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Dataset file location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the line-oriented dataset file.
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/vendor.txt"),
        }
    }
}

/// Downstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Base URL of the pricing service the resolver forwards to.
    pub pricing_url: String,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            pricing_url: "http://127.0.0.1:7778".to_string(),
        }
    }
}

/// Trace propagation and export settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Project identifier attached to exported spans.
    pub project_id: String,

    /// Fraction of new traces to sample, 0.0..=1.0.
    pub sample_ratio: f64,

    /// Capacity of the span export buffer; overflow drops spans.
    pub queue_capacity: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            project_id: "local-dev".to_string(),
            sample_ratio: 1.0,
            queue_capacity: 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Also bounds the resolver's downstream call.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9091".to_string(),
        }
    }
}
