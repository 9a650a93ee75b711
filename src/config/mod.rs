//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in per-service defaults, or a TOML file (--config)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs::validate_config (semantic checks)
//!     → environment overrides (PORT, PROJECT_ID)
//!     → ServiceConfig (immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - No reload: the chain's state is immutable once a process is up

pub mod loader;
pub mod schema;

pub use loader::{load_config, validate_config, ConfigError};
pub use schema::{
    DatasetConfig, DownstreamConfig, ListenerConfig, ObservabilityConfig, ServiceConfig,
    TimeoutConfig, TraceConfig,
};
