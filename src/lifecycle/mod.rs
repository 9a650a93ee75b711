//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Load dataset → Initialize subsystems → Start listener
//!
//! Shutdown:
//!     Ctrl+C (or test trigger) → broadcast → axum drains in-flight requests
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
