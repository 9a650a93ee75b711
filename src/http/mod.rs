//! Shared HTTP serving plumbing.
//!
//! Each service builds its own axum `Router`; this module only owns the
//! serve loop and its graceful-shutdown wiring so both binaries and the
//! integration tests run servers the same way.

pub mod server;

pub use server::serve;
