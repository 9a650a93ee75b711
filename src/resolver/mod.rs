//! Resolver service (hop B): item → candidate providers → downstream call.

pub mod service;

pub use service::{router, ResolverState};
