//! Pricing service (hop C): decode the envelope, join against prices.

pub mod service;

pub use service::{router, PricingState};
