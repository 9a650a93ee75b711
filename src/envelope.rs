//! Wire codec for the resolver → pricing path payload.
//!
//! The envelope is a slash-joined path: the first segment is the item name,
//! every following segment is a candidate provider, in resolver enumeration
//! order. The codec is the only place that knows this shape; swapping the
//! wire format means swapping this module, not the lookup logic.

use thiserror::Error;

/// Segment separator of the path encoding.
pub const SEPARATOR: char = '/';

/// The payload the resolver emits and the pricing service decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Item the chain is resolving.
    pub item: String,
    /// Candidate providers for the item; order is significant.
    pub providers: Vec<String>,
}

/// Error type for envelope encoding and decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// A name cannot carry the separator without corrupting the path.
    #[error("name `{0}` contains the reserved `/` separator")]
    ReservedSeparator(String),
    /// An envelope needs an item and at least one provider.
    #[error("fewer than two segments")]
    NotEnoughSegments,
}

impl Envelope {
    pub fn new(item: impl Into<String>, providers: Vec<String>) -> Self {
        Self {
            item: item.into(),
            providers,
        }
    }

    /// Encode as `item/provider_1/.../provider_n` (no trailing slash).
    ///
    /// Rejects envelopes without providers and names that embed the
    /// separator; both would produce a path the other side misreads.
    pub fn encode(&self) -> Result<String, EnvelopeError> {
        if self.providers.is_empty() {
            return Err(EnvelopeError::NotEnoughSegments);
        }
        for name in std::iter::once(&self.item).chain(self.providers.iter()) {
            if name.contains(SEPARATOR) {
                return Err(EnvelopeError::ReservedSeparator(name.clone()));
            }
        }

        let mut encoded = self.item.clone();
        for provider in &self.providers {
            encoded.push(SEPARATOR);
            encoded.push_str(provider);
        }
        Ok(encoded)
    }

    /// Decode a path back into item + providers.
    ///
    /// Anything with fewer than two segments is rejected; the segment
    /// contents themselves are not interpreted here.
    pub fn decode(path: &str) -> Result<Self, EnvelopeError> {
        let mut segments = path.split(SEPARATOR);
        let item = segments.next().unwrap_or("");
        let providers: Vec<String> = segments.map(str::to_string).collect();

        if providers.is_empty() {
            return Err(EnvelopeError::NotEnoughSegments);
        }

        Ok(Self {
            item: item.to_string(),
            providers,
        })
    }
}
