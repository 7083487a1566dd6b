//! Client for the ESB store-catalog API: count discovery, parallel page
//! fetches, and normalization of raw records into the canonical model.

mod client;
mod error;
mod normalize;
mod types;

pub use client::EsbClient;
pub use error::{EsbError, NormalizeError};
pub use normalize::normalize_store;
pub use types::RawStore;
