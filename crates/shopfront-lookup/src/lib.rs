//! Postal-code address lookup.
//!
//! This crate provides:
//! - `ViaCepClient` - HTTP client for the ViaCEP service with timeout/retry
//! - `AddressLookup` - the seam checkout code depends on
//! - `autofill` - drive a `CheckoutSession` through one lookup
//! - `TimeoutConfig`, `RetryPolicy` - request policies

mod client;
mod error;
mod response;
mod retry;
mod timeout;

pub use client::*;
pub use error::LookupError;
pub use response::ViaCepResponse;
pub use retry::*;
pub use timeout::*;
