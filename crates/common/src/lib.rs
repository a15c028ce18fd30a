//! Modular common utilities shared across HrSync crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `runtime`: async infrastructure (rate limiting)
//! - `platform`: credential lifecycle for OAuth2 client-credentials APIs

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{Credential, CredentialProvider, TokenError, TokenManager, TokenSource, TokenState};
#[cfg(feature = "runtime")]
pub use resilience::{LimiterError, MinIntervalLimiter};
