//! Upstream API access
//!
//! Authenticated, throttled access to the payroll API's resource endpoints.
//!
//! # Architecture
//!
//! - [`ClientCredentialsSource`]: one OAuth2 client-credentials round trip
//! - `TokenManager` (common): caches the bearer and coalesces refreshes
//! - [`RateLimitedGateway`]: process-wide minimum request interval, bearer
//!   attachment, 401/403 handling, status and body mapping
//! - No retries here; retry policy belongs to the callers

pub mod auth;
pub mod gateway;

pub use auth::ClientCredentialsSource;
pub use gateway::RateLimitedGateway;
