//! # HrSync Infrastructure
//!
//! Infrastructure implementations of the sync core's ports.
//!
//! This crate contains:
//! - The rate-limited, auth-aware HTTP gateway and its token source
//! - ADP endpoint knowledge (paths, page decoding, per-worker calls)
//! - One entity reader per synchronized entity type
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `hrsync-core` and `hrsync-common`
//! - Contains all "impure" code (network, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;

// Re-export commonly used items
pub use api::{ClientCredentialsSource, RateLimitedGateway};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::adp::{
    AdpClient, FederalTaxProfilesReader, LaborChargeCodesReader, LocalTaxProfilesReader,
    StateTaxProfilesReader, TimeCardsReader, WorkerRoster, WorkersReader,
};
pub use observability::{error_label, init_tracing};
