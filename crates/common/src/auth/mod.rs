//! Bearer credential lifecycle
//!
//! Acquires, caches and refreshes the bearer token used by every resource
//! request. Validity is not tracked by expiry: a credential is good until the
//! upstream answers 401/403, at which point the caller asks for a refresh.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  CredentialProvider  │  Seam used by the HTTP gateway
//! └──────────┬───────────┘
//!            │
//!            └──► TokenManager        (caching + coalesced refresh)
//!                      │
//!                      └──► TokenSource   (one token-endpoint round trip)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use hrsync_common::auth::{TokenError, TokenGrant, TokenManager, TokenSource};
//!
//! struct StaticSource;
//!
//! #[async_trait]
//! impl TokenSource for StaticSource {
//!     async fn fetch_token(&self) -> Result<TokenGrant, TokenError> {
//!         Ok(TokenGrant::bearer("token"))
//!     }
//! }
//!
//! # async fn run() -> Result<(), TokenError> {
//! let manager = TokenManager::new(StaticSource);
//! let credential = manager.ensure_authorized().await?;
//! assert_eq!(credential.version(), 1);
//! # Ok(())
//! # }
//! ```

pub mod token_manager;
pub mod traits;
pub mod types;

pub use token_manager::TokenManager;
pub use traits::{CredentialProvider, TokenSource};
pub use types::{Credential, TokenError, TokenGrant, TokenState};
