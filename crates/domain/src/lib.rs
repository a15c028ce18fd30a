//! # HrSync Domain
//!
//! Business domain types for the HR/payroll synchronization core.
//!
//! This crate contains:
//! - Canonical record types emitted to the cache writer
//! - Upstream wire shapes (the JSON the payroll API returns)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other HrSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod wire;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
