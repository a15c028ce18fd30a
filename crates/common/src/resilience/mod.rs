//! Resilience patterns for outbound traffic
//!
//! This module provides the process-wide request throttle shared by every
//! gateway talking to the same upstream account.

pub mod rate_limiter;

pub use rate_limiter::{LimiterError, MinIntervalLimiter};
