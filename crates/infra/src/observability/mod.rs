//! Observability infrastructure
//!
//! Structured logging through `tracing`. Subscriber setup is opt-in: a host
//! application that installs its own subscriber never calls
//! [`init_tracing`].

pub mod logging;

pub use logging::{error_label, init_tracing};
