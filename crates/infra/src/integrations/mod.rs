//! External service integrations

pub mod adp;

pub use adp::AdpClient;
