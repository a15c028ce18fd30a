//! HTTP transport shared by the token source and the resource gateway

pub mod client;

pub use client::{decode_identity_pem, HttpClient, HttpClientBuilder};
