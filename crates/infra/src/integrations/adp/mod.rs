//! ADP payroll API integration
//!
//! Endpoint knowledge lives here: paths, list wrapper keys, pagination
//! totals, and the per-worker dependent calls. Control flow (pagination,
//! fan-out, pass running) comes from `hrsync-core`.

pub mod client;
pub mod pages;
pub mod readers;
pub mod roster;

pub use client::AdpClient;
pub use pages::{decode_page, CollectionPages};
pub use readers::{
    FederalTaxProfilesReader, LaborChargeCodesReader, LocalTaxProfilesReader,
    StateTaxProfilesReader, TimeCardsReader, WorkersReader,
};
pub use roster::WorkerRoster;
