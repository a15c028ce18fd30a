//! Canonical record types
//!
//! Records emitted to the cache writer. Every field is populated: optional
//! upstream values are replaced by defaults during mapping, and every record
//! carries a non-empty primary key.

pub mod common;
pub mod stats;
pub mod tax;
pub mod time;
pub mod worker;

pub use common::{CodeValue, TaxAllowance, TaxAmount, WithholdingStatus, UNSET_DATE};
pub use stats::{PassReport, SyncStatsSnapshot};
pub use tax::{
    FederalIncomeTaxInstruction, FederalTaxProfileRecord, Form1099Instruction,
    LocalTaxProfileRecord, StateIncomeTaxInstruction, StateTaxProfileRecord, TaxInstruction,
    UsFederalTaxInstruction,
};
pub use time::{LaborChargeCodeRecord, TimeCardRecord, TimeEntryLine};
pub use worker::{
    Address, BaseRemuneration, Communication, Email, PersonName, PhoneNumber, WorkAssignment,
    WorkerPerson, WorkerRecord,
};

/// A canonical record the cache writer can store.
pub trait SyncRecord: Send + 'static {
    /// Entity name used in logs and pass reports
    const ENTITY: &'static str;

    /// Unique, join-able key; never empty.
    fn primary_key(&self) -> &str;
}
