//! Upstream-to-canonical record mapping
//!
//! Pure, stateless functions. They never fail: absent optional values become
//! defaults (empty string, zero, `false`, empty collections, [`UNSET_DATE`])
//! and a missing id is replaced by a freshly generated one, so every record
//! leaves here fully populated with a non-empty primary key.
//!
//! [`UNSET_DATE`]: hrsync_domain::UNSET_DATE

pub mod dates;
pub mod tax;
pub mod time;
pub mod values;
pub mod workers;

pub use dates::{date_or_unset, parse_date, DateParse};
pub use tax::{map_federal_profile, map_local_profile, map_state_profile};
pub use time::{map_labor_charge_code, map_time_card};
pub use values::key_or_generate;
pub use workers::map_worker;
