//! Worker (parent) records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{CodeValue, TaxAmount, UNSET_DATE};
use super::SyncRecord;
use crate::constants::ENTITY_WORKERS;

/// A worker as stored by the cache writer.
///
/// `associate_oid` is the join key for every per-worker dependent fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkerRecord {
    pub associate_oid: String,
    pub worker_id: String,
    pub worker_id_scheme: CodeValue,
    pub person: WorkerPerson,
    pub business_communication: Communication,
    pub work_assignments: Vec<WorkAssignment>,
}

impl SyncRecord for WorkerRecord {
    const ENTITY: &'static str = ENTITY_WORKERS;

    fn primary_key(&self) -> &str {
        &self.associate_oid
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerPerson {
    pub legal_name: PersonName,
    pub preferred_name: PersonName,
    pub birth_date: NaiveDate,
    pub gender_code: CodeValue,
    pub marital_status_code: CodeValue,
    pub ethnicity_code: CodeValue,
    pub race_code: CodeValue,
    pub legal_address: Address,
    pub communication: Communication,
}

impl Default for WorkerPerson {
    fn default() -> Self {
        Self {
            legal_name: PersonName::default(),
            preferred_name: PersonName::default(),
            birth_date: UNSET_DATE,
            gender_code: CodeValue::default(),
            marital_status_code: CodeValue::default(),
            ethnicity_code: CodeValue::default(),
            race_code: CodeValue::default(),
            legal_address: Address::default(),
            communication: Communication::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonName {
    pub given_name: String,
    pub middle_name: String,
    pub family_name_1: String,
    pub family_name_2: String,
    pub formatted_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub line_one: String,
    pub line_two: String,
    pub line_three: String,
    pub city_name: String,
    pub country_subdivision_level_1: CodeValue,
    pub country_code: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Communication {
    pub landlines: Vec<PhoneNumber>,
    pub mobiles: Vec<PhoneNumber>,
    pub emails: Vec<Email>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneNumber {
    pub name_code: CodeValue,
    pub country_dialing: String,
    pub area_dialing: String,
    pub dial_number: String,
    pub formatted_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Email {
    pub name_code: CodeValue,
    pub email_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkAssignment {
    pub item_id: String,
    pub primary_indicator: bool,
    pub hire_date: NaiveDate,
    pub seniority_date: NaiveDate,
    pub termination_date: NaiveDate,
    pub worker_type_code: CodeValue,
    pub assignment_status_code: CodeValue,
    pub assignment_status_reason: CodeValue,
    pub assignment_status_date: NaiveDate,
    pub job_title: String,
    pub job_code: CodeValue,
    pub base_remuneration: BaseRemuneration,
    pub standard_hours: f64,
    pub standard_hours_unit: CodeValue,
    pub full_time_equivalence_ratio: f64,
    pub home_work_location: CodeValue,
    pub home_work_address: Address,
    /// Associate OIDs of the worker's managers
    pub reports_to: Vec<String>,
    pub management_position_indicator: bool,
    pub pay_cycle_code: CodeValue,
}

impl Default for WorkAssignment {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            primary_indicator: false,
            hire_date: UNSET_DATE,
            seniority_date: UNSET_DATE,
            termination_date: UNSET_DATE,
            worker_type_code: CodeValue::default(),
            assignment_status_code: CodeValue::default(),
            assignment_status_reason: CodeValue::default(),
            assignment_status_date: UNSET_DATE,
            job_title: String::new(),
            job_code: CodeValue::default(),
            base_remuneration: BaseRemuneration::default(),
            standard_hours: 0.0,
            standard_hours_unit: CodeValue::default(),
            full_time_equivalence_ratio: 0.0,
            home_work_location: CodeValue::default(),
            home_work_address: Address::default(),
            reports_to: Vec::new(),
            management_position_indicator: false,
            pay_cycle_code: CodeValue::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseRemuneration {
    pub effective_date: NaiveDate,
    pub pay_period_rate_amount: TaxAmount,
    pub annual_rate_amount: TaxAmount,
    pub hourly_rate_amount: TaxAmount,
}

impl Default for BaseRemuneration {
    fn default() -> Self {
        Self {
            effective_date: UNSET_DATE,
            pay_period_rate_amount: TaxAmount::default(),
            annual_rate_amount: TaxAmount::default(),
            hourly_rate_amount: TaxAmount::default(),
        }
    }
}
