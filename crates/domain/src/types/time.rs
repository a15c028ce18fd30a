//! Time card and labor charge code records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{CodeValue, UNSET_DATE};
use super::SyncRecord;
use crate::constants::{ENTITY_LABOR_CHARGE_CODES, ENTITY_TIME_CARDS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeCardRecord {
    pub time_card_id: String,
    pub associate_oid: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub processing_status_code: CodeValue,
    /// Sum of `hours_quantity` over every entry
    pub total_hours: f64,
    pub entries: Vec<TimeEntryLine>,
}

impl Default for TimeCardRecord {
    fn default() -> Self {
        Self {
            time_card_id: String::new(),
            associate_oid: String::new(),
            period_start: UNSET_DATE,
            period_end: UNSET_DATE,
            processing_status_code: CodeValue::default(),
            total_hours: 0.0,
            entries: Vec::new(),
        }
    }
}

impl SyncRecord for TimeCardRecord {
    const ENTITY: &'static str = ENTITY_TIME_CARDS;

    fn primary_key(&self) -> &str {
        &self.time_card_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeEntryLine {
    pub entry_id: String,
    pub entry_date: NaiveDate,
    pub hours_quantity: f64,
    pub pay_code: CodeValue,
    pub labor_charge_code: CodeValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaborChargeCodeRecord {
    pub labor_charge_code_id: String,
    pub charge_code: CodeValue,
    pub description: String,
    pub active: bool,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl SyncRecord for LaborChargeCodeRecord {
    const ENTITY: &'static str = ENTITY_LABOR_CHARGE_CODES;

    fn primary_key(&self) -> &str {
        &self.labor_charge_code_id
    }
}
