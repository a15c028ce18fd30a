//! Value types shared by several record kinds

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel stored in date fields whose upstream value is missing or
/// unparsable (`0001-01-01`).
pub const UNSET_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Coded value with its display names
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeValue {
    pub code_value: String,
    pub short_name: String,
    pub long_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxAmount {
    pub name_code: CodeValue,
    pub amount_value: f64,
    pub currency_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithholdingStatus {
    pub status_code: CodeValue,
    pub reason_code: CodeValue,
    pub effective_date: NaiveDate,
}

impl Default for WithholdingStatus {
    fn default() -> Self {
        Self {
            status_code: CodeValue::default(),
            reason_code: CodeValue::default(),
            effective_date: UNSET_DATE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxAllowance {
    pub allowance_code: CodeValue,
    pub allowance_quantity: f64,
}
