use serde::Deserialize;

use super::common::CodeValueDto;
use super::nulls::null_as_empty;

/// Entry of the `timeCards` list endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeCardDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    #[serde(rename = "associateOID", alias = "associateOid")]
    pub associate_oid: Option<String>,
    pub time_period: Option<TimePeriodDto>,
    pub processing_status_code: Option<CodeValueDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub time_entries: Vec<TimeEntryDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimePeriodDto {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeEntryDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    pub entry_date: Option<String>,
    pub hours_quantity: Option<f64>,
    pub pay_code: Option<CodeValueDto>,
    pub labor_charge_code: Option<CodeValueDto>,
}

/// Entry of the `laborChargeCodes` list endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LaborChargeCodeDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    pub charge_code: Option<CodeValueDto>,
    pub description: Option<String>,
    pub active_indicator: Option<bool>,
    pub effective_date: Option<String>,
    pub expiration_date: Option<String>,
}
