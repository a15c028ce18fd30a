use serde::Deserialize;

/// Coded value (`codeValue` / `shortName` / `longName`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeValueDto {
    pub code_value: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

/// Monetary amount with an optional classifying code
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AmountDto {
    pub name_code: Option<CodeValueDto>,
    pub amount_value: Option<f64>,
    pub currency_code: Option<String>,
}

/// Withholding status block shared by every tax instruction
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WithholdingStatusDto {
    pub status_code: Option<CodeValueDto>,
    pub reason_code: Option<CodeValueDto>,
    pub effective_date: Option<String>,
}

/// Postal address
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDto {
    pub line_one: Option<String>,
    pub line_two: Option<String>,
    pub line_three: Option<String>,
    pub city_name: Option<String>,
    pub country_subdivision_level1: Option<CodeValueDto>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
}
