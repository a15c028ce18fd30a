use serde::Deserialize;

use super::common::{AddressDto, AmountDto, CodeValueDto};
use super::nulls::null_as_empty;

/// Entry of the `workers` list endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerDto {
    #[serde(rename = "associateOID", alias = "associateOid")]
    pub associate_oid: Option<String>,
    #[serde(rename = "workerID", alias = "workerId")]
    pub worker_id: Option<WorkerIdDto>,
    pub person: Option<PersonDto>,
    pub business_communication: Option<CommunicationDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub work_assignments: Vec<WorkAssignmentDto>,
}

impl WorkerDto {
    /// The associate OID, if the upstream supplied a non-blank one.
    pub fn usable_oid(&self) -> Option<&str> {
        self.associate_oid.as_deref().map(str::trim).filter(|oid| !oid.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerIdDto {
    pub id_value: Option<String>,
    pub scheme_code: Option<CodeValueDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonDto {
    pub legal_name: Option<LegalNameDto>,
    pub preferred_name: Option<LegalNameDto>,
    pub birth_date: Option<String>,
    pub gender_code: Option<CodeValueDto>,
    pub marital_status_code: Option<CodeValueDto>,
    pub ethnicity_code: Option<CodeValueDto>,
    pub race_code: Option<CodeValueDto>,
    pub legal_address: Option<AddressDto>,
    pub communication: Option<CommunicationDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalNameDto {
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    #[serde(rename = "familyName1")]
    pub family_name_1: Option<String>,
    #[serde(rename = "familyName2")]
    pub family_name_2: Option<String>,
    pub formatted_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommunicationDto {
    #[serde(deserialize_with = "null_as_empty")]
    pub landlines: Vec<PhoneNumberDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub mobiles: Vec<PhoneNumberDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub emails: Vec<EmailDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneNumberDto {
    pub name_code: Option<CodeValueDto>,
    pub country_dialing: Option<String>,
    pub area_dialing: Option<String>,
    pub dial_number: Option<String>,
    pub formatted_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailDto {
    pub name_code: Option<CodeValueDto>,
    pub email_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkAssignmentDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    pub primary_indicator: Option<bool>,
    pub hire_date: Option<String>,
    pub seniority_date: Option<String>,
    pub termination_date: Option<String>,
    pub worker_type_code: Option<CodeValueDto>,
    pub assignment_status: Option<WorkerStatusDto>,
    pub job_title: Option<String>,
    pub job_code: Option<CodeValueDto>,
    pub base_remuneration: Option<BaseRemunerationDto>,
    pub standard_hours: Option<StandardHoursDto>,
    pub full_time_equivalence_ratio: Option<f64>,
    pub home_work_location: Option<WorkLocationDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub reports_to: Vec<ReportsToDto>,
    pub management_position_indicator: Option<bool>,
    pub pay_cycle_code: Option<CodeValueDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerStatusDto {
    pub status_code: Option<CodeValueDto>,
    pub reason_code: Option<CodeValueDto>,
    pub effective_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseRemunerationDto {
    pub effective_date: Option<String>,
    pub pay_period_rate_amount: Option<AmountDto>,
    pub annual_rate_amount: Option<AmountDto>,
    pub hourly_rate_amount: Option<AmountDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardHoursDto {
    pub hours_quantity: Option<f64>,
    pub unit_code: Option<CodeValueDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkLocationDto {
    pub name_code: Option<CodeValueDto>,
    pub address: Option<AddressDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportsToDto {
    #[serde(rename = "associateOID", alias = "associateOid")]
    pub associate_oid: Option<String>,
    #[serde(rename = "workerID", alias = "workerId")]
    pub worker_id: Option<WorkerIdDto>,
    pub reports_to_worker_name: Option<LegalNameDto>,
}
