use serde::Deserialize;

use super::common::{AmountDto, CodeValueDto, WithholdingStatusDto};
use super::nulls::{null_as_empty, skip_null_entries};

/// `GET payroll/v1/workers/{aoid}/us-tax-profiles`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsTaxProfilesResponseDto {
    pub us_tax_profiles: Option<UsTaxProfileDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsTaxProfileDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    pub payroll_file_number: Option<String>,
    pub payroll_group_code: Option<CodeValueDto>,
    pub us_federal_tax_instruction: Option<UsFederalTaxInstructionDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub us_local_tax_instructions: Vec<UsLocalTaxInstructionDto>,
}

impl UsTaxProfileDto {
    /// The profile id, if the upstream supplied a non-blank one.
    pub fn usable_id(&self) -> Option<&str> {
        self.item_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsFederalTaxInstructionDto {
    pub federal_income_tax_instruction: Option<FederalIncomeTaxInstructionDto>,
    pub social_security_tax_instruction: Option<TaxInstructionDto>,
    pub medicare_tax_instruction: Option<TaxInstructionDto>,
    pub federal_unemployment_tax_instruction: Option<TaxInstructionDto>,
    #[serde(rename = "form1099Instruction")]
    pub form_1099_instruction: Option<Form1099InstructionDto>,
    #[serde(rename = "interimW2IssuedIndicator")]
    pub interim_w2_issued_indicator: Option<bool>,
    pub statutory_worker_indicator: Option<bool>,
    pub qualified_pension_plan_coverage_indicator: Option<bool>,
    pub multiple_job_indicator: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FederalIncomeTaxInstructionDto {
    pub tax_withholding_status: Option<WithholdingStatusDto>,
    pub tax_filing_status_code: Option<CodeValueDto>,
    pub tax_withholding_allowance_quantity: Option<f64>,
    pub additional_tax_percentage: Option<f64>,
    pub additional_tax_amount: Option<AmountDto>,
    pub override_tax_percentage: Option<f64>,
    pub override_tax_amount: Option<AmountDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub tax_allowances: Vec<TaxAllowanceDto>,
    pub additional_income_amount: Option<AmountDto>,
}

/// Instruction that carries nothing but a withholding status
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxInstructionDto {
    pub tax_withholding_status: Option<WithholdingStatusDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Form1099InstructionDto {
    #[serde(deserialize_with = "null_as_empty")]
    pub distribution_codes: Vec<CodeValueDto>,
    pub total_distribution_indicator: Option<bool>,
    pub individual_retirement_account_indicator: Option<bool>,
    pub simplified_employee_pension_account_indicator: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxAllowanceDto {
    pub allowance_code: Option<CodeValueDto>,
    pub allowance_quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsLocalTaxInstructionDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    pub tax_withholding_status: Option<WithholdingStatusDto>,
    pub local_income_tax_instruction: Option<LocalIncomeTaxInstructionDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalIncomeTaxInstructionDto {
    pub tax_withholding_status: Option<WithholdingStatusDto>,
    pub locality_code: Option<CodeValueDto>,
    pub tax_filing_status_code: Option<CodeValueDto>,
    pub tax_withholding_allowance_quantity: Option<f64>,
    pub additional_tax_amount: Option<AmountDto>,
    pub residency_status_code: Option<CodeValueDto>,
}

/// `GET payroll/v1/workers/{aoid}/us-tax-profiles/{id}/state`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsStateTaxProfilesResponseDto {
    #[serde(deserialize_with = "skip_null_entries")]
    pub state_tax_withholdings: Vec<StateTaxWithholdingWrapperDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StateTaxWithholdingWrapperDto {
    pub state_tax_withholding: Option<StateTaxWithholdingDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StateTaxWithholdingDto {
    #[serde(rename = "itemID", alias = "itemId")]
    pub item_id: Option<String>,
    pub state_income_tax_instruction: Option<StateIncomeTaxInstructionDto>,
    pub state_disability_insurance_tax_instruction: Option<TaxInstructionDto>,
    pub state_unemployment_insurance_tax_instruction: Option<TaxInstructionDto>,
    pub residency_status_code: Option<CodeValueDto>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StateIncomeTaxInstructionDto {
    pub tax_withholding_status: Option<WithholdingStatusDto>,
    pub state_code: Option<CodeValueDto>,
    pub tax_filing_status_code: Option<CodeValueDto>,
    pub tax_withholding_allowance_quantity: Option<f64>,
    pub dependents_quantity: Option<f64>,
    pub exemptions_quantity: Option<f64>,
    pub personal_exemptions_quantity: Option<f64>,
    pub dependent_exemptions_quantity: Option<f64>,
    pub additional_tax_amount: Option<AmountDto>,
    pub additional_tax_percentage: Option<f64>,
    pub override_tax_amount: Option<AmountDto>,
    pub override_tax_percentage: Option<f64>,
    pub estimated_deduction_amount: Option<AmountDto>,
    #[serde(deserialize_with = "null_as_empty")]
    pub tax_allowances: Vec<TaxAllowanceDto>,
    pub reciprocity_location_code: Option<CodeValueDto>,
    pub state_tax_liability_code: Option<CodeValueDto>,
    pub head_of_household_indicator: Option<bool>,
    pub blind_indicator: Option<bool>,
    pub age_indicator: Option<bool>,
    pub spouse_employment_indicator: Option<bool>,
}
