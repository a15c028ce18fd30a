//! Federal, state and local tax profile records

use serde::{Deserialize, Serialize};

use super::common::{CodeValue, TaxAllowance, TaxAmount, WithholdingStatus};
use super::SyncRecord;
use crate::constants::{
    ENTITY_FEDERAL_TAX_PROFILES, ENTITY_LOCAL_TAX_PROFILES, ENTITY_STATE_TAX_PROFILES,
};

/* -------------------------------------------------------------------------- */
/* Federal */
/* -------------------------------------------------------------------------- */

/// One worker's US tax profile (federal portion)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FederalTaxProfileRecord {
    pub profile_id: String,
    pub associate_oid: String,
    pub payroll_file_number: String,
    pub payroll_group_code: CodeValue,
    pub federal_tax_instruction: UsFederalTaxInstruction,
}

impl SyncRecord for FederalTaxProfileRecord {
    const ENTITY: &'static str = ENTITY_FEDERAL_TAX_PROFILES;

    fn primary_key(&self) -> &str {
        &self.profile_id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UsFederalTaxInstruction {
    pub federal_income_tax_instruction: FederalIncomeTaxInstruction,
    pub social_security_tax_instruction: TaxInstruction,
    pub medicare_tax_instruction: TaxInstruction,
    pub federal_unemployment_tax_instruction: TaxInstruction,
    pub form_1099_instruction: Form1099Instruction,
    pub interim_w2_issued_indicator: bool,
    pub statutory_worker_indicator: bool,
    pub qualified_pension_plan_coverage_indicator: bool,
    pub multiple_job_indicator: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FederalIncomeTaxInstruction {
    pub tax_withholding_status: WithholdingStatus,
    pub tax_filing_status_code: CodeValue,
    pub tax_withholding_allowance_quantity: f64,
    pub additional_tax_percentage: f64,
    pub additional_tax_amount: TaxAmount,
    pub override_tax_percentage: f64,
    pub override_tax_amount: TaxAmount,
    pub tax_allowances: Vec<TaxAllowance>,
    pub additional_income_amount: TaxAmount,
}

/// Instruction whose only content is a withholding status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxInstruction {
    pub tax_withholding_status: WithholdingStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Form1099Instruction {
    pub distribution_codes: Vec<CodeValue>,
    pub total_distribution_indicator: bool,
    pub individual_retirement_account_indicator: bool,
    pub simplified_employee_pension_account_indicator: bool,
}

/* -------------------------------------------------------------------------- */
/* State */
/* -------------------------------------------------------------------------- */

/// State withholding detail, keyed under a worker's federal profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StateTaxProfileRecord {
    pub profile_id: String,
    pub associate_oid: String,
    pub federal_tax_profile_id: String,
    pub state_income_tax_instruction: StateIncomeTaxInstruction,
    pub state_disability_insurance_tax_instruction: TaxInstruction,
    pub state_unemployment_insurance_tax_instruction: TaxInstruction,
    pub residency_status_code: CodeValue,
}

impl SyncRecord for StateTaxProfileRecord {
    const ENTITY: &'static str = ENTITY_STATE_TAX_PROFILES;

    fn primary_key(&self) -> &str {
        &self.profile_id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StateIncomeTaxInstruction {
    pub tax_withholding_status: WithholdingStatus,
    pub state_code: CodeValue,
    pub tax_filing_status_code: CodeValue,
    pub tax_withholding_allowance_quantity: f64,
    pub dependents_quantity: f64,
    pub exemptions_quantity: f64,
    pub personal_exemptions_quantity: f64,
    pub dependent_exemptions_quantity: f64,
    pub additional_tax_amount: TaxAmount,
    pub additional_tax_percentage: f64,
    pub override_tax_amount: TaxAmount,
    pub override_tax_percentage: f64,
    pub estimated_deduction_amount: TaxAmount,
    pub tax_allowances: Vec<TaxAllowance>,
    pub reciprocity_location_code: CodeValue,
    pub state_tax_liability_code: CodeValue,
    pub head_of_household_indicator: bool,
    pub blind_indicator: bool,
    pub age_indicator: bool,
    pub spouse_employment_indicator: bool,
}

/* -------------------------------------------------------------------------- */
/* Local */
/* -------------------------------------------------------------------------- */

/// Local (city/county/school district) withholding instruction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocalTaxProfileRecord {
    pub profile_id: String,
    pub associate_oid: String,
    pub federal_tax_profile_id: String,
    pub tax_withholding_status: WithholdingStatus,
    pub locality_code: CodeValue,
    pub tax_filing_status_code: CodeValue,
    pub tax_withholding_allowance_quantity: f64,
    pub additional_tax_amount: TaxAmount,
    pub residency_status_code: CodeValue,
}

impl SyncRecord for LocalTaxProfileRecord {
    const ENTITY: &'static str = ENTITY_LOCAL_TAX_PROFILES;

    fn primary_key(&self) -> &str {
        &self.profile_id
    }
}
