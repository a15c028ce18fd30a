//! Tax profile mappers

use hrsync_domain::wire::{
    FederalIncomeTaxInstructionDto, Form1099InstructionDto, StateIncomeTaxInstructionDto,
    StateTaxWithholdingDto, UsFederalTaxInstructionDto, UsLocalTaxInstructionDto, UsTaxProfileDto,
};
use hrsync_domain::{
    FederalIncomeTaxInstruction, FederalTaxProfileRecord, Form1099Instruction,
    LocalTaxProfileRecord, StateIncomeTaxInstruction, StateTaxProfileRecord,
    UsFederalTaxInstruction,
};

use super::values::{
    allowances, amount, code_value, instruction, key_or_generate, withholding_status,
};

/// Map one worker's US tax profile.
pub fn map_federal_profile(associate_oid: &str, dto: UsTaxProfileDto) -> FederalTaxProfileRecord {
    FederalTaxProfileRecord {
        profile_id: key_or_generate(dto.item_id),
        associate_oid: associate_oid.to_string(),
        payroll_file_number: dto.payroll_file_number.unwrap_or_default(),
        payroll_group_code: code_value(dto.payroll_group_code),
        federal_tax_instruction: federal_instruction(dto.us_federal_tax_instruction),
    }
}

fn federal_instruction(dto: Option<UsFederalTaxInstructionDto>) -> UsFederalTaxInstruction {
    let dto = dto.unwrap_or_default();
    UsFederalTaxInstruction {
        federal_income_tax_instruction: federal_income(dto.federal_income_tax_instruction),
        social_security_tax_instruction: instruction(dto.social_security_tax_instruction),
        medicare_tax_instruction: instruction(dto.medicare_tax_instruction),
        federal_unemployment_tax_instruction: instruction(
            dto.federal_unemployment_tax_instruction,
        ),
        form_1099_instruction: form_1099(dto.form_1099_instruction),
        interim_w2_issued_indicator: dto.interim_w2_issued_indicator.unwrap_or_default(),
        statutory_worker_indicator: dto.statutory_worker_indicator.unwrap_or_default(),
        qualified_pension_plan_coverage_indicator: dto
            .qualified_pension_plan_coverage_indicator
            .unwrap_or_default(),
        multiple_job_indicator: dto.multiple_job_indicator.unwrap_or_default(),
    }
}

fn federal_income(dto: Option<FederalIncomeTaxInstructionDto>) -> FederalIncomeTaxInstruction {
    let dto = dto.unwrap_or_default();
    FederalIncomeTaxInstruction {
        tax_withholding_status: withholding_status(dto.tax_withholding_status),
        tax_filing_status_code: code_value(dto.tax_filing_status_code),
        tax_withholding_allowance_quantity: dto
            .tax_withholding_allowance_quantity
            .unwrap_or_default(),
        additional_tax_percentage: dto.additional_tax_percentage.unwrap_or_default(),
        additional_tax_amount: amount(dto.additional_tax_amount),
        override_tax_percentage: dto.override_tax_percentage.unwrap_or_default(),
        override_tax_amount: amount(dto.override_tax_amount),
        tax_allowances: allowances(dto.tax_allowances),
        additional_income_amount: amount(dto.additional_income_amount),
    }
}

fn form_1099(dto: Option<Form1099InstructionDto>) -> Form1099Instruction {
    let dto = dto.unwrap_or_default();
    Form1099Instruction {
        distribution_codes: dto
            .distribution_codes
            .into_iter()
            .map(|code| code_value(Some(code)))
            .collect(),
        total_distribution_indicator: dto.total_distribution_indicator.unwrap_or_default(),
        individual_retirement_account_indicator: dto
            .individual_retirement_account_indicator
            .unwrap_or_default(),
        simplified_employee_pension_account_indicator: dto
            .simplified_employee_pension_account_indicator
            .unwrap_or_default(),
    }
}

/// Map one state withholding entry found under `federal_profile_id`.
pub fn map_state_profile(
    associate_oid: &str,
    federal_profile_id: &str,
    dto: StateTaxWithholdingDto,
) -> StateTaxProfileRecord {
    StateTaxProfileRecord {
        profile_id: key_or_generate(dto.item_id),
        associate_oid: associate_oid.to_string(),
        federal_tax_profile_id: federal_profile_id.to_string(),
        state_income_tax_instruction: state_income(dto.state_income_tax_instruction),
        state_disability_insurance_tax_instruction: instruction(
            dto.state_disability_insurance_tax_instruction,
        ),
        state_unemployment_insurance_tax_instruction: instruction(
            dto.state_unemployment_insurance_tax_instruction,
        ),
        residency_status_code: code_value(dto.residency_status_code),
    }
}

fn state_income(dto: Option<StateIncomeTaxInstructionDto>) -> StateIncomeTaxInstruction {
    let dto = dto.unwrap_or_default();
    StateIncomeTaxInstruction {
        tax_withholding_status: withholding_status(dto.tax_withholding_status),
        state_code: code_value(dto.state_code),
        tax_filing_status_code: code_value(dto.tax_filing_status_code),
        tax_withholding_allowance_quantity: dto
            .tax_withholding_allowance_quantity
            .unwrap_or_default(),
        dependents_quantity: dto.dependents_quantity.unwrap_or_default(),
        exemptions_quantity: dto.exemptions_quantity.unwrap_or_default(),
        personal_exemptions_quantity: dto.personal_exemptions_quantity.unwrap_or_default(),
        dependent_exemptions_quantity: dto.dependent_exemptions_quantity.unwrap_or_default(),
        additional_tax_amount: amount(dto.additional_tax_amount),
        additional_tax_percentage: dto.additional_tax_percentage.unwrap_or_default(),
        override_tax_amount: amount(dto.override_tax_amount),
        override_tax_percentage: dto.override_tax_percentage.unwrap_or_default(),
        estimated_deduction_amount: amount(dto.estimated_deduction_amount),
        tax_allowances: allowances(dto.tax_allowances),
        reciprocity_location_code: code_value(dto.reciprocity_location_code),
        state_tax_liability_code: code_value(dto.state_tax_liability_code),
        head_of_household_indicator: dto.head_of_household_indicator.unwrap_or_default(),
        blind_indicator: dto.blind_indicator.unwrap_or_default(),
        age_indicator: dto.age_indicator.unwrap_or_default(),
        spouse_employment_indicator: dto.spouse_employment_indicator.unwrap_or_default(),
    }
}

/// Map one local instruction carried inside a worker's US tax profile.
///
/// The status nested in the income instruction wins over the outer one.
pub fn map_local_profile(
    associate_oid: &str,
    federal_profile_id: &str,
    dto: UsLocalTaxInstructionDto,
) -> LocalTaxProfileRecord {
    let income = dto.local_income_tax_instruction.unwrap_or_default();
    LocalTaxProfileRecord {
        profile_id: key_or_generate(dto.item_id),
        associate_oid: associate_oid.to_string(),
        federal_tax_profile_id: federal_profile_id.to_string(),
        tax_withholding_status: withholding_status(
            income.tax_withholding_status.or(dto.tax_withholding_status),
        ),
        locality_code: code_value(income.locality_code),
        tax_filing_status_code: code_value(income.tax_filing_status_code),
        tax_withholding_allowance_quantity: income
            .tax_withholding_allowance_quantity
            .unwrap_or_default(),
        additional_tax_amount: amount(income.additional_tax_amount),
        residency_status_code: code_value(income.residency_status_code),
    }
}

#[cfg(test)]
mod tests {
    use hrsync_domain::wire::{
        AmountDto, CodeValueDto, LocalIncomeTaxInstructionDto, TaxAllowanceDto,
        TaxInstructionDto, WithholdingStatusDto,
    };
    use hrsync_domain::UNSET_DATE;

    use super::*;

    fn code(value: &str) -> Option<CodeValueDto> {
        Some(CodeValueDto {
            code_value: Some(value.into()),
            short_name: Some(format!("{value} short")),
            long_name: Some(format!("{value} long")),
        })
    }

    fn status(date: &str) -> Option<WithholdingStatusDto> {
        Some(WithholdingStatusDto {
            status_code: code("A"),
            reason_code: code("NEW"),
            effective_date: Some(date.into()),
        })
    }

    fn full_state_dto() -> StateTaxWithholdingDto {
        StateTaxWithholdingDto {
            item_id: Some("STATE-1".into()),
            state_income_tax_instruction: Some(StateIncomeTaxInstructionDto {
                tax_withholding_status: status("2022-01-01"),
                state_code: code("CA"),
                tax_filing_status_code: code("S"),
                tax_withholding_allowance_quantity: Some(2.0),
                dependents_quantity: Some(1.0),
                exemptions_quantity: Some(3.0),
                personal_exemptions_quantity: Some(1.0),
                dependent_exemptions_quantity: Some(2.0),
                additional_tax_amount: Some(AmountDto {
                    name_code: code("ADD"),
                    amount_value: Some(25.5),
                    currency_code: Some("USD".into()),
                }),
                additional_tax_percentage: Some(1.5),
                override_tax_amount: None,
                override_tax_percentage: Some(0.0),
                estimated_deduction_amount: None,
                tax_allowances: vec![TaxAllowanceDto {
                    allowance_code: code("DEP"),
                    allowance_quantity: Some(1.0),
                }],
                reciprocity_location_code: code("NV"),
                state_tax_liability_code: code("L1"),
                head_of_household_indicator: Some(true),
                blind_indicator: Some(false),
                age_indicator: Some(true),
                spouse_employment_indicator: Some(false),
            }),
            state_disability_insurance_tax_instruction: Some(TaxInstructionDto {
                tax_withholding_status: status("2021-06-30"),
            }),
            state_unemployment_insurance_tax_instruction: None,
            residency_status_code: code("R"),
        }
    }

    #[test]
    fn state_profile_with_all_fields() {
        let record = map_state_profile("AOID-1", "FED-1", full_state_dto());

        assert_eq!(record.profile_id, "STATE-1");
        assert_eq!(record.associate_oid, "AOID-1");
        assert_eq!(record.federal_tax_profile_id, "FED-1");
        let income = &record.state_income_tax_instruction;
        assert_eq!(income.state_code.code_value, "CA");
        assert_eq!(income.additional_tax_amount.amount_value, 25.5);
        assert_eq!(income.additional_tax_amount.currency_code, "USD");
        assert_eq!(income.tax_allowances.len(), 1);
        assert!(income.head_of_household_indicator);
        let disability = &record.state_disability_insurance_tax_instruction;
        assert_eq!(disability.tax_withholding_status.effective_date.to_string(), "2021-06-30");
        assert_eq!(record.residency_status_code.long_name, "R long");
    }

    #[test]
    fn state_profile_with_no_fields_is_complete() {
        let record = map_state_profile("AOID-1", "FED-1", StateTaxWithholdingDto::default());

        assert!(!record.profile_id.is_empty());
        let expected = StateTaxProfileRecord {
            profile_id: record.profile_id.clone(),
            associate_oid: "AOID-1".into(),
            federal_tax_profile_id: "FED-1".into(),
            ..StateTaxProfileRecord::default()
        };
        assert_eq!(record, expected);
        assert_eq!(
            record.state_income_tax_instruction.tax_withholding_status.effective_date,
            UNSET_DATE
        );
    }

    #[test]
    fn federal_profile_defaults_and_values() {
        let empty = map_federal_profile("AOID-9", UsTaxProfileDto::default());
        assert!(!empty.profile_id.is_empty());
        assert_eq!(empty.payroll_file_number, "");
        assert_eq!(empty.federal_tax_instruction, UsFederalTaxInstruction::default());

        let dto = UsTaxProfileDto {
            item_id: Some("FED-9".into()),
            payroll_file_number: Some("004411".into()),
            payroll_group_code: code("GRP"),
            us_federal_tax_instruction: Some(UsFederalTaxInstructionDto {
                federal_income_tax_instruction: Some(FederalIncomeTaxInstructionDto {
                    tax_withholding_status: status("bad-date"),
                    tax_filing_status_code: code("M"),
                    ..FederalIncomeTaxInstructionDto::default()
                }),
                multiple_job_indicator: Some(true),
                ..UsFederalTaxInstructionDto::default()
            }),
            us_local_tax_instructions: Vec::new(),
        };
        let record = map_federal_profile("AOID-9", dto);

        assert_eq!(record.profile_id, "FED-9");
        assert_eq!(record.payroll_group_code.code_value, "GRP");
        let income = &record.federal_tax_instruction.federal_income_tax_instruction;
        assert_eq!(income.tax_filing_status_code.code_value, "M");
        assert_eq!(income.tax_withholding_status.effective_date, UNSET_DATE);
        assert!(record.federal_tax_instruction.multiple_job_indicator);
    }

    #[test]
    fn local_profile_prefers_inner_status() {
        let dto = UsLocalTaxInstructionDto {
            item_id: Some("LOC-1".into()),
            tax_withholding_status: status("2020-01-01"),
            local_income_tax_instruction: Some(LocalIncomeTaxInstructionDto {
                tax_withholding_status: status("2021-01-01"),
                locality_code: code("PHL"),
                ..LocalIncomeTaxInstructionDto::default()
            }),
        };
        let record = map_local_profile("AOID-2", "FED-2", dto);

        assert_eq!(record.profile_id, "LOC-1");
        assert_eq!(record.locality_code.code_value, "PHL");
        assert_eq!(record.tax_withholding_status.effective_date.to_string(), "2021-01-01");

        let outer_only = UsLocalTaxInstructionDto {
            tax_withholding_status: status("2020-01-01"),
            ..UsLocalTaxInstructionDto::default()
        };
        let record = map_local_profile("AOID-2", "FED-2", outer_only);
        assert_eq!(record.tax_withholding_status.effective_date.to_string(), "2020-01-01");
    }
}
