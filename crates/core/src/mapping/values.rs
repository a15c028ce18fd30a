//! Mapping helpers for value types shared by several records

use hrsync_domain::wire::{
    AmountDto, CodeValueDto, TaxAllowanceDto, TaxInstructionDto, WithholdingStatusDto,
};
use hrsync_domain::{CodeValue, TaxAllowance, TaxAmount, TaxInstruction, WithholdingStatus};
use uuid::Uuid;

use super::dates::date_or_unset;

/// Upstream id if non-blank, otherwise a newly generated UUID.
pub fn key_or_generate(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

pub fn code_value(dto: Option<CodeValueDto>) -> CodeValue {
    let dto = dto.unwrap_or_default();
    CodeValue {
        code_value: dto.code_value.unwrap_or_default(),
        short_name: dto.short_name.unwrap_or_default(),
        long_name: dto.long_name.unwrap_or_default(),
    }
}

pub fn amount(dto: Option<AmountDto>) -> TaxAmount {
    let dto = dto.unwrap_or_default();
    TaxAmount {
        name_code: code_value(dto.name_code),
        amount_value: dto.amount_value.unwrap_or_default(),
        currency_code: dto.currency_code.unwrap_or_default(),
    }
}

pub fn withholding_status(dto: Option<WithholdingStatusDto>) -> WithholdingStatus {
    let dto = dto.unwrap_or_default();
    WithholdingStatus {
        status_code: code_value(dto.status_code),
        reason_code: code_value(dto.reason_code),
        effective_date: date_or_unset(dto.effective_date.as_deref()),
    }
}

pub fn allowances(dtos: Vec<TaxAllowanceDto>) -> Vec<TaxAllowance> {
    dtos.into_iter()
        .map(|dto| TaxAllowance {
            allowance_code: code_value(dto.allowance_code),
            allowance_quantity: dto.allowance_quantity.unwrap_or_default(),
        })
        .collect()
}

pub fn instruction(dto: Option<TaxInstructionDto>) -> TaxInstruction {
    TaxInstruction {
        tax_withholding_status: withholding_status(dto.and_then(|d| d.tax_withholding_status)),
    }
}
