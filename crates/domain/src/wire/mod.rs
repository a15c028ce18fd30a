//! Upstream wire shapes
//!
//! These mirror the JSON returned by the payroll API. Every field is optional
//! because the upstream omits anything it has no value for; the mappers in
//! `hrsync-core` turn them into fully populated canonical records.

mod common;
mod nulls;
mod tax;
mod time;
mod workers;

pub use common::{AddressDto, AmountDto, CodeValueDto, WithholdingStatusDto};
pub use tax::{
    FederalIncomeTaxInstructionDto, Form1099InstructionDto, LocalIncomeTaxInstructionDto,
    StateIncomeTaxInstructionDto, StateTaxWithholdingDto, StateTaxWithholdingWrapperDto,
    TaxAllowanceDto, TaxInstructionDto, UsFederalTaxInstructionDto, UsLocalTaxInstructionDto,
    UsStateTaxProfilesResponseDto, UsTaxProfileDto, UsTaxProfilesResponseDto,
};
pub use time::{LaborChargeCodeDto, TimeCardDto, TimeEntryDto, TimePeriodDto};
pub use workers::{
    BaseRemunerationDto, CommunicationDto, EmailDto, LegalNameDto, PersonDto, PhoneNumberDto,
    ReportsToDto, StandardHoursDto, WorkAssignmentDto, WorkLocationDto, WorkerDto, WorkerIdDto,
    WorkerStatusDto,
};
