//! Worker mapper

use hrsync_domain::wire::{
    AddressDto, BaseRemunerationDto, CommunicationDto, LegalNameDto, PersonDto, PhoneNumberDto,
    WorkAssignmentDto, WorkerDto,
};
use hrsync_domain::{
    Address, BaseRemuneration, Communication, Email, PersonName, PhoneNumber, WorkAssignment,
    WorkerPerson, WorkerRecord,
};

use super::dates::date_or_unset;
use super::values::{amount, code_value, key_or_generate};

/// Map one entry of the workers list.
///
/// Callers that need the associate OID as a join key should check
/// [`WorkerDto::usable_oid`] first; a blank OID is replaced here.
pub fn map_worker(dto: WorkerDto) -> WorkerRecord {
    let worker_id = dto.worker_id.unwrap_or_default();
    WorkerRecord {
        associate_oid: key_or_generate(dto.associate_oid),
        worker_id: worker_id.id_value.unwrap_or_default(),
        worker_id_scheme: code_value(worker_id.scheme_code),
        person: person(dto.person),
        business_communication: communication(dto.business_communication),
        work_assignments: dto.work_assignments.into_iter().map(work_assignment).collect(),
    }
}

fn person(dto: Option<PersonDto>) -> WorkerPerson {
    let dto = dto.unwrap_or_default();
    WorkerPerson {
        legal_name: name(dto.legal_name),
        preferred_name: name(dto.preferred_name),
        birth_date: date_or_unset(dto.birth_date.as_deref()),
        gender_code: code_value(dto.gender_code),
        marital_status_code: code_value(dto.marital_status_code),
        ethnicity_code: code_value(dto.ethnicity_code),
        race_code: code_value(dto.race_code),
        legal_address: address(dto.legal_address),
        communication: communication(dto.communication),
    }
}

fn name(dto: Option<LegalNameDto>) -> PersonName {
    let dto = dto.unwrap_or_default();
    PersonName {
        given_name: dto.given_name.unwrap_or_default(),
        middle_name: dto.middle_name.unwrap_or_default(),
        family_name_1: dto.family_name_1.unwrap_or_default(),
        family_name_2: dto.family_name_2.unwrap_or_default(),
        formatted_name: dto.formatted_name.unwrap_or_default(),
    }
}

fn address(dto: Option<AddressDto>) -> Address {
    let dto = dto.unwrap_or_default();
    Address {
        line_one: dto.line_one.unwrap_or_default(),
        line_two: dto.line_two.unwrap_or_default(),
        line_three: dto.line_three.unwrap_or_default(),
        city_name: dto.city_name.unwrap_or_default(),
        country_subdivision_level_1: code_value(dto.country_subdivision_level1),
        country_code: dto.country_code.unwrap_or_default(),
        postal_code: dto.postal_code.unwrap_or_default(),
    }
}

fn communication(dto: Option<CommunicationDto>) -> Communication {
    let dto = dto.unwrap_or_default();
    Communication {
        landlines: dto.landlines.into_iter().map(phone).collect(),
        mobiles: dto.mobiles.into_iter().map(phone).collect(),
        emails: dto
            .emails
            .into_iter()
            .map(|email| Email {
                name_code: code_value(email.name_code),
                email_uri: email.email_uri.unwrap_or_default(),
            })
            .collect(),
    }
}

fn phone(dto: PhoneNumberDto) -> PhoneNumber {
    PhoneNumber {
        name_code: code_value(dto.name_code),
        country_dialing: dto.country_dialing.unwrap_or_default(),
        area_dialing: dto.area_dialing.unwrap_or_default(),
        dial_number: dto.dial_number.unwrap_or_default(),
        formatted_number: dto.formatted_number.unwrap_or_default(),
    }
}

fn work_assignment(dto: WorkAssignmentDto) -> WorkAssignment {
    let status = dto.assignment_status.unwrap_or_default();
    let hours = dto.standard_hours.unwrap_or_default();
    let location = dto.home_work_location.unwrap_or_default();

    WorkAssignment {
        item_id: key_or_generate(dto.item_id),
        primary_indicator: dto.primary_indicator.unwrap_or_default(),
        hire_date: date_or_unset(dto.hire_date.as_deref()),
        seniority_date: date_or_unset(dto.seniority_date.as_deref()),
        termination_date: date_or_unset(dto.termination_date.as_deref()),
        worker_type_code: code_value(dto.worker_type_code),
        assignment_status_code: code_value(status.status_code),
        assignment_status_reason: code_value(status.reason_code),
        assignment_status_date: date_or_unset(status.effective_date.as_deref()),
        job_title: dto.job_title.unwrap_or_default(),
        job_code: code_value(dto.job_code),
        base_remuneration: remuneration(dto.base_remuneration),
        standard_hours: hours.hours_quantity.unwrap_or_default(),
        standard_hours_unit: code_value(hours.unit_code),
        full_time_equivalence_ratio: dto.full_time_equivalence_ratio.unwrap_or_default(),
        home_work_location: code_value(location.name_code),
        home_work_address: address(location.address),
        reports_to: dto
            .reports_to
            .into_iter()
            .filter_map(|manager| manager.associate_oid)
            .map(|oid| oid.trim().to_string())
            .filter(|oid| !oid.is_empty())
            .collect(),
        management_position_indicator: dto.management_position_indicator.unwrap_or_default(),
        pay_cycle_code: code_value(dto.pay_cycle_code),
    }
}

fn remuneration(dto: Option<BaseRemunerationDto>) -> BaseRemuneration {
    let dto = dto.unwrap_or_default();
    BaseRemuneration {
        effective_date: date_or_unset(dto.effective_date.as_deref()),
        pay_period_rate_amount: amount(dto.pay_period_rate_amount),
        annual_rate_amount: amount(dto.annual_rate_amount),
        hourly_rate_amount: amount(dto.hourly_rate_amount),
    }
}

#[cfg(test)]
mod tests {
    use hrsync_domain::UNSET_DATE;

    use super::*;

    fn worker_json() -> &'static str {
        r#"{
            "associateOID": "G3ABC",
            "workerID": { "idValue": "000123", "schemeCode": { "codeValue": "EMP" } },
            "person": {
                "legalName": { "givenName": "Ada", "familyName1": "Lovelace" },
                "birthDate": "1990-12-10",
                "legalAddress": {
                    "cityName": "Springfield",
                    "countrySubdivisionLevel1": { "codeValue": "IL" }
                },
                "communication": { "emails": [ { "emailUri": "ada@example.com" } ] }
            },
            "workAssignments": [
                {
                    "itemID": "WA-1",
                    "primaryIndicator": true,
                    "hireDate": "2019-04-01T00:00:00Z",
                    "assignmentStatus": { "statusCode": { "codeValue": "A" } },
                    "standardHours": { "hoursQuantity": 40, "unitCode": { "codeValue": "W" } },
                    "homeWorkLocation": { "nameCode": { "codeValue": "HQ" } },
                    "reportsTo": [ { "associateOID": "G3MGR" }, { "associateOID": " " }, {} ]
                }
            ]
        }"#
    }

    #[test]
    fn maps_populated_worker() {
        let dto: WorkerDto = serde_json::from_str(worker_json()).unwrap();
        let record = map_worker(dto);

        assert_eq!(record.associate_oid, "G3ABC");
        assert_eq!(record.worker_id, "000123");
        assert_eq!(record.worker_id_scheme.code_value, "EMP");
        assert_eq!(record.person.legal_name.family_name_1, "Lovelace");
        assert_eq!(record.person.birth_date.to_string(), "1990-12-10");
        assert_eq!(record.person.legal_address.country_subdivision_level_1.code_value, "IL");
        assert_eq!(record.person.communication.emails[0].email_uri, "ada@example.com");

        let assignment = &record.work_assignments[0];
        assert_eq!(assignment.item_id, "WA-1");
        assert!(assignment.primary_indicator);
        assert_eq!(assignment.hire_date.to_string(), "2019-04-01");
        assert_eq!(assignment.termination_date, UNSET_DATE);
        assert_eq!(assignment.assignment_status_code.code_value, "A");
        assert!((assignment.standard_hours - 40.0).abs() < f64::EPSILON);
        assert_eq!(assignment.home_work_location.code_value, "HQ");
        assert_eq!(assignment.reports_to, vec!["G3MGR".to_string()]);
    }

    #[test]
    fn empty_worker_is_fully_populated() {
        let record = map_worker(WorkerDto::default());

        assert!(!record.associate_oid.is_empty());
        let expected = WorkerRecord {
            associate_oid: record.associate_oid.clone(),
            ..WorkerRecord::default()
        };
        assert_eq!(record, expected);
        assert_eq!(record.person.birth_date, UNSET_DATE);
    }

    #[test]
    fn assignment_without_fields_gets_generated_key() {
        let dto = WorkerDto {
            associate_oid: Some("G3ABC".into()),
            work_assignments: vec![WorkAssignmentDto::default()],
            ..WorkerDto::default()
        };
        let record = map_worker(dto);

        let assignment = &record.work_assignments[0];
        assert!(!assignment.item_id.is_empty());
        assert_eq!(assignment.base_remuneration, BaseRemuneration::default());
        assert_eq!(assignment.home_work_address, Address::default());
    }
}
