//! Time card and labor charge code mappers

use hrsync_domain::wire::{LaborChargeCodeDto, TimeCardDto, TimeEntryDto};
use hrsync_domain::{LaborChargeCodeRecord, TimeCardRecord, TimeEntryLine};

use super::dates::date_or_unset;
use super::values::{code_value, key_or_generate};

pub fn map_time_card(dto: TimeCardDto) -> TimeCardRecord {
    let period = dto.time_period.unwrap_or_default();
    let entries: Vec<TimeEntryLine> = dto.time_entries.into_iter().map(time_entry).collect();
    let total_hours = entries.iter().map(|entry| entry.hours_quantity).sum();

    TimeCardRecord {
        time_card_id: key_or_generate(dto.item_id),
        associate_oid: dto.associate_oid.map(|oid| oid.trim().to_string()).unwrap_or_default(),
        period_start: date_or_unset(period.start_date.as_deref()),
        period_end: date_or_unset(period.end_date.as_deref()),
        processing_status_code: code_value(dto.processing_status_code),
        total_hours,
        entries,
    }
}

fn time_entry(dto: TimeEntryDto) -> TimeEntryLine {
    TimeEntryLine {
        entry_id: key_or_generate(dto.item_id),
        entry_date: date_or_unset(dto.entry_date.as_deref()),
        hours_quantity: dto.hours_quantity.unwrap_or_default(),
        pay_code: code_value(dto.pay_code),
        labor_charge_code: code_value(dto.labor_charge_code),
    }
}

pub fn map_labor_charge_code(dto: LaborChargeCodeDto) -> LaborChargeCodeRecord {
    LaborChargeCodeRecord {
        labor_charge_code_id: key_or_generate(dto.item_id),
        charge_code: code_value(dto.charge_code),
        description: dto.description.unwrap_or_default(),
        active: dto.active_indicator.unwrap_or_default(),
        effective_date: date_or_unset(dto.effective_date.as_deref()),
        expiration_date: date_or_unset(dto.expiration_date.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use hrsync_domain::UNSET_DATE;

    use super::*;

    #[test]
    fn time_card_totals_entry_hours() {
        let json = r#"{
            "itemID": "TC-1",
            "associateOID": "G3ABC",
            "timePeriod": { "startDate": "2024-03-04", "endDate": "2024-03-10" },
            "processingStatusCode": { "codeValue": "APPROVED" },
            "timeEntries": [
                { "itemID": "E1", "entryDate": "2024-03-04", "hoursQuantity": 8.0,
                  "payCode": { "codeValue": "REG" } },
                { "itemID": "E2", "entryDate": "2024-03-05", "hoursQuantity": 7.5,
                  "laborChargeCode": { "codeValue": "PRJ-7" } },
                { "entryDate": "not a date" }
            ]
        }"#;
        let dto: TimeCardDto = serde_json::from_str(json).unwrap();
        let record = map_time_card(dto);

        assert_eq!(record.time_card_id, "TC-1");
        assert_eq!(record.associate_oid, "G3ABC");
        assert_eq!(record.period_start.to_string(), "2024-03-04");
        assert_eq!(record.processing_status_code.code_value, "APPROVED");
        assert_eq!(record.entries.len(), 3);
        assert!((record.total_hours - 15.5).abs() < f64::EPSILON);
        assert_eq!(record.entries[1].labor_charge_code.code_value, "PRJ-7");
        assert_eq!(record.entries[2].entry_date, UNSET_DATE);
        assert!(!record.entries[2].entry_id.is_empty());
    }

    #[test]
    fn empty_time_card_is_fully_populated() {
        let record = map_time_card(TimeCardDto::default());

        assert!(!record.time_card_id.is_empty());
        assert_eq!(record.period_start, UNSET_DATE);
        assert_eq!(record.period_end, UNSET_DATE);
        assert!(record.entries.is_empty());
        assert!(record.total_hours.abs() < f64::EPSILON);
    }

    #[test]
    fn labor_charge_code_defaults() {
        let record = map_labor_charge_code(LaborChargeCodeDto::default());
        assert!(!record.labor_charge_code_id.is_empty());
        assert!(!record.active);
        assert_eq!(record.expiration_date, UNSET_DATE);

        let record = map_labor_charge_code(LaborChargeCodeDto {
            item_id: Some("LCC-1".into()),
            description: Some("Project seven".into()),
            active_indicator: Some(true),
            effective_date: Some("2023-01-01".into()),
            ..LaborChargeCodeDto::default()
        });
        assert_eq!(record.labor_charge_code_id, "LCC-1");
        assert_eq!(record.description, "Project seven");
        assert!(record.active);
        assert_eq!(record.effective_date.to_string(), "2023-01-01");
    }
}
