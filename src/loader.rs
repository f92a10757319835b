use crate::error::ValidationError;
use crate::types::{RawRecord, Record};
use crate::util::{parse_f64_value, parse_i64_value, parse_string_value};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub accepted_rows: usize,
    pub rejected: Vec<ValidationError>,
}

/// Validate the fetched array against the record schema.
///
/// Rows that fail validation are skipped and listed in the report; the
/// accepted records keep their input order.
pub fn load_records(rows: Vec<Value>) -> (Vec<Record>, LoadReport) {
    let mut report = LoadReport {
        total_rows: rows.len(),
        ..LoadReport::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        match validate_record(index, row) {
            Ok(r) => records.push(r),
            Err(e) => {
                log::warn!("Skipping {}", e);
                report.rejected.push(e);
            }
        }
    }

    report.accepted_rows = records.len();
    (records, report)
}

pub fn validate_record(index: usize, row: Value) -> Result<Record, ValidationError> {
    if !row.is_object() {
        return Err(ValidationError::NotAnObject { index });
    }
    let raw: RawRecord =
        serde_json::from_value(row).map_err(|_| ValidationError::NotAnObject { index })?;

    let mistyped = |field: &'static str| move |expected: &'static str| ValidationError::Mistyped {
        index,
        field,
        expected,
    };
    let missing = |field: &'static str| ValidationError::Missing { index, field };

    // Project, SDR and CallsDialedHour are required. Every other field may
    // be absent (renders as an empty cell) but must have the right type
    // when present.
    let project = parse_string_value(raw.project.as_ref())
        .map_err(mistyped("Project"))?
        .ok_or_else(|| missing("Project"))?;
    let sdr = parse_string_value(raw.sdr.as_ref())
        .map_err(mistyped("SDR"))?
        .ok_or_else(|| missing("SDR"))?;
    let calls_dialed_hour = parse_f64_value(raw.calls_dialed_hour.as_ref())
        .map_err(mistyped("CallsDialedHour"))?
        .ok_or_else(|| missing("CallsDialedHour"))?;

    Ok(Record {
        project,
        sdr,
        total_calls_dialed: parse_i64_value(raw.total_calls_dialed.as_ref())
            .map_err(mistyped("TotalCallsDialed"))?,
        calls_answered: parse_i64_value(raw.calls_answered.as_ref())
            .map_err(mistyped("CallsAnswered"))?,
        connected: parse_f64_value(raw.connected.as_ref()).map_err(mistyped("Connected"))?,
        working_days: parse_i64_value(raw.working_days.as_ref())
            .map_err(mistyped("Noofworkingdays"))?,
        working_hours: parse_i64_value(raw.working_hours.as_ref())
            .map_err(mistyped("Noofworkinghours"))?,
        calls_dialed_day: parse_f64_value(raw.calls_dialed_day.as_ref())
            .map_err(mistyped("CallsDialedDay"))?,
        calls_dialed_hour,
    })
}
