//! Summary transformer: raw gateway records to flat export records
//!
//! A single linear pass: unit-normalize the six metrics, resolve and format
//! the date, keep provider order. The only branch is the missing-date
//! fallback, which substitutes the Unix epoch date and surfaces a warning
//! instead of dropping the record.

use chrono::NaiveDate;

use crate::error::{Result, RingsError};
use crate::models::{ActivitySummaryRecord, RawDailySummary};

/// Date substituted for records whose components cannot be resolved
fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date is valid")
}

/// Transform raw summaries into flat export records, in input order.
///
/// Returns one record per input plus a warning string for each record whose
/// date had to fall back to the epoch. Warnings are non-fatal; the record is
/// still emitted.
pub fn transform(records: &[RawDailySummary]) -> (Vec<ActivitySummaryRecord>, Vec<String>) {
    let mut out = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        let date = match raw.date_components.as_ref().and_then(|c| c.resolve()) {
            Some(date) => date,
            None => {
                warnings.push(format!(
                    "record {} has no resolvable date; substituting {}",
                    index,
                    epoch_date()
                ));
                epoch_date()
            }
        };

        out.push(ActivitySummaryRecord {
            move_value: raw.active_energy_burned.in_kilocalories(),
            move_goal: raw.active_energy_burned_goal.in_kilocalories(),
            exercise: raw.exercise_time.in_minutes(),
            exercise_goal: raw.exercise_time_goal.in_minutes(),
            stand: raw.stand_hours.in_count(),
            stand_goal: raw.stand_hours_goal.in_count(),
            date: date.format("%Y-%m-%d").to_string(),
        });
    }

    (out, warnings)
}

/// Serialize the ordered record sequence to a single JSON array string.
/// Zero records serialize to `[]`.
pub fn serialize_records(records: &[ActivitySummaryRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(|e| RingsError::SerializationFailed(e.to_string()))
}
