use chrono::NaiveDate;

use crate::error::FieldError;
use crate::models::DateRange;

/// Days in a planning month.
pub const DAYS_PER_MONTH: i64 = 30;

/// Check the timeline inputs. An empty result means the range is usable.
pub fn validate(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if start.is_none() {
        errors.push(FieldError::new("start_date", "Start date is required"));
    }
    match (start, end) {
        (_, None) => errors.push(FieldError::new("end_date", "End date is required")),
        (Some(s), Some(e)) if e < s => {
            errors.push(FieldError::new("end_date", "End date must be after start date"))
        }
        _ => {}
    }
    errors
}

/// Whole days between start and end.
pub fn duration_days(range: &DateRange) -> i64 {
    (range.end - range.start).num_days().abs()
}

/// Campaign length in planning months, at least one.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use planner_core::models::DateRange;
/// use planner_core::timeline::duration_months;
///
/// let range = DateRange {
///     start: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
/// };
/// assert_eq!(duration_months(Some(&range)), 3);
/// assert_eq!(duration_months(None), 1);
/// ```
pub fn duration_months(range: Option<&DateRange>) -> u32 {
    match range {
        Some(r) => {
            let months = (duration_days(r) as f64 / DAYS_PER_MONTH as f64).round() as u32;
            months.max(1)
        }
        None => 1,
    }
}

/// `"3 months, 1 days"`.
pub fn duration_label(days: i64) -> String {
    format!(
        "{} months, {} days",
        days / DAYS_PER_MONTH,
        days % DAYS_PER_MONTH
    )
}
