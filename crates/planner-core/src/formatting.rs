//! Display helpers shared by the summary printer and the terminal UI.
//!
//! Money is shown the way the planning team reads it: German grouping, no
//! decimals, euro sign last.

use chrono::NaiveDate;

use crate::models::DateRange;

/// Group an integer string in blocks of three using `separator`.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Format a number rounded to a whole value with `.` thousands separators.
///
/// # Examples
///
/// ```
/// use planner_core::formatting::format_number;
///
/// assert_eq!(format_number(2_500_000.0), "2.500.000");
/// assert_eq!(format_number(999.4), "999");
/// assert_eq!(format_number(-1234.0), "-1.234");
/// ```
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let grouped = group_thousands(&(rounded.abs() as u64).to_string(), '.');
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a monetary amount in euros, German locale, no decimals.
///
/// # Examples
///
/// ```
/// use planner_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1_200_000.0), "1.200.000 €");
/// assert_eq!(format_currency(0.0), "0 €");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("{} €", format_number(amount))
}

/// Like [`format_currency`] but renders `Not specified` for a missing value.
pub fn format_optional_currency(amount: Option<f64>) -> String {
    match amount {
        Some(a) => format_currency(a),
        None => "Not specified".to_string(),
    }
}

/// A channel share as shown next to sliders: `"40%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Capitalise the first letter of each space-separated word.
///
/// # Examples
///
/// ```
/// use planner_core::formatting::title_case;
///
/// assert_eq!(title_case("digital tv"), "Digital Tv");
/// assert_eq!(title_case("food & beverage"), "Food & Beverage");
/// ```
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Title-case and comma-join a list, or `None selected` when empty.
pub fn format_list_items<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "None selected".to_string();
    }
    items
        .iter()
        .map(|i| title_case(i.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `May 1, 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `May 1, 2025 - Jul 31, 2025`, or `Not specified`.
pub fn format_date_range(range: Option<&DateRange>) -> String {
    match range {
        Some(r) => format!("{} - {}", format_date(r.start), format_date(r.end)),
        None => "Not specified".to_string(),
    }
}
