//! Norwegian date, amount and yes/no formatting

use crate::{NbTextError, Result};
use chrono::NaiveDate;

/// Currency suffix appended to formatted amounts
const CURRENCY_SUFFIX: &str = "kr";

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| NbTextError::InvalidDate(raw.to_string()))
}

/// Format a date for display (e.g., "17.05.2024")
///
/// ISO dates are rewritten as `DD.MM.YYYY`; any other input is free text
/// typed by the user and is returned trimmed but otherwise unchanged.
///
/// # Examples
/// ```
/// use nb_text::format_date;
/// assert_eq!(format_date("2024-05-17"), "17.05.2024");
/// assert_eq!(format_date(" 17. mai "), "17. mai");
/// ```
pub fn format_date(raw: &str) -> String {
    match parse_iso_date(raw) {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// Format a money amount in Norwegian style (e.g., "1 500,50 kr")
///
/// Accepts digits with optional spaces, `.` or `,` thousand separators and
/// a decimal part of one or two digits after `,` or `.`. Input that is not
/// a plain number is returned trimmed and unchanged.
///
/// # Examples
/// ```
/// use nb_text::format_amount;
/// assert_eq!(format_amount("120000"), "120 000 kr");
/// assert_eq!(format_amount("1500,50"), "1 500,50 kr");
/// assert_eq!(format_amount("etter avtale"), "etter avtale");
/// ```
pub fn format_amount(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match split_amount(trimmed) {
        Some((integer, Some(decimals))) => {
            format!("{},{} {CURRENCY_SUFFIX}", group_thousands(&integer), decimals)
        }
        Some((integer, None)) => format!("{} {CURRENCY_SUFFIX}", group_thousands(&integer)),
        None => trimmed.to_string(),
    }
}

/// Split an amount into integer digits and an optional two-digit decimal part
fn split_amount(raw: &str) -> Option<(String, Option<String>)> {
    let mut compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(stripped) = compact.strip_suffix(CURRENCY_SUFFIX) {
        compact = stripped.to_string();
    }
    if let Some(stripped) = compact.strip_suffix(",-") {
        compact = stripped.to_string();
    }

    let (integer_part, decimals) = match compact.rfind([',', '.']) {
        Some(pos) => {
            let tail = &compact[pos + 1..];
            if (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit()) {
                // "1500,5" is shown as "1 500,50"
                let decimals = format!("{tail:0<2}");
                (&compact[..pos], Some(decimals))
            } else {
                (compact.as_str(), None)
            }
        }
        None => (compact.as_str(), None),
    };

    let digits: String = integer_part
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    Some((digits.to_string(), decimals))
}

/// Group a string of digits in threes separated by spaces
///
/// # Examples
/// ```
/// use nb_text::group_thousands;
/// assert_eq!(group_thousands("1234567"), "1 234 567");
/// ```
pub fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    let count = digits.chars().count();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
    }

    result
}

/// "Ja" or "Nei"
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Ja"
    } else {
        "Nei"
    }
}
