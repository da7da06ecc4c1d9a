use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Calendar date of a shipment timestamp, as written (no zone conversion).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS.iter() {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    // Anything else that at least leads with an ISO date.
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Three-letter month of a shipment date.
pub fn month_abbrev(value: &str) -> Option<&'static str> {
    let date = parse_date(value)?;
    MONTHS.get(date.month0() as usize).copied()
}

/// Position of a month label in calendar order; unknown labels sort last.
pub fn month_rank(label: &str) -> usize {
    MONTHS
        .iter()
        .position(|m| *m == label)
        .unwrap_or(MONTHS.len())
}

/// Rounds .5 towards positive infinity, matching the browser's `Math.round`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_currency(value: f64) -> String {
    let rounded = round_half_up(value.abs()) as u64;
    let sign = if value < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}${}", sign, format_thousands(rounded))
}

pub fn format_percent_change(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{}%", sign, round_half_up(value))
}
