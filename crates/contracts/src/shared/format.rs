//! Display helpers for Chilean pesos and backend timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const INVALID_DATE: &str = "Fecha inválida";

/// Integer with `.` as thousands separator: `1234567` → `1.234.567`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

/// CLP amount without decimals: `-1234.6` → `-$1.235`.
pub fn format_clp(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", format_thousands(-rounded))
    } else {
        format!("${}", format_thousands(rounded))
    }
}

/// Percentage with two decimals: `12.346` → `12.35%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Parses the timestamp shapes the backend produces (RFC 3339, SQL datetime, plain date).
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    parse_datetime(input).map(|dt| dt.date())
}

/// `DD/MM/YYYY HH:MM`, or [`INVALID_DATE`].
pub fn format_datetime_es(input: &str) -> String {
    match parse_datetime(input) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// `DD/MM/YYYY`; unparsable input is returned unchanged.
pub fn format_date_es(input: &str) -> String {
    match parse_datetime(input) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => input.to_string(),
    }
}

/// Dispatch schedule cell: `YYYY-MM-DD HH:MM`, `N/A` when absent.
pub fn format_schedule(input: Option<&str>) -> String {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => "N/A".to_string(),
        Some(raw) => match parse_datetime(raw) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => INVALID_DATE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(-45000), "-45.000");
    }

    #[test]
    fn clp() {
        assert_eq!(format_clp(15990.0), "$15.990");
        assert_eq!(format_clp(0.4), "$0");
        assert_eq!(format_clp(-1234.6), "-$1.235");
    }

    #[test]
    fn datetimes() {
        assert_eq!(format_datetime_es("2024-03-05T14:07:00Z"), "05/03/2024 14:07");
        assert_eq!(format_datetime_es("2024-03-05 09:30:00"), "05/03/2024 09:30");
        assert_eq!(format_datetime_es("ayer"), INVALID_DATE);
        assert_eq!(format_date_es("2024-12-31"), "31/12/2024");
        assert_eq!(format_date_es("sin fecha"), "sin fecha");
    }

    #[test]
    fn schedule() {
        assert_eq!(format_schedule(None), "N/A");
        assert_eq!(format_schedule(Some("")), "N/A");
        assert_eq!(
            format_schedule(Some("2025-01-10T18:00:00.000-03:00")),
            "2025-01-10 18:00"
        );
        assert_eq!(format_schedule(Some("??")), INVALID_DATE);
    }

    #[test]
    fn percentage() {
        assert_eq!(format_percentage(12.346), "12.35%");
        assert_eq!(format_percentage(-50.0), "-50.00%");
    }
}
