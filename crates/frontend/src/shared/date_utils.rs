//! Browser clock access. Date math lives in `contracts::shared::format`.

use chrono::NaiveDate;

/// Today's date in the browser's local time zone.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    local_date(now.get_full_year(), now.get_month(), now.get_date())
        .unwrap_or_else(|| chrono::Utc::now().date_naive())
}

pub fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

/// Local time as `YYYY-MM-DD HH:MM:SS`, the format the backend uses for timestamps.
pub fn now_string() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{} {:02}:{:02}:{:02}",
        today().format("%Y-%m-%d"),
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds()
    )
}

/// `YYYY-MM` of the current month, the value of a `<input type="month">`.
pub fn current_month_input() -> String {
    today().format("%Y-%m").to_string()
}

/// JS months are zero-based.
fn local_date(year: u32, js_month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year as i32, js_month + 1, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_month_is_shifted() {
        assert_eq!(
            local_date(2025, 0, 31),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(local_date(2025, 1, 30), None);
    }
}
