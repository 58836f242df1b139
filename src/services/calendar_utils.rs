use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn parse_day(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).map_err(|err| {
        AppError::validation_with_details(
            "잘못된 날짜 형식",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| {
            AppError::validation_with_details(
                "잘못된 시간 형식",
                json!({"value": value, "error": err.to_string()}),
            )
        })
}

pub fn parse_timezone(value: &str) -> AppResult<Tz> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|_| AppError::validation(format!("알 수 없는 시간대: {value}")))
}

/// Calendar day the instant falls on in `tz`.
pub fn local_day(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn today_in(tz: Tz) -> NaiveDate {
    local_day(Utc::now(), tz)
}

pub fn days_before(day: NaiveDate, offset: u32) -> Option<NaiveDate> {
    day.checked_sub_signed(Duration::days(i64::from(offset)))
}

pub fn add_months(day: NaiveDate, months: u32) -> Option<NaiveDate> {
    day.checked_add_months(Months::new(months))
}

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    let offset = day.weekday().num_days_from_monday();
    day - Duration::days(i64::from(offset))
}

pub fn week_end(day: NaiveDate) -> NaiveDate {
    week_start(day) + Duration::days(6)
}

pub fn within(day: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    day >= start && day <= end
}
