//! Calendar arithmetic shared by the date and recurrence extractors.
//!
//! Every helper takes the reference instant (or its date) as a parameter so a
//! whole parse pass observes a single "now".

use crate::types::MonthlyWeek;
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Days until the next occurrence of `weekday` (0 = Sunday .. 6 = Saturday),
/// counting from `from`. Today never counts; when `from` already falls on the
/// target weekday the result is a full week out.
pub(crate) fn days_until_weekday(from: NaiveDate, weekday: u8) -> i64 {
    let current = from.weekday().num_days_from_sunday() as i64;
    let days = (weekday as i64 - current + 7) % 7;
    if days == 0 { 7 } else { days }
}

pub(crate) fn next_weekday(from: NaiveDate, weekday: u8) -> NaiveDate {
    from + Duration::days(days_until_weekday(from, weekday))
}

/// Nearest upcoming date whose weekday is in `days`, today excluded.
pub(crate) fn next_weekday_of(from: NaiveDate, days: &[u8]) -> Option<NaiveDate> {
    days.iter()
        .map(|&d| days_until_weekday(from, d))
        .min()
        .map(|offset| from + Duration::days(offset))
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // The day before the first of the next month.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// The requested ordinal weekday within one calendar month. `Last` starts
/// from the month's final day and walks backward to the target weekday.
pub(crate) fn weekday_in_month(
    year: i32,
    month: u32,
    week: MonthlyWeek,
    weekday: u8,
) -> Option<NaiveDate> {
    match week {
        MonthlyWeek::Last => {
            let mut day = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
            while day.weekday().num_days_from_sunday() != weekday as u32 {
                day = day.pred_opt()?;
            }
            Some(day)
        }
        _ => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let first_weekday = first.weekday().num_days_from_sunday() as i64;
            let shift = (weekday as i64 - first_weekday + 7) % 7;
            let day = shift + 1 + (week.ordinal() as i64 - 1) * 7;
            NaiveDate::from_ymd_opt(year, month, day as u32)
        }
    }
}

/// Next occurrence of the ordinal weekday on or after `from`. The month shape
/// is re-evaluated on each advance since fourth and last occurrences shift.
pub(crate) fn next_weekday_in_month(
    from: NaiveDate,
    week: MonthlyWeek,
    weekday: u8,
) -> Option<NaiveDate> {
    let (mut year, mut month) = (from.year(), from.month());
    for _ in 0..24 {
        if let Some(date) = weekday_in_month(year, month, week, weekday) {
            if date >= from {
                return Some(date);
            }
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    None
}

/// Next month date with the given day number on or after `from`, skipping
/// months too short to contain it.
pub(crate) fn next_day_of_month(from: NaiveDate, day: u32) -> Option<NaiveDate> {
    let (mut year, mut month) = (from.year(), from.month());
    for _ in 0..24 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            if date >= from {
                return Some(date);
            }
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    None
}
