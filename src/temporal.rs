//! Date, relative-offset, clock-time and reminder-offset extractors.
//!
//! Extractors never touch the buffer; they return the interpreted value plus
//! the literal span they matched, and the orchestrator does the stripping.

use crate::calendar;
use crate::patterns::{self, DateRule, RelativeRule, ReminderRule, TimeRule};
use crate::types::ReminderOffset;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// A relative-offset match either pins an exact instant ("in 10 minutes") or
/// just a calendar day ("in 3 days").
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RelativeValue {
    Exact(NaiveDateTime),
    DateOnly(NaiveDate),
}

pub(crate) fn extract_date(buffer: &str, now: NaiveDateTime) -> Option<(NaiveDate, String)> {
    let today = now.date();
    for (re, rule) in patterns::DATE_TABLE.iter() {
        let Some(caps) = re.captures(buffer) else {
            continue;
        };
        if let Some(date) = interpret_date(*rule, &caps, today) {
            let matched = caps.get(0).map(|m| m.as_str().to_string())?;
            return Some((date, matched));
        }
    }
    None
}

fn interpret_date(rule: DateRule, caps: &regex::Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    match rule {
        DateRule::DayAfterTomorrow => Some(today + Duration::days(2)),
        DateRule::Today => Some(today),
        DateRule::Tomorrow => Some(today + Duration::days(1)),
        DateRule::NextWeek => Some(today + Duration::days(7)),
        DateRule::NextMonth => Some(calendar::add_months(today, 1)),
        DateRule::NextWeekday | DateRule::Weekday => {
            let weekday = patterns::parse_weekday(caps.get(1)?.as_str())?;
            Some(calendar::next_weekday(today, weekday))
        }
        DateRule::MonthDay => {
            let month = patterns::parse_month(caps.get(1)?.as_str())?;
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            resolve_month_day(today, month, day)
        }
        DateRule::DayMonth => {
            let day: u32 = caps.get(1)?.as_str().parse().ok()?;
            let month = patterns::parse_month(caps.get(2)?.as_str())?;
            resolve_month_day(today, month, day)
        }
        DateRule::Slash => {
            let month: u32 = caps.get(1)?.as_str().parse().ok()?;
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            match caps.get(3) {
                Some(year) => {
                    let mut year: i32 = year.as_str().parse().ok()?;
                    if year < 100 {
                        year += 2000;
                    }
                    NaiveDate::from_ymd_opt(year, month, day)
                }
                None => resolve_month_day(today, month, day),
            }
        }
    }
}

/// A month/day literal lands in the current year, rolling one year forward
/// when that date has already passed.
fn resolve_month_day(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

pub(crate) fn extract_relative(
    buffer: &str,
    now: NaiveDateTime,
) -> Option<(RelativeValue, String)> {
    let today = now.date();
    for (re, rule) in patterns::RELATIVE_TABLE.iter() {
        let Some(caps) = re.captures(buffer) else {
            continue;
        };
        let value = match rule {
            RelativeRule::Minutes => {
                let n: i64 = caps.get(1)?.as_str().parse().ok()?;
                Some(RelativeValue::Exact(now + Duration::minutes(n)))
            }
            RelativeRule::Hours => {
                let n: i64 = caps.get(1)?.as_str().parse().ok()?;
                Some(RelativeValue::Exact(now + Duration::hours(n)))
            }
            RelativeRule::Days => {
                let n: i64 = caps.get(1)?.as_str().parse().ok()?;
                Some(RelativeValue::DateOnly(today + Duration::days(n)))
            }
            RelativeRule::Weeks => {
                let n: i64 = caps.get(1)?.as_str().parse().ok()?;
                Some(RelativeValue::DateOnly(today + Duration::days(7 * n)))
            }
            RelativeRule::Months => {
                let n: u32 = caps.get(1)?.as_str().parse().ok()?;
                Some(RelativeValue::DateOnly(calendar::add_months(today, n)))
            }
            RelativeRule::HalfHour => Some(RelativeValue::Exact(now + Duration::minutes(30))),
            RelativeRule::OneUnit => match caps.get(1)?.as_str().to_lowercase().as_str() {
                "minute" => Some(RelativeValue::Exact(now + Duration::minutes(1))),
                "hour" => Some(RelativeValue::Exact(now + Duration::hours(1))),
                "day" => Some(RelativeValue::DateOnly(today + Duration::days(1))),
                "week" => Some(RelativeValue::DateOnly(today + Duration::days(7))),
                "month" => Some(RelativeValue::DateOnly(calendar::add_months(today, 1))),
                _ => None,
            },
        };
        if let Some(value) = value {
            let matched = caps.get(0).map(|m| m.as_str().to_string())?;
            return Some((value, matched));
        }
    }
    None
}

/// Clock time as (hour, minute). Applies to whatever date is already
/// established; it never picks a day on its own.
pub(crate) fn extract_time(text: &str) -> Option<((u32, u32), String)> {
    for (re, rule) in patterns::TIME_TABLE.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let value = match rule {
            TimeRule::ClockMinutesAmPm => {
                let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
                let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
                let is_pm = caps.get(3)?.as_str().eq_ignore_ascii_case("pm");
                if (1..=12).contains(&hour) && minute < 60 {
                    Some((resolve_24h(hour, is_pm), minute))
                } else {
                    None
                }
            }
            TimeRule::ClockAmPm => {
                let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
                let is_pm = caps.get(2)?.as_str().eq_ignore_ascii_case("pm");
                if (1..=12).contains(&hour) {
                    Some((resolve_24h(hour, is_pm), 0))
                } else {
                    None
                }
            }
            TimeRule::Clock24 => {
                let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
                let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
                if hour < 24 && minute < 60 {
                    Some((hour, minute))
                } else {
                    None
                }
            }
            TimeRule::Fixed(hour, minute) => Some((*hour, *minute)),
        };
        if let Some(value) = value {
            let matched = caps.get(0).map(|m| m.as_str().to_string())?;
            return Some((value, matched));
        }
    }
    None
}

fn resolve_24h(hour: u32, is_pm: bool) -> u32 {
    match (hour, is_pm) {
        (12, true) => 12,
        (12, false) => 0,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

pub(crate) fn extract_reminder(buffer: &str) -> Option<(ReminderOffset, String)> {
    for (re, rule) in patterns::REMINDER_TABLE.iter() {
        let Some(caps) = re.captures(buffer) else {
            continue;
        };
        let offset = match rule {
            ReminderRule::Minutes => {
                let n: u32 = caps.get(1)?.as_str().parse().ok()?;
                ReminderOffset::from_minutes(n)
            }
            ReminderRule::Hours => {
                let n: u32 = caps.get(1)?.as_str().parse().ok()?;
                if n >= 24 {
                    ReminderOffset::OneDay
                } else {
                    ReminderOffset::OneHour
                }
            }
            ReminderRule::OneHour => ReminderOffset::OneHour,
            ReminderRule::OneDay => ReminderOffset::OneDay,
            ReminderRule::Bare => ReminderOffset::Exact,
        };
        let matched = caps.get(0).map(|m| m.as_str().to_string())?;
        return Some((offset, matched));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        // Monday.
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tomorrow_and_friends() {
        let (d, m) = extract_date("call mom tomorrow", now()).unwrap();
        assert_eq!(d, date(2024, 1, 2));
        assert_eq!(m, "tomorrow");

        let (d, _) = extract_date("ship it day after tomorrow", now()).unwrap();
        assert_eq!(d, date(2024, 1, 3));

        let (d, _) = extract_date("review next week", now()).unwrap();
        assert_eq!(d, date(2024, 1, 8));
    }

    #[test]
    fn plain_weekday_excludes_today() {
        // Today is Monday, so "monday" rolls a full week out.
        let (d, _) = extract_date("standup monday", now()).unwrap();
        assert_eq!(d, date(2024, 1, 8));

        let (d, _) = extract_date("gym on friday", now()).unwrap();
        assert_eq!(d, date(2024, 1, 5));
    }

    #[test]
    fn next_weekday_skips_coming_occurrence_on_same_day() {
        let (d, m) = extract_date("sync next monday", now()).unwrap();
        assert_eq!(d, date(2024, 1, 8));
        assert_eq!(m, "next monday");
    }

    #[test]
    fn month_day_rolls_forward_when_past() {
        let (d, _) = extract_date("party dec 25", now()).unwrap();
        assert_eq!(d, date(2024, 12, 25));

        // Relative to 2024-01-01 nothing in 2024 has passed yet, so pick a
        // reference later in the year.
        let june = date(2024, 6, 1).and_hms_opt(8, 0, 0).unwrap();
        let (d, _) = extract_date("taxes 15th of april", june).unwrap();
        assert_eq!(d, date(2025, 4, 15));
    }

    #[test]
    fn slash_dates() {
        let (d, _) = extract_date("demo 3/14", now()).unwrap();
        assert_eq!(d, date(2024, 3, 14));

        let (d, _) = extract_date("launch 7/4/25", now()).unwrap();
        assert_eq!(d, date(2025, 7, 4));
    }

    #[test]
    fn invalid_calendar_dates_do_not_match() {
        assert!(extract_date("meet feb 30", now()).is_none());
        assert!(extract_date("meet 25/40", now()).is_none());
    }

    #[test]
    fn relative_minutes_pin_an_instant() {
        let (v, m) = extract_relative("tea in 10 minutes", now()).unwrap();
        assert_eq!(
            v,
            RelativeValue::Exact(date(2024, 1, 1).and_hms_opt(10, 10, 0).unwrap())
        );
        assert_eq!(m, "in 10 minutes");

        let (v, _) = extract_relative("check in 2 hours", now()).unwrap();
        assert_eq!(
            v,
            RelativeValue::Exact(date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap())
        );
    }

    #[test]
    fn relative_days_stay_date_only() {
        let (v, _) = extract_relative("follow up in 3 days", now()).unwrap();
        assert_eq!(v, RelativeValue::DateOnly(date(2024, 1, 4)));

        let (v, _) = extract_relative("renew in 2 weeks", now()).unwrap();
        assert_eq!(v, RelativeValue::DateOnly(date(2024, 1, 15)));
    }

    #[test]
    fn clock_times() {
        assert_eq!(extract_time("call at 5pm").unwrap().0, (17, 0));
        assert_eq!(extract_time("call at 5:30 pm").unwrap().0, (17, 30));
        assert_eq!(extract_time("call 17:30").unwrap().0, (17, 30));
        assert_eq!(extract_time("call at noon").unwrap().0, (12, 0));
        assert_eq!(extract_time("call at midnight").unwrap().0, (0, 0));
        assert_eq!(extract_time("call in the evening").unwrap().0, (18, 0));
        assert_eq!(extract_time("call tonight").unwrap().0, (20, 0));
    }

    #[test]
    fn twelve_oclock_edges() {
        assert_eq!(extract_time("lunch at 12pm").unwrap().0, (12, 0));
        assert_eq!(extract_time("backup at 12am").unwrap().0, (0, 0));
    }

    #[test]
    fn bare_hour_without_meridiem_is_not_a_time() {
        assert!(extract_time("meet at 5").is_none());
    }

    #[test]
    fn reminder_buckets() {
        let (off, m) = extract_reminder("remind me 15 min before").unwrap();
        assert_eq!(off, ReminderOffset::FifteenMin);
        assert_eq!(m, "remind me 15 min before");

        let (off, _) = extract_reminder("remind me 45 min early").unwrap();
        assert_eq!(off, ReminderOffset::OneHour);

        let (off, _) = extract_reminder("alert me an hour before").unwrap();
        assert_eq!(off, ReminderOffset::OneHour);

        let (off, _) = extract_reminder("remind me a day before").unwrap();
        assert_eq!(off, ReminderOffset::OneDay);

        let (off, _) = extract_reminder("just remind me").unwrap();
        assert_eq!(off, ReminderOffset::Exact);
    }
}
