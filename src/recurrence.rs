//! Recurrence extractors. The advanced table runs before the simple one, and
//! both run before the plain date table so "every monday" is never swallowed
//! by the bare weekday rule.

use crate::calendar;
use crate::patterns::{self, AdvancedRecurRule, SimpleRecurRule};
use crate::types::{AdvancedRepeat, MonthlyType, RepeatFrequency, RepeatType};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// First due moment implied by a recurrence. Hour-grained rules pin an exact
/// instant; everything else picks a calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FirstDue {
    Date(NaiveDate),
    Exact(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecurrenceValue {
    pub repeat_type: RepeatType,
    pub repeat_days: Option<Vec<u8>>,
    pub advanced: Option<AdvancedRepeat>,
    pub first_due: FirstDue,
}

pub(crate) fn extract_advanced(
    buffer: &str,
    now: NaiveDateTime,
) -> Option<(RecurrenceValue, String)> {
    let today = now.date();
    for (re, rule) in patterns::ADVANCED_RECUR_TABLE.iter() {
        let Some(caps) = re.captures(buffer) else {
            continue;
        };
        let value = match rule {
            AdvancedRecurRule::NthWeekday => {
                let week = patterns::parse_ordinal_week(caps.get(1)?.as_str())?;
                let weekday = patterns::parse_weekday(caps.get(2)?.as_str())?;
                let first = calendar::next_weekday_in_month(today, week, weekday)?;
                Some(RecurrenceValue {
                    repeat_type: RepeatType::Monthly,
                    repeat_days: None,
                    advanced: Some(AdvancedRepeat {
                        frequency: RepeatFrequency::Monthly,
                        interval: None,
                        monthly_type: Some(MonthlyType::Weekday),
                        monthly_week: Some(week),
                        monthly_day: Some(weekday),
                    }),
                    first_due: FirstDue::Date(first),
                })
            }
            AdvancedRecurRule::MonthOnDay => {
                let day: u32 = caps.get(1)?.as_str().parse().ok()?;
                if !(1..=31).contains(&day) {
                    None
                } else {
                    let first = calendar::next_day_of_month(today, day)?;
                    Some(RecurrenceValue {
                        repeat_type: RepeatType::Monthly,
                        repeat_days: None,
                        advanced: Some(AdvancedRepeat {
                            frequency: RepeatFrequency::Monthly,
                            interval: None,
                            monthly_type: Some(MonthlyType::Date),
                            monthly_week: None,
                            monthly_day: Some(day as u8),
                        }),
                        first_due: FirstDue::Date(first),
                    })
                }
            }
            AdvancedRecurRule::EveryOther => interval_value(caps.get(1)?.as_str(), 2, now),
            AdvancedRecurRule::EveryInterval => {
                let n: u32 = caps.get(1)?.as_str().parse().ok()?;
                if n == 0 {
                    None
                } else {
                    interval_value(caps.get(2)?.as_str(), n, now)
                }
            }
        };
        if let Some(value) = value {
            let matched = caps.get(0).map(|m| m.as_str().to_string())?;
            return Some((value, matched));
        }
    }
    None
}

fn interval_value(unit: &str, n: u32, now: NaiveDateTime) -> Option<RecurrenceValue> {
    let today = now.date();
    let unit = unit.to_lowercase();
    let (frequency, first_due) = if unit.starts_with("day") {
        (
            RepeatFrequency::Daily,
            FirstDue::Date(today + Duration::days(n as i64)),
        )
    } else if unit.starts_with("week") {
        (
            RepeatFrequency::Weekly,
            FirstDue::Date(today + Duration::days(7 * n as i64)),
        )
    } else if unit.starts_with("month") {
        (
            RepeatFrequency::Monthly,
            FirstDue::Date(calendar::add_months(today, n)),
        )
    } else if unit.starts_with("year") {
        (
            RepeatFrequency::Yearly,
            FirstDue::Date(calendar::add_months(today, 12 * n)),
        )
    } else if unit.starts_with("hour") {
        (
            RepeatFrequency::Hourly,
            FirstDue::Exact(now + Duration::hours(n as i64)),
        )
    } else {
        return None;
    };
    Some(RecurrenceValue {
        repeat_type: frequency.as_repeat_type(),
        repeat_days: None,
        advanced: Some(AdvancedRepeat {
            frequency,
            interval: Some(n),
            monthly_type: None,
            monthly_week: None,
            monthly_day: None,
        }),
        first_due,
    })
}

pub(crate) fn extract_simple(
    buffer: &str,
    now: NaiveDateTime,
) -> Option<(RecurrenceValue, String)> {
    let today = now.date();
    for (re, rule) in patterns::SIMPLE_RECUR_TABLE.iter() {
        let Some(caps) = re.captures(buffer) else {
            continue;
        };
        let value = match rule {
            SimpleRecurRule::DayList => day_list_value(caps.get(1)?.as_str(), today),
            SimpleRecurRule::Weekdays => Some(RecurrenceValue {
                repeat_type: RepeatType::Weekdays,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Date(next_working_day(today)),
            }),
            SimpleRecurRule::Weekends => Some(RecurrenceValue {
                repeat_type: RepeatType::Weekends,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Date(calendar::next_weekday(today, 6)),
            }),
            SimpleRecurRule::Hourly => Some(RecurrenceValue {
                repeat_type: RepeatType::Hourly,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Exact(now + Duration::hours(1)),
            }),
            SimpleRecurRule::Daily => Some(RecurrenceValue {
                repeat_type: RepeatType::Daily,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Date(today + Duration::days(1)),
            }),
            SimpleRecurRule::Weekly => Some(RecurrenceValue {
                repeat_type: RepeatType::Weekly,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Date(today + Duration::days(7)),
            }),
            SimpleRecurRule::Monthly => Some(RecurrenceValue {
                repeat_type: RepeatType::Monthly,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Date(calendar::add_months(today, 1)),
            }),
            SimpleRecurRule::Yearly => Some(RecurrenceValue {
                repeat_type: RepeatType::Yearly,
                repeat_days: None,
                advanced: None,
                first_due: FirstDue::Date(calendar::add_months(today, 12)),
            }),
        };
        if let Some(value) = value {
            let matched = caps.get(0).map(|m| m.as_str().to_string())?;
            return Some((value, matched));
        }
    }
    None
}

fn day_list_value(list: &str, today: NaiveDate) -> Option<RecurrenceValue> {
    let mut days: Vec<u8> = patterns::WEEKDAY_WORD
        .find_iter(list)
        .filter_map(|m| patterns::parse_weekday(m.as_str()))
        .collect();
    days.sort_unstable();
    days.dedup();
    let first = calendar::next_weekday_of(today, &days)?;
    Some(RecurrenceValue {
        repeat_type: RepeatType::Custom,
        repeat_days: Some(days),
        advanced: None,
        first_due: FirstDue::Date(first),
    })
}

/// Tomorrow, rolled to Monday when tomorrow lands on a weekend day.
fn next_working_day(today: NaiveDate) -> NaiveDate {
    let tomorrow = today + Duration::days(1);
    match tomorrow.weekday().num_days_from_sunday() {
        6 => tomorrow + Duration::days(2),
        0 => tomorrow + Duration::days(1),
        _ => tomorrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonthlyWeek;

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
    fn every_monday_is_a_custom_day_list() {
        let (value, matched) = extract_simple("sync every monday", now()).unwrap();
        assert_eq!(value.repeat_type, RepeatType::Custom);
        assert_eq!(value.repeat_days, Some(vec![1]));
        // Today is Monday, so the first occurrence is a week out.
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 8)));
        assert_eq!(matched, "every monday");
    }

    #[test]
    fn day_lists_collect_and_sort() {
        let (value, _) = extract_simple("lift every fri, mon and wed", now()).unwrap();
        assert_eq!(value.repeat_days, Some(vec![1, 3, 5]));
        // Nearest listed day from Monday is Wednesday.
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 3)));
    }

    #[test]
    fn weekday_rule_rolls_over_weekends() {
        // From Friday 2024-01-05 the next working day is Monday the 8th.
        let friday = date(2024, 1, 5).and_hms_opt(9, 0, 0).unwrap();
        let (value, _) = extract_simple("standup every weekday", friday).unwrap();
        assert_eq!(value.repeat_type, RepeatType::Weekdays);
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 8)));
    }

    #[test]
    fn weekends_pick_next_saturday() {
        let (value, _) = extract_simple("hike weekends", now()).unwrap();
        assert_eq!(value.repeat_type, RepeatType::Weekends);
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 6)));
    }

    #[test]
    fn simple_frequencies() {
        let (value, _) = extract_simple("journal daily", now()).unwrap();
        assert_eq!(value.repeat_type, RepeatType::Daily);
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 2)));

        let (value, _) = extract_simple("review every month", now()).unwrap();
        assert_eq!(value.repeat_type, RepeatType::Monthly);
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 2, 1)));
    }

    #[test]
    fn nth_weekday_of_month() {
        let (value, matched) = extract_advanced("report every 2nd tuesday", now()).unwrap();
        let adv = value.advanced.unwrap();
        assert_eq!(adv.frequency, RepeatFrequency::Monthly);
        assert_eq!(adv.monthly_type, Some(MonthlyType::Weekday));
        assert_eq!(adv.monthly_week, Some(MonthlyWeek::Second));
        assert_eq!(adv.monthly_day, Some(2));
        assert_eq!(value.repeat_type, RepeatType::Monthly);
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 9)));
        assert_eq!(matched, "every 2nd tuesday");
    }

    #[test]
    fn last_friday_of_month() {
        let (value, _) = extract_advanced("retro every last friday", now()).unwrap();
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 26)));
    }

    #[test]
    fn every_n_days_keeps_the_interval() {
        let (value, _) = extract_advanced("water plants every 3 days", now()).unwrap();
        let adv = value.advanced.unwrap();
        assert_eq!(adv.frequency, RepeatFrequency::Daily);
        assert_eq!(adv.interval, Some(3));
        assert_eq!(value.repeat_type, RepeatType::Daily);
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 4)));
    }

    #[test]
    fn every_other_week() {
        let (value, _) = extract_advanced("payday every other week", now()).unwrap();
        let adv = value.advanced.unwrap();
        assert_eq!(adv.frequency, RepeatFrequency::Weekly);
        assert_eq!(adv.interval, Some(2));
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 15)));
    }

    #[test]
    fn month_on_day_anchoring() {
        let (value, _) = extract_advanced("rent every month on the 15th", now()).unwrap();
        let adv = value.advanced.unwrap();
        assert_eq!(adv.monthly_type, Some(MonthlyType::Date));
        assert_eq!(adv.monthly_day, Some(15));
        assert_eq!(value.first_due, FirstDue::Date(date(2024, 1, 15)));
    }

    #[test]
    fn first_of_the_month_phrasing_is_a_known_gap() {
        assert!(extract_advanced("rent every 1st of the month", now()).is_none());
        assert!(extract_simple("rent every 1st of the month", now()).is_none());
    }
}
