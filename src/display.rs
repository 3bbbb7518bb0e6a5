//! Badge formatting for a parsed record. Pure presentation, no parsing.

use crate::types::{MonthlyType, MonthlyWeek, ParsedTask, Priority, ReminderOffset, RepeatType};
use chrono::{Duration, NaiveDateTime};

const WEEKDAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAY_FULL: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Ordered badge list: due label, reminder, recurrence, location, priority,
/// effort, description.
pub(crate) fn badges(task: &ParsedTask, now: NaiveDateTime) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(due) = task.due_date {
        out.push(due_label(due, now));
    }
    if let Some(offset) = task.reminder_offset {
        out.push(reminder_label(offset));
    }
    if let Some(label) = repeat_label(task) {
        out.push(label);
    }
    if let Some(location) = &task.location {
        out.push(format!("at {location}"));
    }
    if let Some(priority) = task.priority {
        let word = match priority {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        out.push(format!("{word} priority"));
    }
    if let Some(hours) = task.estimated_hours {
        out.push(effort_label(hours));
    }
    if let Some(description) = &task.description {
        out.push(description.clone());
    }
    out
}

fn due_label(due: NaiveDateTime, now: NaiveDateTime) -> String {
    let day = if due.date() == now.date() {
        "Today".to_string()
    } else if due.date() == now.date() + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        due.format("%a %b %-d").to_string()
    };
    format!("{day} {}", due.format("%-I:%M %p"))
}

fn reminder_label(offset: ReminderOffset) -> String {
    match offset {
        ReminderOffset::Exact => "remind at due time".to_string(),
        ReminderOffset::OneHour => "remind 1 hour before".to_string(),
        ReminderOffset::OneDay => "remind 1 day before".to_string(),
        other => format!("remind {} min before", other.minutes()),
    }
}

fn repeat_label(task: &ParsedTask) -> Option<String> {
    if let Some(adv) = &task.advanced_repeat {
        if let (Some(MonthlyType::Weekday), Some(week), Some(day)) =
            (adv.monthly_type, adv.monthly_week, adv.monthly_day)
        {
            let ordinal = match week {
                MonthlyWeek::First => "1st",
                MonthlyWeek::Second => "2nd",
                MonthlyWeek::Third => "3rd",
                MonthlyWeek::Fourth => "4th",
                MonthlyWeek::Last => "last",
            };
            let name = WEEKDAY_FULL.get(day as usize)?;
            return Some(format!("every {ordinal} {name}"));
        }
        if let (Some(MonthlyType::Date), Some(day)) = (adv.monthly_type, adv.monthly_day) {
            return Some(format!("every month on the {}", ordinal_day(day as u32)));
        }
        let unit = match adv.frequency.as_repeat_type() {
            RepeatType::Hourly => "hour",
            RepeatType::Daily => "day",
            RepeatType::Weekly => "week",
            RepeatType::Monthly => "month",
            RepeatType::Yearly => "year",
            _ => return None,
        };
        return Some(match adv.interval {
            Some(n) if n > 1 => format!("every {n} {unit}s"),
            _ => format!("every {unit}"),
        });
    }

    match task.repeat_type? {
        RepeatType::Custom => {
            let days = task.repeat_days.as_ref()?;
            let names: Vec<&str> = days
                .iter()
                .filter_map(|&d| WEEKDAY_SHORT.get(d as usize).copied())
                .collect();
            Some(format!("every {}", names.join(", ")))
        }
        RepeatType::Weekdays => Some("every weekday".to_string()),
        RepeatType::Weekends => Some("every weekend".to_string()),
        RepeatType::Hourly => Some("every hour".to_string()),
        RepeatType::Daily => Some("every day".to_string()),
        RepeatType::Weekly => Some("every week".to_string()),
        RepeatType::Monthly => Some("every month".to_string()),
        RepeatType::Yearly => Some("every year".to_string()),
    }
}

fn ordinal_day(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

fn effort_label(hours: f32) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    if total_minutes < 60 {
        format!("~{total_minutes}m")
    } else if total_minutes % 60 == 0 {
        format!("~{}h", total_minutes / 60)
    } else {
        format!("~{}h {}m", total_minutes / 60, total_minutes % 60)
    }
}
