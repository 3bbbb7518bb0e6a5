//! Trigger tables for every extraction stage, compiled once at first use.
//!
//! Each table is an ordered list of (pattern, rule) pairs. Order encodes
//! precedence: when several entries could claim the same substring, the first
//! listed entry wins. The detection probe tests these same statics, so the
//! probe and the pipeline always agree on trigger coverage.

use crate::types::{MonthlyWeek, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Weekday names plus the short forms people actually type.
const WEEKDAY: &str = "(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday\
|mon|tues|tue|weds|wed|thurs|thur|thu|fri|sat|sun)";

const MONTH: &str = "(?:january|february|march|april|may|june|july|august\
|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)";

pub(crate) fn parse_weekday(word: &str) -> Option<u8> {
    let w = word.to_lowercase();
    let day = match &w {
        w if w.starts_with("sun") => 0,
        w if w.starts_with("mon") => 1,
        w if w.starts_with("tue") => 2,
        w if w.starts_with("wed") => 3,
        w if w.starts_with("thu") => 4,
        w if w.starts_with("fri") => 5,
        w if w.starts_with("sat") => 6,
        _ => return None,
    };
    Some(day)
}

pub(crate) fn parse_month(word: &str) -> Option<u32> {
    let w = word.to_lowercase();
    let month = match &w {
        w if w.starts_with("jan") => 1,
        w if w.starts_with("feb") => 2,
        w if w.starts_with("mar") => 3,
        w if w.starts_with("apr") => 4,
        w if w.starts_with("may") => 5,
        w if w.starts_with("jun") => 6,
        w if w.starts_with("jul") => 7,
        w if w.starts_with("aug") => 8,
        w if w.starts_with("sep") => 9,
        w if w.starts_with("oct") => 10,
        w if w.starts_with("nov") => 11,
        w if w.starts_with("dec") => 12,
        _ => return None,
    };
    Some(month)
}

pub(crate) fn parse_ordinal_week(word: &str) -> Option<MonthlyWeek> {
    let w = word.to_lowercase();
    let week = match w.as_str() {
        "1st" | "first" => MonthlyWeek::First,
        "2nd" | "second" => MonthlyWeek::Second,
        "3rd" | "third" => MonthlyWeek::Third,
        "4th" | "fourth" => MonthlyWeek::Fourth,
        "last" => MonthlyWeek::Last,
        _ => return None,
    };
    Some(week)
}

/// Bare weekday word, used to split day lists like "mon, wed and fri".
pub(crate) static WEEKDAY_WORD: Lazy<Regex> =
    Lazy::new(|| rx(&format!(r"(?i){WEEKDAY}")));

// ---------------------------------------------------------------------------
// Absolute dates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum DateRule {
    DayAfterTomorrow,
    Today,
    Tomorrow,
    NextWeek,
    NextMonth,
    NextWeekday,
    Weekday,
    MonthDay,
    DayMonth,
    Slash,
}

pub(crate) static DATE_TABLE: Lazy<Vec<(Regex, DateRule)>> = Lazy::new(|| {
    vec![
        // Multi-word phrases first so the bare forms cannot shadow them.
        (rx(r"(?i)\bday\s+after\s+tomorrow\b"), DateRule::DayAfterTomorrow),
        (rx(r"(?i)\btoday\b"), DateRule::Today),
        (rx(r"(?i)\b(?:tomorrow|tmrw|tmr)\b"), DateRule::Tomorrow),
        (rx(r"(?i)\bnext\s+week\b"), DateRule::NextWeek),
        (rx(r"(?i)\bnext\s+month\b"), DateRule::NextMonth),
        (
            rx(&format!(r"(?i)\bnext\s+({WEEKDAY})\b")),
            DateRule::NextWeekday,
        ),
        (
            rx(&format!(r"(?i)\b(?:on\s+)?({WEEKDAY})\b")),
            DateRule::Weekday,
        ),
        (
            rx(&format!(
                r"(?i)\b({MONTH})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b"
            )),
            DateRule::MonthDay,
        ),
        (
            rx(&format!(
                r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTH})\b"
            )),
            DateRule::DayMonth,
        ),
        (
            rx(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b"),
            DateRule::Slash,
        ),
    ]
});

// ---------------------------------------------------------------------------
// Clock times
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum TimeRule {
    ClockMinutesAmPm,
    ClockAmPm,
    Clock24,
    Fixed(u32, u32),
}

pub(crate) static TIME_TABLE: Lazy<Vec<(Regex, TimeRule)>> = Lazy::new(|| {
    vec![
        (
            rx(r"(?i)\b(?:at\s+)?(\d{1,2}):(\d{2})\s*(am|pm)\b"),
            TimeRule::ClockMinutesAmPm,
        ),
        (
            rx(r"(?i)\b(?:at\s+)?(\d{1,2})\s*(am|pm)\b"),
            TimeRule::ClockAmPm,
        ),
        (
            rx(r"(?i)\b(?:at\s+)?(\d{1,2}):(\d{2})\b"),
            TimeRule::Clock24,
        ),
        (
            rx(r"(?i)\b(?:at\s+)?(?:noon|midday)\b"),
            TimeRule::Fixed(12, 0),
        ),
        (rx(r"(?i)\b(?:at\s+)?midnight\b"), TimeRule::Fixed(0, 0)),
        (
            rx(r"(?i)\b(?:in\s+the\s+)?morning\b"),
            TimeRule::Fixed(9, 0),
        ),
        (
            rx(r"(?i)\b(?:in\s+the\s+)?afternoon\b"),
            TimeRule::Fixed(15, 0),
        ),
        (
            rx(r"(?i)\b(?:in\s+the\s+)?evening\b"),
            TimeRule::Fixed(18, 0),
        ),
        (
            rx(r"(?i)\b(?:tonight|at\s+night)\b"),
            TimeRule::Fixed(20, 0),
        ),
    ]
});

// ---------------------------------------------------------------------------
// Relative offsets ("in 10 minutes")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum RelativeRule {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    HalfHour,
    OneUnit,
}

pub(crate) static RELATIVE_TABLE: Lazy<Vec<(Regex, RelativeRule)>> = Lazy::new(|| {
    vec![
        (
            rx(r"(?i)\bin\s+(\d+)\s*(?:minutes|minute|mins|min)\b"),
            RelativeRule::Minutes,
        ),
        (
            rx(r"(?i)\bin\s+(\d+)\s*(?:hours|hour|hrs|hr)\b"),
            RelativeRule::Hours,
        ),
        (rx(r"(?i)\bin\s+(\d+)\s*(?:days|day)\b"), RelativeRule::Days),
        (
            rx(r"(?i)\bin\s+(\d+)\s*(?:weeks|week)\b"),
            RelativeRule::Weeks,
        ),
        (
            rx(r"(?i)\bin\s+(\d+)\s*(?:months|month)\b"),
            RelativeRule::Months,
        ),
        (rx(r"(?i)\bin\s+half\s+an\s+hour\b"), RelativeRule::HalfHour),
        (
            rx(r"(?i)\bin\s+an?\s+(minute|hour|day|week|month)\b"),
            RelativeRule::OneUnit,
        ),
    ]
});

// ---------------------------------------------------------------------------
// Recurrence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum SimpleRecurRule {
    DayList,
    Weekdays,
    Weekends,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

pub(crate) static SIMPLE_RECUR_TABLE: Lazy<Vec<(Regex, SimpleRecurRule)>> = Lazy::new(|| {
    vec![
        // Specific day lists first: "every monday" must not be swallowed by
        // the generic interval rules, and never by the bare date table.
        (
            rx(&format!(
                r"(?i)\bevery\s+({WEEKDAY}(?:\s*(?:,|and|&)\s*(?:{WEEKDAY}))*)\b"
            )),
            SimpleRecurRule::DayList,
        ),
        (
            rx(r"(?i)\b(?:every\s+weekdays?|weekdays)\b"),
            SimpleRecurRule::Weekdays,
        ),
        (
            rx(r"(?i)\b(?:every\s+weekends?|weekends)\b"),
            SimpleRecurRule::Weekends,
        ),
        (
            rx(r"(?i)\b(?:every\s+hour|hourly)\b"),
            SimpleRecurRule::Hourly,
        ),
        (rx(r"(?i)\b(?:every\s+day|daily)\b"), SimpleRecurRule::Daily),
        (
            rx(r"(?i)\b(?:every\s+week|weekly)\b"),
            SimpleRecurRule::Weekly,
        ),
        (
            rx(r"(?i)\b(?:every\s+month|monthly)\b"),
            SimpleRecurRule::Monthly,
        ),
        (
            rx(r"(?i)\b(?:every\s+year|yearly|annually)\b"),
            SimpleRecurRule::Yearly,
        ),
    ]
});

#[derive(Debug, Clone, Copy)]
pub(crate) enum AdvancedRecurRule {
    NthWeekday,
    MonthOnDay,
    EveryOther,
    EveryInterval,
}

pub(crate) static ADVANCED_RECUR_TABLE: Lazy<Vec<(Regex, AdvancedRecurRule)>> = Lazy::new(|| {
    vec![
        (
            rx(&format!(
                r"(?i)\bevery\s+(1st|2nd|3rd|4th|first|second|third|fourth|last)\s+({WEEKDAY})\b"
            )),
            AdvancedRecurRule::NthWeekday,
        ),
        (
            rx(r"(?i)\bevery\s+month\s+on\s+the\s+(\d{1,2})(?:st|nd|rd|th)?\b"),
            AdvancedRecurRule::MonthOnDay,
        ),
        (
            rx(r"(?i)\bevery\s+other\s+(day|week|month|year)\b"),
            AdvancedRecurRule::EveryOther,
        ),
        (
            rx(r"(?i)\bevery\s+(\d+)\s*(days?|weeks?|months?|years?|hours?)\b"),
            AdvancedRecurRule::EveryInterval,
        ),
    ]
});

// ---------------------------------------------------------------------------
// Reminder phrases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum ReminderRule {
    Minutes,
    Hours,
    OneHour,
    OneDay,
    Bare,
}

const REMIND_VERB: &str = r"(?:remind|alert)\s+me";
const REMIND_TAIL: &str = r"(?:before|early|earlier|prior|ahead)";

pub(crate) static REMINDER_TABLE: Lazy<Vec<(Regex, ReminderRule)>> = Lazy::new(|| {
    vec![
        (
            rx(&format!(
                r"(?i)\b{REMIND_VERB}\s+(\d+)\s*(?:minutes|minute|mins|min|m)\s+{REMIND_TAIL}\b"
            )),
            ReminderRule::Minutes,
        ),
        (
            rx(&format!(
                r"(?i)\b{REMIND_VERB}\s+(\d+)\s*(?:hours|hour|hrs|hr)\s+{REMIND_TAIL}\b"
            )),
            ReminderRule::Hours,
        ),
        (
            rx(&format!(
                r"(?i)\b{REMIND_VERB}\s+(?:an?|one)\s+hour\s+{REMIND_TAIL}\b"
            )),
            ReminderRule::OneHour,
        ),
        (
            rx(&format!(
                r"(?i)\b{REMIND_VERB}\s+(?:a|one)\s+day\s+{REMIND_TAIL}\b"
            )),
            ReminderRule::OneDay,
        ),
        (rx(&format!(r"(?i)\b{REMIND_VERB}\b")), ReminderRule::Bare),
    ]
});

// ---------------------------------------------------------------------------
// Priority markers
// ---------------------------------------------------------------------------

pub(crate) static PRIORITY_TABLE: Lazy<Vec<(Regex, Priority)>> = Lazy::new(|| {
    vec![
        (rx(r"!{3,}"), Priority::High),
        (rx(r"!!"), Priority::Medium),
        (rx(r"(?i)!high\b"), Priority::High),
        (rx(r"(?i)!med(?:ium)?\b"), Priority::Medium),
        (rx(r"(?i)!low\b"), Priority::Low),
        (rx(r"(?i)\bp1\b"), Priority::High),
        (rx(r"(?i)\bp2\b"), Priority::Medium),
        (rx(r"(?i)\bp3\b"), Priority::Low),
        (rx(r"\*\*"), Priority::High),
        (rx(r"\*"), Priority::Medium),
        (rx(r"(?i)\b(?:asap|urgent)\b"), Priority::High),
        (rx(r"(?i)\bhigh\s+priority\b"), Priority::High),
        (rx(r"(?i)\blow\s+priority\b"), Priority::Low),
    ]
});

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum LocationRule {
    Venue,
    ProperNoun,
}

pub(crate) static LOCATION_TABLE: Lazy<Vec<(Regex, LocationRule)>> = Lazy::new(|| {
    vec![
        (
            rx(r"(?i)\bat\s+(?:the\s+)?(gym|office|home|work|school|store|mall|bank|library|airport|park|church|doctor|dentist|hospital|pharmacy|supermarket)\b"),
            LocationRule::Venue,
        ),
        // Capitalized phrase after "at". Can claim ordinary capitalized
        // words; callers get a best-effort guess, not a verified place.
        (
            rx(r"\b(?i:at)\s+((?:[A-Z][A-Za-z0-9']*)(?:\s+[A-Z][A-Za-z0-9']*)*)"),
            LocationRule::ProperNoun,
        ),
    ]
});

// ---------------------------------------------------------------------------
// Quick syntax
// ---------------------------------------------------------------------------

/// Trailing ` // text`, ` -- text` or ` | text` splits off an inline
/// description. The lazy prefix makes the first marker win.
pub(crate) static DESC_SPLIT: Lazy<Regex> =
    Lazy::new(|| rx(r"^(.*?)\s+(?://|--|\|)\s*(\S.*)$"));

pub(crate) static EFFORT_HOURS: Lazy<Regex> = Lazy::new(|| {
    rx(r"(?i)~\s*(\d+(?:\.\d+)?)\s*h(?:ours?|rs?)?(?:\s*(\d+)\s*m(?:ins?|inutes?)?)?\b")
});

pub(crate) static EFFORT_MINUTES: Lazy<Regex> =
    Lazy::new(|| rx(r"(?i)~\s*(\d+)\s*m(?:ins?|inutes?)?\b"));

pub(crate) static EFFORT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    rx(r"(?i)\b(?:est|effort):\s*(\d+(?:\.\d+)?)\s*(h(?:ours?|rs?)?|m(?:ins?|inutes?)?)?\b")
});

pub(crate) static TAG_QUOTED: Lazy<Regex> = Lazy::new(|| rx(r##"#"([^"]+)""##));

pub(crate) static TAG_BARE: Lazy<Regex> = Lazy::new(|| rx(r"#([A-Za-z0-9_][\w-]*)"));

pub(crate) static FOLDER_QUOTED: Lazy<Regex> = Lazy::new(|| rx(r##"@"([^"]+)""##));

pub(crate) static FOLDER_BARE: Lazy<Regex> = Lazy::new(|| rx(r"@([A-Za-z0-9_][\w-]*)"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_compile() {
        assert!(!DATE_TABLE.is_empty());
        assert!(!TIME_TABLE.is_empty());
        assert!(!RELATIVE_TABLE.is_empty());
        assert!(!SIMPLE_RECUR_TABLE.is_empty());
        assert!(!ADVANCED_RECUR_TABLE.is_empty());
        assert!(!REMINDER_TABLE.is_empty());
        assert!(!PRIORITY_TABLE.is_empty());
        assert!(!LOCATION_TABLE.is_empty());
    }

    #[test]
    fn weekday_words() {
        assert_eq!(parse_weekday("Sunday"), Some(0));
        assert_eq!(parse_weekday("mon"), Some(1));
        assert_eq!(parse_weekday("Tues"), Some(2));
        assert_eq!(parse_weekday("thurs"), Some(4));
        assert_eq!(parse_weekday("plumber"), None);
    }

    #[test]
    fn month_words() {
        assert_eq!(parse_month("dec"), Some(12));
        assert_eq!(parse_month("September"), Some(9));
        assert_eq!(parse_month("sept"), Some(9));
        assert_eq!(parse_month("task"), None);
    }

    #[test]
    fn specific_recurrence_outranks_generic() {
        let text = "every monday";
        let day_list = &SIMPLE_RECUR_TABLE[0];
        assert!(day_list.0.is_match(text));
        // "every week" must not fire on "every weekday".
        let weekly = SIMPLE_RECUR_TABLE
            .iter()
            .find(|(_, r)| matches!(r, SimpleRecurRule::Weekly))
            .unwrap();
        assert!(!weekly.0.is_match("every weekday"));
    }

    #[test]
    fn date_table_order_prefers_phrases() {
        let (tomorrow_rx, _) = &DATE_TABLE[2];
        assert!(tomorrow_rx.is_match("tomorrow"));
        let (day_after_rx, _) = &DATE_TABLE[0];
        assert!(day_after_rx.is_match("day after tomorrow"));
    }
}
