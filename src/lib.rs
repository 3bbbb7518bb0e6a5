//! Natural language quick-add parsing for task entry.
//!
//! Turns one line of task shorthand into a structured record:
//! - Dates: `tomorrow`, `next friday`, `dec 25`, `3/14`
//! - Clock times: `at 5pm`, `17:30`, `noon`, `in the evening`
//! - Relative offsets: `in 10 minutes`, `in 3 days`
//! - Recurrence: `every monday`, `every weekday`, `every 2nd tuesday`,
//!   `every 3 days`
//! - Reminders: `remind me 15 min before`
//! - Priority: `!!`, `p1`, `asap`
//! - Quick syntax: `#tag`, `@folder`, `~30m`, trailing `// description`
//!
//! Parsing is a single synchronous pass over a working buffer with no I/O and
//! no shared mutable state beyond the pattern tables, which are compiled once
//! per process. Unrecognized phrasing degrades to partial extraction; a call
//! never fails.

mod annotations;
mod calendar;
mod display;
mod patterns;
mod pipeline;
mod probe;
mod quick;
mod recurrence;
mod temporal;
mod types;

use chrono::{Local, NaiveDateTime};

pub use types::{
    AdvancedRepeat, MonthlyType, MonthlyWeek, ParsedTask, Priority, ReminderOffset,
    RepeatFrequency, RepeatType,
};

/// Parses one line of task entry. The reference instant is captured exactly
/// once here and threaded through every stage, so a slow call can never
/// observe clock drift between stages.
pub fn parse(text: &str) -> ParsedTask {
    parse_at(text, Local::now().naive_local())
}

/// Same as [`parse`] with an explicit reference instant, for callers that
/// need deterministic output.
pub fn parse_at(text: &str, now: NaiveDateTime) -> ParsedTask {
    pipeline::run(text, now)
}

/// Whether the text contains any recognizable syntax at all. Tests the same
/// trigger tables as the full pipeline without building a record.
pub fn looks_parseable(text: &str) -> bool {
    probe::any_trigger(text)
}

/// Short display badges for a parsed record, in a fixed order.
pub fn format_for_display(parsed: &ParsedTask) -> Vec<String> {
    format_for_display_at(parsed, Local::now().naive_local())
}

/// Same as [`format_for_display`] with an explicit reference instant.
pub fn format_for_display_at(parsed: &ParsedTask, now: NaiveDateTime) -> Vec<String> {
    display::badges(parsed, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn title_is_never_empty() {
        for input in [
            "Call mom tomorrow at 5pm",
            "tomorrow",
            "every monday",
            "#tag",
            "plain words only",
        ] {
            assert!(!parse_at(input, now()).text.is_empty(), "input: {input}");
        }
    }

    #[test]
    fn unparseable_text_yields_a_bare_record() {
        let input = "water the plants";
        assert!(!looks_parseable(input));
        let task = parse_at(input, now());
        assert_eq!(task.text, input);
        assert_eq!(task.due_date, None);
        assert_eq!(task.reminder_time, None);
        assert_eq!(task.priority, None);
        assert_eq!(task.repeat_type, None);
        assert_eq!(task.location, None);
        assert_eq!(task.tags, None);
        assert_eq!(task.folder_name, None);
        assert_eq!(task.description, None);
        assert_eq!(task.estimated_hours, None);
    }

    #[test]
    fn probe_agrees_with_the_pipeline() {
        for input in [
            "Call mom tomorrow at 5pm",
            "sync every monday",
            "buy milk #errands",
            "ship ~2h",
        ] {
            assert!(looks_parseable(input), "input: {input}");
            let task = parse_at(input, now());
            let extracted_something = task.due_date.is_some()
                || task.tags.is_some()
                || task.estimated_hours.is_some()
                || task.repeat_type.is_some();
            assert!(extracted_something, "input: {input}");
        }
    }

    #[test]
    fn record_serializes_without_empty_fields() {
        let task = parse_at("water the plants", now());
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"text":"water the plants"}"#);
    }
}
