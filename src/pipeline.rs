//! The extraction pipeline. Stages run in a fixed order against a working
//! buffer; each matched span is re-located in the current buffer before it is
//! stripped, so overlapping claims can never slice against stale offsets.

use crate::annotations;
use crate::quick;
use crate::recurrence::{self, FirstDue};
use crate::temporal::{self, RelativeValue};
use crate::types::{ParsedTask, ReminderOffset};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::trace;

/// Clock time given to a due date when no time phrase supplies one.
const DEFAULT_DUE_HOUR: u32 = 9;

pub(crate) fn run(input: &str, now: NaiveDateTime) -> ParsedTask {
    let original = input.trim();
    let mut buffer = original.to_string();
    let mut task = ParsedTask::empty();

    // Quick syntax first. Its trigger characters can sit inside date or
    // priority substrings and must be peeled off before the word-level
    // matchers run.
    if let Some((description, rest)) = quick::extract_description(&buffer) {
        task.description = Some(description);
        buffer = rest;
    }

    // Untouched copy of the working line. The clock-time stage scans this
    // instead of the stripped buffer because time spans can overlap date
    // spans that later stages remove.
    let scan_line = buffer.clone();
    if let Some((hours, span)) = quick::extract_effort(&buffer) {
        task.estimated_hours = Some(hours);
        buffer = strip_span(&buffer, &span);
    }
    if let Some((tags, spans)) = quick::extract_tags(&buffer) {
        for span in &spans {
            buffer = strip_span(&buffer, span);
        }
        task.tags = Some(tags);
    }
    if let Some((folder, span)) = quick::extract_folder(&buffer) {
        task.folder_name = Some(folder);
        buffer = strip_span(&buffer, &span);
    }

    // Reminder phrases are stripped early but applied only once a due moment
    // exists.
    let mut pending_offset: Option<ReminderOffset> = None;
    if let Some((offset, span)) = temporal::extract_reminder(&buffer) {
        pending_offset = Some(offset);
        buffer = strip_span(&buffer, &span);
    }

    // Recurrence before plain dates, so "every monday" is never swallowed by
    // the bare weekday rule. Advanced forms outrank simple ones.
    let mut date_part: Option<NaiveDate> = None;
    let mut exact_part: Option<NaiveDateTime> = None;
    let matched_recurrence = recurrence::extract_advanced(&buffer, now)
        .or_else(|| recurrence::extract_simple(&buffer, now));
    if let Some((value, span)) = matched_recurrence {
        trace!(span = %span, "recurrence matched");
        task.repeat_type = Some(value.repeat_type);
        task.repeat_days = value.repeat_days;
        task.advanced_repeat = value.advanced;
        match value.first_due {
            FirstDue::Date(date) => date_part = Some(date),
            FirstDue::Exact(instant) => exact_part = Some(instant),
        }
        buffer = strip_span(&buffer, &span);
    }

    // Relative offsets share the word "in" with some date phrases and must
    // win over the absolute date table.
    let mut relative_matched = false;
    if let Some((value, span)) = temporal::extract_relative(&buffer, now) {
        trace!(span = %span, "relative offset matched");
        relative_matched = true;
        match value {
            RelativeValue::Exact(instant) => {
                exact_part = Some(instant);
                date_part = None;
            }
            RelativeValue::DateOnly(date) => {
                date_part = Some(date);
                exact_part = None;
            }
        }
        buffer = strip_span(&buffer, &span);
    }

    if !relative_matched {
        if let Some((date, span)) = temporal::extract_date(&buffer, now) {
            trace!(span = %span, "date matched");
            date_part = Some(date);
            exact_part = None;
            buffer = strip_span(&buffer, &span);
        }
    }

    // The strip below is a no-op when an earlier stage already consumed the
    // span from the buffer.
    let mut clock: Option<(u32, u32)> = None;
    if let Some((value, span)) = temporal::extract_time(&scan_line) {
        trace!(span = %span, "clock time matched");
        clock = Some(value);
        buffer = strip_span(&buffer, &span);
    }

    task.due_date = assemble_due(date_part, exact_part, clock, now);

    if let Some(due) = task.due_date {
        if pending_offset.is_some() || clock.is_some() {
            let offset = pending_offset.unwrap_or(ReminderOffset::Exact);
            task.reminder_offset = Some(offset);
            task.reminder_time = Some(due - Duration::minutes(offset.minutes()));
        }
    }

    // The loose matchers run last so they only see what nothing else claimed.
    if let Some((priority, span)) = annotations::extract_priority(&buffer) {
        task.priority = Some(priority);
        buffer = strip_span(&buffer, &span);
    }
    if let Some((location, span)) = annotations::extract_location(&buffer) {
        task.location = Some(location);
        buffer = strip_span(&buffer, &span);
    }

    let cleaned = canonicalize(&buffer);
    task.text = if cleaned.is_empty() {
        original.to_string()
    } else {
        cleaned
    };
    task
}

/// The date stage supplies the calendar day; the clock stage overwrites hour
/// and minute on that same day. A clock time alone lands on today.
fn assemble_due(
    date_part: Option<NaiveDate>,
    exact_part: Option<NaiveDateTime>,
    clock: Option<(u32, u32)>,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    match (date_part, exact_part, clock) {
        (Some(date), _, Some((hour, minute))) => date.and_hms_opt(hour, minute, 0),
        (None, Some(instant), Some((hour, minute))) => {
            instant.date().and_hms_opt(hour, minute, 0)
        }
        (Some(date), _, None) => date.and_hms_opt(DEFAULT_DUE_HOUR, 0, 0),
        (None, Some(instant), None) => Some(instant),
        (None, None, Some((hour, minute))) => now.date().and_hms_opt(hour, minute, 0),
        (None, None, None) => None,
    }
}

/// Removes the first occurrence of `span` from the buffer, leaving a single
/// space at the seam. Unchanged when the span is no longer present.
fn strip_span(buffer: &str, span: &str) -> String {
    match buffer.find(span) {
        Some(pos) => {
            let mut out = String::with_capacity(buffer.len());
            out.push_str(&buffer[..pos]);
            out.push(' ');
            out.push_str(&buffer[pos + span.len()..]);
            out
        }
        None => buffer.to_string(),
    }
}

const DANGLING: [&str; 7] = ["at", "on", "in", "by", "due", "for", "every"];

/// Collapses whitespace and trims connective words left dangling at either
/// end after extraction. Cosmetic cleanup only, no re-parsing.
pub(crate) fn canonicalize(buffer: &str) -> String {
    let mut words: Vec<&str> = buffer.split_whitespace().collect();
    loop {
        let mut changed = false;
        if let Some(first) = words.first() {
            if is_dangling(first) {
                words.remove(0);
                changed = true;
            }
        }
        if let Some(last) = words.last() {
            if is_dangling(last) {
                words.pop();
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    words.join(" ")
}

fn is_dangling(word: &str) -> bool {
    let bare = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    bare.is_empty() || DANGLING.contains(&bare.as_str())
}
