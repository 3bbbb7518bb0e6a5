use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Structured record produced by one parse pass over a line of task entry.
///
/// The record has no identity and no lifecycle; it is built once per call and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTask {
    /// Cleaned task title. Falls back to the trimmed original input when
    /// extraction consumed everything.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_offset: Option<ReminderOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_type: Option<RepeatType>,
    /// Weekday numbers (0 = Sunday .. 6 = Saturday), sorted and deduplicated.
    /// Non-empty only when `repeat_type` is `Custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_days: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_repeat: Option<AdvancedRepeat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f32>,
}

impl ParsedTask {
    pub(crate) fn empty() -> Self {
        Self {
            text: String::new(),
            due_date: None,
            reminder_time: None,
            reminder_offset: None,
            priority: None,
            repeat_type: None,
            repeat_days: None,
            advanced_repeat: None,
            location: None,
            tags: None,
            folder_name: None,
            description: None,
            estimated_hours: None,
        }
    }
}

/// Lead time before the due moment at which a reminder should surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderOffset {
    #[serde(rename = "exact")]
    Exact,
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "10min")]
    TenMin,
    #[serde(rename = "15min")]
    FifteenMin,
    #[serde(rename = "30min")]
    ThirtyMin,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "1day")]
    OneDay,
}

impl ReminderOffset {
    pub fn minutes(self) -> i64 {
        match self {
            ReminderOffset::Exact => 0,
            ReminderOffset::FiveMin => 5,
            ReminderOffset::TenMin => 10,
            ReminderOffset::FifteenMin => 15,
            ReminderOffset::ThirtyMin => 30,
            ReminderOffset::OneHour => 60,
            ReminderOffset::OneDay => 24 * 60,
        }
    }

    /// Buckets a free-form minute count into the nearest supported tier.
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0..=5 => ReminderOffset::FiveMin,
            6..=10 => ReminderOffset::TenMin,
            11..=15 => ReminderOffset::FifteenMin,
            16..=30 => ReminderOffset::ThirtyMin,
            _ => ReminderOffset::OneHour,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Weekdays,
    Weekends,
    Custom,
}

/// Recurrence too irregular for a plain weekday set, e.g. "every 2nd Tuesday"
/// or "every 3 days".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedRepeat {
    pub frequency: RepeatFrequency,
    /// Gap between occurrences in `frequency` units; `None` means one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_type: Option<MonthlyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_week: Option<MonthlyWeek>,
    /// Weekday number for `MonthlyType::Weekday`, day of month for
    /// `MonthlyType::Date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_day: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatFrequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatFrequency {
    /// Mirror for consumers that only understand the simple repeat kinds.
    pub fn as_repeat_type(self) -> RepeatType {
        match self {
            RepeatFrequency::Hourly => RepeatType::Hourly,
            RepeatFrequency::Daily => RepeatType::Daily,
            RepeatFrequency::Weekly => RepeatType::Weekly,
            RepeatFrequency::Monthly => RepeatType::Monthly,
            RepeatFrequency::Yearly => RepeatType::Yearly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyType {
    Date,
    Weekday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyWeek {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl MonthlyWeek {
    pub fn ordinal(self) -> u8 {
        match self {
            MonthlyWeek::First => 1,
            MonthlyWeek::Second => 2,
            MonthlyWeek::Third => 3,
            MonthlyWeek::Fourth => 4,
            MonthlyWeek::Last => 5,
        }
    }
}
