use crate::domain::ports::{Clock, DateParser};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar formats tried in order when no override is configured.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d %B %Y",
    "%B %d, %Y",
    "%A, %B %d, %Y",
];

/// Parses calendar dates in invariant/en-US style. Date-only values resolve to midnight.
#[derive(Debug, Clone)]
pub struct CalendarDateParser {
    formats: Vec<String>,
}

impl CalendarDateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }
}

impl Default for CalendarDateParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect())
    }
}

impl DateParser for CalendarDateParser {
    fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
            return Some(stamp.with_timezone(&Local).naive_local());
        }

        self.formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(value, format)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(value, format)
                        .ok()
                        .map(|date| date.and_time(NaiveTime::MIN))
                })
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
