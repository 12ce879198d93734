//! Summary records and assembled timeline shapes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::format_date;
use crate::template::TimelineDocument;

/// One summarized date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub date: NaiveDate,
    pub content: String,
}

impl SummaryRecord {
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            date,
            content: content.into(),
        }
    }
}

/// Flat timeline entry produced by the Hugging Face generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Date rendered as `YYYY-MM-DD`.
    pub title: String,
    /// Trimmed summary text.
    pub description: String,
}

impl From<&SummaryRecord> for TimelineEntry {
    fn from(record: &SummaryRecord) -> Self {
        Self {
            title: format_date(record.date),
            description: record.content.trim().to_string(),
        }
    }
}

/// A TimelineJS event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub start_date: StartDate,
    pub text: EventText,
}

impl From<&SummaryRecord> for TimelineEvent {
    fn from(record: &SummaryRecord) -> Self {
        Self {
            start_date: StartDate::from(record.date),
            text: EventText {
                headline: format!("Events on {}", format_date(record.date)),
                text: record.content.clone(),
            },
        }
    }
}

/// TimelineJS start date. Time-of-day fields are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
}

impl From<NaiveDate> for StartDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            minute: 0,
            second: 0,
            microsecond: 0,
        }
    }
}

/// TimelineJS event text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventText {
    pub headline: String,
    pub text: String,
}

/// The assembled result of a generator.
///
/// Serializes as the bare inner value: an array of entries or a TimelineJS
/// document object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimelineData {
    Entries(Vec<TimelineEntry>),
    Document(TimelineDocument),
}

impl TimelineData {
    /// Number of entries or events.
    pub fn len(&self) -> usize {
        match self {
            TimelineData::Entries(entries) => entries.len(),
            TimelineData::Document(doc) => doc.events().len(),
        }
    }

    /// Returns true if nothing was placed on the timeline.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SummaryRecord {
        SummaryRecord::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "  Budget approved.<br> <br> Vote was 7-2.  ",
        )
    }

    #[test]
    fn test_entry_from_record() {
        let entry = TimelineEntry::from(&record());
        assert_eq!(entry.title, "2024-05-01");
        assert_eq!(entry.description, "Budget approved.<br> <br> Vote was 7-2.");
    }

    #[test]
    fn test_event_from_record() {
        let event = TimelineEvent::from(&record());
        assert_eq!(
            event.start_date,
            StartDate {
                year: 2024,
                month: 5,
                day: 1,
                minute: 0,
                second: 0,
                microsecond: 0,
            }
        );
        assert_eq!(event.text.headline, "Events on 2024-05-01");
        assert_eq!(event.text.text, record().content);
    }

    #[test]
    fn test_entries_serialize_as_array() {
        let data = TimelineData::Entries(vec![TimelineEntry::from(&record())]);
        let json: serde_json::Value = serde_json::to_value(&data).unwrap();
        assert_eq!(json[0]["title"], "2024-05-01");
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(TimelineEvent::from(&record())).unwrap();
        assert_eq!(json["start_date"]["year"], 2024);
        assert_eq!(json["start_date"]["microsecond"], 0);
        assert_eq!(json["text"]["headline"], "Events on 2024-05-01");
    }
}
