//! Content rows and date grouping.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Result, TimelineError};

/// Separator placed between rows that share a date.
pub const SEGMENT_DELIMITER: &str = " ==== next segment ==== ";

/// One dated piece of source content.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported by [`group_rows`] with its row index rather than as a generic
/// parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRow {
    /// Date token (`YYYYMMDD` or `YYYY-MM-DD`). Integers are accepted.
    #[serde(default, deserialize_with = "deserialize_date_token")]
    pub date: Option<String>,
    /// Free text for this row.
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentRow {
    /// Create a row with both fields present.
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            content: Some(content.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDateToken {
    Text(String),
    Number(u64),
}

fn deserialize_date_token<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawDateToken>::deserialize(deserializer)?.map(|raw| match raw {
            RawDateToken::Text(s) => s,
            RawDateToken::Number(n) => n.to_string(),
        }),
    )
}

/// Parse a JSON array of content rows.
pub fn parse_rows(json: &str) -> Result<Vec<ContentRow>> {
    serde_json::from_str(json).map_err(|e| TimelineError::InvalidRows(e.to_string()))
}

/// Content aggregated per date token, iterated in ascending token order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedContent {
    groups: BTreeMap<String, String>,
}

impl GroupedContent {
    /// Number of distinct date tokens.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The aggregated content for a date token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.groups.get(token).map(String::as_str)
    }

    /// Iterate `(token, content)` pairs in ascending token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The date tokens in ascending order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

/// Group rows by date token, joining same-date content in row order.
///
/// Date tokens are trimmed but otherwise not validated here; that happens
/// when a generator turns a group into a summary record.
pub fn group_rows(rows: &[ContentRow]) -> Result<GroupedContent> {
    let mut groups: BTreeMap<String, String> = BTreeMap::new();

    for (row, entry) in rows.iter().enumerate() {
        let token = entry
            .date
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TimelineError::MalformedInput { row, field: "date" })?;
        let content = entry.content.as_deref().ok_or(TimelineError::MalformedInput {
            row,
            field: "content",
        })?;

        groups
            .entry(token.to_string())
            .and_modify(|existing| {
                existing.push_str(SEGMENT_DELIMITER);
                existing.push_str(content);
            })
            .or_insert_with(|| content.to_string());
    }

    tracing::debug!(rows = rows.len(), groups = groups.len(), "grouped content by date");
    Ok(GroupedContent { groups })
}
