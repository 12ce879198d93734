//! TimelineJS document templates.
//!
//! A template is a JSON object with (optionally) a `title.text` object and an
//! `events` array. Assembly always works on a fresh copy, so one template can
//! serve any number of documents.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::record::TimelineEvent;
use crate::{Result, TimelineError};

const BUNDLED_TEMPLATE: &str = include_str!("../assets/timeline_template.json");

/// A validated TimelineJS template.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineTemplate {
    root: Map<String, Value>,
}

impl TimelineTemplate {
    /// The template shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_TEMPLATE)
    }

    /// Parse and validate a template from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TimelineError::template(format!("not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Validate a template value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(TimelineError::template("template must be a JSON object"));
        };

        match root.get("title") {
            None | Some(Value::Object(_)) => {}
            Some(_) => return Err(TimelineError::template("'title' must be an object")),
        }
        if let Some(title) = root.get("title")
            && let Some(text) = title.get("text")
            && !text.is_object()
        {
            return Err(TimelineError::template("'title.text' must be an object"));
        }
        if let Some(events) = root.get("events")
            && !events.is_array()
        {
            return Err(TimelineError::template("'events' must be an array"));
        }

        Ok(Self { root })
    }

    /// Load a template from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TimelineError::TemplateRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Fill a copy of the template with a title and events.
    ///
    /// `title.text.text` is set to `title`; `events` is replaced. Every other
    /// field of the template is carried over untouched.
    pub fn document(&self, title: &str, events: &[TimelineEvent]) -> Result<TimelineDocument> {
        let mut root = self.root.clone();

        let mut title_obj = match root.remove("title") {
            Some(Value::Object(obj)) => obj,
            _ => Map::new(),
        };
        let mut text_obj = match title_obj.remove("text") {
            Some(Value::Object(obj)) => obj,
            _ => Map::new(),
        };
        text_obj.insert("text".to_string(), Value::String(title.to_string()));
        title_obj.insert("text".to_string(), Value::Object(text_obj));
        root.insert("title".to_string(), Value::Object(title_obj));

        let events = events
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()
            .map_err(|e| TimelineError::template(format!("failed to encode events: {}", e)))?;
        root.insert("events".to_string(), Value::Array(events));

        Ok(TimelineDocument(Value::Object(root)))
    }

    /// The template as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

/// A filled TimelineJS document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimelineDocument(Value);

impl TimelineDocument {
    /// `title.text.text`, if present.
    pub fn title(&self) -> Option<&str> {
        self.0.pointer("/title/text/text").and_then(Value::as_str)
    }

    /// The event list.
    pub fn events(&self) -> &[Value] {
        self.0
            .get("events")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
