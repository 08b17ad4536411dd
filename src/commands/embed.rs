//! Structured responses rendered by the platform relay.
//!
//! An [`Embed`] carries the content and field ordering of a response; colours,
//! avatars and layout stay a platform concern and are only hinted through
//! [`Category`].

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Visual intent of an embed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A command succeeded
    Success,
    /// Neutral information or an empty state
    Info,
    /// Something the user asked for does not exist
    Warning,
    /// A command failed
    Error,
    /// Rankings and balances
    Highlight,
    /// NFL schedule data
    Schedule,
}

/// A titled name/value pair.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A clickable control attached to an embed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Identifier sent back by the platform when the control is activated
    pub id: String,
    /// Text shown on the control
    pub label: String,
    /// Whether the control is greyed out
    pub disabled: bool,
}

/// A structured response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    /// Fields in display order
    pub fields: Vec<EmbedField>,
    /// Attribution line, e.g. `Requested by alice`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
}

impl Embed {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Embed {
            title: title.into(),
            description: None,
            category,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
            controls: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a full-width field.
    pub fn field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_field(name.into(), value.into(), false)
    }

    /// Appends a field sharing its row with neighbouring inline fields.
    pub fn inline_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_field(name.into(), value.into(), true)
    }

    fn push_field(mut self, name: String, value: String, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name,
            value,
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn controls(mut self, controls: Vec<Control>) -> Self {
        self.controls = controls;
        self
    }

    /// Value of the first field named `name`.
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_order() {
        let embed = Embed::new("Title", Category::Info)
            .inline_field("First", "1")
            .field("Second", "2")
            .inline_field("Third", "3");

        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert!(embed.fields[0].inline);
        assert!(!embed.fields[1].inline);
        assert_eq!(embed.field_value("Third"), Some("3"));
        assert_eq!(embed.field_value("Fourth"), None);
    }

    #[test]
    fn test_serialize_skips_empty_parts() {
        let embed = Embed::new("Season Deleted Successfully", Category::Success);
        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(json["title"], "Season Deleted Successfully");
        assert_eq!(json["category"], "success");
        assert!(json.get("description").is_none());
        assert!(json.get("footer").is_none());
        assert!(json.get("controls").is_none());
    }
}
