//! Declarative form schema types.
//!
//! A [`FormSchema`] describes the submission form for a mission: an ordered
//! list of fields, each a tagged variant of [`FormField`]. The JSON wire
//! format matches what the admin schema builder persists (`type` tags in
//! lowercase, camelCase member names), so schemas authored before this
//! engine existed decode unchanged.

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerMap, AnswerValue};
use crate::error::{Error, Result};

/// A versioned, ordered collection of form fields.
///
/// Immutable once a [`FormSession`](crate::FormSession) has been opened
/// over it for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Schema format version. Currently always `1`.
    pub version: u32,
    /// Top-level fields, in display order.
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Creates an empty version-1 schema.
    pub fn new() -> Self {
        Self {
            version: 1,
            fields: Vec::new(),
        }
    }

    /// Decodes a schema from opaque JSON, as stored on a mission record.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the top-level field with the given name, if any.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// A single form field, tagged by its `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormField {
    /// Multi-line text input.
    Textarea(TextareaField),
    /// Single-line text input.
    Input(TextField),
    /// Single-line input holding an absolute URL.
    Url(TextField),
    /// One-of choice over a declared option list.
    Select(SelectField),
    /// Bounded repeating sub-form.
    Group(GroupField),
}

impl FormField {
    /// The field's key, unique within its parent scope.
    pub fn name(&self) -> &str {
        match self {
            Self::Textarea(f) => &f.name,
            Self::Input(f) | Self::Url(f) => &f.name,
            Self::Select(f) => &f.name,
            Self::Group(f) => &f.name,
        }
    }

    /// The user-facing label.
    pub fn label(&self) -> &str {
        match self {
            Self::Textarea(f) => &f.label,
            Self::Input(f) | Self::Url(f) => &f.label,
            Self::Select(f) => &f.label,
            Self::Group(f) => &f.label,
        }
    }

    /// Whether the field must be answered for a submission to validate.
    pub fn required(&self) -> bool {
        match self {
            Self::Textarea(f) => f.required,
            Self::Input(f) | Self::Url(f) => f.required,
            Self::Select(f) => f.required,
            Self::Group(f) => f.required,
        }
    }

    /// Optional helper text shown under the label.
    pub fn helper_text(&self) -> Option<&str> {
        match self {
            Self::Textarea(f) => f.helper_text.as_deref(),
            Self::Input(f) | Self::Url(f) => f.helper_text.as_deref(),
            Self::Select(f) => f.helper_text.as_deref(),
            Self::Group(f) => f.helper_text.as_deref(),
        }
    }

    /// The lowercase type tag, as it appears on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Textarea(_) => "textarea",
            Self::Input(_) => "input",
            Self::Url(_) => "url",
            Self::Select(_) => "select",
            Self::Group(_) => "group",
        }
    }

    /// Returns the group payload when this field is a repeating group.
    pub fn as_group(&self) -> Option<&GroupField> {
        match self {
            Self::Group(f) => Some(f),
            _ => None,
        }
    }
}

/// Multi-line text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextareaField {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    /// Suggested initial height in rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<u32>,
    /// Upper bound on answer length, enforced at validation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Single-line text field, used by both the `input` and `url` variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// One-of choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectField {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl SelectField {
    /// Returns whether `value` is one of the declared option values.
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// A single selectable option: the stored `value` and its display `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Bounded repeating sub-form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupField {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    /// Sub-schema repeated per instance.
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// Instance count bounds. Sessions seed `min` instances and never
    /// allow the count outside `[min, max]`.
    pub repeat: RepeatBounds,
}

impl GroupField {
    /// Builds one blank instance: every scalar sub-field defaults to the
    /// empty string, nested groups to an empty instance list.
    pub fn blank_instance(&self) -> AnswerMap {
        let mut map = AnswerMap::new();
        for sub in &self.fields {
            let value = match sub {
                FormField::Group(_) => AnswerValue::Instances(Vec::new()),
                _ => AnswerValue::Text(String::new()),
            };
            map.insert(sub.name().to_owned(), value);
        }
        map
    }
}

/// Inclusive instance-count bounds for a repeating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatBounds {
    pub min: usize,
    pub max: usize,
}

impl RepeatBounds {
    /// Clamps a proposed instance count into `[min, max]`.
    pub fn clamp(&self, count: usize) -> usize {
        count.clamp(self.min, self.max)
    }
}

/// Looks up a top-level group field by name, failing with a typed error.
pub(crate) fn top_level_group<'a>(schema: &'a FormSchema, name: &str) -> Result<&'a GroupField> {
    let field = schema
        .field(name)
        .ok_or_else(|| Error::UnknownSchemaField {
            name: name.to_owned(),
        })?;
    field.as_group().ok_or_else(|| Error::NotAGroup {
        name: name.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflection_schema_json() -> serde_json::Value {
        serde_json::json!({
            "version": 1,
            "fields": [
                {
                    "type": "textarea",
                    "name": "reflection",
                    "label": "Reflection",
                    "required": true,
                    "helperText": "What did you learn?",
                    "minRows": 4,
                    "maxLength": 1000
                },
                {
                    "type": "select",
                    "name": "mood",
                    "label": "Mood",
                    "options": [
                        { "label": "Energized", "value": "energized" },
                        { "label": "Neutral", "value": "neutral" }
                    ]
                },
                {
                    "type": "group",
                    "name": "action_steps",
                    "label": "Action Step",
                    "fields": [
                        { "type": "input", "name": "step", "label": "Step", "required": true },
                        { "type": "url", "name": "link", "label": "Link" }
                    ],
                    "repeat": { "min": 1, "max": 5 }
                }
            ]
        })
    }

    #[test]
    fn test_decode_builder_wire_format() {
        let schema = FormSchema::from_value(reflection_schema_json()).unwrap();
        assert_eq!(schema.version, 1);
        assert_eq!(schema.fields.len(), 3);

        let FormField::Textarea(reflection) = &schema.fields[0] else {
            panic!("expected textarea");
        };
        assert!(reflection.required);
        assert_eq!(reflection.min_rows, Some(4));
        assert_eq!(reflection.max_length, Some(1000));
        assert_eq!(reflection.helper_text.as_deref(), Some("What did you learn?"));

        let group = schema.field("action_steps").unwrap().as_group().unwrap();
        assert_eq!(group.repeat, RepeatBounds { min: 1, max: 5 });
        assert_eq!(group.fields.len(), 2);
    }

    #[test]
    fn test_roundtrip_preserves_tags_and_casing() {
        let schema = FormSchema::from_value(reflection_schema_json()).unwrap();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["fields"][0]["type"], "textarea");
        assert_eq!(value["fields"][0]["helperText"], "What did you learn?");
        assert_eq!(value["fields"][0]["maxLength"], 1000);
        assert_eq!(value["fields"][2]["type"], "group");

        let back = FormSchema::from_value(value).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_blank_instance_defaults() {
        let schema = FormSchema::from_value(reflection_schema_json()).unwrap();
        let group = schema.field("action_steps").unwrap().as_group().unwrap();
        let blank = group.blank_instance();
        assert_eq!(blank.get("step"), Some(&AnswerValue::Text(String::new())));
        assert_eq!(blank.get("link"), Some(&AnswerValue::Text(String::new())));
    }

    #[test]
    fn test_select_option_lookup() {
        let schema = FormSchema::from_value(reflection_schema_json()).unwrap();
        let FormField::Select(mood) = schema.field("mood").unwrap() else {
            panic!("expected select");
        };
        assert!(mood.has_option_value("energized"));
        assert!(!mood.has_option_value("Energized"));
    }
}
