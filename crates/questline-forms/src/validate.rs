//! Schema-driven answer validation.
//!
//! [`validate`] walks the schema recursively and collects every issue it
//! finds instead of stopping at the first. Validation runs on submit
//! only; saving progress never validates, so drafts may hold any state.
//!
//! A failing report unconditionally blocks submission. `max_length` is
//! authoritative here rather than at input time: an answer may exceed
//! the bound transiently while the user edits.

use std::fmt;

use crate::TRACING_TARGET_VALIDATE;
use crate::answers::Answers;
use crate::path::FieldPath;
use crate::schema::{FormField, FormSchema};

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueKind {
    /// A required scalar field is empty after trimming.
    #[error("a value is required")]
    RequiredMissing,

    /// A value exceeds the field's `max_length`.
    #[error("value is {len} characters, over the limit of {max}")]
    TooLong { max: usize, len: usize },

    /// A `url` field holds text that is not an absolute URL.
    #[error("'{value}' is not a valid URL")]
    InvalidUrl { value: String },

    /// A `select` field holds a value outside its declared options.
    #[error("'{value}' is not one of the declared options")]
    UnknownOption { value: String },

    /// A required group has no instances.
    #[error("at least one entry is required")]
    EmptyGroup,
}

/// One validation failure, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the failing field.
    pub path: String,
    /// Failure category with its specifics.
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// The outcome of a full schema walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns whether no field failed.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The collected issues, in schema order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns whether a specific path failed.
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }

    fn push(&mut self, path: &FieldPath, kind: IssueKind) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            kind,
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("no issues");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Validates `answers` against `schema`, collecting every issue.
pub fn validate(schema: &FormSchema, answers: &Answers) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in &schema.fields {
        validate_field(field, &FieldPath::root(field.name()), answers, &mut report);
    }
    if !report.is_valid() {
        tracing::debug!(
            target: TRACING_TARGET_VALIDATE,
            issues = report.issues.len(),
            "validation found issues"
        );
    }
    report
}

fn validate_field(
    field: &FormField,
    path: &FieldPath,
    answers: &Answers,
    report: &mut ValidationReport,
) {
    match field {
        FormField::Group(group) => {
            let instances = answers
                .get(path)
                .and_then(|v| v.as_instances())
                .unwrap_or(&[]);
            if group.required && instances.is_empty() {
                report.push(path, IssueKind::EmptyGroup);
                return;
            }
            for (index, _) in instances.iter().enumerate() {
                for sub in &group.fields {
                    let sub_path = path.instance_field(index, sub.name());
                    validate_field(sub, &sub_path, answers, report);
                }
            }
        }
        FormField::Textarea(f) => {
            validate_scalar(path, answers, f.required, f.max_length, report);
        }
        FormField::Input(f) => {
            validate_scalar(path, answers, f.required, f.max_length, report);
        }
        FormField::Url(f) => {
            validate_scalar(path, answers, f.required, f.max_length, report);
            let value = answers.text(path);
            if !value.trim().is_empty() && url::Url::parse(value.trim()).is_err() {
                report.push(
                    path,
                    IssueKind::InvalidUrl {
                        value: value.to_owned(),
                    },
                );
            }
        }
        FormField::Select(f) => {
            validate_scalar(path, answers, f.required, None, report);
            let value = answers.text(path);
            if !value.is_empty() && !f.has_option_value(value) {
                report.push(
                    path,
                    IssueKind::UnknownOption {
                        value: value.to_owned(),
                    },
                );
            }
        }
    }
}

fn validate_scalar(
    path: &FieldPath,
    answers: &Answers,
    required: bool,
    max_length: Option<usize>,
    report: &mut ValidationReport,
) {
    let value = answers.text(path);
    if required && value.trim().is_empty() {
        report.push(path, IssueKind::RequiredMissing);
        return;
    }
    if let Some(max) = max_length {
        let len = value.chars().count();
        if len > max {
            report.push(path, IssueKind::TooLong { max, len });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FormSchema;

    fn schema() -> FormSchema {
        FormSchema::from_value(serde_json::json!({
            "version": 1,
            "fields": [
                { "type": "textarea", "name": "reflection", "label": "Reflection",
                  "required": true, "maxLength": 20 },
                { "type": "url", "name": "evidence", "label": "Evidence" },
                { "type": "select", "name": "mood", "label": "Mood",
                  "options": [
                      { "label": "Energized", "value": "energized" },
                      { "label": "Neutral", "value": "neutral" }
                  ] },
                { "type": "group", "name": "steps", "label": "Step", "required": true,
                  "fields": [
                      { "type": "input", "name": "what", "label": "What", "required": true }
                  ],
                  "repeat": { "min": 1, "max": 3 } }
            ]
        }))
        .unwrap()
    }

    fn answers_with(entries: serde_json::Value) -> Answers {
        Answers::from_value(entries).unwrap()
    }

    #[test]
    fn test_required_empty_textarea_fails() {
        let answers = answers_with(serde_json::json!({
            "reflection": "   ",
            "steps": [{ "what": "call" }]
        }));
        let report = validate(&schema(), &answers);
        assert!(!report.is_valid());
        assert!(report.has_issue_at("reflection"));
    }

    #[test]
    fn test_max_length_is_authoritative() {
        let answers = answers_with(serde_json::json!({
            "reflection": "this reflection is far longer than twenty characters",
            "steps": [{ "what": "call" }]
        }));
        let report = validate(&schema(), &answers);
        assert!(report.has_issue_at("reflection"));
        assert!(matches!(
            report.issues()[0].kind,
            IssueKind::TooLong { max: 20, .. }
        ));
    }

    #[test]
    fn test_optional_url_validates_only_when_present() {
        let mut base = serde_json::json!({
            "reflection": "fine",
            "steps": [{ "what": "call" }]
        });
        let report = validate(&schema(), &answers_with(base.clone()));
        assert!(report.is_valid(), "{report}");

        base["evidence"] = "not a url".into();
        let report = validate(&schema(), &answers_with(base));
        assert!(report.has_issue_at("evidence"));
    }

    #[test]
    fn test_select_rejects_value_outside_options() {
        let answers = answers_with(serde_json::json!({
            "reflection": "fine",
            "mood": "angry",
            "steps": [{ "what": "call" }]
        }));
        let report = validate(&schema(), &answers);
        assert!(report.has_issue_at("mood"));
    }

    #[test]
    fn test_required_group_fails_when_empty() {
        let answers = answers_with(serde_json::json!({
            "reflection": "fine",
            "steps": []
        }));
        let report = validate(&schema(), &answers);
        assert!(report.has_issue_at("steps"));
    }

    #[test]
    fn test_group_validity_spans_all_instances() {
        let answers = answers_with(serde_json::json!({
            "reflection": "fine",
            "steps": [{ "what": "call" }, { "what": "" }]
        }));
        let report = validate(&schema(), &answers);
        assert!(report.has_issue_at("steps.1.what"));
        assert!(!report.has_issue_at("steps.0.what"));
    }
}
