//! The form session state machine.
//!
//! A [`FormSession`] owns the answer tree for one mounted form: it seeds
//! repeating groups to their minimum instance count exactly once at open,
//! routes all reads and writes through typed paths, and keeps the
//! instance count and the answer array of every top-level group in
//! lockstep.

use std::collections::BTreeMap;

use crate::TRACING_TARGET_SESSION;
use crate::answers::Answers;
use crate::error::Result;
use crate::path::FieldPath;
use crate::schema::{self, FormField, FormSchema, TextareaField};
use crate::validate::{ValidationReport, validate};
use crate::{Error, render};

/// Field name used when a mission has no authored schema.
pub(crate) const FALLBACK_FIELD: &str = "journal_entry";

/// Interactive state for one schema-described form.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    fallback: bool,
    answers: Answers,
    instances: BTreeMap<String, usize>,
}

impl FormSession {
    /// Opens a session over `schema`, optionally resuming from previously
    /// saved answers (a draft or an edit of an existing submission).
    ///
    /// `None` selects the fallback mode: a single required journal-entry
    /// textarea, matching missions authored before dynamic forms existed.
    ///
    /// Group seeding happens here and only here. Every top-level group is
    /// topped up to at least `repeat.min` blank instances; resumed answers
    /// with more instances keep them (capped at `repeat.max`).
    pub fn open(schema: Option<FormSchema>, initial_answers: Option<Answers>) -> Self {
        let (schema, fallback) = match schema {
            Some(schema) => (schema, false),
            None => (fallback_schema(), true),
        };
        let mut answers = initial_answers.unwrap_or_default();
        let mut instances = BTreeMap::new();

        for field in &schema.fields {
            let Some(group) = field.as_group() else {
                continue;
            };
            let mut existing: Vec<_> = answers
                .group(group.name.as_str())
                .map(<[_]>::to_vec)
                .unwrap_or_default();
            existing.truncate(group.repeat.max);
            while existing.len() < group.repeat.min {
                existing.push(group.blank_instance());
            }
            instances.insert(group.name.clone(), existing.len());
            answers.set_group(group.name.clone(), existing);
        }

        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            fields = schema.fields.len(),
            fallback,
            "form session opened"
        );

        Self {
            schema,
            fallback,
            answers,
            instances,
        }
    }

    /// The schema this session renders. In fallback mode this is the
    /// synthetic journal-entry schema.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Whether the session is running in the schemaless fallback mode.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Read access to the current answers.
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Clones the current answers for handoff to a submit or
    /// save-progress call.
    pub fn snapshot(&self) -> Answers {
        self.answers.clone()
    }

    /// The scalar text at `path`, empty when nothing was entered yet.
    pub fn value(&self, path: &FieldPath) -> &str {
        self.answers.text(path)
    }

    /// Writes scalar text at `path`.
    pub fn set_value(&mut self, path: &FieldPath, text: impl Into<String>) -> Result<()> {
        self.answers.set_text(path, text)
    }

    /// Current instance count of a top-level group.
    pub fn instance_count(&self, group: &str) -> usize {
        self.instances.get(group).copied().unwrap_or(0)
    }

    /// Appends a blank instance to a top-level group.
    ///
    /// Fails with [`Error::GroupAtMax`] once the count reaches
    /// `repeat.max`. Returns the new instance count.
    pub fn add_group_instance(&mut self, name: &str) -> Result<usize> {
        let group = schema::top_level_group(&self.schema, name)?;
        let count = self.instance_count(name);
        if count >= group.repeat.max {
            return Err(Error::GroupAtMax {
                group: name.to_owned(),
                max: group.repeat.max,
            });
        }
        let blank = group.blank_instance();
        let new_count = self.answers.push_instance(name, blank)?;
        self.instances.insert(name.to_owned(), new_count);
        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            group = name,
            count = new_count,
            "group instance added"
        );
        Ok(new_count)
    }

    /// Removes instance `index` from a top-level group, shifting later
    /// indices down so the answer array never has gaps.
    ///
    /// Fails with [`Error::GroupAtMin`] once the count is at
    /// `repeat.min`. Returns the new instance count.
    pub fn remove_group_instance(&mut self, name: &str, index: usize) -> Result<usize> {
        let group = schema::top_level_group(&self.schema, name)?;
        let count = self.instance_count(name);
        if count <= group.repeat.min {
            return Err(Error::GroupAtMin {
                group: name.to_owned(),
                min: group.repeat.min,
            });
        }
        let new_count = self.answers.remove_instance(name, index)?;
        self.instances.insert(name.to_owned(), new_count);
        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            group = name,
            index,
            count = new_count,
            "group instance removed"
        );
        Ok(new_count)
    }

    /// Whether another instance can be added to a top-level group.
    pub fn can_add_instance(&self, name: &str) -> bool {
        schema::top_level_group(&self.schema, name)
            .is_ok_and(|group| self.instance_count(name) < group.repeat.max)
    }

    /// Whether an instance can be removed from a top-level group.
    pub fn can_remove_instance(&self, name: &str) -> bool {
        schema::top_level_group(&self.schema, name)
            .is_ok_and(|group| self.instance_count(name) > group.repeat.min)
    }

    /// Validates the current answers against the schema.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.schema, &self.answers)
    }

    /// Renders the current state as a headless widget tree.
    pub fn render(&self, mode: render::RenderMode) -> Vec<render::Widget> {
        render::render(self, mode)
    }
}

fn fallback_schema() -> FormSchema {
    FormSchema {
        version: 1,
        fields: vec![FormField::Textarea(TextareaField {
            name: FALLBACK_FIELD.to_owned(),
            label: "Your Journal Entry".to_owned(),
            required: true,
            helper_text: Some("Share your experience, thoughts, and reflections...".to_owned()),
            min_rows: Some(4),
            max_length: None,
        })],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FormSchema {
        FormSchema::from_value(serde_json::json!({
            "version": 1,
            "fields": [
                { "type": "textarea", "name": "reflection", "label": "Reflection", "required": true },
                { "type": "group", "name": "steps", "label": "Step",
                  "fields": [
                      { "type": "input", "name": "what", "label": "What", "required": true }
                  ],
                  "repeat": { "min": 2, "max": 4 } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_open_seeds_groups_to_min() {
        let session = FormSession::open(Some(schema()), None);
        assert_eq!(session.instance_count("steps"), 2);
        assert_eq!(session.answers().group_len("steps"), 2);
        assert_eq!(
            session.value(&FieldPath::parse("steps.1.what").unwrap()),
            ""
        );
    }

    #[test]
    fn test_open_keeps_resumed_instances() {
        let initial = Answers::from_value(serde_json::json!({
            "steps": [{ "what": "a" }, { "what": "b" }, { "what": "c" }]
        }))
        .unwrap();
        let session = FormSession::open(Some(schema()), Some(initial));
        assert_eq!(session.instance_count("steps"), 3);
        assert_eq!(
            session.value(&FieldPath::parse("steps.2.what").unwrap()),
            "c"
        );
    }

    #[test]
    fn test_add_instance_bounded_by_max() {
        let mut session = FormSession::open(Some(schema()), None);
        assert_eq!(session.add_group_instance("steps").unwrap(), 3);
        assert_eq!(session.add_group_instance("steps").unwrap(), 4);
        assert!(!session.can_add_instance("steps"));
        assert!(matches!(
            session.add_group_instance("steps").unwrap_err(),
            Error::GroupAtMax { max: 4, .. }
        ));
    }

    #[test]
    fn test_remove_instance_bounded_by_min() {
        let mut session = FormSession::open(Some(schema()), None);
        assert!(!session.can_remove_instance("steps"));
        assert!(matches!(
            session.remove_group_instance("steps", 0).unwrap_err(),
            Error::GroupAtMin { min: 2, .. }
        ));
    }

    #[test]
    fn test_count_and_answers_never_drift() {
        let mut session = FormSession::open(Some(schema()), None);
        session.add_group_instance("steps").unwrap();
        session
            .set_value(&FieldPath::parse("steps.2.what").unwrap(), "third")
            .unwrap();
        session.remove_group_instance("steps", 0).unwrap();
        session.add_group_instance("steps").unwrap();

        assert_eq!(
            session.instance_count("steps"),
            session.answers().group_len("steps")
        );
        // Removal shifted the filled instance down by one.
        assert_eq!(
            session.value(&FieldPath::parse("steps.1.what").unwrap()),
            "third"
        );
    }

    #[test]
    fn test_fallback_mode_renders_journal_entry() {
        let mut session = FormSession::open(None, None);
        assert!(session.is_fallback());
        assert!(session.schema().field(FALLBACK_FIELD).is_some());

        let report = session.validate();
        assert!(report.has_issue_at(FALLBACK_FIELD));

        session
            .set_value(&FieldPath::root(FALLBACK_FIELD), "Today I learned...")
            .unwrap();
        assert!(session.validate().is_valid());
    }

    #[test]
    fn test_select_value_not_label_roundtrip() {
        let schema = FormSchema::from_value(serde_json::json!({
            "version": 1,
            "fields": [
                { "type": "select", "name": "mood", "label": "Mood",
                  "options": [
                      { "label": "Energized", "value": "energized" },
                      { "label": "Neutral", "value": "neutral" },
                      { "label": "Drained", "value": "drained" }
                  ] }
            ]
        }))
        .unwrap();
        let mut session = FormSession::open(Some(schema), None);
        let path = FieldPath::root("mood");
        session.set_value(&path, "drained").unwrap();
        assert_eq!(session.value(&path), "drained");
        assert!(session.validate().is_valid());
    }
}
