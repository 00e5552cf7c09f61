//! The typed answer tree.
//!
//! On the wire answers are plain JSON: scalar fields are strings, group
//! fields are arrays of objects keyed by sub-field name. In memory they
//! are a tagged tree ([`AnswerValue`]) so that indexing into a scalar or
//! writing past the end of a group is a typed error instead of silent
//! data corruption.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::{FieldPath, Segment};

/// Per-instance answers of a repeating group, keyed by sub-field name.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// A single answer: scalar text or a list of group instances.
///
/// Untagged serde keeps the wire format identical to the legacy JSON
/// (strings and arrays of objects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Scalar answer for textarea/input/url/select fields.
    Text(String),
    /// Ordered instances of a repeating group.
    Instances(Vec<AnswerMap>),
}

impl AnswerValue {
    /// The scalar text, or `None` for group values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Instances(_) => None,
        }
    }

    /// The group instances, or `None` for scalar values.
    pub fn as_instances(&self) -> Option<&[AnswerMap]> {
        match self {
            Self::Text(_) => None,
            Self::Instances(instances) => Some(instances),
        }
    }
}

/// The complete answer tree for one submission, keyed by top-level
/// field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(AnswerMap);

impl Answers {
    /// Creates an empty answer tree.
    pub fn new() -> Self {
        Self(AnswerMap::new())
    }

    /// Decodes answers from opaque JSON, as stored on a submission record.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns whether no answers have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value at `path`, if present.
    pub fn get(&self, path: &FieldPath) -> Option<&AnswerValue> {
        get_in_map(&self.0, path.segments())
    }

    /// Returns the scalar text at `path`, or the empty string when the
    /// path has no recorded value yet.
    pub fn text(&self, path: &FieldPath) -> &str {
        self.get(path).and_then(AnswerValue::as_text).unwrap_or("")
    }

    /// Writes scalar text at `path`.
    ///
    /// Top-level scalar writes always succeed. Writes under a group
    /// require the addressed instance to exist; group instances are
    /// created through the session's add-instance operation, never as a
    /// side effect of a write.
    pub fn set_text(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<()> {
        set_in_map(&mut self.0, path.segments(), value.into())
    }

    /// The instance list of a top-level group, if recorded.
    pub fn group(&self, name: &str) -> Option<&[AnswerMap]> {
        self.0.get(name).and_then(AnswerValue::as_instances)
    }

    /// Number of recorded instances of a top-level group.
    pub fn group_len(&self, name: &str) -> usize {
        self.group(name).map_or(0, <[AnswerMap]>::len)
    }

    /// Replaces (or creates) a top-level group's instance list.
    pub fn set_group(&mut self, name: impl Into<String>, instances: Vec<AnswerMap>) {
        self.0
            .insert(name.into(), AnswerValue::Instances(instances));
    }

    /// Appends an instance to a top-level group, creating the group entry
    /// when absent. Returns the new instance count.
    pub fn push_instance(&mut self, name: &str, instance: AnswerMap) -> Result<usize> {
        let entry = self
            .0
            .entry(name.to_owned())
            .or_insert_with(|| AnswerValue::Instances(Vec::new()));
        match entry {
            AnswerValue::Instances(instances) => {
                instances.push(instance);
                Ok(instances.len())
            }
            AnswerValue::Text(_) => Err(Error::NotAGroup {
                name: name.to_owned(),
            }),
        }
    }

    /// Removes instance `index` from a top-level group, shifting later
    /// instances down. Returns the new instance count.
    pub fn remove_instance(&mut self, name: &str, index: usize) -> Result<usize> {
        match self.0.get_mut(name) {
            Some(AnswerValue::Instances(instances)) => {
                if index >= instances.len() {
                    return Err(Error::InstanceOutOfRange {
                        group: name.to_owned(),
                        index,
                        len: instances.len(),
                    });
                }
                instances.remove(index);
                Ok(instances.len())
            }
            Some(AnswerValue::Text(_)) => Err(Error::NotAGroup {
                name: name.to_owned(),
            }),
            None => Err(Error::unknown_field(name)),
        }
    }

    /// Iterates over the top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<AnswerMap> for Answers {
    fn from(map: AnswerMap) -> Self {
        Self(map)
    }
}

fn get_in_map<'a>(map: &'a AnswerMap, segments: &[Segment]) -> Option<&'a AnswerValue> {
    match segments {
        [Segment::Name(name)] => map.get(name),
        [Segment::Name(name), Segment::Index(index), rest @ ..] if !rest.is_empty() => {
            match map.get(name)? {
                AnswerValue::Instances(instances) => get_in_map(instances.get(*index)?, rest),
                AnswerValue::Text(_) => None,
            }
        }
        _ => None,
    }
}

fn set_in_map(map: &mut AnswerMap, segments: &[Segment], value: String) -> Result<()> {
    match segments {
        [Segment::Name(name)] => {
            map.insert(name.clone(), AnswerValue::Text(value));
            Ok(())
        }
        [Segment::Name(name), Segment::Index(index), rest @ ..] if !rest.is_empty() => {
            let entry = map
                .get_mut(name)
                .ok_or_else(|| Error::unknown_field(name.clone()))?;
            match entry {
                AnswerValue::Instances(instances) => {
                    let len = instances.len();
                    let instance =
                        instances
                            .get_mut(*index)
                            .ok_or_else(|| Error::InstanceOutOfRange {
                                group: name.clone(),
                                index: *index,
                                len,
                            })?;
                    set_in_map(instance, rest, value)
                }
                AnswerValue::Text(_) => Err(Error::NotAGroup { name: name.clone() }),
            }
        }
        segments => {
            let path = segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".");
            Err(Error::invalid_path(path, "unsupported path shape"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps_answers() -> Answers {
        let mut answers = Answers::new();
        answers
            .set_text(&FieldPath::root("reflection"), "Learned a lot")
            .unwrap();
        let mut first = AnswerMap::new();
        first.insert("step".into(), AnswerValue::Text("Draft plan".into()));
        let mut second = AnswerMap::new();
        second.insert("step".into(), AnswerValue::Text("Share plan".into()));
        answers.set_group("action_steps", vec![first, second]);
        answers
    }

    #[test]
    fn test_text_reads_empty_for_absent_paths() {
        let answers = Answers::new();
        assert_eq!(answers.text(&FieldPath::root("missing")), "");
    }

    #[test]
    fn test_set_and_get_nested_text() {
        let mut answers = steps_answers();
        let path = FieldPath::parse("action_steps.1.step").unwrap();
        assert_eq!(answers.text(&path), "Share plan");

        answers.set_text(&path, "Publish plan").unwrap();
        assert_eq!(answers.text(&path), "Publish plan");
    }

    #[test]
    fn test_write_past_group_end_is_an_error() {
        let mut answers = steps_answers();
        let path = FieldPath::parse("action_steps.5.step").unwrap();
        let err = answers.set_text(&path, "nope").unwrap_err();
        assert!(matches!(err, Error::InstanceOutOfRange { index: 5, .. }));
    }

    #[test]
    fn test_indexing_into_scalar_is_an_error() {
        let mut answers = steps_answers();
        let path = FieldPath::parse("reflection.0.step").unwrap();
        let err = answers.set_text(&path, "nope").unwrap_err();
        assert!(matches!(err, Error::NotAGroup { .. }));
    }

    #[test]
    fn test_remove_instance_shifts_indices() {
        let mut answers = steps_answers();
        let remaining = answers.remove_instance("action_steps", 0).unwrap();
        assert_eq!(remaining, 1);
        let path = FieldPath::parse("action_steps.0.step").unwrap();
        assert_eq!(answers.text(&path), "Share plan");
    }

    #[test]
    fn test_wire_roundtrip_preserves_nesting() {
        let answers = steps_answers();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["reflection"], "Learned a lot");
        assert_eq!(json["action_steps"][0]["step"], "Draft plan");

        let back = Answers::from_value(json).unwrap();
        assert_eq!(back, answers);
    }
}
