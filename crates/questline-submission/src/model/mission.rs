//! The mission record users submit against.

use jiff::Timestamp;
use questline_forms::FormSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A mission as authored by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Unique mission identifier.
    pub id: Uuid,
    /// Mission title.
    pub title: String,
    /// Short description shown on mission cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Step-by-step instructions shown on the mission page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Optional inspiration block shown alongside the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips_inspiration: Option<String>,
    /// EP awarded on approval.
    pub points_value: i32,
    /// Per-user submission cap. `None` means the default of one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_submissions_per_user: Option<u32>,
    /// Authored form schema, stored as raw JSON. Missions created before
    /// dynamic forms existed carry `None` and fall back to the journal
    /// entry textarea.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_schema: Option<serde_json::Value>,
    /// Ordering number within the questline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_number: Option<u32>,
    /// Hero image for the mission page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Timestamp when the mission was created.
    pub created_at: Timestamp,
    /// Timestamp when the mission was last updated.
    pub updated_at: Timestamp,
}

impl Mission {
    /// Decodes the authored schema, if any. A decode failure surfaces as
    /// an error rather than silently falling back, so a corrupted schema
    /// is visible instead of rendering as a bare journal entry.
    pub fn schema(&self) -> Result<Option<FormSchema>> {
        match &self.submission_schema {
            Some(value) => Ok(Some(FormSchema::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Effective per-user submission cap.
    #[must_use]
    pub fn max_submissions(&self) -> u32 {
        self.max_submissions_per_user.unwrap_or(1)
    }

    /// Submissions the user has left, given their current non-draft
    /// count. Drafts do not consume a slot.
    #[must_use]
    pub fn remaining_submissions(&self, existing_non_draft_count: usize) -> u32 {
        u32::try_from(existing_non_draft_count)
            .map(|current| self.max_submissions().saturating_sub(current))
            .unwrap_or(0)
    }

    /// Checks the per-user cap against the user's current non-draft
    /// submission count.
    pub fn check_submission_cap(&self, current: usize) -> Result<()> {
        if self.remaining_submissions(current) == 0 {
            return Err(Error::SubmissionLimit {
                limit: self.max_submissions(),
                current,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission(schema: Option<serde_json::Value>) -> Mission {
        Mission {
            id: Uuid::new_v4(),
            title: "Plant a seed".to_owned(),
            description: None,
            instructions: None,
            tips_inspiration: None,
            points_value: 25,
            max_submissions_per_user: None,
            submission_schema: schema,
            mission_number: Some(3),
            image_url: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_schema_decodes_when_present() {
        let mission = mission(Some(serde_json::json!({
            "version": 1,
            "fields": [
                { "type": "input", "name": "species", "label": "Species", "required": true }
            ]
        })));
        let schema = mission.schema().unwrap().unwrap();
        assert_eq!(schema.fields.len(), 1);
    }

    #[test]
    fn test_schemaless_mission_has_no_schema() {
        assert!(mission(None).schema().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_schema_is_an_error() {
        let mission = mission(Some(serde_json::json!({ "fields": "nope" })));
        assert!(mission.schema().is_err());
    }

    #[test]
    fn test_submission_cap_defaults_to_one() {
        let mut mission = mission(None);
        assert!(mission.check_submission_cap(0).is_ok());
        assert!(matches!(
            mission.check_submission_cap(1).unwrap_err(),
            Error::SubmissionLimit {
                limit: 1,
                current: 1,
            }
        ));

        mission.max_submissions_per_user = Some(3);
        assert!(mission.check_submission_cap(2).is_ok());
        assert!(mission.check_submission_cap(3).is_err());
    }
}
