//! The submission record and its lifecycle.

use jiff::Timestamp;
use questline_forms::Answers;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::TRACING_TARGET_MODEL;
use crate::error::{Error, Result};

/// Lifecycle status of a submission.
///
/// `approved` and `rejected` are set exclusively by a reviewer;
/// everything in this crate only ever produces `draft` and `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Saved progress, not yet submitted for review.
    Draft,
    /// Submitted, awaiting review.
    Pending,
    /// Reviewed and awarded points.
    Approved,
    /// Reviewed and declined.
    Rejected,
}

impl SubmissionStatus {
    /// Check if this is a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Check if a reviewer has already decided on this submission.
    #[must_use]
    pub fn is_reviewed(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A user's response to a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// The mission this responds to.
    pub mission_id: Uuid,
    /// The submitting user.
    pub user_id: Uuid,
    /// Lifecycle status.
    pub status: SubmissionStatus,
    /// Structured answers for schema-driven missions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answers>,
    /// Legacy free-text response for schemaless missions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_submission: Option<String>,
    /// Attached media. Deserialization accepts the legacy wire shapes
    /// (single string, array, JSON-encoded array string).
    #[serde(
        rename = "media_url",
        default,
        deserialize_with = "deserialize_media_urls"
    )]
    pub media_urls: Vec<String>,
    /// EP awarded by review; zero until approved.
    pub points_awarded: i32,
    /// Reviewer-facing note, read-only here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_feedback: Option<String>,
    /// Timestamp when the submission was created.
    pub created_at: Timestamp,
    /// Timestamp when the submission was last updated.
    pub updated_at: Timestamp,
}

impl Submission {
    /// Creates a draft for save-progress.
    pub fn new_draft(mission_id: Uuid, user_id: Uuid, answers: Option<Answers>) -> Self {
        Self::new(mission_id, user_id, answers, SubmissionStatus::Draft)
    }

    /// Creates a submission going straight to review.
    pub fn new_pending(mission_id: Uuid, user_id: Uuid, answers: Option<Answers>) -> Self {
        Self::new(mission_id, user_id, answers, SubmissionStatus::Pending)
    }

    fn new(
        mission_id: Uuid,
        user_id: Uuid,
        answers: Option<Answers>,
        status: SubmissionStatus,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            mission_id,
            user_id,
            status,
            answers,
            text_submission: None,
            media_urls: Vec::new(),
            points_awarded: 0,
            admin_feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Finalizes a draft: `draft → pending`. Any other status is a typed
    /// error.
    pub fn submit_draft(&mut self) -> Result<()> {
        if self.status != SubmissionStatus::Draft {
            return Err(Error::InvalidTransition {
                operation: "submit",
                status: self.status,
            });
        }
        self.status = SubmissionStatus::Pending;
        self.touch();
        tracing::debug!(
            target: TRACING_TARGET_MODEL,
            submission = %self.id,
            "draft submitted for review"
        );
        Ok(())
    }

    /// Re-opens a submission for editing. Editing an approved submission
    /// resets it to `pending` and zeroes the awarded points, forcing
    /// re-review. Returns whether the submission had been approved.
    pub fn begin_edit(&mut self) -> bool {
        let was_approved = self.status == SubmissionStatus::Approved;
        if was_approved {
            tracing::debug!(
                target: TRACING_TARGET_MODEL,
                submission = %self.id,
                points_revoked = self.points_awarded,
                "approved submission re-opened, points reset"
            );
            self.status = SubmissionStatus::Pending;
            self.points_awarded = 0;
            self.touch();
        }
        was_approved
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn deserialize_media_urls<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(questline_media::parse_media_urls(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_submits_to_pending() {
        let mut submission = Submission::new_draft(Uuid::new_v4(), Uuid::new_v4(), None);
        submission.submit_draft().unwrap();
        assert_eq!(submission.status, SubmissionStatus::Pending);

        let err = submission.submit_draft().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                operation: "submit",
                status: SubmissionStatus::Pending,
            }
        ));
    }

    #[test]
    fn test_editing_approved_resets_points_and_status() {
        let mut submission = Submission::new_pending(Uuid::new_v4(), Uuid::new_v4(), None);
        submission.status = SubmissionStatus::Approved;
        submission.points_awarded = 50;

        assert!(submission.begin_edit());
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.points_awarded, 0);

        // Editing a pending submission changes nothing.
        assert!(!submission.begin_edit());
        assert_eq!(submission.status, SubmissionStatus::Pending);
    }

    #[test]
    fn test_status_wire_format_is_snake_case() {
        let json = serde_json::to_value(SubmissionStatus::Pending).unwrap();
        assert_eq!(json, "pending");
        assert_eq!(SubmissionStatus::Draft.to_string(), "draft");
        assert_eq!(
            "approved".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Approved
        );
    }

    #[test]
    fn test_decode_legacy_media_url_shapes() {
        let base = serde_json::json!({
            "id": Uuid::new_v4(),
            "mission_id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "status": "pending",
            "points_awarded": 0,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
        });

        let mut single = base.clone();
        single["media_url"] = "https://cdn.example/a.png".into();
        let submission: Submission = serde_json::from_value(single).unwrap();
        assert_eq!(submission.media_urls, vec!["https://cdn.example/a.png"]);

        let mut array = base.clone();
        array["media_url"] = serde_json::json!(["https://a/1.png", "https://a/2.mp4"]);
        let submission: Submission = serde_json::from_value(array).unwrap();
        assert_eq!(submission.media_urls.len(), 2);

        let submission: Submission = serde_json::from_value(base).unwrap();
        assert!(submission.media_urls.is_empty());
    }
}
