//! The submit / save-progress controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use questline_forms::{FieldPath, FormSession, RenderMode};
use questline_media::{
    AttachmentSet, ImageCompressor, IncomingFile, MediaKind, MediaLimits, PassthroughCompressor,
};

use crate::TRACING_TARGET_CONTROLLER;
use crate::backend::SubmissionBackend;
use crate::error::{Error, Result};
use crate::model::{Mission, Submission};
use crate::payload::SubmissionPayload;
use crate::view::{FormView, MediaItem};

/// Default submit button label.
const SUBMIT_LABEL: &str = "Submit Activity";

/// Label shown while a submit is in flight.
const SUBMITTING_LABEL: &str = "Submitting...";

/// What happened to a submit or save-progress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran and the backend accepted it.
    Dispatched,
    /// An identical operation was already in flight; nothing was done.
    AlreadyInFlight,
}

/// Form and media state shared under one lock.
struct FormState {
    session: FormSession,
    attachments: AttachmentSet,
}

/// Client-side workflow for one mission form.
///
/// Owns the form session and attachment set behind a mutex, so hosts can
/// edit from `&self`, and persists through the supplied
/// [`SubmissionBackend`]. Submit and save-progress each carry an
/// independent in-flight guard: a duplicate call while one is running
/// returns [`Outcome::AlreadyInFlight`] without reaching the backend.
///
/// The lock is never held across an `.await`; payloads are snapshotted
/// under the lock and the backend call runs without it.
pub struct SubmissionController<B> {
    state: Mutex<FormState>,
    backend: B,
    mission: Mission,
    compressor: Arc<dyn ImageCompressor>,
    // The user's non-draft count, checked against the mission cap on
    // submit; None when resuming an existing submission, which
    // re-submits its own slot.
    prior_non_draft: Option<usize>,
    submit_label: String,
    submitting: AtomicBool,
    saving: AtomicBool,
}

impl<B: SubmissionBackend> SubmissionController<B> {
    /// Opens the controller for `mission`, optionally resuming from an
    /// existing submission (a draft, or an approved one being edited).
    ///
    /// `existing_non_draft_count` is the user's current submission count
    /// for this mission, used to enforce the per-user cap on new
    /// submissions. A corrupt mission schema is surfaced as an error
    /// rather than silently falling back to the journal entry.
    pub fn open(
        mission: &Mission,
        resume: Option<&Submission>,
        existing_non_draft_count: usize,
        backend: B,
    ) -> Result<Self> {
        let schema = mission.schema()?;
        let session = FormSession::open(schema, resume.and_then(|s| s.answers.clone()));
        let attachments = AttachmentSet::with_existing(
            resume.map(|s| s.media_urls.clone()).unwrap_or_default(),
            MediaLimits::default(),
        );
        let prior_non_draft = match resume {
            Some(_) => None,
            None => Some(existing_non_draft_count),
        };

        tracing::debug!(
            target: TRACING_TARGET_CONTROLLER,
            mission = %mission.id,
            resuming = resume.is_some(),
            "controller opened"
        );

        Ok(Self {
            state: Mutex::new(FormState {
                session,
                attachments,
            }),
            backend,
            mission: mission.clone(),
            compressor: Arc::new(PassthroughCompressor),
            prior_non_draft,
            submit_label: SUBMIT_LABEL.to_owned(),
            submitting: AtomicBool::new(false),
            saving: AtomicBool::new(false),
        })
    }

    /// Replaces the image compressor. The default passes bytes through
    /// unchanged; hosts with an encoder install it here.
    pub fn set_compressor(&mut self, compressor: Arc<dyn ImageCompressor>) {
        self.compressor = compressor;
    }

    /// Overrides the submit button text shown in the view.
    pub fn set_submit_label(&mut self, label: impl Into<String>) {
        self.submit_label = label.into();
    }

    /// Writes scalar text at `path`.
    pub fn set_value(&self, path: &FieldPath, text: impl Into<String>) -> Result<()> {
        Ok(self.lock().session.set_value(path, text)?)
    }

    /// The scalar text at `path`, empty when nothing was entered yet.
    pub fn value(&self, path: &FieldPath) -> String {
        self.lock().session.value(path).to_owned()
    }

    /// Appends a blank instance to a top-level group.
    pub fn add_group_instance(&self, name: &str) -> Result<usize> {
        Ok(self.lock().session.add_group_instance(name)?)
    }

    /// Removes instance `index` from a top-level group.
    pub fn remove_group_instance(&self, name: &str, index: usize) -> Result<usize> {
        Ok(self.lock().session.remove_group_instance(name, index)?)
    }

    /// Stages a batch of newly selected files. All-or-nothing per batch.
    pub fn stage_media(&self, files: Vec<IncomingFile>) -> Result<usize> {
        let compressor = Arc::clone(&self.compressor);
        Ok(self
            .lock()
            .attachments
            .stage_batch(files, compressor.as_ref())?)
    }

    /// Removes one staged attachment, revoking its preview.
    pub fn remove_pending_media(&self, index: usize) -> Result<()> {
        Ok(self.lock().attachments.remove_pending(index)?)
    }

    /// Marks a persisted media URL for deletion on the next save.
    pub fn remove_existing_media(&self, url: &str) -> bool {
        self.lock().attachments.remove_existing(url)
    }

    /// Whether a submit is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Whether a save-progress is currently in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Snapshot of the full form for rendering.
    pub fn view(&self) -> FormView {
        let state = self.lock();
        let existing_media = state
            .attachments
            .existing_urls()
            .iter()
            .map(|url| MediaItem {
                url: url.clone(),
                kind: MediaKind::from_url(url),
                file_name: None,
            })
            .collect();
        let pending_media = state
            .attachments
            .pending()
            .iter()
            .map(|attachment| MediaItem {
                url: attachment.preview_url().to_owned(),
                kind: Some(attachment.kind()),
                file_name: Some(attachment.file().file_name.clone()),
            })
            .collect();
        let is_submitting = self.is_submitting();

        FormView {
            widgets: state.session.render(RenderMode::Interactive),
            existing_media,
            pending_media,
            is_submitting,
            is_saving: self.is_saving(),
            submit_label: if is_submitting {
                SUBMITTING_LABEL.to_owned()
            } else {
                self.submit_label.clone()
            },
        }
    }

    /// Validates and submits the form.
    ///
    /// Returns [`Outcome::AlreadyInFlight`] when a submit is already
    /// running. Validation failure blocks the dispatch and returns the
    /// report. On backend failure all staged state is preserved for
    /// retry; on success staged media and removal marks are cleared.
    pub async fn submit(&self) -> Result<Outcome> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            tracing::debug!(
                target: TRACING_TARGET_CONTROLLER,
                "submit ignored, one already in flight"
            );
            return Ok(Outcome::AlreadyInFlight);
        }
        let result = self.dispatch_submit().await;
        self.submitting.store(false, Ordering::SeqCst);
        result.map(|()| Outcome::Dispatched)
    }

    /// Saves the current state as a draft.
    ///
    /// Same guard discipline as [`submit`](Self::submit), but no
    /// validation and staged state is never cleared: drafts keep their
    /// staging until a final submit.
    pub async fn save_progress(&self) -> Result<Outcome> {
        if self.saving.swap(true, Ordering::SeqCst) {
            tracing::debug!(
                target: TRACING_TARGET_CONTROLLER,
                "save ignored, one already in flight"
            );
            return Ok(Outcome::AlreadyInFlight);
        }
        let payload = self.snapshot_payload();
        let result = self
            .backend
            .save_progress(payload)
            .await
            .map_err(|source| Error::backend("save_progress", source));
        self.saving.store(false, Ordering::SeqCst);
        result.map(|()| Outcome::Dispatched)
    }

    async fn dispatch_submit(&self) -> Result<()> {
        if let Some(current) = self.prior_non_draft {
            if let Err(err) = self.mission.check_submission_cap(current) {
                tracing::warn!(
                    target: TRACING_TARGET_CONTROLLER,
                    limit = self.mission.max_submissions(),
                    current,
                    "submit blocked: submission cap reached"
                );
                return Err(err);
            }
        }

        let payload = {
            let state = self.lock();
            let report = state.session.validate();
            if !report.is_valid() {
                tracing::warn!(
                    target: TRACING_TARGET_CONTROLLER,
                    issues = report.issues().len(),
                    "submit blocked by validation"
                );
                return Err(Error::Validation(report));
            }
            Self::payload_of(&state)
        };

        self.backend
            .submit(payload)
            .await
            .map_err(|source| Error::backend("submit", source))?;

        self.lock().attachments.clear_staged();
        tracing::debug!(target: TRACING_TARGET_CONTROLLER, "submission dispatched");
        Ok(())
    }

    fn snapshot_payload(&self) -> SubmissionPayload {
        Self::payload_of(&self.lock())
    }

    fn payload_of(state: &FormState) -> SubmissionPayload {
        SubmissionPayload {
            answers: state.session.snapshot(),
            files: state.attachments.staged_files(),
            removed_media_urls: state.attachments.removed_urls().to_vec(),
        }
    }

    // The state stays consistent under poisoning: every mutation either
    // completes or leaves the previous value in place.
    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
