//! Prelude module for questline-submission.
//!
//! Re-exports the most commonly used types for the submission workflow.
//!
//! # Example
//!
//! ```rust,ignore
//! use questline_submission::prelude::*;
//!
//! let controller = SubmissionController::open(&mission, None, 0, backend)?;
//! controller.submit().await?;
//! ```

pub use crate::backend::SubmissionBackend;
pub use crate::controller::{Outcome, SubmissionController};
pub use crate::error::{BoxedError, Error, Result};
pub use crate::model::{Mission, Submission, SubmissionStatus};
pub use crate::payload::SubmissionPayload;
pub use crate::view::{FormView, MediaItem};
