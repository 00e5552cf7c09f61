#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for controller operations.
pub const TRACING_TARGET_CONTROLLER: &str = "questline_submission::controller";

/// Tracing target for lifecycle transitions.
pub const TRACING_TARGET_MODEL: &str = "questline_submission::model";

mod backend;
mod controller;
mod error;
pub mod model;
mod payload;
#[doc(hidden)]
pub mod prelude;
mod view;

pub use backend::SubmissionBackend;
pub use controller::{Outcome, SubmissionController};
pub use error::{BoxedError, Error, Result};
pub use model::{Mission, Submission, SubmissionStatus};
pub use payload::SubmissionPayload;
pub use view::{FormView, MediaItem};
