//! Submission domain model: missions, submissions, and their lifecycle.

mod mission;
mod submission;

pub use mission::Mission;
pub use submission::{Submission, SubmissionStatus};
