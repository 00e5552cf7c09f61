#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for form session operations.
pub const TRACING_TARGET_SESSION: &str = "questline_forms::session";

/// Tracing target for schema validation.
pub const TRACING_TARGET_VALIDATE: &str = "questline_forms::validate";

mod answers;
mod builder;
mod error;
mod path;
#[doc(hidden)]
pub mod prelude;
mod render;
mod schema;
mod session;
mod validate;

pub use answers::{AnswerMap, AnswerValue, Answers};
pub use builder::{FieldKind, SchemaBuilder};
pub use error::{Error, Result};
pub use path::{FieldPath, Segment};
pub use render::{InputMode, RenderMode, Widget, render};
pub use schema::{
    FormField, FormSchema, GroupField, RepeatBounds, SelectField, SelectOption, TextField,
    TextareaField,
};
pub use session::FormSession;
pub use validate::{IssueKind, ValidationIssue, ValidationReport, validate};
