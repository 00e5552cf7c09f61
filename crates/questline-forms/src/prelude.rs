//! Prelude module for questline-forms.
//!
//! Re-exports the most commonly used types so a single `use` statement
//! covers typical form handling.
//!
//! # Example
//!
//! ```rust,ignore
//! use questline_forms::prelude::*;
//!
//! let mut session = FormSession::open(None, None);
//! session.set_value(&FieldPath::root("journal_entry"), "...")?;
//! ```

pub use crate::answers::{AnswerMap, AnswerValue, Answers};
pub use crate::builder::{FieldKind, SchemaBuilder};
pub use crate::error::{Error, Result};
pub use crate::path::{FieldPath, Segment};
pub use crate::render::{RenderMode, Widget, render};
pub use crate::schema::{FormField, FormSchema, RepeatBounds, SelectOption};
pub use crate::session::FormSession;
pub use crate::validate::{ValidationReport, validate};
