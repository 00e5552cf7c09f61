//! Typed dotted field paths.
//!
//! Answers are addressed by paths like `reflection` or
//! `action_steps.0.step` (group name, instance index, sub-field name).
//! Parsing the dotted string into [`Segment`]s once, at the boundary,
//! removes the string-typo bug class that comes with rebuilding paths by
//! concatenation at every call site.

use std::fmt;

use crate::error::{Error, Result};

/// One component of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A field name.
    Name(String),
    /// A group instance index.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A parsed dotted path into the answer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Parses a dotted path. Purely numeric segments become instance
    /// indices, everything else a field name. Field names therefore must
    /// not be purely numeric; the schema builder never produces such
    /// names.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::invalid_path(path, "empty path"));
        }
        let mut segments = Vec::new();
        for part in path.split('.') {
            if part.is_empty() {
                return Err(Error::invalid_path(path, "empty segment"));
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                let index = part
                    .parse::<usize>()
                    .map_err(|_| Error::invalid_path(path, "index out of range"))?;
                segments.push(Segment::Index(index));
            } else {
                segments.push(Segment::Name(part.to_owned()));
            }
        }
        if matches!(segments.first(), Some(Segment::Index(_))) {
            return Err(Error::invalid_path(path, "path cannot start with an index"));
        }
        Ok(Self(segments))
    }

    /// A single-segment path addressing a top-level field.
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![Segment::Name(name.into())])
    }

    /// Path to sub-field `name` of group instance `index` under this path.
    pub fn instance_field(&self, index: usize, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        segments.push(Segment::Name(name.into()));
        Self(segments)
    }

    /// The path segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The widget id form of this path: dots replaced by underscores.
    pub fn widget_id(&self) -> String {
        self.to_string().replace('.', "_")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_path() {
        let path = FieldPath::parse("reflection").unwrap();
        assert_eq!(path.segments(), &[Segment::Name("reflection".into())]);
    }

    #[test]
    fn test_parse_group_path() {
        let path = FieldPath::parse("action_steps.2.step").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Name("action_steps".into()),
                Segment::Index(2),
                Segment::Name("step".into()),
            ]
        );
        assert_eq!(path.to_string(), "action_steps.2.step");
        assert_eq!(path.widget_id(), "action_steps_2_step");
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse("0.step").is_err());
    }

    #[test]
    fn test_instance_field_builds_nested_path() {
        let path = FieldPath::root("action_steps").instance_field(1, "link");
        assert_eq!(path.to_string(), "action_steps.1.link");
    }
}
