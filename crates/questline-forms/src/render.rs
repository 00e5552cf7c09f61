//! Headless widget tree.
//!
//! Rendering is a pure function of the session state: it produces a
//! declarative tree of [`Widget`]s carrying everything a front end needs
//! to paint the form (bound paths, current values, character budgets,
//! repeat controls). No UI toolkit is involved here.

use serde::Serialize;

use crate::path::FieldPath;
use crate::schema::{FormField, SelectOption};
use crate::session::FormSession;

/// How the tree is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Normal interactive form.
    #[default]
    Interactive,
    /// Inert rendering for the builder's live preview and read-only
    /// views: every widget is disabled.
    Preview,
}

impl RenderMode {
    fn disabled(self) -> bool {
        matches!(self, Self::Preview)
    }
}

/// Single-line input flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    Url,
}

/// One renderable form element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum Widget {
    Textarea {
        id: String,
        path: String,
        label: String,
        required: bool,
        helper_text: Option<String>,
        value: String,
        min_rows: u32,
        max_length: Option<usize>,
        /// Characters left before `max_length`, when bounded.
        remaining: Option<usize>,
        disabled: bool,
    },
    Input {
        id: String,
        path: String,
        label: String,
        required: bool,
        helper_text: Option<String>,
        value: String,
        mode: InputMode,
        max_length: Option<usize>,
        disabled: bool,
    },
    Select {
        id: String,
        path: String,
        label: String,
        required: bool,
        helper_text: Option<String>,
        /// The selected option's `value` (not its label).
        value: String,
        options: Vec<SelectOption>,
        disabled: bool,
    },
    Group {
        path: String,
        label: String,
        required: bool,
        helper_text: Option<String>,
        /// Whether the add-instance control is enabled.
        can_add: bool,
        /// Whether the remove-instance controls are enabled.
        can_remove: bool,
        /// Child widgets, one `Vec` per instance.
        instances: Vec<Vec<Widget>>,
        disabled: bool,
    },
}

/// Renders the session's schema and answers as a widget tree.
pub fn render(session: &FormSession, mode: RenderMode) -> Vec<Widget> {
    session
        .schema()
        .fields
        .iter()
        .map(|field| render_field(session, field, FieldPath::root(field.name()), true, mode))
        .collect()
}

fn render_field(
    session: &FormSession,
    field: &FormField,
    path: FieldPath,
    top_level: bool,
    mode: RenderMode,
) -> Widget {
    let disabled = mode.disabled();

    match field {
        FormField::Textarea(f) => {
            let value = session.value(&path).to_owned();
            let remaining = f
                .max_length
                .map(|max| max.saturating_sub(value.chars().count()));
            Widget::Textarea {
                id: path.widget_id(),
                path: path.to_string(),
                label: f.label.clone(),
                required: f.required,
                helper_text: f.helper_text.clone(),
                value,
                min_rows: f.min_rows.unwrap_or(3),
                max_length: f.max_length,
                remaining,
                disabled,
            }
        }
        FormField::Input(f) | FormField::Url(f) => Widget::Input {
            id: path.widget_id(),
            path: path.to_string(),
            label: f.label.clone(),
            required: f.required,
            helper_text: f.helper_text.clone(),
            value: session.value(&path).to_owned(),
            mode: if matches!(field, FormField::Url(_)) {
                InputMode::Url
            } else {
                InputMode::Text
            },
            max_length: f.max_length,
            disabled,
        },
        FormField::Select(f) => Widget::Select {
            id: path.widget_id(),
            path: path.to_string(),
            label: f.label.clone(),
            required: f.required,
            helper_text: f.helper_text.clone(),
            value: session.value(&path).to_owned(),
            options: f.options.clone(),
            disabled,
        },
        FormField::Group(group) => {
            // Repeat controls only apply to top-level groups; nested
            // groups render their recorded instances as-is.
            let count = if top_level {
                session.instance_count(&group.name)
            } else {
                session
                    .answers()
                    .get(&path)
                    .and_then(|v| v.as_instances())
                    .map_or(0, <[_]>::len)
            };
            let instances = (0..count)
                .map(|index| {
                    group
                        .fields
                        .iter()
                        .map(|sub| {
                            let sub_path = path.instance_field(index, sub.name());
                            render_field(session, sub, sub_path, false, mode)
                        })
                        .collect()
                })
                .collect();
            Widget::Group {
                path: path.to_string(),
                label: group.label.clone(),
                required: group.required,
                helper_text: group.helper_text.clone(),
                can_add: !disabled && top_level && session.can_add_instance(&group.name),
                can_remove: !disabled && top_level && session.can_remove_instance(&group.name),
                instances,
                disabled,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FormSchema;

    fn session() -> FormSession {
        let schema = FormSchema::from_value(serde_json::json!({
            "version": 1,
            "fields": [
                { "type": "textarea", "name": "reflection", "label": "Reflection",
                  "required": true, "maxLength": 10 },
                { "type": "group", "name": "steps", "label": "Step",
                  "fields": [
                      { "type": "input", "name": "what", "label": "What" }
                  ],
                  "repeat": { "min": 1, "max": 2 } }
            ]
        }))
        .unwrap();
        FormSession::open(Some(schema), None)
    }

    #[test]
    fn test_render_reports_remaining_characters() {
        let mut session = session();
        session
            .set_value(&FieldPath::root("reflection"), "1234567")
            .unwrap();
        let widgets = render(&session, RenderMode::Interactive);
        let Widget::Textarea { remaining, id, .. } = &widgets[0] else {
            panic!("expected textarea");
        };
        assert_eq!(*remaining, Some(3));
        assert_eq!(id, "reflection");
    }

    #[test]
    fn test_group_controls_follow_bounds() {
        let mut session = session();
        let widgets = render(&session, RenderMode::Interactive);
        let Widget::Group {
            can_add,
            can_remove,
            instances,
            ..
        } = &widgets[1]
        else {
            panic!("expected group");
        };
        assert!(*can_add);
        assert!(!*can_remove);
        assert_eq!(instances.len(), 1);

        session.add_group_instance("steps").unwrap();
        let widgets = render(&session, RenderMode::Interactive);
        let Widget::Group {
            can_add,
            can_remove,
            instances,
            ..
        } = &widgets[1]
        else {
            panic!("expected group");
        };
        assert!(!*can_add);
        assert!(*can_remove);
        assert_eq!(instances.len(), 2);
    }

    #[test]
    fn test_preview_disables_everything() {
        let session = session();
        for widget in render(&session, RenderMode::Preview) {
            match widget {
                Widget::Textarea { disabled, .. } | Widget::Input { disabled, .. } => {
                    assert!(disabled)
                }
                Widget::Select { disabled, .. } => assert!(disabled),
                Widget::Group {
                    disabled, can_add, ..
                } => {
                    assert!(disabled);
                    assert!(!can_add);
                }
            }
        }
    }

    #[test]
    fn test_nested_paths_use_dotted_ids() {
        let session = session();
        let widgets = render(&session, RenderMode::Interactive);
        let Widget::Group { instances, .. } = &widgets[1] else {
            panic!("expected group");
        };
        let Widget::Input { id, path, .. } = &instances[0][0] else {
            panic!("expected input");
        };
        assert_eq!(path, "steps.0.what");
        assert_eq!(id, "steps_0_what");
    }
}
