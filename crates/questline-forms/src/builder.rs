//! Interactive schema authoring.
//!
//! [`SchemaBuilder`] is the admin-side counterpart of the session: it
//! assembles a [`FormSchema`] field by field, with the defaults the admin
//! dashboard seeds (three-row/1000-character textareas, two starter
//! options on selects, `1..=5` repeat bounds on groups). The
//! builder enforces only what its operations require; cross-field
//! consistency such as duplicate names is left to the author.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::render::{RenderMode, Widget};
use crate::schema::{
    FormField, FormSchema, GroupField, RepeatBounds, SelectField, SelectOption, TextField,
    TextareaField,
};
use crate::session::FormSession;

/// The authorable field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Textarea,
    Input,
    Url,
    Select,
    Group,
}

impl FieldKind {
    fn default_label(self) -> String {
        let name = self.as_ref();
        let mut label = String::from("New ");
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            label.extend(first.to_uppercase());
            label.push_str(chars.as_str());
        }
        label
    }
}

/// Builds a [`FormSchema`] through discrete edit operations.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    schema: FormSchema,
    next_field_id: usize,
}

impl SchemaBuilder {
    /// Starts from an empty version-1 schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes editing an existing schema.
    pub fn from_schema(schema: FormSchema) -> Self {
        let next_field_id = schema.fields.len();
        Self {
            schema,
            next_field_id,
        }
    }

    /// The schema as currently authored.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.schema.fields.len()
    }

    /// Returns whether no fields have been added.
    pub fn is_empty(&self) -> bool {
        self.schema.fields.is_empty()
    }

    /// Appends a new field of `kind` with default properties and a
    /// generated unique name. Selects are seeded with two starter
    /// options. Returns the field's index.
    pub fn add_field(&mut self, kind: FieldKind) -> usize {
        let options = starter_options(2);
        let field = self.default_field(kind, options);
        self.schema.fields.push(field);
        self.schema.fields.len() - 1
    }

    /// The field at `index`, if any.
    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.schema.fields.get(index)
    }

    /// Removes the field at `index`.
    pub fn remove_field(&mut self, index: usize) -> Result<FormField> {
        self.check_index(index)?;
        Ok(self.schema.fields.remove(index))
    }

    /// Swaps the field at `index` with its predecessor. A no-op at the
    /// first position.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index > 0 {
            self.schema.fields.swap(index, index - 1);
        }
        Ok(())
    }

    /// Swaps the field at `index` with its successor. A no-op at the
    /// last position.
    pub fn move_down(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index + 1 < self.schema.fields.len() {
            self.schema.fields.swap(index, index + 1);
        }
        Ok(())
    }

    /// Renames the field at `index`.
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.with_field(index, |field| {
            *field_name_mut(field) = name.into();
        })
    }

    /// Relabels the field at `index`.
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        self.with_field(index, |field| {
            *field_label_mut(field) = label.into();
        })
    }

    /// Toggles the required flag of the field at `index`.
    pub fn set_required(&mut self, index: usize, required: bool) -> Result<()> {
        self.with_field(index, |field| match field {
            FormField::Textarea(f) => f.required = required,
            FormField::Input(f) | FormField::Url(f) => f.required = required,
            FormField::Select(f) => f.required = required,
            FormField::Group(f) => f.required = required,
        })
    }

    /// Sets or clears the helper text of the field at `index`.
    pub fn set_helper_text(&mut self, index: usize, text: Option<String>) -> Result<()> {
        let text = text.filter(|t| !t.is_empty());
        self.with_field(index, |field| match field {
            FormField::Textarea(f) => f.helper_text = text,
            FormField::Input(f) | FormField::Url(f) => f.helper_text = text,
            FormField::Select(f) => f.helper_text = text,
            FormField::Group(f) => f.helper_text = text,
        })
    }

    /// Sets the row/length bounds of a textarea field.
    pub fn set_textarea_bounds(
        &mut self,
        index: usize,
        min_rows: Option<u32>,
        max_length: Option<usize>,
    ) -> Result<()> {
        let f = self.textarea_mut(index)?;
        f.min_rows = min_rows;
        f.max_length = max_length;
        Ok(())
    }

    /// Appends a numbered starter option to a select field.
    pub fn add_select_option(&mut self, index: usize) -> Result<usize> {
        let f = self.select_mut(index)?;
        let n = f.options.len() + 1;
        f.options.push(SelectOption {
            label: format!("Option {n}"),
            value: format!("option{n}"),
        });
        Ok(f.options.len() - 1)
    }

    /// Updates the label and/or value of one select option.
    pub fn update_select_option(
        &mut self,
        index: usize,
        option: usize,
        label: Option<String>,
        value: Option<String>,
    ) -> Result<()> {
        let f = self.select_mut(index)?;
        let len = f.options.len();
        let opt = f
            .options
            .get_mut(option)
            .ok_or(Error::FieldIndexOutOfRange { index: option, len })?;
        if let Some(label) = label {
            opt.label = label;
        }
        if let Some(value) = value {
            opt.value = value;
        }
        Ok(())
    }

    /// Removes one select option.
    pub fn remove_select_option(&mut self, index: usize, option: usize) -> Result<()> {
        let f = self.select_mut(index)?;
        if option >= f.options.len() {
            return Err(Error::FieldIndexOutOfRange {
                index: option,
                len: f.options.len(),
            });
        }
        f.options.remove(option);
        Ok(())
    }

    /// Sets the repeat bounds of a group field.
    pub fn set_repeat_bounds(&mut self, index: usize, min: usize, max: usize) -> Result<()> {
        let f = self.group_mut(index)?;
        f.repeat = RepeatBounds { min, max };
        Ok(())
    }

    /// Appends a sub-field of `kind` to a group field. Sub-field selects
    /// start with no options. Returns the sub-field index within the
    /// group.
    pub fn add_group_subfield(&mut self, index: usize, kind: FieldKind) -> Result<usize> {
        let sub = self.default_field(kind, Vec::new());
        let f = self.group_mut(index)?;
        f.fields.push(sub);
        Ok(f.fields.len() - 1)
    }

    /// Drops all fields, returning to an empty schema.
    pub fn clear(&mut self) {
        self.schema = FormSchema::new();
    }

    /// Renders the in-progress schema through the form session in
    /// preview mode, exactly as submitters will see it.
    pub fn preview(&self) -> Vec<Widget> {
        let session = FormSession::open(Some(self.schema.clone()), None);
        session.render(RenderMode::Preview)
    }

    /// Finishes authoring. An empty field list yields `None`, which
    /// callers persist as "no schema" (the fallback journal form).
    pub fn finish(&self) -> Option<FormSchema> {
        if self.schema.fields.is_empty() {
            None
        } else {
            Some(self.schema.clone())
        }
    }

    /// The persisted JSON for the authored schema, `None` when empty.
    pub fn to_json(&self) -> Result<Option<String>> {
        self.finish()
            .map(|schema| serde_json::to_string(&schema).map_err(Error::from))
            .transpose()
    }

    /// Builds a field of `kind` with default properties, a generated
    /// unique name, and the given select options (ignored for other
    /// kinds).
    fn default_field(&mut self, kind: FieldKind, options: Vec<SelectOption>) -> FormField {
        let name = format!("field_{}", self.next_field_id);
        self.next_field_id += 1;
        let label = kind.default_label();
        match kind {
            FieldKind::Textarea => FormField::Textarea(TextareaField {
                name,
                label,
                required: false,
                helper_text: None,
                min_rows: Some(3),
                max_length: Some(1000),
            }),
            FieldKind::Input => FormField::Input(TextField {
                name,
                label,
                required: false,
                helper_text: None,
                max_length: None,
            }),
            FieldKind::Url => FormField::Url(TextField {
                name,
                label,
                required: false,
                helper_text: None,
                max_length: None,
            }),
            FieldKind::Select => FormField::Select(SelectField {
                name,
                label,
                required: false,
                helper_text: None,
                options,
            }),
            FieldKind::Group => FormField::Group(GroupField {
                name,
                label,
                required: false,
                helper_text: None,
                fields: Vec::new(),
                repeat: RepeatBounds { min: 1, max: 5 },
            }),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.schema.fields.len();
        if index >= len {
            return Err(Error::FieldIndexOutOfRange { index, len });
        }
        Ok(())
    }

    fn with_field(&mut self, index: usize, edit: impl FnOnce(&mut FormField)) -> Result<()> {
        let len = self.schema.fields.len();
        let field = self
            .schema
            .fields
            .get_mut(index)
            .ok_or(Error::FieldIndexOutOfRange { index, len })?;
        edit(field);
        Ok(())
    }

    fn textarea_mut(&mut self, index: usize) -> Result<&mut TextareaField> {
        let len = self.schema.fields.len();
        match self.schema.fields.get_mut(index) {
            Some(FormField::Textarea(f)) => Ok(f),
            Some(field) => Err(Error::FieldTypeMismatch {
                name: field.name().to_owned(),
                actual: field.type_name(),
                expected: "textarea",
            }),
            None => Err(Error::FieldIndexOutOfRange { index, len }),
        }
    }

    fn select_mut(&mut self, index: usize) -> Result<&mut SelectField> {
        let len = self.schema.fields.len();
        match self.schema.fields.get_mut(index) {
            Some(FormField::Select(f)) => Ok(f),
            Some(field) => Err(Error::FieldTypeMismatch {
                name: field.name().to_owned(),
                actual: field.type_name(),
                expected: "select",
            }),
            None => Err(Error::FieldIndexOutOfRange { index, len }),
        }
    }

    fn group_mut(&mut self, index: usize) -> Result<&mut GroupField> {
        let len = self.schema.fields.len();
        match self.schema.fields.get_mut(index) {
            Some(FormField::Group(f)) => Ok(f),
            Some(field) => Err(Error::FieldTypeMismatch {
                name: field.name().to_owned(),
                actual: field.type_name(),
                expected: "group",
            }),
            None => Err(Error::FieldIndexOutOfRange { index, len }),
        }
    }
}

fn starter_options(count: usize) -> Vec<SelectOption> {
    (1..=count)
        .map(|n| SelectOption {
            label: format!("Option {n}"),
            value: format!("option{n}"),
        })
        .collect()
}

fn field_name_mut(field: &mut FormField) -> &mut String {
    match field {
        FormField::Textarea(f) => &mut f.name,
        FormField::Input(f) | FormField::Url(f) => &mut f.name,
        FormField::Select(f) => &mut f.name,
        FormField::Group(f) => &mut f.name,
    }
}

fn field_label_mut(field: &mut FormField) -> &mut String {
    match field {
        FormField::Textarea(f) => &mut f.label,
        FormField::Input(f) | FormField::Url(f) => &mut f.label,
        FormField::Select(f) => &mut f.label,
        FormField::Group(f) => &mut f.label,
    }
}
