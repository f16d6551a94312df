//! Form description types and HTML rendering.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use crate::html::escape_html;

/// Attribute rendered as the field's `<label>` instead of an element attribute.
const LABEL_ATTR: &str = "label";

/// Editor form error.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Field name is empty.
    #[error("field name cannot be empty")]
    EmptyName,
    /// Two fields share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    /// Checkbox group declared without options.
    #[error("checkbox field {0} has no options")]
    NoOptions(String),
    /// Attribute name would produce invalid markup.
    #[error("invalid attribute {attr:?} on field {field}")]
    InvalidAttribute {
        /// Field name.
        field: String,
        /// Offending attribute name.
        attr: String,
    },
    /// Writing markup failed.
    #[error("failed to write editor markup: {0}")]
    Write(#[from] std::fmt::Error),
    /// Rendering the editor of a content type failed.
    #[error("Failed to render {item_type} editor view: {source}")]
    Render {
        /// Content type whose editor failed.
        item_type: String,
        /// Underlying form error.
        #[source]
        source: Box<EditorError>,
    },
}

impl EditorError {
    /// Wrap a form error with the content type it was rendered for.
    #[must_use]
    pub fn render_failed(item_type: impl Into<String>, source: EditorError) -> Self {
        Self::Render {
            item_type: item_type.into(),
            source: Box::new(source),
        }
    }
}

/// A content type that can describe its own admin editing form.
pub trait Editable {
    /// Render the editor form for this value as an HTML fragment.
    fn marshal_editor(&self) -> Result<Vec<u8>, EditorError>;
}

/// How a field is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldView {
    /// Single-line `<input>`.
    Input,
    /// Multi-line `<textarea>`.
    Textarea,
    /// Checkbox group; each option is `(value, label)`.
    Checkbox {
        /// Available options.
        options: Vec<(String, String)>,
    },
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    value: String,
    view: FieldView,
    attrs: BTreeMap<String, String>,
}

impl Field {
    /// Single-line text input. Defaults to `type="text"`.
    #[must_use]
    pub fn input(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldView::Input).attr("type", "text")
    }

    /// Multi-line text area.
    #[must_use]
    pub fn textarea(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldView::Textarea)
    }

    /// Checkbox group. An option is checked when its value equals the
    /// field's current value (`"true"` or `"false"`).
    #[must_use]
    pub fn checkbox<I, V, L>(name: impl Into<String>, checked: bool, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|(value, label)| (value.into(), label.into()))
            .collect();
        Self::new(name, checked.to_string(), FieldView::Checkbox { options })
    }

    fn new(name: impl Into<String>, value: impl Into<String>, view: FieldView) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            view,
            attrs: BTreeMap::new(),
        }
    }

    /// Set an arbitrary attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the field label.
    #[must_use]
    pub fn label(self, label: impl Into<String>) -> Self {
        self.attr(LABEL_ATTR, label)
    }

    /// Set the placeholder/help text.
    #[must_use]
    pub fn placeholder(self, text: impl Into<String>) -> Self {
        self.attr("placeholder", text)
    }

    fn validate(&self) -> Result<(), EditorError> {
        if self.name.trim().is_empty() {
            return Err(EditorError::EmptyName);
        }
        for attr in self.attrs.keys() {
            let valid = !attr.is_empty()
                && attr
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(EditorError::InvalidAttribute {
                    field: self.name.clone(),
                    attr: attr.clone(),
                });
            }
        }
        if let FieldView::Checkbox { options } = &self.view
            && options.is_empty()
        {
            return Err(EditorError::NoOptions(self.name.clone()));
        }
        Ok(())
    }

    fn render(&self, out: &mut String) -> Result<(), EditorError> {
        let name = escape_html(&self.name);
        out.push_str(r#"<div class="input-field">"#);

        match &self.view {
            FieldView::Input => {
                self.write_label(out, Some(&name))?;
                write!(out, r#"<input id="{name}" name="{name}""#)?;
                self.write_attrs(out)?;
                write!(out, r#" value="{}">"#, escape_html(&self.value))?;
            }
            FieldView::Textarea => {
                self.write_label(out, Some(&name))?;
                write!(out, r#"<textarea id="{name}" name="{name}""#)?;
                self.write_attrs(out)?;
                write!(out, ">{}</textarea>", escape_html(&self.value))?;
            }
            FieldView::Checkbox { options } => {
                self.write_label(out, None)?;
                for (value, label) in options {
                    let id = format!("{name}-{}", escape_html(value));
                    let checked = if *value == self.value { " checked" } else { "" };
                    write!(
                        out,
                        r#"<input type="checkbox" id="{id}" name="{name}" value="{}"{checked}><label for="{id}">{}</label>"#,
                        escape_html(value),
                        escape_html(label)
                    )?;
                }
            }
        }

        out.push_str("</div>");
        Ok(())
    }

    fn write_label(&self, out: &mut String, target: Option<&str>) -> Result<(), EditorError> {
        let Some(label) = self.attrs.get(LABEL_ATTR) else {
            return Ok(());
        };
        match target {
            Some(id) => write!(out, r#"<label for="{id}">{}</label>"#, escape_html(label))?,
            None => write!(out, "<label>{}</label>", escape_html(label))?,
        }
        Ok(())
    }

    fn write_attrs(&self, out: &mut String) -> Result<(), EditorError> {
        for (attr, value) in &self.attrs {
            if attr == LABEL_ATTR {
                continue;
            }
            write!(out, r#" {attr}="{}""#, escape_html(value))?;
        }
        Ok(())
    }
}

/// Editor form for one content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    item_type: String,
    fields: Vec<Field>,
}

impl Form {
    /// Create an empty form for `item_type`.
    #[must_use]
    pub fn new(item_type: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Render the form as an HTML fragment.
    ///
    /// Fields are validated first; nothing is rendered if any field is
    /// invalid.
    pub fn render(&self) -> Result<Vec<u8>, EditorError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(EditorError::DuplicateField(field.name.clone()));
            }
        }

        let mut out = String::new();
        write!(
            out,
            r#"<div class="editor" data-item-type="{}">"#,
            escape_html(&self.item_type)
        )?;
        for field in &self.fields {
            field.render(&mut out)?;
        }
        out.push_str("</div>");

        Ok(out.into_bytes())
    }
}
