//! Field specifications
//!
//! A [`FieldSpec`] is the declarative description of one form input: its
//! kind, the form key it binds to, and the options its widget needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::value::FieldValue;
use super::widget::Widget;

/// Closed set of field kinds the renderer knows how to draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    TextInput,
    TextArea,
    PhoneInput,
    Checkbox,
    Select,
    Skeleton,
    DatePicker,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::TextInput,
        FieldKind::TextArea,
        FieldKind::PhoneInput,
        FieldKind::Checkbox,
        FieldKind::Select,
        FieldKind::Skeleton,
        FieldKind::DatePicker,
    ];

    /// Wire tag used by form descriptions
    pub fn tag(self) -> &'static str {
        match self {
            Self::TextInput => "input",
            Self::TextArea => "textarea",
            Self::PhoneInput => "phoneInput",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Skeleton => "skeleton",
            Self::DatePicker => "datePicker",
        }
    }

    /// Parse a wire tag. `ckeckbox` is still emitted by older form
    /// descriptions and maps to [`FieldKind::Checkbox`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ckeckbox" => Some(Self::Checkbox),
            other => Self::ALL.into_iter().find(|kind| kind.tag() == other),
        }
    }

    /// Checkboxes draw their own label inline
    pub fn shows_field_label(self) -> bool {
        !matches!(self, Self::Checkbox)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Icon reference drawn next to an input
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub src: String,
    pub alt: String,
}

impl Icon {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Icon with the generic `icon` alt text
    pub fn from_src(src: impl Into<String>) -> Self {
        Self::new(src, "icon")
    }
}

/// One entry of a selection list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Field name plus current value, as handed to renderers and callbacks
#[derive(Clone, Copy, Debug)]
pub struct FieldBinding<'a> {
    pub name: &'a str,
    pub value: &'a FieldValue,
}

/// Caller-supplied renderer for irregular fields
pub type RenderCallback = Arc<dyn Fn(&FieldBinding<'_>) -> Widget + Send + Sync>;

/// Declarative description of one form field
#[derive(Clone)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub name: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub icon: Option<Icon>,
    pub disabled: bool,
    pub date_format: Option<String>,
    pub show_time: bool,
    pub options: Vec<SelectOption>,
    pub render: Option<RenderCallback>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            label: None,
            placeholder: None,
            icon: None,
            disabled: false,
            date_format: None,
            show_time: false,
            options: Vec::new(),
            render: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&FieldBinding<'_>) -> Widget + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("icon", &self.icon)
            .field("disabled", &self.disabled)
            .field("date_format", &self.date_format)
            .field("show_time", &self.show_time)
            .field("options", &self.options.len())
            .field("render", &self.render.is_some())
            .finish()
    }
}
