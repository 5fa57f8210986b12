//! Widget descriptions
//!
//! Renderers produce these plain descriptions instead of drawing anything;
//! a host (terminal, web front end) decides how to present them.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::field::{Icon, SelectOption};
use super::value::FileAttachment;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    TextInput {
        name: String,
        value: String,
        placeholder: Option<String>,
        icon: Option<Icon>,
        disabled: bool,
    },
    PhoneInput {
        name: String,
        value: String,
        placeholder: Option<String>,
        default_country: String,
        international: bool,
    },
    DatePicker {
        name: String,
        selected: Option<NaiveDateTime>,
        display: Option<String>,
        format: String,
        show_time: bool,
        time_label: String,
        icon: Icon,
    },
    Select {
        name: String,
        selected: Option<String>,
        placeholder: Option<String>,
        options: Vec<SelectOption>,
    },
    TextArea {
        name: String,
        value: String,
        placeholder: Option<String>,
        disabled: bool,
    },
    Checkbox {
        name: String,
        checked: bool,
        label: Option<String>,
    },
    RadioGroup {
        name: String,
        selected: Option<String>,
        options: Vec<String>,
    },
    FileUploader {
        name: String,
        files: Vec<FileSummary>,
    },
}

impl Widget {
    /// Field name the widget is bound to
    pub fn name(&self) -> &str {
        match self {
            Self::TextInput { name, .. }
            | Self::PhoneInput { name, .. }
            | Self::DatePicker { name, .. }
            | Self::Select { name, .. }
            | Self::TextArea { name, .. }
            | Self::Checkbox { name, .. }
            | Self::RadioGroup { name, .. }
            | Self::FileUploader { name, .. } => name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::TextInput { .. } => "text_input",
            Self::PhoneInput { .. } => "phone_input",
            Self::DatePicker { .. } => "date_picker",
            Self::Select { .. } => "select",
            Self::TextArea { .. } => "text_area",
            Self::Checkbox { .. } => "checkbox",
            Self::RadioGroup { .. } => "radio_group",
            Self::FileUploader { .. } => "file_uploader",
        }
    }

    /// Short human-readable rendering of the widget's current value
    pub fn display_value(&self) -> String {
        match self {
            Self::TextInput { value, .. }
            | Self::PhoneInput { value, .. }
            | Self::TextArea { value, .. } => value.clone(),
            Self::DatePicker { display, .. } => display.clone().unwrap_or_default(),
            Self::Select { selected, .. } | Self::RadioGroup { selected, .. } => {
                selected.clone().unwrap_or_default()
            }
            Self::Checkbox { checked, .. } => if *checked { "[x]" } else { "[ ]" }.to_string(),
            Self::FileUploader { files, .. } => files
                .iter()
                .map(|f| f.file_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Metadata of an uploaded file, without its bytes
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
}

impl From<&FileAttachment> for FileSummary {
    fn from(file: &FileAttachment) -> Self {
        Self {
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.size(),
        }
    }
}
