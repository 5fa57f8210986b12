//! Field wrapper: label, widget and validation message as one unit

use serde::Serialize;

use crate::domain::{FieldBinding, FieldKind, FieldSpec, FieldValue, Widget};

use super::renderer::FieldRenderer;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldUnit {
    pub name: String,
    pub kind: FieldKind,
    /// Label shown above the widget; never set for checkboxes
    pub label: Option<String>,
    pub widget: Option<Widget>,
    /// Validation message shown beneath the widget
    pub error: Option<String>,
}

impl FieldUnit {
    pub fn compose(
        renderer: &FieldRenderer,
        spec: &FieldSpec,
        value: &FieldValue,
        error: Option<&str>,
    ) -> Self {
        let binding = FieldBinding {
            name: &spec.name,
            value,
        };

        Self {
            name: spec.name.clone(),
            kind: spec.kind,
            label: spec.label.clone().filter(|_| spec.kind.shows_field_label()),
            widget: renderer.render(spec, &binding),
            error: error.map(str::to_string),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
