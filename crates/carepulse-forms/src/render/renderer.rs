//! Kind-dispatched field renderer

use std::collections::HashMap;

use crate::catalog::CALENDAR_ICON;
use crate::domain::{FieldBinding, FieldKind, FieldSpec, Icon, Widget};

use super::date_format::{format_datetime, DEFAULT_DATE_FORMAT};

/// Default country for the phone widget
pub const PHONE_DEFAULT_COUNTRY: &str = "IN";
pub const TIME_INPUT_LABEL: &str = "Time:";

type RenderFn = fn(&FieldSpec, &FieldBinding<'_>) -> Option<Widget>;

/// Maps each field kind to the handler that draws it
pub struct FieldRenderer {
    handlers: HashMap<FieldKind, RenderFn>,
}

impl FieldRenderer {
    pub fn new() -> Self {
        Self {
            handlers: FieldKind::ALL
                .into_iter()
                .map(|kind| (kind, handler_for(kind)))
                .collect(),
        }
    }

    /// Render the widget for a specification
    pub fn render(&self, spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
        self.render_kind(spec.kind, spec, binding)
    }

    /// Render by wire tag. Unknown tags render nothing.
    pub fn render_tag(&self, tag: &str, spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
        match FieldKind::from_tag(tag) {
            Some(kind) => self.render_kind(kind, spec, binding),
            None => {
                tracing::debug!(tag, field = binding.name, "unknown field tag, rendering nothing");
                None
            }
        }
    }

    fn render_kind(&self, kind: FieldKind, spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
        self.handlers.get(&kind).and_then(|handler| handler(spec, binding))
    }
}

impl Default for FieldRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn handler_for(kind: FieldKind) -> RenderFn {
    match kind {
        FieldKind::TextInput => render_text_input,
        FieldKind::PhoneInput => render_phone_input,
        FieldKind::DatePicker => render_date_picker,
        FieldKind::Select => render_select,
        FieldKind::TextArea => render_text_area,
        FieldKind::Checkbox => render_checkbox,
        FieldKind::Skeleton => render_skeleton,
    }
}

fn render_text_input(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    Some(Widget::TextInput {
        name: binding.name.to_string(),
        value: binding.value.text_or_empty(),
        placeholder: spec.placeholder.clone(),
        icon: spec.icon.clone(),
        disabled: spec.disabled,
    })
}

fn render_phone_input(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    Some(Widget::PhoneInput {
        name: binding.name.to_string(),
        value: binding.value.text_or_empty(),
        placeholder: spec.placeholder.clone(),
        default_country: PHONE_DEFAULT_COUNTRY.to_string(),
        international: true,
    })
}

fn render_date_picker(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    let format = spec
        .date_format
        .clone()
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
    let selected = binding.value.as_datetime();

    Some(Widget::DatePicker {
        name: binding.name.to_string(),
        display: selected.and_then(|dt| format_datetime(&dt, &format)),
        selected,
        format,
        show_time: spec.show_time,
        time_label: TIME_INPUT_LABEL.to_string(),
        icon: Icon::new(CALENDAR_ICON, "calendar"),
    })
}

fn render_select(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    Some(Widget::Select {
        name: binding.name.to_string(),
        selected: binding
            .value
            .as_text()
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        placeholder: spec.placeholder.clone(),
        options: spec.options.clone(),
    })
}

fn render_text_area(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    Some(Widget::TextArea {
        name: binding.name.to_string(),
        value: binding.value.text_or_empty(),
        placeholder: spec.placeholder.clone(),
        disabled: spec.disabled,
    })
}

fn render_checkbox(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    Some(Widget::Checkbox {
        name: binding.name.to_string(),
        checked: binding.value.as_bool().unwrap_or(false),
        label: spec.label.clone(),
    })
}

fn render_skeleton(spec: &FieldSpec, binding: &FieldBinding<'_>) -> Option<Widget> {
    spec.render.as_ref().map(|render| render(binding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, SelectOption};
    use chrono::NaiveDate;

    fn bind<'a>(name: &'a str, value: &'a FieldValue) -> FieldBinding<'a> {
        FieldBinding { name, value }
    }

    #[test]
    fn test_every_kind_has_a_handler() {
        let renderer = FieldRenderer::new();
        for kind in FieldKind::ALL {
            assert!(renderer.handlers.contains_key(&kind), "{kind}");
        }
    }

    #[test]
    fn test_text_input_substitutes_empty_string() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::TextInput, "name")
            .placeholder("Roumodip Das")
            .icon(Icon::new("/assets/icons/user.svg", "user"));
        let widget = renderer.render(&spec, &bind("name", &FieldValue::Empty)).unwrap();

        match widget {
            Widget::TextInput { value, icon, placeholder, .. } => {
                assert_eq!(value, "");
                assert_eq!(icon.unwrap().src, "/assets/icons/user.svg");
                assert_eq!(placeholder.as_deref(), Some("Roumodip Das"));
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn test_missing_placeholder_is_absent() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::TextArea, "note");
        let widget = renderer.render(&spec, &bind("note", &FieldValue::Empty)).unwrap();
        assert!(matches!(widget, Widget::TextArea { placeholder: None, .. }));
    }

    #[test]
    fn test_date_picker_defaults_format() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::DatePicker, "birthDate");
        let dt = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let value = FieldValue::DateTime(dt);
        let widget = renderer.render(&spec, &bind("birthDate", &value)).unwrap();

        match widget {
            Widget::DatePicker { format, display, show_time, icon, .. } => {
                assert_eq!(format, DEFAULT_DATE_FORMAT);
                assert_eq!(display.as_deref(), Some("12/31/1999"));
                assert!(!show_time);
                assert_eq!(icon.src, CALENDAR_ICON);
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn test_date_picker_with_time() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::DatePicker, "schedule")
            .show_time(true)
            .date_format("MM/dd/yyyy  -  h:mm aa");
        let dt = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let value = FieldValue::DateTime(dt);
        let widget = renderer.render(&spec, &bind("schedule", &value)).unwrap();
        assert!(matches!(widget, Widget::DatePicker { show_time: true, ref display, .. }
            if display.as_deref() == Some("07/01/2024  -  9:30 AM")));
    }

    #[test]
    fn test_select_shows_placeholder_when_unset() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::Select, "primaryPhysician")
            .placeholder("Select a doctor")
            .options(vec![SelectOption::new("Aditi Das")]);
        let widget = renderer.render(&spec, &bind("primaryPhysician", &FieldValue::text(""))).unwrap();

        match widget {
            Widget::Select { selected, placeholder, options, .. } => {
                assert!(selected.is_none());
                assert_eq!(placeholder.as_deref(), Some("Select a doctor"));
                assert_eq!(options.len(), 1);
            }
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn test_checkbox_carries_inline_label() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::Checkbox, "privacyConsent").label("I agree");
        let widget = renderer.render(&spec, &bind("privacyConsent", &FieldValue::Bool(true))).unwrap();
        assert_eq!(
            widget,
            Widget::Checkbox {
                name: "privacyConsent".into(),
                checked: true,
                label: Some("I agree".into()),
            }
        );
    }

    #[test]
    fn test_skeleton_delegates_to_callback() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::Skeleton, "gender").render_with(|field| Widget::RadioGroup {
            name: field.name.to_string(),
            selected: field.value.as_text().map(str::to_string),
            options: vec!["male".into(), "female".into()],
        });
        let value = FieldValue::text("female");
        let widget = renderer.render(&spec, &bind("gender", &value)).unwrap();
        assert_eq!(widget.display_value(), "female");
    }

    #[test]
    fn test_skeleton_without_callback_renders_nothing() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::Skeleton, "gender");
        assert!(renderer.render(&spec, &bind("gender", &FieldValue::Empty)).is_none());
    }

    #[test]
    fn test_unknown_tag_renders_nothing() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::TextInput, "name");
        assert!(renderer.render_tag("slider", &spec, &bind("name", &FieldValue::Empty)).is_none());
    }

    #[test]
    fn test_known_tag_overrides_spec_kind() {
        let renderer = FieldRenderer::new();
        let spec = FieldSpec::new(FieldKind::TextInput, "phone");
        let widget = renderer
            .render_tag("phoneInput", &spec, &bind("phone", &FieldValue::text("+918966620102")))
            .unwrap();
        assert_eq!(widget.kind_name(), "phone_input");
    }
}
