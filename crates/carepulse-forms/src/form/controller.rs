//! Form controller
//!
//! Owns the field specifications, the validation schema and the form
//! state. Change events enter here; rendered field units leave here.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::domain::{FieldKind, FieldSpec, FieldValue, Phone};
use crate::error::{FormsError, Result};
use crate::render::{FieldRenderer, FieldUnit};

use super::input::{parse_bool, parse_datetime};
use super::schema::ValidationSchema;
use super::state::{FieldErrors, FormState};

pub struct FormController {
    fields: Vec<FieldSpec>,
    schema: Arc<dyn ValidationSchema>,
    state: FormState,
    renderer: FieldRenderer,
}

impl FormController {
    /// Build a controller. Every specification name must be declared by the
    /// schema and appear only once.
    pub fn new(
        fields: Vec<FieldSpec>,
        schema: Arc<dyn ValidationSchema>,
        defaults: BTreeMap<String, FieldValue>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &fields {
            if !schema.declares(&spec.name) {
                return Err(FormsError::UndeclaredField(spec.name.clone()));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(FormsError::DuplicateField(spec.name.clone()));
            }
        }

        Ok(Self {
            fields,
            schema,
            state: FormState::new(defaults),
            renderer: FieldRenderer::new(),
        })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn schema(&self) -> &dyn ValidationSchema {
        self.schema.as_ref()
    }

    pub fn value(&self, name: &str) -> &FieldValue {
        self.state.value(name)
    }

    /// Apply a change event. Values are coerced to what the field's widget
    /// stores; after a submit attempt the field is re-validated.
    pub fn change(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let kind = self.kind_of(name)?;
        let value = match kind {
            Some(kind) => coerce(kind, value),
            None => value,
        };

        self.state.set(name, value);

        if self.state.submit_attempted() {
            let error = self.schema.validate_field(name, &self.state);
            self.state.set_error(name, error);
        }
        Ok(())
    }

    /// Apply raw text input, parsed according to the field kind
    pub fn input(&mut self, name: &str, raw: &str) -> Result<()> {
        let value = match self.kind_of(name)? {
            Some(FieldKind::Checkbox) => parse_bool(raw)
                .map(FieldValue::Bool)
                .ok_or_else(|| invalid(name, "expected true or false"))?,
            Some(FieldKind::DatePicker) => parse_datetime(raw)
                .map(FieldValue::DateTime)
                .ok_or_else(|| invalid(name, "expected a date like 2024-07-01 or 2024-07-01T09:30"))?,
            _ => FieldValue::text(raw),
        };
        self.change(name, value)
    }

    /// Run the schema over the whole form, storing the errors.
    /// Returns true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let errors = self.schema.validate(&self.state);
        self.state.mark_submit_attempted();
        let valid = errors.is_empty();
        self.state.set_errors(errors);
        valid
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn render(&self) -> Vec<FieldUnit> {
        self.fields
            .iter()
            .map(|spec| {
                FieldUnit::compose(
                    &self.renderer,
                    spec,
                    self.state.value(&spec.name),
                    self.state.error(&spec.name),
                )
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Kind of a visible field, `None` for a declared but hidden one
    fn kind_of(&self, name: &str) -> Result<Option<FieldKind>> {
        match self.field(name) {
            Some(spec) => Ok(Some(spec.kind)),
            None if self.schema.declares(name) => Ok(None),
            None => Err(FormsError::UnknownField(name.to_string())),
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("fields", &self.fields)
            .field("state", &self.state)
            .finish()
    }
}

fn coerce(kind: FieldKind, value: FieldValue) -> FieldValue {
    match (kind, value) {
        (FieldKind::PhoneInput, FieldValue::Text(raw)) => FieldValue::Text(Phone::normalize(&raw)),
        (FieldKind::Checkbox, FieldValue::Empty) => FieldValue::Bool(false),
        (_, value) => value,
    }
}

fn invalid(name: &str, reason: &str) -> FormsError {
    FormsError::InvalidInput {
        field: name.to_string(),
        reason: reason.to_string(),
    }
}
