//! Form state: current values and per-field validation errors

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::domain::{FieldValue, FileAttachment};

/// Validation message per field name
pub type FieldErrors = BTreeMap<String, String>;

static EMPTY: FieldValue = FieldValue::Empty;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    defaults: BTreeMap<String, FieldValue>,
    values: BTreeMap<String, FieldValue>,
    errors: FieldErrors,
    submit_attempted: bool,
}

impl FormState {
    /// Initialize from declared defaults
    pub fn new(defaults: BTreeMap<String, FieldValue>) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            errors: FieldErrors::new(),
            submit_attempted: false,
        }
    }

    pub fn value(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn set_error(&mut self, name: &str, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub(crate) fn mark_submit_attempted(&mut self) {
        self.submit_attempted = true;
    }

    /// Back to the declared defaults, errors cleared
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors.clear();
        self.submit_attempted = false;
    }

    // =========================================================================
    // Typed readers used by payload builders
    // =========================================================================

    pub fn text(&self, name: &str) -> String {
        self.value(name).text_or_empty()
    }

    /// Text value, or `None` when empty or blank
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.value(name)
            .as_text()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.value(name).as_bool().unwrap_or(false)
    }

    pub fn datetime(&self, name: &str) -> Option<NaiveDateTime> {
        self.value(name).as_datetime()
    }

    pub fn files(&self, name: &str) -> &[FileAttachment] {
        self.value(name).as_files()
    }
}
