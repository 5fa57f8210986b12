//! Validation schemas
//!
//! Forms delegate validation to a [`ValidationSchema`]. [`RuleSchema`] is a
//! declarative implementation: an ordered list of rules per field, the
//! first failing rule's message becoming the field error.

use crate::domain::{Email, FieldValue, Phone};

use super::state::{FieldErrors, FormState};

pub trait ValidationSchema: Send + Sync {
    /// Every field name the schema declares
    fn keys(&self) -> Vec<&str>;

    /// Error message for one field, if it fails
    fn validate_field(&self, name: &str, state: &FormState) -> Option<String>;

    fn declares(&self, name: &str) -> bool {
        self.keys().contains(&name)
    }

    fn validate(&self, state: &FormState) -> FieldErrors {
        self.keys()
            .into_iter()
            .filter_map(|name| {
                self.validate_field(name, state)
                    .map(|message| (name.to_string(), message))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present
    Required(String),
    /// At least this many characters
    MinLength(usize, String),
    /// At most this many characters
    MaxLength(usize, String),
    Email(String),
    /// `+` followed by 10 to 15 digits
    Phone(String),
    /// A picked date
    Date(String),
    OneOf(Vec<String>, String),
    /// Checkbox must be ticked
    MustBeTrue(String),
}

impl Rule {
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        let text = value.as_text().unwrap_or_default();
        let ok = match self {
            Self::Required(_) => !value.is_empty(),
            Self::MinLength(min, _) => text.chars().count() >= *min,
            Self::MaxLength(max, _) => text.chars().count() <= *max,
            Self::Email(_) => Email::is_valid_format(text),
            Self::Phone(_) => Phone::parse(text).is_ok(),
            Self::Date(_) => value.as_datetime().is_some(),
            Self::OneOf(options, _) => options.iter().any(|o| o == text),
            Self::MustBeTrue(_) => value.as_bool() == Some(true),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message().to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Required(m)
            | Self::MinLength(_, m)
            | Self::MaxLength(_, m)
            | Self::Email(m)
            | Self::Phone(m)
            | Self::Date(m)
            | Self::OneOf(_, m)
            | Self::MustBeTrue(m) => m,
        }
    }
}

/// Rules for one field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRules {
    pub name: String,
    /// Optional fields skip their rules while empty
    pub optional: bool,
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSchema {
    fields: Vec<FieldRules>,
}

impl RuleSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldRules {
            name: name.into(),
            optional: false,
            rules: rules.into_iter().collect(),
        });
        self
    }

    pub fn optional(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldRules {
            name: name.into(),
            optional: true,
            rules: rules.into_iter().collect(),
        });
        self
    }

    pub fn rules_for(&self, name: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl ValidationSchema for RuleSchema {
    fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn validate_field(&self, name: &str, state: &FormState) -> Option<String> {
        let field = self.rules_for(name)?;
        let value = state.value(name);

        if field.optional && value.is_empty() {
            return None;
        }

        field.rules.iter().find_map(|rule| rule.check(value).err())
    }
}
