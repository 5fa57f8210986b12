//! Form state, validation and the per-form controller

pub mod controller;
pub mod input;
pub mod schema;
pub mod schemas;
pub mod state;

pub use controller::FormController;
pub use schema::{FieldRules, Rule, RuleSchema, ValidationSchema};
pub use state::{FieldErrors, FormState};
