//! Field rendering
//!
//! [`FieldRenderer`] turns a field specification plus its binding into a
//! widget description; [`FieldUnit`] wraps that widget with the field label
//! and its validation message.

pub mod date_format;
pub mod renderer;
pub mod wrapper;

pub use date_format::{to_strftime, DEFAULT_DATE_FORMAT};
pub use renderer::FieldRenderer;
pub use wrapper::FieldUnit;
