//! Domain module
//!
//! Field specifications, field values, widget descriptions and the records
//! forwarded to the persistence gateway.

pub mod field;
pub mod records;
pub mod value;
pub mod value_objects;
pub mod widget;

pub use field::*;
pub use records::*;
pub use value::*;
pub use value_objects::*;
pub use widget::*;
