//! Ports module (Hexagonal Architecture)
//!
//! Interfaces to the external persistence service.

pub mod outbound;

pub use outbound::*;
