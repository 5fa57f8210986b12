//! Persistence gateway adapters

pub mod http;
pub mod memory;

pub use http::HttpPersistence;
pub use memory::InMemoryPersistence;
