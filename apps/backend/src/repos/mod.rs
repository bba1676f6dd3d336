//! Storage traits for the domain layer.
//!
//! Backends live in `crate::adapters`; services only see these traits.

pub mod clients;
pub mod games;

pub use clients::ClientDirectory;
pub use games::GameStore;
