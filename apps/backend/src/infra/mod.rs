//! Application assembly.

pub mod state;
