//! Shared helpers for the Kubix backend tests: logging setup and
//! problem-details assertions.

pub mod problem_details;
pub mod test_logging;
