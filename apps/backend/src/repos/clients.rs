//! Client identity directory.

use async_trait::async_trait;

use crate::errors::domain::DomainError;

/// Maps client ids to salted credential hashes.
///
/// Implementations serialize writers behind a single lock; registrations are
/// rare compared to checks.
#[async_trait]
pub trait ClientDirectory: Send + Sync + std::fmt::Debug {
    fn backend(&self) -> &'static str;

    /// True if `client_id` is registered and `password` matches.
    async fn check_client(&self, client_id: &str, password: &str) -> Result<bool, DomainError>;

    /// Register a new client. Returns false if the id is already taken.
    async fn register_client(&self, client_id: &str, password: &str)
        -> Result<bool, DomainError>;
}
