//! Durable keyed storage of game sessions.

use async_trait::async_trait;

use crate::domain::session::GameSession;
use crate::errors::domain::DomainError;

/// One record per game id holding the state and its move log together.
///
/// There is no in-place mutation API: callers load a session, change a local
/// copy and `save` it back whole. `save` replaces the previous record
/// atomically, so a concurrent reader sees either the old pair or the new
/// pair, never a mix.
#[async_trait]
pub trait GameStore: Send + Sync + std::fmt::Debug {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Load the stored session, or `NotFound` if the id has never been saved.
    async fn load(&self, game_id: &str) -> Result<GameSession, DomainError>;

    /// Atomically overwrite the record for `session.game_id()`.
    async fn save(&self, session: &GameSession) -> Result<(), DomainError>;

    async fn exists(&self, game_id: &str) -> Result<bool, DomainError>;

    /// All stored game ids, sorted.
    async fn list_ids(&self) -> Result<Vec<String>, DomainError>;
}
