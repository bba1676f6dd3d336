//! In-memory game store for tests and ephemeral servers.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::session::GameSession;
use crate::errors::domain::DomainError;
use crate::repos::games::GameStore;

#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: DashMap<String, GameSession>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a record without any checks. Tests use this to plant
    /// damaged sessions.
    pub fn put_raw(&self, session: GameSession) {
        self.games.insert(session.game_id().to_string(), session);
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, game_id: &str) -> Result<GameSession, DomainError> {
        let session = self
            .games
            .get(game_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::game_not_found(game_id))?;
        session
            .check_invariants()
            .map_err(|detail| DomainError::corruption(format!("game {game_id}: {detail}")))?;
        Ok(session)
    }

    async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
        self.games
            .insert(session.game_id().to_string(), session.clone());
        Ok(())
    }

    async fn exists(&self, game_id: &str) -> Result<bool, DomainError> {
        Ok(self.games.contains_key(game_id))
    }

    async fn list_ids(&self) -> Result<Vec<String>, DomainError> {
        let mut ids: Vec<String> = self.games.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}
