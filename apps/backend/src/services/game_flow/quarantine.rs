//! Game ids refused after their stored data was found corrupt.
//!
//! Entries live until the process restarts.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::error;

use crate::errors::domain::DomainError;

#[derive(Debug, Default, Clone)]
pub struct Quarantine {
    ids: Arc<RwLock<BTreeMap<String, String>>>,
}

impl Quarantine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, game_id: &str, reason: &str) {
        let mut ids = self.ids.write();
        if !ids.contains_key(game_id) {
            error!(game_id, reason, "Game quarantined after data corruption");
            ids.insert(game_id.to_string(), reason.to_string());
        }
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.ids.read().contains_key(game_id)
    }

    /// Fails with `DataCorruption` if `game_id` is quarantined.
    pub fn check(&self, game_id: &str) -> Result<(), DomainError> {
        match self.ids.read().get(game_id) {
            Some(reason) => Err(DomainError::corruption(format!(
                "Game {game_id} is quarantined until restart: {reason}"
            ))),
            None => Ok(()),
        }
    }
}
