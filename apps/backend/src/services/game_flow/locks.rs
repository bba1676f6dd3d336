//! Per-game exclusive sections.
//!
//! Each game id maps to a tokio mutex. tokio's mutex hands the lock out in
//! FIFO order, so requests against one game are served in arrival order while
//! different games never contend. Entries are dropped from the map once no
//! holder or waiter references them.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::errors::domain::{DomainError, InfraErrorKind};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

#[derive(Debug, Default, Clone)]
pub struct GameLocks {
    locks: Arc<LockMap>,
}

/// Held for the duration of one operation on one game.
#[derive(Debug)]
pub struct GameLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    game_id: String,
    locks: Arc<LockMap>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait up to `timeout` for the section of `game_id`.
    ///
    /// Dropping the returned future while it waits leaves the queue without
    /// side effects.
    pub async fn acquire(
        &self,
        game_id: &str,
        timeout: Duration,
    ) -> Result<GameLockGuard, DomainError> {
        let mutex = Arc::clone(self.locks.entry(game_id.to_string()).or_default().value());

        match tokio::time::timeout(timeout, mutex.lock_owned()).await {
            Ok(guard) => Ok(GameLockGuard {
                guard: Some(guard),
                game_id: game_id.to_string(),
                locks: Arc::clone(&self.locks),
            }),
            Err(_) => {
                prune(&self.locks, game_id);
                Err(DomainError::infra(
                    InfraErrorKind::Busy,
                    format!(
                        "Game {game_id} is busy; gave up after {}ms",
                        timeout.as_millis()
                    ),
                ))
            }
        }
    }

    /// Number of games with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for GameLockGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        prune(&self.locks, &self.game_id);
    }
}

// The map's own Arc is the only remaining reference when nobody holds or
// waits for the lock.
fn prune(locks: &LockMap, game_id: &str) {
    locks.remove_if(game_id, |_, mutex| Arc::strong_count(mutex) == 1);
}
