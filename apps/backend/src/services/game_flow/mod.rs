//! Session coordinator: the concurrency boundary around stored games.
//!
//! Every operation on a game id runs inside that game's exclusive section:
//! acquire → load → apply → save on success → release. Sections are FIFO per
//! game and independent across games.

mod locks;
mod mutation;
mod player_actions;
mod quarantine;
mod queries;

use std::sync::Arc;
use std::time::Duration;

pub use locks::{GameLockGuard, GameLocks};
pub use mutation::MutationOutcome;
pub use quarantine::Quarantine;

use crate::domain::rules::GameRules;
use crate::domain::state::{DEFAULT_SEATS, MAX_SEATS};
use crate::repos::games::GameStore;

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct SessionCoordinator {
    store: Arc<dyn GameStore>,
    rules: Arc<dyn GameRules>,
    locks: GameLocks,
    quarantine: Quarantine,
    lock_timeout: Duration,
    seats: u8,
}

impl SessionCoordinator {
    pub fn new(store: Arc<dyn GameStore>, rules: Arc<dyn GameRules>) -> Self {
        Self {
            store,
            rules,
            locks: GameLocks::new(),
            quarantine: Quarantine::new(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            seats: DEFAULT_SEATS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Seat count for newly created games, clamped to `2..=MAX_SEATS`.
    pub fn with_seats(mut self, seats: u8) -> Self {
        self.seats = seats.clamp(DEFAULT_SEATS, MAX_SEATS);
        self
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    pub fn rules(&self) -> &dyn GameRules {
        self.rules.as_ref()
    }

    pub fn quarantine(&self) -> &Quarantine {
        &self.quarantine
    }

    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    pub fn seats(&self) -> u8 {
        self.seats
    }
}
