use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapters::{
    DataDirLock, FileClientDirectory, FileGameStore, InMemoryClientDirectory, InMemoryGameStore,
};
use crate::config::ServerConfig;
use crate::domain::rules::{FreeformRules, GameRules};
use crate::error::AppError;
use crate::repos::{ClientDirectory, GameStore};
use crate::services::{ClientService, SessionCoordinator};
use crate::state::app_state::AppState;

#[derive(Debug)]
enum Storage {
    InMemory,
    Files(PathBuf),
    Custom(Arc<dyn GameStore>, Arc<dyn ClientDirectory>),
}

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Debug)]
pub struct StateBuilder {
    config: ServerConfig,
    storage: Storage,
    rules: Arc<dyn GameRules>,
}

impl StateBuilder {
    /// In-memory storage, freeform rules, default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            storage: Storage::InMemory,
            rules: Arc::new(FreeformRules),
        }
    }

    /// File storage under `config.data_dir` with the configured timeout and seats.
    pub fn from_config(config: ServerConfig) -> Self {
        let data_dir = config.data_dir.clone();
        Self {
            config,
            storage: Storage::Files(data_dir),
            rules: Arc::new(FreeformRules),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        self.config.data_dir = data_dir.clone();
        self.storage = Storage::Files(data_dir);
        self
    }

    pub fn in_memory(mut self) -> Self {
        self.storage = Storage::InMemory;
        self
    }

    /// Use caller-provided backends, e.g. a store pre-seeded by a test.
    pub fn with_storage(
        mut self,
        games: Arc<dyn GameStore>,
        clients: Arc<dyn ClientDirectory>,
    ) -> Self {
        self.storage = Storage::Custom(games, clients);
        self
    }

    pub fn with_rules(mut self, rules: Arc<dyn GameRules>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.config.lock_timeout = timeout;
        self
    }

    pub fn with_seats(mut self, seats: u8) -> Self {
        self.config.seats = seats;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let (games, clients, data_lock): (Arc<dyn GameStore>, Arc<dyn ClientDirectory>, _) =
            match self.storage {
                Storage::InMemory => {
                    let games: Arc<dyn GameStore> = Arc::new(InMemoryGameStore::new());
                    let clients: Arc<dyn ClientDirectory> =
                        Arc::new(InMemoryClientDirectory::new());
                    (games, clients, None)
                }
                Storage::Files(dir) => {
                    let lock = DataDirLock::acquire(&dir)?;
                    let games: Arc<dyn GameStore> = Arc::new(FileGameStore::open(&dir)?);
                    let clients: Arc<dyn ClientDirectory> =
                        Arc::new(FileClientDirectory::open(&dir)?);
                    (games, clients, Some(lock))
                }
                Storage::Custom(games, clients) => (games, clients, None),
            };

        info!(
            storage = games.backend(),
            rules = self.rules.name(),
            seats = self.config.seats,
            lock_timeout_ms = self.config.lock_timeout.as_millis() as u64,
            "Application state built"
        );

        let coordinator = SessionCoordinator::new(games, self.rules)
            .with_lock_timeout(self.config.lock_timeout)
            .with_seats(self.config.seats);
        Ok(AppState::new(
            coordinator,
            ClientService::new(clients),
            self.config,
            data_lock,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
