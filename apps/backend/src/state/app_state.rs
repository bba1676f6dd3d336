use std::sync::Arc;

use time::OffsetDateTime;

use crate::adapters::DataDirLock;
use crate::config::ServerConfig;
use crate::services::{ClientService, SessionCoordinator};

/// Shared resources handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub coordinator: SessionCoordinator,
    pub clients: ClientService,
    pub config: ServerConfig,
    pub started_at: OffsetDateTime,
    /// Held for the process lifetime when storage is file-backed.
    data_lock: Option<Arc<DataDirLock>>,
}

impl AppState {
    pub fn new(
        coordinator: SessionCoordinator,
        clients: ClientService,
        config: ServerConfig,
        data_lock: Option<DataDirLock>,
    ) -> Self {
        Self {
            coordinator,
            clients,
            config,
            started_at: OffsetDateTime::now_utc(),
            data_lock: data_lock.map(Arc::new),
        }
    }

    pub fn storage_backend(&self) -> &'static str {
        self.coordinator.store().backend()
    }

    pub fn holds_data_lock(&self) -> bool {
        self.data_lock.is_some()
    }
}
