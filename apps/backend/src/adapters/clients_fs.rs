//! File-backed client directory stored in `<data_dir>/clients.json`.
//!
//! The whole map is cached in memory and rewritten atomically on every
//! registration. A single async mutex serializes registrations; the file
//! is only replaced after the write succeeds, then the cache is updated.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::adapters::clients_mem::{derive_credential, verify_or_dummy};
use crate::adapters::fs_json::{blocking, ensure_dir, read_json, write_json_atomic};
use crate::auth::credentials::Credential;
use crate::errors::domain::DomainError;
use crate::repos::clients::ClientDirectory;

const FORMAT_VERSION: u32 = 1;
const FILE_NAME: &str = "clients.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredClients {
    format: u32,
    clients: BTreeMap<String, Credential>,
}

#[derive(Debug)]
pub struct FileClientDirectory {
    path: PathBuf,
    clients: Mutex<BTreeMap<String, Credential>>,
}

impl FileClientDirectory {
    /// Load `clients.json` under `data_dir`. A missing file is an empty
    /// directory; an unreadable one is corruption.
    pub fn open(data_dir: &Path) -> Result<Self, DomainError> {
        ensure_dir(data_dir)?;
        let path = data_dir.join(FILE_NAME);
        let clients = match read_json::<StoredClients>(&path)? {
            Some(stored) if stored.format == FORMAT_VERSION => stored.clients,
            Some(stored) => {
                return Err(DomainError::corruption(format!(
                    "{}: unsupported format version {}",
                    path.display(),
                    stored.format
                )))
            }
            None => BTreeMap::new(),
        };
        debug!(path = %path.display(), clients = clients.len(), "Client directory loaded");
        Ok(Self {
            path,
            clients: Mutex::new(clients),
        })
    }
}

#[async_trait]
impl ClientDirectory for FileClientDirectory {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn check_client(&self, client_id: &str, password: &str) -> Result<bool, DomainError> {
        let stored = self.clients.lock().await.get(client_id).cloned();
        verify_or_dummy(stored, password).await
    }

    async fn register_client(
        &self,
        client_id: &str,
        password: &str,
    ) -> Result<bool, DomainError> {
        let credential = derive_credential(password).await?;
        let mut clients = self.clients.lock().await;
        if clients.contains_key(client_id) {
            return Ok(false);
        }

        let mut next = clients.clone();
        next.insert(client_id.to_string(), credential);
        let stored = StoredClients {
            format: FORMAT_VERSION,
            clients: next,
        };
        let path = self.path.clone();
        let stored = blocking(move || write_json_atomic(&path, &stored).map(|()| stored)).await?;

        *clients = stored.clients;
        info!(client_id, "Client registered");
        Ok(true)
    }
}
