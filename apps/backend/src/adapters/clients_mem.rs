//! In-memory client directory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use crate::adapters::fs_json::blocking;
use crate::auth::credentials::Credential;
use crate::errors::domain::DomainError;
use crate::repos::clients::ClientDirectory;

/// Verified in place of a missing client so unknown ids cost the same as
/// known ones.
pub(crate) static DUMMY_CREDENTIAL: Lazy<Credential> =
    Lazy::new(|| Credential::derive("kubix-unknown-client"));

/// Verify `password` against `stored`, spending the same work when the
/// client does not exist. Hashing runs on the blocking pool.
pub(crate) async fn verify_or_dummy(
    stored: Option<Credential>,
    password: &str,
) -> Result<bool, DomainError> {
    let password = password.to_string();
    blocking(move || {
        Ok(match stored {
            Some(credential) => credential.verify(&password),
            None => {
                let _ = DUMMY_CREDENTIAL.verify(&password);
                false
            }
        })
    })
    .await
}

pub(crate) async fn derive_credential(password: &str) -> Result<Credential, DomainError> {
    let password = password.to_string();
    blocking(move || Ok(Credential::derive(&password))).await
}

#[derive(Debug, Default)]
pub struct InMemoryClientDirectory {
    clients: Mutex<BTreeMap<String, Credential>>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    fn backend(&self) -> &'static str {
        "memory"
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
        clients.insert(client_id.to_string(), credential);
        Ok(true)
    }
}
