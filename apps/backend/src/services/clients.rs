//! Client registration and authentication on top of a `ClientDirectory`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ids;
use crate::errors::domain::{AuthKind, ConflictKind, DomainError, ValidationKind};
use crate::repos::clients::ClientDirectory;
use crate::AppError;

#[derive(Debug, Clone)]
pub struct ClientService {
    directory: Arc<dyn ClientDirectory>,
}

impl ClientService {
    pub fn new(directory: Arc<dyn ClientDirectory>) -> Self {
        Self { directory }
    }

    pub fn backend(&self) -> &'static str {
        self.directory.backend()
    }

    /// Register `client_id`. A taken id is a conflict.
    pub async fn register(&self, client_id: &str, password: &str) -> Result<(), AppError> {
        ids::require_client_id(client_id)?;
        if password.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::BadRequest,
                "client_pw must not be empty",
            )
            .into());
        }

        if !self.directory.register_client(client_id, password).await? {
            return Err(DomainError::conflict(
                ConflictKind::ClientExists,
                format!("Client {client_id} is already registered"),
            )
            .into());
        }
        info!(client_id, "Client registration accepted");
        Ok(())
    }

    /// Fails with 401 unless `client_id` exists and `password` matches.
    pub async fn authenticate(&self, client_id: &str, password: &str) -> Result<(), AppError> {
        ids::require_client_id(client_id)?;
        if self.directory.check_client(client_id, password).await? {
            Ok(())
        } else {
            warn!(client_id, "Client authentication failed");
            Err(DomainError::auth(AuthKind::BadCredentials, "Invalid client credentials").into())
        }
    }
}
