//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and storage-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using `From<DomainError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds: malformed input, or an operation the current game
/// state does not allow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidClientId,
    InvalidGameId,
    InvalidMovePayload,
    BadRequest,
    NotActive,
    NotYourTurn,
    IllegalMove,
    NothingToUndo,
    NothingToRedo,
}

impl ValidationKind {
    /// True for kinds that reject an operation on a well-formed request.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            ValidationKind::NotActive
                | ValidationKind::NotYourTurn
                | ValidationKind::IllegalMove
                | ValidationKind::NothingToUndo
                | ValidationKind::NothingToRedo
        )
    }
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// The per-game section was not acquired within the configured wait
    Busy,
    Storage,
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    ClientExists,
    GameExists,
    GameFull,
    AlreadySeated,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthKind {
    BadCredentials,
    WrongGamePassword,
    NotAMember,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game-state rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Credential or membership failure
    Auth(AuthKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Auth(kind, d) => write!(f, "auth {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn auth(kind: AuthKind, detail: impl Into<String>) -> Self {
        Self::Auth(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Shorthand for the game-missing case, used by every store backend.
    pub fn game_not_found(game_id: &str) -> Self {
        Self::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    }

    pub fn storage(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::Storage, detail)
    }

    pub fn corruption(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::DataCorruption, detail)
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, DomainError::Infra(InfraErrorKind::DataCorruption, _))
    }
}
