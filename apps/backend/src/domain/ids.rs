//! Client and game identifier validation.

use lazy_regex::regex_is_match;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_ID_LEN: usize = 64;

/// Identifiers are 1..=64 ASCII letters, digits or underscores.
///
/// Game ids end up as file names, so nothing outside this set is accepted.
pub fn is_valid_id(id: &str) -> bool {
    id.len() <= MAX_ID_LEN && regex_is_match!(r"^[A-Za-z0-9_]+$", id)
}

pub fn require_client_id(id: &str) -> Result<(), DomainError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidClientId,
            "client_id must be 1-64 characters of [A-Za-z0-9_]",
        ))
    }
}

pub fn require_game_id(id: &str) -> Result<(), DomainError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidGameId,
            "game_id must be 1-64 characters of [A-Za-z0-9_]",
        ))
    }
}
