//! Error codes for the Kubix backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Kubix backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Client credentials missing or wrong
    Unauthorized,
    /// Game password does not match
    WrongGamePassword,
    /// Client is not seated in the game
    NotAMember,

    // Request Validation
    /// Client id missing or malformed
    InvalidClientId,
    /// Game id malformed
    InvalidGameId,
    /// Form could not be parsed or names no operation
    BadRequest,
    /// Move payload empty or oversized
    InvalidMovePayload,

    // Game State
    /// Game is not in the Active phase
    NotActive,
    /// Acting client does not hold the turn
    NotYourTurn,
    /// Rules rejected the move
    IllegalMove,
    /// History cursor is at the start
    NothingToUndo,
    /// History cursor is at the end
    NothingToRedo,

    // Resource Not Found
    /// Game not found
    GameNotFound,

    // Conflicts
    /// Client id already registered
    ClientExists,
    /// Game id already in use
    GameExists,
    /// All seats are taken
    GameFull,
    /// Client already holds a seat in the game
    AlreadySeated,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Per-game section could not be acquired in time
    ServerBusy,
    /// Storage I/O failure
    StorageError,
    /// Stored record is unreadable or inconsistent
    DataCorruption,
    /// Configuration error
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::WrongGamePassword => "WRONG_GAME_PASSWORD",
            Self::NotAMember => "NOT_A_MEMBER",

            Self::InvalidClientId => "INVALID_CLIENT_ID",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidMovePayload => "INVALID_MOVE_PAYLOAD",

            Self::NotActive => "NOT_ACTIVE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::NothingToUndo => "NOTHING_TO_UNDO",
            Self::NothingToRedo => "NOTHING_TO_REDO",

            Self::GameNotFound => "GAME_NOT_FOUND",

            Self::ClientExists => "CLIENT_EXISTS",
            Self::GameExists => "GAME_EXISTS",
            Self::GameFull => "GAME_FULL",
            Self::AlreadySeated => "ALREADY_SEATED",
            Self::Conflict => "CONFLICT",

            Self::ServerBusy => "SERVER_BUSY",
            Self::StorageError => "STORAGE_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
