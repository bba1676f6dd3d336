//! Pluggable game rules.

use std::fmt;

use serde_json::Value;

use crate::domain::state::{GameState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Payloads above this size are rejected before they reach any rules.
pub const MAX_PAYLOAD_BYTES: usize = 4096;

/// Shape check applied to every move payload before any game logic runs.
pub fn require_payload(payload: &str) -> Result<(), DomainError> {
    if payload.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidMovePayload,
            "move payload is empty",
        ));
    }
    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(DomainError::validation(
            ValidationKind::InvalidMovePayload,
            format!(
                "move payload is {} bytes; the limit is {MAX_PAYLOAD_BYTES}",
                payload.len()
            ),
        ));
    }
    Ok(())
}

/// Why the rules refused a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation(pub String);

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RuleViolation {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Seat),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Seat> {
        match self {
            Outcome::Winner(seat) => Some(seat),
            Outcome::Draw => None,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Board after the move.
    pub board: String,
    /// `Some` ends the game.
    pub outcome: Option<Outcome>,
}

/// Rules for one kind of turn-based game.
///
/// The session engine only enforces turn order and history; everything the
/// board means lives behind this trait. `validate` must be a pure function
/// of its arguments: undo and redo replay stored moves through it and treat
/// any divergence from the recorded board as corruption.
pub trait GameRules: Send + Sync + fmt::Debug {
    /// Stable identifier, reported by the health endpoint.
    fn name(&self) -> &'static str;

    /// Board for a freshly created game with `seats` seats.
    fn initial_board(&self, seats: u8) -> String;

    /// Check `payload` from `seat` against `state` and produce the next board.
    ///
    /// Called only while the game is Active and `seat` holds the turn.
    fn validate(&self, state: &GameState, seat: Seat, payload: &str)
        -> Result<Verdict, RuleViolation>;
}

/// Rules that accept any non-empty payload and never end the game.
///
/// The board is a JSON array of `[seat, payload]` pairs in play order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeformRules;

impl FreeformRules {
    pub const NAME: &'static str = "freeform";
}

impl GameRules for FreeformRules {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn initial_board(&self, _seats: u8) -> String {
        "[]".to_string()
    }

    fn validate(
        &self,
        state: &GameState,
        seat: Seat,
        payload: &str,
    ) -> Result<Verdict, RuleViolation> {
        if payload.trim().is_empty() {
            return Err(RuleViolation("move payload is empty".to_string()));
        }
        let mut entries: Vec<Value> = serde_json::from_str(&state.board)
            .map_err(|e| RuleViolation(format!("board is not a JSON array: {e}")))?;
        entries.push(Value::Array(vec![Value::from(seat), Value::from(payload)]));
        let board = serde_json::to_string(&entries)
            .map_err(|e| RuleViolation(format!("board could not be encoded: {e}")))?;
        Ok(Verdict {
            board,
            outcome: None,
        })
    }
}
