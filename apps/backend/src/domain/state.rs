use serde::{Deserialize, Serialize};

use crate::auth::credentials::Credential;
use crate::errors::domain::{AuthKind, ConflictKind, DomainError, ValidationKind};

pub type Seat = u8;

/// Seat count used unless configuration asks for more.
pub const DEFAULT_SEATS: u8 = 2;
pub const MAX_SEATS: u8 = 8;

/// Lifecycle phases. Transitions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, waiting for seats to fill.
    Open,
    /// All seats filled; turns alternate.
    Active,
    /// Terminal: won, drawn or given up.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Creator,
    Joiner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub client_id: String,
    pub seat: Seat,
    pub role: Role,
}

/// Authoritative state of one game.
///
/// Play-related fields (`turn`, `board`, `winner`, and the Active/Finished
/// part of `status`) are always the result of replaying the active part of
/// the move log; see [`crate::domain::session::GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub status: GameStatus,
    /// Number of seats; the game becomes Active once all are taken.
    pub seats: u8,
    /// Ordered by seat; append-only.
    pub players: Vec<Player>,
    /// Seat expected to act next. Only meaningful while Active.
    pub turn: Seat,
    /// Opaque payload interpreted by the rules.
    pub board: String,
    pub winner: Option<Seat>,
    /// `None` means anyone may join.
    pub password: Option<Credential>,
}

impl GameState {
    pub fn new(
        game_id: impl Into<String>,
        creator_id: impl Into<String>,
        password: Option<Credential>,
        seats: u8,
        initial_board: String,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            status: GameStatus::Open,
            seats,
            players: vec![Player {
                client_id: creator_id.into(),
                seat: 0,
                role: Role::Creator,
            }],
            turn: 0,
            board: initial_board,
            winner: None,
            password,
        }
    }

    pub fn seat_of(&self, client_id: &str) -> Option<Seat> {
        self.players
            .iter()
            .find(|p| p.client_id == client_id)
            .map(|p| p.seat)
    }

    /// Seat of `client_id`, or an auth error if they are not seated here.
    pub fn require_seat(&self, client_id: &str) -> Result<Seat, DomainError> {
        self.seat_of(client_id).ok_or_else(|| {
            DomainError::auth(
                AuthKind::NotAMember,
                format!("Client is not seated in game {}", self.game_id),
            )
        })
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.seats as usize
    }

    pub fn player_count(&self) -> u8 {
        self.players.len() as u8
    }

    /// Seat after `seat` in turn order.
    pub fn next_seat(&self, seat: Seat) -> Seat {
        let count = self.player_count().max(1);
        (seat + 1) % count
    }

    /// Seat `client_id` into the next free position.
    ///
    /// Password is checked before capacity so a full game does not reveal
    /// anything to a client without the password.
    pub fn join(&mut self, client_id: &str, password: &str) -> Result<Seat, DomainError> {
        if let Some(credential) = &self.password {
            if !credential.verify(password) {
                return Err(DomainError::auth(
                    AuthKind::WrongGamePassword,
                    format!("Wrong password for game {}", self.game_id),
                ));
            }
        }
        if self.is_full() || self.status != GameStatus::Open {
            return Err(DomainError::conflict(
                ConflictKind::GameFull,
                format!("Game {} already has {} players", self.game_id, self.seats),
            ));
        }
        if self.seat_of(client_id).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadySeated,
                format!("Client already seated in game {}", self.game_id),
            ));
        }

        let seat = self.player_count();
        self.players.push(Player {
            client_id: client_id.to_string(),
            seat,
            role: Role::Joiner,
        });
        if self.is_full() {
            self.status = GameStatus::Active;
            self.turn = 0;
        }
        Ok(seat)
    }

    pub fn require_active(&self) -> Result<(), DomainError> {
        if self.status != GameStatus::Active {
            return Err(DomainError::validation(
                ValidationKind::NotActive,
                format!("Game {} is {:?}, not Active", self.game_id, self.status),
            ));
        }
        Ok(())
    }

    /// Winner when `seat` gives up: the remaining player of a two-seat
    /// game. With more seats nobody is declared winner.
    pub fn forfeit_winner(&self, seat: Seat) -> Option<Seat> {
        if self.player_count() == 2 {
            Some(self.next_seat(seat))
        } else {
            None
        }
    }
}
