use serde::{Deserialize, Serialize};

use crate::domain::session::GameSession;
use crate::domain::state::{GameStatus, Player, Role, Seat};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub client_id: String,
    pub seat: Seat,
    pub role: Role,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            client_id: player.client_id.clone(),
            seat: player.seat,
            role: player.role,
        }
    }
}

/// Full view of one game returned after every game operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: String,
    pub status: GameStatus,
    /// Seat to move; present only while Active.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub turn: Option<Seat>,
    pub board: String,
    /// Moves recorded, including any redo tail.
    pub move_count: usize,
    /// Moves currently applied.
    pub cursor: usize,
    pub seats: u8,
    pub players: Vec<PlayerView>,
    pub winner: Option<Seat>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl From<&GameSession> for GameView {
    fn from(session: &GameSession) -> Self {
        let state = &session.state;
        let active = state.status == GameStatus::Active;
        Self {
            game_id: state.game_id.clone(),
            status: state.status,
            turn: active.then_some(state.turn),
            board: state.board.clone(),
            move_count: session.log.len(),
            cursor: session.log.cursor(),
            seats: state.seats,
            players: state.players.iter().map(PlayerView::from).collect(),
            winner: state.winner,
            can_undo: active && session.log.can_undo(),
            can_redo: active && session.log.can_redo(),
        }
    }
}

/// One row of a game listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_id: String,
    pub status: GameStatus,
    pub seats: u8,
    pub players: Vec<String>,
    /// The caller's seat, if seated.
    pub your_seat: Option<Seat>,
    pub password_required: bool,
}

impl GameSummary {
    pub fn for_client(session: &GameSession, client_id: &str) -> Self {
        let state = &session.state;
        Self {
            game_id: state.game_id.clone(),
            status: state.status,
            seats: state.seats,
            players: state.players.iter().map(|p| p.client_id.clone()).collect(),
            your_seat: state.seat_of(client_id),
            password_required: state.password.is_some(),
        }
    }
}
