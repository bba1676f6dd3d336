use crate::domain::session::GameSession;
use crate::domain::state::{GameStatus, Seat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub status: GameStatus,
    /// `None` unless the game is Active.
    pub turn: Option<Seat>,
    pub players: usize,
    pub cursor: usize,
}

impl GameLifecycleView {
    pub fn of(session: &GameSession) -> Self {
        let state = &session.state;
        Self {
            status: state.status,
            turn: (state.status == GameStatus::Active).then_some(state.turn),
            players: state.players.len(),
            cursor: session.log.cursor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// A new player took a seat.
    PlayerJoined { seat: Seat },

    /// Edge-triggered: Open -> Active.
    GameStarted,

    /// Edge-triggered: the turn became a specific seat.
    TurnBecame { seat: Seat },

    /// The active history moved backwards.
    HistoryRewound { cursor: usize },

    /// Edge-triggered: Active -> Finished.
    GameEnded,
}

/// Derive transitions from before/after lifecycle views.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    for seat in before.players..after.players {
        transitions.push(GameTransition::PlayerJoined { seat: seat as Seat });
    }

    if before.status == GameStatus::Open && after.status == GameStatus::Active {
        transitions.push(GameTransition::GameStarted);
    }

    if after.cursor < before.cursor {
        transitions.push(GameTransition::HistoryRewound {
            cursor: after.cursor,
        });
    }

    if let Some(seat) = after.turn {
        if before.turn != Some(seat) {
            transitions.push(GameTransition::TurnBecame { seat });
        }
    }

    if before.status != GameStatus::Finished && after.status == GameStatus::Finished {
        transitions.push(GameTransition::GameEnded);
    }

    transitions
}
