//! One game's state together with its move history.
//!
//! Every operation here is pure with respect to I/O: the coordinator loads a
//! `GameSession`, calls one of these methods on a local copy and persists the
//! result only if the call succeeded.

use serde::{Deserialize, Serialize};

use crate::auth::credentials::Credential;
use crate::domain::move_log::{Move, MoveAction, MoveLog};
use crate::domain::rules::{GameRules, Verdict};
use crate::domain::state::{GameState, GameStatus, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub state: GameState,
    pub log: MoveLog,
}

impl GameSession {
    /// New Open game with the creator in seat 0 and an empty history.
    pub fn create(
        game_id: &str,
        creator_id: &str,
        password: Option<Credential>,
        seats: u8,
        rules: &dyn GameRules,
    ) -> Self {
        let board = rules.initial_board(seats);
        Self {
            state: GameState::new(game_id, creator_id, password, seats, board.clone()),
            log: MoveLog::new(board),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.state.game_id
    }

    pub fn join(&mut self, client_id: &str, password: &str) -> Result<Seat, DomainError> {
        self.state.join(client_id, password)
    }

    /// Play `payload` for `client_id`, discarding any redo tail.
    pub fn apply_move(
        &mut self,
        client_id: &str,
        payload: &str,
        rules: &dyn GameRules,
    ) -> Result<&Move, DomainError> {
        let seat = self.state.require_seat(client_id)?;
        self.state.require_active()?;
        if seat != self.state.turn {
            return Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                format!("Seat {seat} cannot move; seat {} holds the turn", self.state.turn),
            ));
        }

        let verdict = rules
            .validate(&self.state, seat, payload)
            .map_err(|v| DomainError::validation(ValidationKind::IllegalMove, v.0))?;

        let board_after = verdict.board.clone();
        apply_verdict(&mut self.state, seat, verdict);
        Ok(self.log.record(
            seat,
            MoveAction::Play {
                payload: payload.to_string(),
            },
            board_after,
        ))
    }

    /// End the game with `client_id` conceding.
    pub fn give_up(&mut self, client_id: &str) -> Result<Option<Seat>, DomainError> {
        let seat = self.state.require_seat(client_id)?;
        self.state.require_active()?;

        let winner = self.state.forfeit_winner(seat);
        self.state.status = GameStatus::Finished;
        self.state.winner = winner;
        self.log
            .record(seat, MoveAction::GiveUp, self.state.board.clone());
        Ok(winner)
    }

    /// Step back one move. The turn returns to whoever made the undone move.
    pub fn undo(&mut self, client_id: &str, rules: &dyn GameRules) -> Result<(), DomainError> {
        self.state.require_seat(client_id)?;
        if !self.log.can_undo() {
            return Err(DomainError::validation(
                ValidationKind::NothingToUndo,
                format!("Game {} has no move to undo", self.state.game_id),
            ));
        }
        self.state.require_active()?;

        self.log.step_back();
        self.state = self.replay(rules)?;
        Ok(())
    }

    /// Re-apply the first move of the redo tail.
    pub fn redo(&mut self, client_id: &str, rules: &dyn GameRules) -> Result<(), DomainError> {
        self.state.require_seat(client_id)?;
        if !self.log.can_redo() {
            return Err(DomainError::validation(
                ValidationKind::NothingToRedo,
                format!("Game {} has no move to redo", self.state.game_id),
            ));
        }
        self.state.require_active()?;

        let mv = match self.log.step_forward() {
            Some(mv) => mv.clone(),
            None => return Err(DomainError::corruption("redo tail vanished")),
        };
        advance(&mut self.state, &mv, rules)
    }

    /// Recompute the state from the initial board and `moves[..cursor]`.
    pub fn replay(&self, rules: &dyn GameRules) -> Result<GameState, DomainError> {
        let mut state = self.state.clone();
        state.board = self.log.initial_board.clone();
        state.turn = 0;
        state.winner = None;
        state.status = if state.is_full() {
            GameStatus::Active
        } else {
            GameStatus::Open
        };

        for mv in self.log.active() {
            advance(&mut state, mv, rules)?;
        }
        Ok(state)
    }

    /// Structural invariants of a stored record.
    pub fn check_invariants(&self) -> Result<(), String> {
        self.log.check_consistency()?;

        let state = &self.state;
        if state.players.len() > state.seats as usize {
            return Err(format!(
                "{} players in a {}-seat game",
                state.players.len(),
                state.seats
            ));
        }
        for (idx, player) in state.players.iter().enumerate() {
            if player.seat as usize != idx {
                return Err(format!("player at index {idx} holds seat {}", player.seat));
            }
        }
        if state.is_full() == (state.status == GameStatus::Open) {
            return Err(format!(
                "status {:?} with {} of {} seats taken",
                state.status,
                state.players.len(),
                state.seats
            ));
        }
        if state.status == GameStatus::Open && !self.log.is_empty() {
            return Err("moves recorded before the game started".to_string());
        }
        if state.turn >= state.seats {
            return Err(format!("turn {} out of range", state.turn));
        }
        Ok(())
    }
}

fn apply_verdict(state: &mut GameState, seat: Seat, verdict: Verdict) {
    state.board = verdict.board;
    state.turn = state.next_seat(seat);
    if let Some(outcome) = verdict.outcome {
        state.status = GameStatus::Finished;
        state.winner = outcome.winner();
    }
}

/// Apply an already-recorded move, checking it against the rules.
fn advance(state: &mut GameState, mv: &Move, rules: &dyn GameRules) -> Result<(), DomainError> {
    if state.status != GameStatus::Active {
        return Err(DomainError::corruption(format!(
            "move {} recorded while game was {:?}",
            mv.seq, state.status
        )));
    }
    if mv.seat >= state.seats {
        return Err(DomainError::corruption(format!(
            "move {} made by seat {} in a {}-seat game",
            mv.seq, mv.seat, state.seats
        )));
    }

    match &mv.action {
        // Any seated player may concede; only plays need the turn.
        MoveAction::Play { payload } => {
            if mv.seat != state.turn {
                return Err(DomainError::corruption(format!(
                    "move {} made by seat {} but seat {} held the turn",
                    mv.seq, mv.seat, state.turn
                )));
            }
            let verdict = rules.validate(state, mv.seat, payload).map_err(|v| {
                DomainError::corruption(format!("replay rejected move {}: {v}", mv.seq))
            })?;
            if verdict.board != mv.board_after {
                return Err(DomainError::corruption(format!(
                    "replay of move {} diverged from the recorded board",
                    mv.seq
                )));
            }
            apply_verdict(state, mv.seat, verdict);
        }
        MoveAction::GiveUp => {
            state.winner = state.forfeit_winner(mv.seat);
            state.status = GameStatus::Finished;
        }
    }
    Ok(())
}
