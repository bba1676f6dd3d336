use tracing::{debug, info};

use super::SessionCoordinator;
use crate::auth::credentials::Credential;
use crate::domain::ids;
use crate::domain::rules;
use crate::domain::session::GameSession;
use crate::domain::state::Seat;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::AppError;

impl SessionCoordinator {
    /// Create an Open game with `client_id` in seat 0.
    ///
    /// `game_id` defaults to the creator's id. An empty `game_pw` makes an
    /// open game anyone may join.
    pub async fn create_game(
        &self,
        client_id: &str,
        game_id: Option<&str>,
        game_pw: &str,
    ) -> Result<GameSession, AppError> {
        let game_id = game_id.filter(|id| !id.is_empty()).unwrap_or(client_id);
        ids::require_client_id(client_id)?;
        ids::require_game_id(game_id)?;

        // Hash outside the section; it is the slow part.
        let password = (!game_pw.is_empty()).then(|| Credential::derive(game_pw));
        let creator = client_id.to_string();
        let id = game_id.to_string();

        let session = self
            .run_exclusive(game_id, move |this| async move {
                if this.store.exists(&id).await? {
                    return Err(DomainError::conflict(
                        ConflictKind::GameExists,
                        format!("Game {id} already exists"),
                    ));
                }
                let session =
                    GameSession::create(&id, &creator, password, this.seats, this.rules.as_ref());
                this.store.save(&session).await?;
                Ok(session)
            })
            .await?;

        info!(
            game_id,
            client_id,
            seats = session.state.seats,
            rules = self.rules.name(),
            "Game created"
        );
        Ok(session)
    }

    pub async fn join_game(
        &self,
        client_id: &str,
        game_id: &str,
        game_pw: &str,
    ) -> Result<GameSession, AppError> {
        ids::require_game_id(game_id)?;
        let joiner = client_id.to_string();
        let password = game_pw.to_string();

        let outcome = self
            .run_mutation(game_id, "join", move |session, _| {
                session.join(&joiner, &password)
            })
            .await?;
        info!(game_id, client_id, seat = outcome.value, "Player joined");
        Ok(outcome.session)
    }

    pub async fn submit_move(
        &self,
        client_id: &str,
        game_id: &str,
        payload: &str,
    ) -> Result<GameSession, AppError> {
        ids::require_game_id(game_id)?;
        rules::require_payload(payload)?;
        let mover = client_id.to_string();
        let payload = payload.to_string();

        let outcome = self
            .run_mutation(game_id, "move", move |session, rules| {
                session
                    .apply_move(&mover, &payload, rules)
                    .map(|mv| (mv.seq, mv.seat))
            })
            .await?;
        let (seq, seat) = outcome.value;
        debug!(game_id, client_id, seq, seat, "Move applied");
        Ok(outcome.session)
    }

    pub async fn give_up(&self, client_id: &str, game_id: &str) -> Result<GameSession, AppError> {
        ids::require_game_id(game_id)?;
        let quitter = client_id.to_string();

        let outcome = self
            .run_mutation(game_id, "give_up", move |session, _| session.give_up(&quitter))
            .await?;
        let winner: Option<Seat> = outcome.value;
        info!(game_id, client_id, winner = ?winner, "Player gave up");
        Ok(outcome.session)
    }

    pub async fn undo(&self, client_id: &str, game_id: &str) -> Result<GameSession, AppError> {
        ids::require_game_id(game_id)?;
        let actor = client_id.to_string();

        let outcome = self
            .run_mutation(game_id, "undo", move |session, rules| {
                session.undo(&actor, rules)
            })
            .await?;
        debug!(game_id, client_id, cursor = outcome.session.log.cursor(), "Move undone");
        Ok(outcome.session)
    }

    pub async fn redo(&self, client_id: &str, game_id: &str) -> Result<GameSession, AppError> {
        ids::require_game_id(game_id)?;
        let actor = client_id.to_string();

        let outcome = self
            .run_mutation(game_id, "redo", move |session, rules| {
                session.redo(&actor, rules)
            })
            .await?;
        debug!(game_id, client_id, cursor = outcome.session.log.cursor(), "Move redone");
        Ok(outcome.session)
    }
}
