use tracing::warn;

use super::SessionCoordinator;
use crate::domain::ids;
use crate::domain::session::GameSession;
use crate::domain::state::GameStatus;
use crate::AppError;

impl SessionCoordinator {
    /// Current session of `game_id`, readable only by seated players.
    ///
    /// Reads through the section so a view never interleaves with a write.
    pub async fn game_view(&self, client_id: &str, game_id: &str) -> Result<GameSession, AppError> {
        ids::require_game_id(game_id)?;
        let id = game_id.to_string();
        let reader = client_id.to_string();

        self.run_exclusive(game_id, move |this| async move {
            let session = this.store.load(&id).await?;
            session.state.require_seat(&reader)?;
            Ok(session)
        })
        .await
    }

    /// Games `client_id` sits in, plus Open games still waiting for players.
    ///
    /// Saves replace whole records atomically, so listing reads without the
    /// per-game sections. Quarantined and unreadable games are skipped.
    pub async fn list_games(&self, client_id: &str) -> Result<Vec<GameSession>, AppError> {
        let ids = self.store.list_ids().await?;
        let mut visible = Vec::new();

        for game_id in ids {
            if self.quarantine.contains(&game_id) {
                continue;
            }
            let session = match self.store.load(&game_id).await {
                Ok(session) => session,
                Err(err) => {
                    if err.is_corruption() {
                        self.quarantine.insert(&game_id, &err.to_string());
                    } else {
                        warn!(game_id = %game_id, error = %err, "Skipping unreadable game");
                    }
                    continue;
                }
            };
            let state = &session.state;
            if state.seat_of(client_id).is_some() || state.status == GameStatus::Open {
                visible.push(session);
            }
        }
        Ok(visible)
    }
}
