use std::future::Future;

use tracing::{debug, info, Instrument, Span};

use super::SessionCoordinator;
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::rules::GameRules;
use crate::domain::session::GameSession;
use crate::errors::domain::DomainError;
use crate::AppError;

#[derive(Debug)]
pub struct MutationOutcome<T> {
    /// The session as saved.
    pub session: GameSession,
    pub value: T,
    pub transitions: Vec<GameTransition>,
}

impl SessionCoordinator {
    /// Run `op` inside the exclusive section of `game_id`.
    ///
    /// A caller dropped while still queued never runs `op`. Once the section
    /// is acquired, `op` runs on its own task and completes even if the
    /// caller goes away. A `DataCorruption` failure quarantines the id.
    pub(super) async fn run_exclusive<T, F, Fut>(&self, game_id: &str, op: F) -> Result<T, AppError>
    where
        F: FnOnce(SessionCoordinator) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
        T: Send + 'static,
    {
        self.quarantine.check(game_id)?;
        let guard = self.locks.acquire(game_id, self.lock_timeout).await?;

        let this = self.clone();
        let id = game_id.to_string();
        let task = tokio::spawn(
            async move {
                let _guard = guard;
                // Another request may have quarantined the id while we queued.
                this.quarantine.check(&id)?;
                let quarantine = this.quarantine.clone();
                let result = op(this).await;
                if let Err(err) = &result {
                    if err.is_corruption() {
                        quarantine.insert(&id, &err.to_string());
                    }
                }
                result
            }
            .instrument(Span::current()),
        );

        task.await
            .map_err(|e| AppError::internal(format!("game task for {game_id} failed: {e}")))?
            .map_err(AppError::from)
    }

    /// Load, mutate and save one game inside its exclusive section.
    ///
    /// Nothing is saved when `mutate` fails.
    pub(super) async fn run_mutation<T, F>(
        &self,
        game_id: &str,
        action: &'static str,
        mutate: F,
    ) -> Result<MutationOutcome<T>, AppError>
    where
        F: FnOnce(&mut GameSession, &dyn GameRules) -> Result<T, DomainError> + Send + 'static,
        T: Send + 'static,
    {
        let id = game_id.to_string();
        let outcome = self
            .run_exclusive(game_id, move |this| async move {
                let mut session = this.store.load(&id).await?;
                let before = GameLifecycleView::of(&session);

                let value = mutate(&mut session, this.rules.as_ref())?;

                this.store.save(&session).await?;
                let after = GameLifecycleView::of(&session);
                Ok(MutationOutcome {
                    transitions: derive_game_transitions(&before, &after),
                    session,
                    value,
                })
            })
            .await?;

        debug!(game_id, action, cursor = outcome.session.log.cursor(), "Game mutation saved");
        for transition in &outcome.transitions {
            info!(game_id, action, transition = ?transition, "Game transition");
        }
        Ok(outcome)
    }
}
