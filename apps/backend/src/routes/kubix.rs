//! The `/` endpoint: form POSTs mutate, query GETs read.
//!
//! Every request authenticates the client first (except registration), then
//! hands the validated command to the session coordinator.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::debug;

use crate::error::AppError;
use crate::extractors::{ValidatedForm, ValidatedQuery};
use crate::protocol::{
    Command, GameCommand, GameSummary, GameView, KubixForm, KubixRequest, Verb,
};
use crate::services::SessionCoordinator;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct Registered {
    client_id: String,
}

#[derive(Debug, Serialize)]
struct GameList {
    games: Vec<GameSummary>,
}

async fn post_command(
    app_state: web::Data<AppState>,
    form: ValidatedForm<KubixForm>,
) -> Result<HttpResponse, AppError> {
    let request = KubixRequest::parse(form.into_inner(), Verb::Post)?;
    dispatch(&app_state, request).await
}

async fn get_command(
    app_state: web::Data<AppState>,
    query: ValidatedQuery<KubixForm>,
) -> Result<HttpResponse, AppError> {
    let request = KubixRequest::parse(query.into_inner(), Verb::Get)?;
    dispatch(&app_state, request).await
}

async fn dispatch(app_state: &AppState, request: KubixRequest) -> Result<HttpResponse, AppError> {
    debug!(request = ?request, "Dispatching command");
    let KubixRequest {
        client_id,
        client_pw,
        command,
    } = request;

    match command {
        Command::Register => {
            app_state.clients.register(&client_id, &client_pw).await?;
            Ok(HttpResponse::Created().json(Registered { client_id }))
        }
        Command::Authenticated(command) => {
            app_state.clients.authenticate(&client_id, &client_pw).await?;
            run_game_command(&app_state.coordinator, &client_id, command).await
        }
    }
}

async fn run_game_command(
    coordinator: &SessionCoordinator,
    client_id: &str,
    command: GameCommand,
) -> Result<HttpResponse, AppError> {
    let session = match command {
        GameCommand::CreateGame { game_id, game_pw } => {
            coordinator
                .create_game(client_id, game_id.as_deref(), &game_pw)
                .await?
        }
        GameCommand::Join { game_id, game_pw } => {
            coordinator.join_game(client_id, &game_id, &game_pw).await?
        }
        GameCommand::Move { game_id, payload } => {
            coordinator.submit_move(client_id, &game_id, &payload).await?
        }
        GameCommand::GiveUp { game_id } => coordinator.give_up(client_id, &game_id).await?,
        GameCommand::Undo { game_id } => coordinator.undo(client_id, &game_id).await?,
        GameCommand::Redo { game_id } => coordinator.redo(client_id, &game_id).await?,
        GameCommand::View { game_id } => coordinator.game_view(client_id, &game_id).await?,
        GameCommand::ListGames => {
            let games = coordinator
                .list_games(client_id)
                .await?
                .iter()
                .map(|session| GameSummary::for_client(session, client_id))
                .collect();
            return Ok(HttpResponse::Ok().json(GameList { games }));
        }
    };

    Ok(HttpResponse::Ok().json(GameView::from(&session)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::post().to(post_command))
        .route("/", web::get().to(get_command));
}
