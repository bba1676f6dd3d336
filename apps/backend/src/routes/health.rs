use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    storage: &'static str,
    rules: &'static str,
    started_at: String,
    time: String,
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let response = HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        storage: app_state.storage_backend(),
        rules: app_state.coordinator.rules().name(),
        started_at: rfc3339(app_state.started_at),
        time: rfc3339(OffsetDateTime::now_utc()),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
