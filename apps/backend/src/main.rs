use actix_web::{web, App, HttpServer};
use kubix_backend::config::ServerConfig;
use kubix_backend::infra::state::StateBuilder;
use kubix_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use kubix_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    let (host, port) = config.bind_addr();

    let app_state = match StateBuilder::from_config(config).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %host,
        port,
        data_dir = %app_state.config.data_dir.display(),
        storage = app_state.storage_backend(),
        "Starting Kubix server"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
