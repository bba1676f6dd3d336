use actix_web::web;

pub mod health;
pub mod kubix;

/// Register every route. `main.rs` and the integration tests share this so
/// both exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.configure(kubix::configure_routes);
}
