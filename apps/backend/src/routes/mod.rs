use actix_web::web;

pub mod auth;
pub mod session;

/// Configure application routes. The same registration is used by
/// `main.rs` and by the HTTP tests, so endpoint behavior can be
/// exercised without a running server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Liveness: /health
    crate::health::configure(cfg);

    // Identity: /register, /login
    auth::configure_routes(cfg);

    // Game: /session/**
    cfg.service(web::scope("/session").configure(session::configure_scope));
}
