use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::config::session::SessionConfig;
use backend::infra::db::connect_db;
use backend::middleware::cors::cors_middleware;
use backend::routes;
use backend::services::history::SeaHistorySink;
use backend::services::rewards::SeaWinLedger;
use backend::services::session::SessionEngine;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use migration::{migrate, MigrationCommand};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("❌ BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt.as_bytes());

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("❌ DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    let session_config = match SessionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid session configuration: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Starting lobby backend on http://{}:{}", host, port);

    let db = match connect_db(&database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, MigrationCommand::Up).await {
        eprintln!("❌ Migration failed: {e}");
        std::process::exit(1);
    }

    println!("✅ Database connected");

    let engine = SessionEngine::new(
        session_config,
        Arc::new(SeaWinLedger::new(db.clone())),
        Some(Arc::new(SeaHistorySink::new(db.clone()))),
        None,
    );

    // The lifecycle driver: opens the first round and keeps the
    // open -> resolve -> cooldown cycle running until shutdown.
    tokio::spawn(Arc::clone(&engine).run());

    let app_state = AppState::new(db, security_config, engine);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
