//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.
//!
//! `api-server issue-token <subject>` prints a signed token for local use
//! instead of starting the server.

use std::io;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::handlers;
use api_server::state::AppState;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use quill_core::ports::TokenService;
use quill_infra::JwtTokenService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("issue-token") {
        let subject = args.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "usage: api-server issue-token <subject>")
        })?;
        let token = JwtTokenService::new(config.jwt.clone())
            .generate_token(&subject)
            .map_err(|e| io::Error::other(e.to_string()))?;
        println!("{token}");
        return Ok(());
    }

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::from_config(&config).await;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
