//! Main entry point for the backend server.
//!
//! Loads configuration, starts the matchmaking actor, and launches the HTTP server with
//! the liveness endpoints and the matchmaking WebSocket endpoint.

use actix::Actor;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use server::matchmaking::server::MatchmakingServer;

mod config;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config::server::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Start the MatchmakingServer actor (pools, rooms, signaling relay).
    let matchmaking_addr = MatchmakingServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(
        matchmaking_addr,
        config.allowed_origins.clone(),
    ));

    info!("Server running on {}:{}", config.host, config.port);

    // Start the HTTP server with WebSocket endpoints.
    let origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(origins.cors())
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
