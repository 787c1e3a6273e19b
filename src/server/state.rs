// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the matchmaking server address and the origin allow-list.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::cors::AllowedOrigins;
use crate::server::matchmaking::server::MatchmakingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the matchmaking server actor (pools, rooms, relay).
    pub matchmaking_addr: Addr<MatchmakingServer>,
    /// Origins allowed to open a websocket.
    pub allowed_origins: AllowedOrigins,
}

impl AppState {
    /// Create a new AppState with the given actor address and origin list.
    pub fn new(
        matchmaking_addr: Addr<MatchmakingServer>,
        allowed_origins: AllowedOrigins,
    ) -> Self {
        AppState {
            matchmaking_addr,
            allowed_origins,
        }
    }
}
