// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and origin checks
//! - Matchmaking logic (waiting pools, rooms, signaling and chat relay)

pub mod state;
pub mod router;
pub mod cors;
pub mod matchmaking;
pub mod ws_error;
