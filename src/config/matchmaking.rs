/// Matchmaking and session configuration constants.
/// 
/// This module defines the protocol values and connection timeouts used by the
/// matchmaking lobby and the websocket sessions.
pub const ADULT_AGE_GROUP: &str = "18+"; // Declared age group that maps to the adult pools.

/// Interval (in seconds) between heartbeat pings sent to each client.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 5;

/// Time (in seconds) without any frame from a client before it is considered disconnected.
pub const CLIENT_TIMEOUT_SECS: u64 = 10;

/// Error sent back when a frame cannot be parsed as a client message.
pub const INVALID_CLIENT_MESSAGE: &str = "Invalid client message";

/// Interval (in seconds) between pool and room count log lines.
pub const STATS_LOG_INTERVAL_SECS: u64 = 60;
