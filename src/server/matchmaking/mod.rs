/// Matchmaking module: waiting pools, room lifecycle, and signaling/chat relay.

pub mod server;
pub mod session;
pub mod messages;
pub mod notifier;
pub mod queues;
pub mod rooms;
pub mod types;
