/// Main configuration module.
/// 
/// Re-exports submodules for server and matchmaking configuration.
pub mod matchmaking;
pub mod server;
