//! Capability for delivering outbound events to a single connection.

use std::collections::HashMap;

use actix::Recipient;
use log::debug;

use super::messages::ServerWsMessage;
use super::types::ClientId;

/// Send an event to one connection. The matchmaking core never broadcasts.
pub trait ClientNotifier {
    fn notify(&self, to: ClientId, msg: ServerWsMessage);
}

/// Live websocket sessions, keyed by connection id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<ClientId, Recipient<ServerWsMessage>>,
}

impl SessionRegistry {
    pub fn register(&mut self, id: ClientId, addr: Recipient<ServerWsMessage>) {
        self.sessions.insert(id, addr);
    }

    pub fn unregister(&mut self, id: ClientId) {
        if self.sessions.remove(&id).is_none() {
            debug!("[Matchmaking] Session {} was not registered", id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl ClientNotifier for SessionRegistry {
    fn notify(&self, to: ClientId, msg: ServerWsMessage) {
        match self.sessions.get(&to) {
            Some(addr) => addr.do_send(msg),
            None => debug!("[Matchmaking] Dropped event for unknown session {}", to),
        }
    }
}
