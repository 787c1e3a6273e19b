/// Matchmaking server actor.
///
/// Owns the waiting pools and the room table, pairs clients as they join, relays
/// signaling and chat payloads between the two members of a room, and tears rooms
/// down when a member leaves or disconnects. Every event is handled to completion by
/// this single actor, so the pools and rooms are never observed half-updated.

use actix::prelude::*;
use log::{debug, info, warn};
use serde_json::Value;
use std::time::Duration;

use super::messages::{JoinQueueRequest, ServerWsMessage};
use super::notifier::{ClientNotifier, SessionRegistry};
use super::queues::MatchmakingQueues;
use super::rooms::RoomTable;
use super::types::{Client, ClientId, RoomId};
use crate::config::matchmaking::STATS_LOG_INTERVAL_SECS;

/// Pairing and relay state, independent of the transport.
#[derive(Default)]
pub struct Matchmaker {
    queues: MatchmakingQueues,
    rooms: RoomTable,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a `joinQueue` request.
    ///
    /// Returns the new room id when the client was paired immediately, `None` when it
    /// was queued, rejected, or ignored because it is already queued or in a room.
    pub fn join_queue(
        &mut self,
        client_id: ClientId,
        request: JoinQueueRequest,
        notifier: &impl ClientNotifier,
    ) -> Option<RoomId> {
        let client = match Client::from_declared(
            client_id,
            request.nickname,
            &request.gender,
            &request.age_group,
        ) {
            Ok(client) => client,
            Err(e) => {
                debug!("[Matchmaking] Rejected join from {}: {}", client_id, e);
                notifier.notify(client_id, ServerWsMessage::error(&e.to_string()));
                return None;
            }
        };

        if self.queues.contains(client_id) || self.rooms.room_of(client_id).is_some() {
            warn!("[Matchmaking] Client {} is already queued or paired, join ignored", client_id);
            return None;
        }

        self.request_match(client, notifier)
    }

    /// Pair `client` with the oldest suitable waiting client, or queue it.
    pub fn request_match(&mut self, client: Client, notifier: &impl ClientNotifier) -> Option<RoomId> {
        let Some(partner) = self.queues.take_partner(&client) else {
            debug!("[Matchmaking] Client {} queued in {:?}", client.id, client.pool_key());
            self.queues.enqueue(client);
            return None;
        };

        let (initiator_id, responder_id) = (client.id, partner.id);
        let initiator_nickname = client.nickname.clone();
        let responder_nickname = partner.nickname.clone();
        let room = self.rooms.create(client, partner);

        notifier.notify(initiator_id, ServerWsMessage::matched(room, &responder_nickname, true));
        notifier.notify(responder_id, ServerWsMessage::matched(room, &initiator_nickname, false));
        info!(
            "[Matchmaking] Room {} opened: initiator={} responder={}",
            room, initiator_id, responder_id
        );
        Some(room)
    }

    /// Forward a signaling payload to the sender's partner. Stale rooms are ignored.
    pub fn relay_signal(
        &self,
        room: RoomId,
        sender: ClientId,
        signal_data: Value,
        notifier: &impl ClientNotifier,
    ) -> bool {
        self.relay(room, sender, ServerWsMessage::signal(signal_data), notifier)
    }

    /// Forward a chat payload to the sender's partner. Stale rooms are ignored.
    pub fn relay_message(
        &self,
        room: RoomId,
        sender: ClientId,
        message: Value,
        notifier: &impl ClientNotifier,
    ) -> bool {
        self.relay(room, sender, ServerWsMessage::message(message), notifier)
    }

    fn relay(
        &self,
        room: RoomId,
        sender: ClientId,
        msg: ServerWsMessage,
        notifier: &impl ClientNotifier,
    ) -> bool {
        match self.rooms.find_partner(room, sender) {
            Some(partner) => {
                notifier.notify(partner.id, msg);
                true
            }
            None => {
                debug!("[Matchmaking] Relay from {} to stale room {} ignored", sender, room);
                false
            }
        }
    }

    /// Close a room on request of one of its members. A second call is a no-op.
    pub fn leave_room(&mut self, room: RoomId, requester: ClientId, notifier: &impl ClientNotifier) -> bool {
        // Only a member may close a room; anything else is a stale reference.
        let Some(partner) = self.rooms.find_partner(room, requester).map(|c| c.id) else {
            debug!("[Matchmaking] Leave from {} for stale room {} ignored", requester, room);
            return false;
        };
        self.rooms.remove(room);
        notifier.notify(partner, ServerWsMessage::PartnerDisconnected);
        info!("[Matchmaking] Room {} closed by {}", room, requester);
        true
    }

    /// Remove a disconnected client from its pool or its room.
    pub fn disconnect(&mut self, client_id: ClientId, notifier: &impl ClientNotifier) {
        if self.queues.remove(client_id).is_some() {
            debug!("[Matchmaking] Client {} left the queue", client_id);
        }
        if let Some(room) = self.rooms.room_of(client_id) {
            if let Some(closed) = self.rooms.remove(room) {
                if let Some(partner) = closed.partner_of(client_id) {
                    notifier.notify(partner.id, ServerWsMessage::PartnerDisconnected);
                }
                info!("[Matchmaking] Room {} closed: {} disconnected", room, client_id);
            }
        }
    }

    pub fn stats(&self) -> MatchmakingStats {
        MatchmakingStats {
            waiting: self.queues.total_waiting(),
            rooms: self.rooms.len(),
        }
    }

    pub fn queues(&self) -> &MatchmakingQueues {
        &self.queues
    }

    pub fn rooms(&self) -> &RoomTable {
        &self.rooms
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchmakingStats {
    pub waiting: usize,
    pub rooms: usize,
}

/// Main matchmaking server actor.
#[derive(Default)]
pub struct MatchmakingServer {
    matchmaker: Matchmaker,
    sessions: SessionRegistry,
}

impl MatchmakingServer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Message: a websocket connection was opened.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub client_id: ClientId,
    pub addr: Recipient<ServerWsMessage>,
}

/// Message: a websocket connection was closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub client_id: ClientId,
}

/// Message: client asks to be matched.
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinQueue {
    pub client_id: ClientId,
    pub request: JoinQueueRequest,
}

/// Message: signaling payload for the sender's partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RelaySignal {
    pub client_id: ClientId,
    pub room: RoomId,
    pub signal_data: Value,
}

/// Message: chat payload for the sender's partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RelayChat {
    pub client_id: ClientId,
    pub room: RoomId,
    pub message: Value,
}

/// Message: client leaves its room voluntarily.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveRoom {
    pub client_id: ClientId,
    pub room: RoomId,
}

impl Actor for MatchmakingServer {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[Matchmaking] Server started");
        ctx.run_interval(Duration::from_secs(STATS_LOG_INTERVAL_SECS), |act, _ctx| {
            let stats = act.matchmaker.stats();
            debug!(
                "[Matchmaking] {} waiting, {} rooms, {} sessions",
                stats.waiting,
                stats.rooms,
                act.sessions.len()
            );
        });
    }
}

impl Handler<Connect> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.register(msg.client_id, msg.addr);
        debug!("[Matchmaking] Session {} connected ({} live)", msg.client_id, self.sessions.len());
    }
}

impl Handler<Disconnect> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.unregister(msg.client_id);
        self.matchmaker.disconnect(msg.client_id, &self.sessions);
        debug!("[Matchmaking] Session {} disconnected ({} live)", msg.client_id, self.sessions.len());
    }
}

impl Handler<JoinQueue> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: JoinQueue, _ctx: &mut Self::Context) -> Self::Result {
        self.matchmaker.join_queue(msg.client_id, msg.request, &self.sessions);
    }
}

impl Handler<RelaySignal> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: RelaySignal, _ctx: &mut Self::Context) -> Self::Result {
        self.matchmaker
            .relay_signal(msg.room, msg.client_id, msg.signal_data, &self.sessions);
    }
}

impl Handler<RelayChat> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: RelayChat, _ctx: &mut Self::Context) -> Self::Result {
        self.matchmaker
            .relay_message(msg.room, msg.client_id, msg.message, &self.sessions);
    }
}

impl Handler<LeaveRoom> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: LeaveRoom, _ctx: &mut Self::Context) -> Self::Result {
        self.matchmaker.leave_room(msg.room, msg.client_id, &self.sessions);
    }
}
