//! Table of active rooms. Every room holds exactly two distinct clients.

use std::collections::HashMap;

use uuid::Uuid;

use super::types::{Client, ClientId, RoomId};

#[derive(Clone, Debug)]
pub struct Room {
    pub id: RoomId,
    /// Client whose join request produced the match.
    pub initiator: Client,
    /// Client that was dequeued to complete the match.
    pub responder: Client,
}

impl Room {
    pub fn contains(&self, client_id: ClientId) -> bool {
        self.initiator.id == client_id || self.responder.id == client_id
    }

    /// The other participant, or `None` when `self_id` is not in this room.
    pub fn partner_of(&self, self_id: ClientId) -> Option<&Client> {
        if self.initiator.id == self_id {
            Some(&self.responder)
        } else if self.responder.id == self_id {
            Some(&self.initiator)
        } else {
            None
        }
    }
}

pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Open a room and return its freshly minted id.
    ///
    /// `initiator` and `responder` must be different clients, neither already in a room.
    pub fn create(&mut self, initiator: Client, responder: Client) -> RoomId {
        debug_assert_ne!(initiator.id, responder.id);
        let mut id = Uuid::new_v4();
        while self.rooms.contains_key(&id) {
            id = Uuid::new_v4();
        }
        self.rooms.insert(id, Room { id, initiator, responder });
        id
    }

    pub fn lookup(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn remove(&mut self, id: RoomId) -> Option<Room> {
        self.rooms.remove(&id)
    }

    /// Other member of room `id`, if the room exists and `self_id` belongs to it.
    pub fn find_partner(&self, id: RoomId, self_id: ClientId) -> Option<&Client> {
        self.lookup(id).and_then(|room| room.partner_of(self_id))
    }

    /// Linear scan for the room a client takes part in.
    pub fn room_of(&self, client_id: ClientId) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| room.contains(client_id))
            .map(|room| room.id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for RoomTable {
    fn default() -> Self {
        Self::new()
    }
}
