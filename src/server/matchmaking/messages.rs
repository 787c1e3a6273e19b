use actix::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::RoomId;

/// Attributes declared by a client asking to be matched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinQueueRequest {
    pub nickname: String,
    pub gender: String,
    pub age_group: String,
}

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum ClientWsMessage {
    JoinQueue(JoinQueueRequest),
    /// Room ids stay raw strings here: an unparseable id is a stale reference, not a malformed frame.
    #[serde(rename_all = "camelCase")]
    Signal { room: String, signal_data: Value },
    ChatMessage { room: String, message: Value },
    LeaveRoom(String),
    Ping,
}

// Message serveur -> client
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum ServerWsMessage {
    #[serde(rename_all = "camelCase")]
    Matched {
        room: RoomId,
        partner_nickname: String,
        initiator: bool,
    },
    #[serde(rename_all = "camelCase")]
    Signal { signal_data: Value },
    Message(Value),
    PartnerDisconnected,
    Error(String),
}

impl ServerWsMessage {
    pub fn matched(room: RoomId, partner_nickname: &str, initiator: bool) -> Self {
        Self::Matched {
            room,
            partner_nickname: partner_nickname.to_string(),
            initiator,
        }
    }
    pub fn signal(signal_data: Value) -> Self {
        Self::Signal { signal_data }
    }
    pub fn message(payload: Value) -> Self {
        Self::Message(payload)
    }
    pub fn error(message: &str) -> Self {
        Self::Error(message.to_string())
    }
}
