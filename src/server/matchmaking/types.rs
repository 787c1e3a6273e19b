//! Core value types shared by the matchmaking queues, the room table and the wire protocol.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::matchmaking::ADULT_AGE_GROUP;

/// Identifier of a websocket connection, valid for the connection's lifetime.
pub type ClientId = Uuid;

/// Identifier of an active room. Minted independently of the participants' ids.
pub type RoomId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the gender declared by the client. Only `male` and `female` map to a pool.
    pub fn from_wire(value: &str) -> Result<Self, QueueError> {
        match value {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(QueueError::InvalidQueue),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Adult,
    Minor,
}

impl AgeGroup {
    /// `"18+"` is the adult pool; every other declared value lands in the minor pool.
    pub fn from_wire(value: &str) -> Self {
        if value == ADULT_AGE_GROUP {
            AgeGroup::Adult
        } else {
            AgeGroup::Minor
        }
    }
}

/// Key of one of the four waiting pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub gender: Gender,
    pub age_group: AgeGroup,
}

impl PoolKey {
    pub fn new(gender: Gender, age_group: AgeGroup) -> Self {
        Self { gender, age_group }
    }

    /// All four pools, in a fixed order used for scans.
    pub const ALL: [PoolKey; 4] = [
        PoolKey { gender: Gender::Male, age_group: AgeGroup::Adult },
        PoolKey { gender: Gender::Male, age_group: AgeGroup::Minor },
        PoolKey { gender: Gender::Female, age_group: AgeGroup::Adult },
        PoolKey { gender: Gender::Female, age_group: AgeGroup::Minor },
    ];
}

/// A client waiting for, or taking part in, a pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub nickname: String,
    pub gender: Gender,
    pub age_group: AgeGroup,
}

impl Client {
    /// Build a client from the attributes declared in a `joinQueue` request.
    pub fn from_declared(
        id: ClientId,
        nickname: String,
        gender: &str,
        age_group: &str,
    ) -> Result<Self, QueueError> {
        Ok(Self {
            id,
            nickname,
            gender: Gender::from_wire(gender)?,
            age_group: AgeGroup::from_wire(age_group),
        })
    }

    pub fn pool_key(&self) -> PoolKey {
        PoolKey::new(self.gender, self.age_group)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Invalid queue")]
    InvalidQueue,
}
