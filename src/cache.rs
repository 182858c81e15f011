//! Per-entry TTL cache for remote payloads. Get/set only; entries expire,
//! nothing else invalidates them.

use crate::remote::CreaturePayload;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub trait PayloadCache {
    fn get(&self, key: &str) -> Option<CreaturePayload>;
    fn set(&self, key: &str, payload: CreaturePayload, ttl: Duration);
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (CreaturePayload, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CreaturePayload> {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((payload, expires_at)) = entries.get(key) {
            if Instant::now() < *expires_at {
                return Some(payload.clone());
            }
        }
        entries.remove(key);
        None
    }

    fn set(&self, key: &str, payload: CreaturePayload, ttl: Duration) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.to_string(), (payload, Instant::now() + ttl));
    }
}
