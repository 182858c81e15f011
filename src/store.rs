//! Persisted-store port and the in-memory implementation.
//!
//! The store must support idempotent upsert-by-id for creatures, idempotent
//! directed evolution edges, and append-only battle records. Natural record
//! order is pokedex-id order.

use crate::model::{BattleRecord, BattleResult, CreatureRecord, EvolutionEdge};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("evolution edge from '{0}' to itself is not allowed")]
    SelfEdge(String),
    #[error("name '{name}' is already taken by creature #{existing_id}")]
    NameConflict { name: String, existing_id: u32 },
}

pub trait CreatureStore {
    fn find_by_id(&self, id: u32) -> Result<Option<CreatureRecord>, StoreError>;
    fn find_by_name(&self, name: &str) -> Result<Option<CreatureRecord>, StoreError>;
    /// All stored creature names in natural (pokedex id) order.
    fn creature_names(&self) -> Result<Vec<String>, StoreError>;
    /// Insert or update by id. Attribute fields take the new values; type
    /// and ability associations are additive, so re-persisting an already
    /// known creature is a no-op.
    fn upsert_creature(&self, record: &CreatureRecord) -> Result<(), StoreError>;
    /// Idempotent insert; at most one edge per ordered (from, to) pair.
    fn insert_edge(&self, edge: EvolutionEdge) -> Result<(), StoreError>;
    /// Name of the first stored predecessor of `name`, if any.
    fn predecessor(&self, name: &str) -> Result<Option<String>, StoreError>;
    /// Name of the first stored successor of `name`, if any.
    fn successor(&self, name: &str) -> Result<Option<String>, StoreError>;
    fn insert_battle(
        &self,
        user_team: Vec<String>,
        opponent_team: Vec<String>,
        result: BattleResult,
        log: String,
    ) -> Result<BattleRecord, StoreError>;
    fn battles(&self) -> Result<Vec<BattleRecord>, StoreError>;
}

#[derive(Default)]
struct Inner {
    creatures: BTreeMap<u32, CreatureRecord>,
    edges: Vec<EvolutionEdge>,
    battles: Vec<BattleRecord>,
    next_battle_id: u64,
}

/// Process-wide in-memory store. Writes are atomic under the lock, which is
/// all the concurrency the resolution path needs.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CreatureStore for MemoryStore {
    fn find_by_id(&self, id: u32) -> Result<Option<CreatureRecord>, StoreError> {
        Ok(self.read().creatures.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<CreatureRecord>, StoreError> {
        Ok(self
            .read()
            .creatures
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn creature_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read().creatures.values().map(|c| c.name.clone()).collect())
    }

    fn upsert_creature(&self, record: &CreatureRecord) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(existing) = inner
            .creatures
            .values()
            .find(|c| c.id != record.id && c.name.eq_ignore_ascii_case(&record.name))
        {
            return Err(StoreError::NameConflict {
                name: record.name.clone(),
                existing_id: existing.id,
            });
        }
        match inner.creatures.get_mut(&record.id) {
            Some(stored) => {
                let mut merged = record.clone();
                for tag in &stored.types {
                    if !merged.types.iter().any(|t| t.name == tag.name) {
                        merged.types.push(tag.clone());
                    }
                }
                for ability in &stored.abilities {
                    if !merged.abilities.contains(ability) {
                        merged.abilities.push(ability.clone());
                    }
                }
                *stored = merged;
            }
            None => {
                inner.creatures.insert(record.id, record.clone());
            }
        }
        Ok(())
    }

    fn insert_edge(&self, edge: EvolutionEdge) -> Result<(), StoreError> {
        if edge.from.eq_ignore_ascii_case(&edge.to) {
            return Err(StoreError::SelfEdge(edge.from));
        }
        let mut inner = self.write();
        let exists = inner
            .edges
            .iter()
            .any(|e| e.from == edge.from && e.to == edge.to);
        if !exists {
            inner.edges.push(edge);
        }
        Ok(())
    }

    fn predecessor(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .read()
            .edges
            .iter()
            .find(|e| e.to.eq_ignore_ascii_case(name))
            .map(|e| e.from.clone()))
    }

    fn successor(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .read()
            .edges
            .iter()
            .find(|e| e.from.eq_ignore_ascii_case(name))
            .map(|e| e.to.clone()))
    }

    fn insert_battle(
        &self,
        user_team: Vec<String>,
        opponent_team: Vec<String>,
        result: BattleResult,
        log: String,
    ) -> Result<BattleRecord, StoreError> {
        let mut inner = self.write();
        inner.next_battle_id += 1;
        let record = BattleRecord {
            id: inner.next_battle_id,
            user_team,
            opponent_team,
            result,
            log,
            created_at: Utc::now(),
        };
        inner.battles.push(record.clone());
        Ok(record)
    }

    fn battles(&self) -> Result<Vec<BattleRecord>, StoreError> {
        Ok(self.read().battles.clone())
    }
}
