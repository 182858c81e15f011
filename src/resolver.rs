//! Data Resolver: maps a name or pokedex id to a canonical creature record
//! via storage, then a TTL cache, then the remote provider. A successful
//! remote fetch is written through to the store so later lookups stay local.

use crate::cache::PayloadCache;
use crate::model::{CreatureRecord, StatBlock, TypeTag};
use crate::remote::{CreaturePayload, RemoteError, RemoteProvider};
use crate::store::{CreatureStore, StoreError};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("'{0}' was not found locally or remotely")]
    NotFound(String),
    #[error("payload for '{creature}' is missing the {stat} stat")]
    MissingStat { creature: String, stat: &'static str },
    #[error("payload for '{creature}' has {stat} = {value}, outside [1, 255]")]
    StatOutOfRange {
        creature: String,
        stat: &'static str,
        value: u32,
    },
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A name (case-insensitive) or a positive pokedex id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Id(u32),
    Name(String),
}

impl Identifier {
    pub fn parse(raw: &str) -> Identifier {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse() {
                return Identifier::Id(id);
            }
        }
        Identifier::Name(trimmed.to_ascii_lowercase())
    }

    /// Lowercased form used for cache keys and remote paths.
    fn remote_key(&self) -> String {
        match self {
            Identifier::Id(id) => id.to_string(),
            Identifier::Name(name) => name.clone(),
        }
    }
}

pub struct Resolver<S, C, R> {
    store: S,
    cache: C,
    remote: R,
    cache_ttl: Duration,
}

impl<S, C, R> Resolver<S, C, R>
where
    S: CreatureStore,
    C: PayloadCache,
    R: RemoteProvider,
{
    pub fn new(store: S, cache: C, remote: R) -> Self {
        Self {
            store,
            cache,
            remote,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Boundary form of [`Resolver::try_resolve`]: every failure degrades to
    /// `None`, so callers treat a missing creature as an ordinary value.
    pub fn resolve(&self, identifier: &str) -> Option<CreatureRecord> {
        match self.try_resolve(identifier) {
            Ok(record) => Some(record),
            Err(ResolveError::NotFound(ident)) => {
                tracing::debug!(%ident, "creature not found");
                None
            }
            Err(err) => {
                tracing::warn!(identifier, error = %err, "resolution degraded to not-found");
                None
            }
        }
    }

    pub fn try_resolve(&self, identifier: &str) -> Result<CreatureRecord, ResolveError> {
        let ident = Identifier::parse(identifier);

        let stored = match &ident {
            Identifier::Id(id) => self.store.find_by_id(*id)?,
            Identifier::Name(name) => self.store.find_by_name(name)?,
        };
        if let Some(record) = stored {
            return Ok(record);
        }

        let key = ident.remote_key();
        let cache_key = format!("pokemon_{key}");
        if let Some(payload) = self.cache.get(&cache_key) {
            tracing::debug!(%cache_key, "cache hit");
            return record_from_payload(&payload);
        }

        let payload = match self.remote.fetch_creature(&key) {
            Ok(payload) => payload,
            Err(RemoteError::Status(404)) => return Err(ResolveError::NotFound(key)),
            Err(err) => return Err(err.into()),
        };
        self.cache.set(&cache_key, payload.clone(), self.cache_ttl);
        let record = record_from_payload(&payload)?;
        // Write-through: later lookups stay local. Failure here must not
        // lose the already resolved record.
        if let Err(err) = self.store.upsert_creature(&record) {
            tracing::warn!(name = %record.name, error = %err, "persisting resolved creature failed");
        }
        Ok(record)
    }
}

/// Normalize a remote payload into the canonical record, failing fast when
/// any of the six stats is absent or out of range.
pub fn record_from_payload(payload: &CreaturePayload) -> Result<CreatureRecord, ResolveError> {
    let stats = StatBlock {
        hp: required_stat(payload, "hp")?,
        attack: required_stat(payload, "attack")?,
        defense: required_stat(payload, "defense")?,
        special_attack: required_stat(payload, "special-attack")?,
        special_defense: required_stat(payload, "special-defense")?,
        speed: required_stat(payload, "speed")?,
    };
    Ok(CreatureRecord {
        id: payload.id,
        name: payload.name.to_ascii_lowercase(),
        height: payload.height,
        weight: payload.weight,
        base_experience: payload.base_experience,
        sprite_url: payload.sprites.front_default.clone(),
        types: payload
            .types
            .iter()
            .map(|slot| TypeTag::new(slot.type_info.name.clone()))
            .collect(),
        abilities: payload
            .abilities
            .iter()
            .map(|slot| slot.ability.name.clone())
            .collect(),
        stats,
        legendary: false,
        mythical: false,
    })
}

fn required_stat(payload: &CreaturePayload, stat: &'static str) -> Result<u32, ResolveError> {
    let value = payload
        .stat(stat)
        .ok_or_else(|| ResolveError::MissingStat {
            creature: payload.name.clone(),
            stat,
        })?;
    if !(1..=255).contains(&value) {
        return Err(ResolveError::StatOutOfRange {
            creature: payload.name.clone(),
            stat,
            value,
        });
    }
    Ok(value)
}
