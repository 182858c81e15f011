//! Remote creature provider: the PokeAPI-shaped payload types, the provider
//! port, and a blocking HTTP implementation with an explicit timeout and a
//! single retry on transport errors.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote returned status {0}")]
    Status(u16),
    #[error("remote transport failure: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// The subset of the remote creature payload this application consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreaturePayload {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

impl CreaturePayload {
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainRef {
    pub url: String,
}

/// Companion species payload: flags plus the evolution-chain reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesPayload {
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub evolution_chain: Option<ChainRef>,
}

/// One node of the recursively nested evolution-chain payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainNode {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainPayload {
    pub chain: ChainNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexPayload {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Port for the remote data provider. The resolver and importer only ever
/// talk to this trait; tests substitute fakes.
pub trait RemoteProvider {
    /// Names of the first `limit` creatures in the remote index.
    fn list(&self, limit: usize) -> Result<Vec<String>, RemoteError>;
    /// Full creature payload by lowercased name or numeric id.
    fn fetch_creature(&self, name_or_id: &str) -> Result<CreaturePayload, RemoteError>;
    /// Companion species payload by lowercased name.
    fn fetch_species(&self, name: &str) -> Result<SpeciesPayload, RemoteError>;
    /// Nested evolution chain from its reference URL.
    fn fetch_evolution_chain(&self, url: &str) -> Result<ChainNode, RemoteError>;
}

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP provider. One retry on transport errors; non-success
/// statuses are surfaced as [`RemoteError::Status`] and left to the caller.
pub struct HttpRemote {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        match self.try_get(url) {
            Err(RemoteError::Http(err)) => {
                tracing::warn!(%url, error = %err, "remote request failed, retrying once");
                self.try_get(url)
            }
            other => other,
        }
    }

    fn try_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response.json()?)
    }
}

impl RemoteProvider for HttpRemote {
    fn list(&self, limit: usize) -> Result<Vec<String>, RemoteError> {
        let url = format!("{}/pokemon?limit={}", self.base_url, limit);
        let index: IndexPayload = self.get_json(&url)?;
        Ok(index.results.into_iter().map(|r| r.name).collect())
    }

    fn fetch_creature(&self, name_or_id: &str) -> Result<CreaturePayload, RemoteError> {
        let url = format!("{}/pokemon/{}", self.base_url, name_or_id);
        self.get_json(&url)
    }

    fn fetch_species(&self, name: &str) -> Result<SpeciesPayload, RemoteError> {
        let url = format!("{}/pokemon-species/{}", self.base_url, name);
        self.get_json(&url)
    }

    fn fetch_evolution_chain(&self, url: &str) -> Result<ChainNode, RemoteError> {
        let payload: ChainPayload = self.get_json(url)?;
        Ok(payload.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creature_payload_parses_pokeapi_shape() {
        let raw = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "sprites": {"front_default": "https://img/25.png"},
            "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
            "abilities": [{"ability": {"name": "static", "url": ""}}],
            "stats": [
                {"base_stat": 35, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 90, "stat": {"name": "speed", "url": ""}}
            ]
        }"#;
        let payload: CreaturePayload = serde_json::from_str(raw).expect("payload parses");
        assert_eq!(payload.id, 25);
        assert_eq!(payload.stat("hp"), Some(35));
        assert_eq!(payload.stat("speed"), Some(90));
        assert_eq!(payload.stat("attack"), None);
        assert_eq!(payload.types[0].type_info.name, "electric");
    }

    #[test]
    fn species_payload_defaults_missing_flags() {
        let payload: SpeciesPayload = serde_json::from_str("{}").expect("empty species parses");
        assert!(!payload.is_legendary);
        assert!(!payload.is_mythical);
        assert!(payload.evolution_chain.is_none());
    }
}
