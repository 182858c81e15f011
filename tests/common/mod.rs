#![allow(dead_code)]

use pokearena::model::{CreatureRecord, StatBlock, TypeTag};
use pokearena::remote::{
    AbilitySlot, ChainNode, CreaturePayload, NamedResource, RemoteError, RemoteProvider,
    SpeciesPayload, Sprites, StatSlot, TypeSlot,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn named(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

/// Stat order: hp, attack, defense, special-attack, special-defense, speed.
pub fn payload(id: u32, name: &str, types: &[&str], stats: [u32; 6]) -> CreaturePayload {
    let stat_names = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];
    CreaturePayload {
        id,
        name: name.to_string(),
        height: 7,
        weight: 69,
        base_experience: 64,
        sprites: Sprites {
            front_default: Some(format!("https://img/{id}.png")),
        },
        types: types
            .iter()
            .map(|t| TypeSlot {
                type_info: named(t),
            })
            .collect(),
        abilities: vec![AbilitySlot {
            ability: named("run-away"),
        }],
        stats: stat_names
            .iter()
            .zip(stats)
            .map(|(stat_name, value)| StatSlot {
                base_stat: value,
                stat: named(stat_name),
            })
            .collect(),
    }
}

pub fn record(id: u32, name: &str, types: &[&str], stats: [u32; 6]) -> CreatureRecord {
    CreatureRecord {
        id,
        name: name.to_string(),
        height: 7,
        weight: 69,
        base_experience: 64,
        sprite_url: None,
        types: types.iter().map(|t| TypeTag::new(*t)).collect(),
        abilities: vec!["run-away".to_string()],
        stats: StatBlock {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            special_attack: stats[3],
            special_defense: stats[4],
            speed: stats[5],
        },
        legendary: false,
        mythical: false,
    }
}

pub fn chain_node(name: &str, children: Vec<ChainNode>) -> ChainNode {
    ChainNode {
        species: named(name),
        evolves_to: children,
    }
}

/// In-memory remote provider. Unknown lookups come back as 404; a status
/// override simulates a provider outage.
#[derive(Default)]
pub struct FakeRemote {
    pub creatures: HashMap<String, CreaturePayload>,
    pub species: HashMap<String, SpeciesPayload>,
    pub chains: HashMap<String, ChainNode>,
    pub status_override: Option<u16>,
    creature_calls: AtomicUsize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_creatures(payloads: Vec<CreaturePayload>) -> Self {
        let mut remote = Self::default();
        for payload in payloads {
            remote.creatures.insert(payload.name.clone(), payload);
        }
        remote
    }

    pub fn add_chain(&mut self, species_name: &str, url: &str, chain: ChainNode) {
        self.species.insert(
            species_name.to_string(),
            SpeciesPayload {
                is_legendary: false,
                is_mythical: false,
                evolution_chain: Some(pokearena::remote::ChainRef {
                    url: url.to_string(),
                }),
            },
        );
        self.chains.insert(url.to_string(), chain);
    }

    pub fn creature_calls(&self) -> usize {
        self.creature_calls.load(Ordering::SeqCst)
    }
}

impl RemoteProvider for FakeRemote {
    fn list(&self, limit: usize) -> Result<Vec<String>, RemoteError> {
        if let Some(status) = self.status_override {
            return Err(RemoteError::Status(status));
        }
        let mut entries: Vec<(u32, String)> = self
            .creatures
            .values()
            .map(|p| (p.id, p.name.clone()))
            .collect();
        entries.sort();
        Ok(entries.into_iter().take(limit).map(|(_, name)| name).collect())
    }

    fn fetch_creature(&self, name_or_id: &str) -> Result<CreaturePayload, RemoteError> {
        self.creature_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.status_override {
            return Err(RemoteError::Status(status));
        }
        if let Some(payload) = self.creatures.get(name_or_id) {
            return Ok(payload.clone());
        }
        if let Ok(id) = name_or_id.parse::<u32>() {
            if let Some(payload) = self.creatures.values().find(|p| p.id == id) {
                return Ok(payload.clone());
            }
        }
        Err(RemoteError::Status(404))
    }

    fn fetch_species(&self, name: &str) -> Result<SpeciesPayload, RemoteError> {
        if let Some(status) = self.status_override {
            return Err(RemoteError::Status(status));
        }
        self.species
            .get(name)
            .cloned()
            .ok_or(RemoteError::Status(404))
    }

    fn fetch_evolution_chain(&self, url: &str) -> Result<ChainNode, RemoteError> {
        if let Some(status) = self.status_override {
            return Err(RemoteError::Status(status));
        }
        self.chains.get(url).cloned().ok_or(RemoteError::Status(404))
    }
}
