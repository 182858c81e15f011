use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A creature type tag with its display color (hex string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag {
    pub name: String,
    pub color: String,
}

impl TypeTag {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let color = crate::types::type_color(&name).to_string();
        Self { name, color }
    }
}

/// The six base stats. Fixed fields instead of a name-keyed lookup; presence
/// of every stat is validated at the resolver boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl StatBlock {
    pub fn total(&self) -> u32 {
        self.hp + self.attack + self.defense + self.special_attack + self.special_defense
            + self.speed
    }
}

/// Canonical, storage-independent representation of a creature.
///
/// Produced by the resolver either from a store read or from a remote
/// payload; immutable for the duration of one resolution. Name and pokedex
/// id are both unique; the name is kept in its lowercase canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub sprite_url: Option<String>,
    pub types: Vec<TypeTag>,
    pub abilities: Vec<String>,
    pub stats: StatBlock,
    pub legendary: bool,
    pub mythical: bool,
}

impl CreatureRecord {
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Directed evolution relation between two stored creatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEdge {
    pub from: String,
    pub to: String,
    pub level: Option<u32>,
    pub item: Option<String>,
    pub condition: Option<String>,
}

impl EvolutionEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            level: None,
            item: None,
            condition: None,
        }
    }
}

/// Battle outcome from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Win,
    Lose,
    Draw,
}

impl BattleResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleResult::Win => "win",
            BattleResult::Lose => "lose",
            BattleResult::Draw => "draw",
        }
    }
}

/// One persisted battle: both teams by name, the result, and the full log.
/// Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub id: u64,
    pub user_team: Vec<String>,
    pub opponent_team: Vec<String>,
    pub result: BattleResult,
    pub log: String,
    pub created_at: DateTime<Utc>,
}
