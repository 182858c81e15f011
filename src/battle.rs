//! Turn-based 3v3 battle engine.
//!
//! Pure over its inputs apart from the injected RNG: the same teams and seed
//! always replay the same battle.

use crate::model::{BattleResult, CreatureRecord};
use crate::types::type_effectiveness;
use rand::rngs::SmallRng;
use rand::Rng;

pub const TEAM_SIZE: usize = 3;

/// Hard stop for pairs whose net damage stays at zero (attack well below
/// defense on both sides). Hitting it calls the battle a draw.
const MAX_EXCHANGES: usize = 1000;

/// A creature taking part in one battle, with live hit points. Discarded
/// when the battle ends.
#[derive(Debug, Clone)]
pub struct Participant {
    pub record: CreatureRecord,
    pub current_hp: i32,
    pub max_hp: i32,
}

impl Participant {
    fn new(record: &CreatureRecord) -> Self {
        let hp = record.stats.hp as i32;
        Self {
            record: record.clone(),
            current_hp: hp,
            max_hp: hp,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    fn take_damage(&mut self, damage: i32) {
        self.current_hp = (self.current_hp - damage).max(0);
    }
}

#[derive(Debug, Clone)]
pub struct BattleSummary {
    pub result: BattleResult,
    pub log: Vec<String>,
    pub user_team: Vec<Participant>,
    pub opponent_team: Vec<Participant>,
}

/// Damage for one strike: `floor(max(0, atk - def + jitter) * effectiveness)`.
/// Never negative; the raw term is floored at zero before the multiplier and
/// effectiveness factors are non-negative.
pub fn compute_damage(attacker: &CreatureRecord, defender: &CreatureRecord, jitter: i32) -> i32 {
    let raw = (attacker.stats.attack as i32 - defender.stats.defense as i32 + jitter).max(0);
    let effectiveness = type_effectiveness(&attacker.types, &defender.types);
    (raw as f64 * effectiveness).floor() as i32
}

fn damage_roll(attacker: &CreatureRecord, defender: &CreatureRecord, rng: &mut SmallRng) -> i32 {
    compute_damage(attacker, defender, rng.gen_range(-5..=5))
}

/// Run a full 3v3 battle to completion.
///
/// Both teams must contain exactly [`TEAM_SIZE`] already-resolved records;
/// that is a caller precondition, enforced before team assembly.
pub fn run_battle(
    user_team: &[CreatureRecord],
    opponent_team: &[CreatureRecord],
    rng: &mut SmallRng,
) -> BattleSummary {
    assert_eq!(user_team.len(), TEAM_SIZE, "user team must have {TEAM_SIZE} members");
    assert_eq!(
        opponent_team.len(),
        TEAM_SIZE,
        "opponent team must have {TEAM_SIZE} members"
    );

    let mut user: Vec<Participant> = user_team.iter().map(Participant::new).collect();
    let mut opponent: Vec<Participant> = opponent_team.iter().map(Participant::new).collect();
    let mut log = vec!["=== Battle log ===".to_string()];

    let mut user_idx = 0;
    let mut opponent_idx = 0;
    let mut exchanges = 0;
    let mut stalemate = false;

    while user_idx < TEAM_SIZE && opponent_idx < TEAM_SIZE {
        log.push(format!(
            "{} vs {}",
            capitalize(&user[user_idx].record.name),
            capitalize(&opponent[opponent_idx].record.name)
        ));

        while !user[user_idx].is_fainted() && !opponent[opponent_idx].is_fainted() {
            if exchanges >= MAX_EXCHANGES {
                stalemate = true;
                break;
            }
            exchanges += 1;

            // Ties go to the user: compared first, strikes first.
            if user[user_idx].record.stats.speed >= opponent[opponent_idx].record.stats.speed {
                exchange(&mut user[user_idx], &mut opponent[opponent_idx], rng, &mut log);
            } else {
                exchange(&mut opponent[opponent_idx], &mut user[user_idx], rng, &mut log);
            }
        }

        if stalemate {
            log.push("Neither side can land a blow, the battle is called".to_string());
            break;
        }
        if user[user_idx].is_fainted() {
            log.push(format!("{} fainted", capitalize(&user[user_idx].record.name)));
            user_idx += 1;
        }
        if opponent[opponent_idx].is_fainted() {
            log.push(format!(
                "{} fainted",
                capitalize(&opponent[opponent_idx].record.name)
            ));
            opponent_idx += 1;
        }
    }

    let result = if stalemate {
        BattleResult::Draw
    } else if user_idx >= TEAM_SIZE && opponent_idx >= TEAM_SIZE {
        BattleResult::Draw
    } else if user_idx >= TEAM_SIZE {
        BattleResult::Lose
    } else {
        BattleResult::Win
    };
    log.push(
        match result {
            BattleResult::Win => "Your team wins!",
            BattleResult::Lose => "The opposing team wins!",
            BattleResult::Draw => "The battle ends in a draw",
        }
        .to_string(),
    );

    BattleSummary {
        result,
        log,
        user_team: user,
        opponent_team: opponent,
    }
}

/// One exchange: the striker hits, and the defender retaliates if it is
/// still standing.
fn exchange(
    striker: &mut Participant,
    defender: &mut Participant,
    rng: &mut SmallRng,
    log: &mut Vec<String>,
) {
    let damage = damage_roll(&striker.record, &defender.record, rng);
    defender.take_damage(damage);
    log.push(strike_line(striker, defender, damage));

    if !defender.is_fainted() {
        let damage = damage_roll(&defender.record, &striker.record, rng);
        striker.take_damage(damage);
        log.push(strike_line(defender, striker, damage));
    }
}

fn strike_line(attacker: &Participant, target: &Participant, damage: i32) -> String {
    format!(
        "{} hits {} for {} damage ({} HP: {})",
        capitalize(&attacker.record.name),
        capitalize(&target.record.name),
        damage,
        capitalize(&target.record.name),
        target.current_hp
    )
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
