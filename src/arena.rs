//! Team assembly and fight orchestration: the caller picks three creatures,
//! the opponent team is sampled at random from the rest of the catalogue,
//! the battle runs, and the outcome is recorded.

use crate::battle::{run_battle, BattleSummary, TEAM_SIZE};
use crate::cache::PayloadCache;
use crate::history::Recorder;
use crate::model::{BattleRecord, CreatureRecord};
use crate::remote::RemoteProvider;
use crate::resolver::Resolver;
use crate::store::{CreatureStore, StoreError};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("a team needs exactly {expected} members, got {got}")]
    WrongTeamSize { expected: usize, got: usize },
    #[error("could not assemble team: '{0}' did not resolve")]
    UnresolvedMember(String),
    #[error("only {available} opponents available, need {}", TEAM_SIZE)]
    PoolExhausted { available: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct ArenaReport {
    pub summary: BattleSummary,
    pub opponent_names: Vec<String>,
    /// `None` when recording the battle failed; the simulated outcome is
    /// still returned.
    pub record: Option<BattleRecord>,
}

pub struct Arena<S, C, R> {
    resolver: Resolver<S, C, R>,
}

impl<S, C, R> Arena<S, C, R>
where
    S: CreatureStore,
    C: PayloadCache,
    R: RemoteProvider,
{
    pub fn new(resolver: Resolver<S, C, R>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver<S, C, R> {
        &self.resolver
    }

    /// Resolve a full team up front. Any member that fails to resolve aborts
    /// assembly; a battle never starts with missing members.
    pub fn assemble_team(&self, names: &[String]) -> Result<Vec<CreatureRecord>, ArenaError> {
        if names.len() != TEAM_SIZE {
            return Err(ArenaError::WrongTeamSize {
                expected: TEAM_SIZE,
                got: names.len(),
            });
        }
        names
            .iter()
            .map(|name| {
                self.resolver
                    .resolve(name)
                    .ok_or_else(|| ArenaError::UnresolvedMember(name.clone()))
            })
            .collect()
    }

    /// Sample three opponent names from the stored catalogue, excluding the
    /// user's picks.
    pub fn pick_opponents(
        &self,
        exclude: &[String],
        rng: &mut SmallRng,
    ) -> Result<Vec<String>, ArenaError> {
        let mut pool = self.resolver.store().creature_names()?;
        pool.retain(|name| !exclude.iter().any(|e| e.eq_ignore_ascii_case(name)));
        if pool.len() < TEAM_SIZE {
            return Err(ArenaError::PoolExhausted {
                available: pool.len(),
            });
        }
        Ok(pool.choose_multiple(rng, TEAM_SIZE).cloned().collect())
    }

    /// Assemble both teams, run the battle, and persist the outcome. The
    /// seed drives both the opponent sampling and the in-battle jitter.
    pub fn fight(&self, user_names: &[String], seed: u64) -> Result<ArenaReport, ArenaError> {
        let user_team = self.assemble_team(user_names)?;
        let user_canonical: Vec<String> = user_team.iter().map(|r| r.name.clone()).collect();

        let mut rng = SmallRng::seed_from_u64(seed);
        let opponent_names = self.pick_opponents(&user_canonical, &mut rng)?;
        let opponent_team = self.assemble_team(&opponent_names)?;

        let summary = run_battle(&user_team, &opponent_team, &mut rng);

        let recorder = Recorder::new(&self.resolver);
        let record = match recorder.record(
            &user_canonical,
            &opponent_names,
            summary.result,
            &summary.log,
        ) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "saving battle history failed");
                None
            }
        };

        Ok(ArenaReport {
            summary,
            opponent_names,
            record,
        })
    }
}
