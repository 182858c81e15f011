//! Battle History Recorder: persists completed battles and answers the
//! aggregate statistics queries over the recorded history.

use crate::cache::PayloadCache;
use crate::model::{BattleRecord, BattleResult};
use crate::remote::RemoteProvider;
use crate::resolver::Resolver;
use crate::store::{CreatureStore, StoreError};

pub struct Recorder<'a, S, C, R> {
    resolver: &'a Resolver<S, C, R>,
}

impl<'a, S, C, R> Recorder<'a, S, C, R>
where
    S: CreatureStore,
    C: PayloadCache,
    R: RemoteProvider,
{
    pub fn new(resolver: &'a Resolver<S, C, R>) -> Self {
        Self { resolver }
    }

    /// Persist a completed battle. Team members are re-resolved by name;
    /// ones that no longer resolve are skipped, a partial team record is
    /// better than no record.
    pub fn record(
        &self,
        user_names: &[String],
        opponent_names: &[String],
        result: BattleResult,
        log_lines: &[String],
    ) -> Result<BattleRecord, StoreError> {
        let user_team = self.resolved_names(user_names);
        let opponent_team = self.resolved_names(opponent_names);
        self.resolver.store().insert_battle(
            user_team,
            opponent_team,
            result,
            log_lines.join("\n"),
        )
    }

    fn resolved_names(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter_map(|name| match self.resolver.resolve(name) {
                Some(record) => Some(record.name),
                None => {
                    tracing::warn!(%name, "skipping unresolved team member in battle record");
                    None
                }
            })
            .collect()
    }

    /// Fraction of recorded battles the user won; 0.0 with no history.
    pub fn win_rate(&self) -> Result<f64, StoreError> {
        let battles = self.resolver.store().battles()?;
        if battles.is_empty() {
            return Ok(0.0);
        }
        let wins = battles
            .iter()
            .filter(|b| b.result == BattleResult::Win)
            .count();
        Ok(wins as f64 / battles.len() as f64)
    }

    /// Top `n` creatures by combined appearance count across both sides of
    /// every recorded battle, ties broken by natural (pokedex id) order.
    pub fn most_popular(&self, n: usize) -> Result<Vec<(String, usize)>, StoreError> {
        let store = self.resolver.store();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for battle in store.battles()? {
            for name in battle.user_team.iter().chain(battle.opponent_team.iter()) {
                match counts.iter_mut().find(|(n, _)| n == name) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((name.clone(), 1)),
                }
            }
        }
        counts.sort_by_key(|(name, count)| {
            let id = store
                .find_by_name(name)
                .ok()
                .flatten()
                .map(|record| record.id)
                .unwrap_or(u32::MAX);
            (std::cmp::Reverse(*count), id)
        });
        counts.truncate(n);
        Ok(counts)
    }
}
