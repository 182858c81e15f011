pub mod arena;
pub mod battle;
pub mod cache;
pub mod evolution;
pub mod history;
pub mod importer;
pub mod model;
pub mod remote;
pub mod resolver;
pub mod store;
pub mod types;

use crate::arena::Arena;
use crate::cache::MemoryCache;
use crate::history::Recorder;
use crate::importer::import_catalogue;
use crate::remote::HttpRemote;
use crate::resolver::Resolver;
use crate::store::MemoryStore;
use anyhow::Context;

pub use crate::battle::{run_battle, BattleSummary, Participant, TEAM_SIZE};
pub use crate::model::{BattleRecord, BattleResult, CreatureRecord, EvolutionEdge, StatBlock, TypeTag};

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub team: Vec<String>,
    pub pool: Vec<String>,
    pub chain: Option<String>,
    pub import_limit: usize,
    pub seed: u64,
    pub base_url: String,
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let remote = HttpRemote::new(&opts.base_url)
        .with_context(|| format!("Failed to build HTTP client for {}", opts.base_url))?;
    let store = MemoryStore::new();

    if opts.import_limit > 0 {
        let report = import_catalogue(&store, &remote, opts.import_limit)
            .context("Failed to import the catalogue")?;
        println!(
            "Imported {} creatures ({} failed)",
            report.imported, report.failed
        );
    }

    let resolver = Resolver::new(store, MemoryCache::new(), remote);

    if let Some(name) = &opts.chain {
        let lineage = evolution::chain_for(&resolver, name);
        if lineage.is_empty() {
            println!("No evolution chain found for '{name}'");
        } else {
            println!("Evolution chain: {}", lineage.join(" -> "));
        }
        if opts.team.is_empty() {
            return Ok(());
        }
    }

    if opts.team.len() != TEAM_SIZE {
        anyhow::bail!("--team needs exactly {TEAM_SIZE} comma-separated names");
    }
    for name in &opts.pool {
        if resolver.resolve(name).is_none() {
            anyhow::bail!("Pool member '{name}' did not resolve");
        }
    }

    let arena = Arena::new(resolver);
    let report = arena.fight(&opts.team, opts.seed)?;
    for line in &report.summary.log {
        println!("{line}");
    }
    match &report.record {
        Some(record) => println!("Battle saved (id {})", record.id),
        None => println!("Battle was not saved"),
    }

    let recorder = Recorder::new(arena.resolver());
    println!("Win rate: {:.1}%", recorder.win_rate()? * 100.0);
    for (name, count) in recorder.most_popular(5)? {
        println!("  {name}: {count} battles");
    }
    Ok(())
}
