//! Bulk catalogue import: the first N creatures from the remote index, with
//! species flags and evolution edges. Per-creature failures are logged and
//! counted; only a failed index fetch aborts the run.

use crate::model::EvolutionEdge;
use crate::remote::{ChainNode, RemoteError, RemoteProvider};
use crate::resolver::{record_from_payload, ResolveError};
use crate::store::CreatureStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

pub fn import_catalogue<S, R>(store: &S, remote: &R, limit: usize) -> Result<ImportReport, RemoteError>
where
    S: CreatureStore,
    R: RemoteProvider,
{
    let names = remote.list(limit)?;
    let mut report = ImportReport::default();
    for name in names {
        match import_one(store, remote, &name) {
            Ok(()) => {
                report.imported += 1;
                tracing::info!(%name, "imported creature");
            }
            Err(err) => {
                report.failed += 1;
                tracing::warn!(%name, error = %err, "creature import failed");
            }
        }
    }
    Ok(report)
}

fn import_one<S, R>(store: &S, remote: &R, name: &str) -> Result<(), ResolveError>
where
    S: CreatureStore,
    R: RemoteProvider,
{
    let payload = remote.fetch_creature(name)?;
    let mut record = record_from_payload(&payload)?;

    // The species endpoint is best-effort: a creature without flags or a
    // lineage is still worth importing.
    let species = match remote.fetch_species(&record.name) {
        Ok(species) => Some(species),
        Err(err) => {
            tracing::debug!(%name, error = %err, "species fetch failed during import");
            None
        }
    };
    if let Some(species) = &species {
        record.legendary = species.is_legendary;
        record.mythical = species.is_mythical;
    }
    store.upsert_creature(&record)?;

    if let Some(chain_ref) = species.and_then(|s| s.evolution_chain) {
        match remote.fetch_evolution_chain(&chain_ref.url) {
            Ok(chain) => save_edges(store, &flatten_chain(&chain)),
            Err(err) => {
                tracing::debug!(%name, error = %err, "evolution chain fetch failed during import")
            }
        }
    }
    Ok(())
}

/// Full pre-order flatten of a nested chain. Unlike the resolver's fallback
/// walk this keeps every branch, so branch members still receive edges.
pub fn flatten_chain(node: &ChainNode) -> Vec<String> {
    let mut names = vec![node.species.name.clone()];
    for child in &node.evolves_to {
        names.extend(flatten_chain(child));
    }
    names
}

/// Insert an edge for every consecutive pair whose endpoints are both
/// already stored; anything else is silently skipped.
fn save_edges<S: CreatureStore>(store: &S, lineage: &[String]) {
    for pair in lineage.windows(2) {
        let both_known = matches!(store.find_by_name(&pair[0]), Ok(Some(_)))
            && matches!(store.find_by_name(&pair[1]), Ok(Some(_)));
        if !both_known {
            continue;
        }
        if let Err(err) = store.insert_edge(EvolutionEdge::new(pair[0].clone(), pair[1].clone())) {
            tracing::warn!(from = %pair[0], to = %pair[1], error = %err, "edge insert failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::NamedResource;

    fn node(name: &str, children: Vec<ChainNode>) -> ChainNode {
        ChainNode {
            species: NamedResource {
                name: name.to_string(),
                url: String::new(),
            },
            evolves_to: children,
        }
    }

    #[test]
    fn flatten_keeps_every_branch_in_preorder() {
        let chain = node(
            "oddish",
            vec![node(
                "gloom",
                vec![node("vileplume", vec![]), node("bellossom", vec![])],
            )],
        );
        assert_eq!(
            flatten_chain(&chain),
            vec!["oddish", "gloom", "vileplume", "bellossom"]
        );
    }
}
