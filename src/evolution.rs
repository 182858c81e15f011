//! Evolution Chain Resolver: stored edge walk first, remote nested-chain
//! parse as the fallback, empty when the creature is unknown everywhere.

use crate::cache::PayloadCache;
use crate::remote::{ChainNode, RemoteProvider};
use crate::resolver::Resolver;
use crate::store::CreatureStore;

/// Ordered lineage (oldest to most evolved) for the named creature.
pub fn chain_for<S, C, R>(resolver: &Resolver<S, C, R>, name: &str) -> Vec<String>
where
    S: CreatureStore,
    C: PayloadCache,
    R: RemoteProvider,
{
    let lowered = name.to_ascii_lowercase();
    match resolver.store().find_by_name(&lowered) {
        Ok(Some(record)) => {
            let chain = chain_from_store(resolver.store(), &record.name);
            // A stored creature with no edges still deserves the remote
            // fallback: its lineage may simply not be imported yet.
            if chain.len() > 1 {
                return chain;
            }
            let remote = chain_from_remote(resolver.remote(), &record.name);
            if remote.is_empty() {
                chain
            } else {
                remote
            }
        }
        Ok(None) => chain_from_remote(resolver.remote(), &lowered),
        Err(err) => {
            tracing::warn!(name = %lowered, error = %err, "store lookup failed during chain walk");
            Vec::new()
        }
    }
}

/// Walk predecessor edges back to the head of the lineage, then successor
/// edges forward to the tail. Edges are inserted forward-only during import,
/// so the walk cannot cycle.
fn chain_from_store<S: CreatureStore>(store: &S, name: &str) -> Vec<String> {
    let mut head = name.to_string();
    loop {
        match store.predecessor(&head) {
            Ok(Some(previous)) => head = previous,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "predecessor walk failed");
                break;
            }
        }
    }

    let mut chain = vec![head.clone()];
    let mut current = head;
    loop {
        match store.successor(&current) {
            Ok(Some(next)) => {
                chain.push(next.clone());
                current = next;
            }
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "successor walk failed");
                break;
            }
        }
    }
    chain
}

fn chain_from_remote<R: RemoteProvider>(remote: &R, name: &str) -> Vec<String> {
    let species = match remote.fetch_species(name) {
        Ok(species) => species,
        Err(err) => {
            tracing::debug!(%name, error = %err, "species fetch failed");
            return Vec::new();
        }
    };
    let Some(chain_ref) = species.evolution_chain else {
        return Vec::new();
    };
    match remote.fetch_evolution_chain(&chain_ref.url) {
        Ok(node) => first_branch_chain(&node),
        Err(err) => {
            tracing::debug!(%name, error = %err, "evolution chain fetch failed");
            Vec::new()
        }
    }
}

/// Flatten the nested chain taking the first branch at every fork. Branching
/// lineages therefore degrade to a single line; that is the documented
/// behavior of the catalogue, not an oversight to fix here.
pub fn first_branch_chain(root: &ChainNode) -> Vec<String> {
    let mut names = Vec::new();
    let mut node = Some(root);
    while let Some(current) = node {
        names.push(current.species.name.clone());
        node = current.evolves_to.first();
    }
    names
}
