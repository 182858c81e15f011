mod common;

use common::{chain_node, record, FakeRemote};
use pokearena::cache::MemoryCache;
use pokearena::evolution::chain_for;
use pokearena::model::EvolutionEdge;
use pokearena::resolver::Resolver;
use pokearena::store::{CreatureStore, MemoryStore};

const BASE: [u32; 6] = [45, 49, 49, 65, 65, 45];

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.upsert_creature(&record(1, "bulbasaur", &["grass"], BASE)).unwrap();
    store.upsert_creature(&record(2, "ivysaur", &["grass"], BASE)).unwrap();
    store.upsert_creature(&record(3, "venusaur", &["grass"], BASE)).unwrap();
    store.insert_edge(EvolutionEdge::new("bulbasaur", "ivysaur")).unwrap();
    store.insert_edge(EvolutionEdge::new("ivysaur", "venusaur")).unwrap();
    store
}

fn bulbasaur_remote() -> FakeRemote {
    let mut remote = FakeRemote::new();
    let chain = chain_node(
        "bulbasaur",
        vec![chain_node("ivysaur", vec![chain_node("venusaur", vec![])])],
    );
    for name in ["bulbasaur", "ivysaur", "venusaur"] {
        remote.add_chain(name, "https://chain/1", chain.clone());
    }
    remote
}

#[test]
fn stored_edges_produce_the_full_lineage_from_any_member() {
    let resolver = Resolver::new(seeded_store(), MemoryCache::new(), FakeRemote::new());
    let expected = vec!["bulbasaur", "ivysaur", "venusaur"];
    for name in ["bulbasaur", "ivysaur", "venusaur"] {
        assert_eq!(chain_for(&resolver, name), expected, "starting from {name}");
    }
    // Edge walks never touch the remote.
    assert_eq!(resolver.remote().creature_calls(), 0);
}

#[test]
fn remote_fallback_matches_the_stored_walk() {
    let from_store = {
        let resolver = Resolver::new(seeded_store(), MemoryCache::new(), FakeRemote::new());
        chain_for(&resolver, "ivysaur")
    };
    let from_remote = {
        let resolver = Resolver::new(MemoryStore::new(), MemoryCache::new(), bulbasaur_remote());
        chain_for(&resolver, "ivysaur")
    };
    assert_eq!(from_store, from_remote);
}

#[test]
fn branching_chains_keep_only_the_first_branch() {
    let mut remote = FakeRemote::new();
    let chain = chain_node(
        "eevee",
        vec![
            chain_node("vaporeon", vec![]),
            chain_node("jolteon", vec![]),
            chain_node("flareon", vec![]),
        ],
    );
    remote.add_chain("eevee", "https://chain/67", chain);
    let resolver = Resolver::new(MemoryStore::new(), MemoryCache::new(), remote);
    assert_eq!(chain_for(&resolver, "eevee"), vec!["eevee", "vaporeon"]);
}

#[test]
fn stored_creature_without_edges_falls_back_to_the_remote() {
    let store = MemoryStore::new();
    store.upsert_creature(&record(1, "bulbasaur", &["grass"], BASE)).unwrap();
    let resolver = Resolver::new(store, MemoryCache::new(), bulbasaur_remote());
    assert_eq!(
        chain_for(&resolver, "bulbasaur"),
        vec!["bulbasaur", "ivysaur", "venusaur"]
    );
}

#[test]
fn unknown_creatures_have_an_empty_chain() {
    let resolver = Resolver::new(MemoryStore::new(), MemoryCache::new(), FakeRemote::new());
    assert!(chain_for(&resolver, "missingno").is_empty());
}

#[test]
fn lookup_is_case_insensitive() {
    let resolver = Resolver::new(seeded_store(), MemoryCache::new(), FakeRemote::new());
    assert_eq!(
        chain_for(&resolver, "IVYSAUR"),
        vec!["bulbasaur", "ivysaur", "venusaur"]
    );
}
