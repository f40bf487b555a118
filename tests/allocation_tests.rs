//! Allocation integration tests.
//!
//! Exercise the category-balanced split through the public API, both
//! directly and through the rotation controller.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use pickup_roster::allocation::{allocate, Allocator, CategoryBalanced};
use pickup_roster::core::{Category, Registrant, RegistrantId, RosterConfig, Side};
use pickup_roster::locks::LockRegistry;
use pickup_roster::rotation::RotationController;

fn player(id: &str, category: &str) -> Registrant {
    Registrant::new(RegistrantId::from(id), id).with_category(Category::new(category))
}

fn ids(players: &[Registrant]) -> Vec<&str> {
    players.iter().map(|r| r.id.as_str()).collect()
}

// =============================================================================
// Direct allocation
// =============================================================================

/// Three players of one category: two to A, one to B.
#[test]
fn test_three_candidates_split_two_one() {
    let candidates = vec![player("a", "S"), player("b", "S"), player("c", "S")];

    let result = allocate(&candidates, &FxHashSet::default());

    assert_eq!(ids(result.squad(Side::A)), vec!["a", "c"]);
    assert_eq!(ids(result.squad(Side::B)), vec!["b"]);
    assert!(result.residual.is_empty());
    assert!(result.dropped.is_empty());
}

/// Mixed categories are each split evenly.
#[test]
fn test_categories_balanced() {
    let candidates = vec![
        player("g1", "G"),
        player("s1", "S"),
        player("s2", "S"),
        player("g2", "G"),
        player("s3", "S"),
        player("s4", "S"),
    ];

    let result = allocate(&candidates, &FxHashSet::default());

    let goalkeepers = |side| {
        result
            .squad(side)
            .iter()
            .filter(|r| r.category.as_str() == "G")
            .count()
    };
    assert_eq!(goalkeepers(Side::A), 1);
    assert_eq!(goalkeepers(Side::B), 1);
    assert_eq!(result.squad(Side::A).len(), 3);
    assert_eq!(result.squad(Side::B).len(), 3);
}

/// A lock registry is accepted directly as the lock source.
#[test]
fn test_registry_as_lock_source() {
    let candidates = vec![player("a", "S"), player("b", "S"), player("c", "S")];
    let mut locks = LockRegistry::new();
    locks.lock(RegistrantId::from("b"));

    let result = allocate(&candidates, &locks);

    assert_eq!(ids(result.squad(Side::A)), vec!["a"]);
    assert_eq!(ids(result.squad(Side::B)), vec!["c"]);
    assert_eq!(ids(&result.residual), vec!["b"]);
}

/// Custom batch and capacity settings.
#[test]
fn test_custom_engine_settings() {
    let engine = CategoryBalanced { batch_size: 4, squad_capacity: 2 };
    let candidates: Vec<_> = (0..6).map(|i| player(&format!("p{i}"), "S")).collect();

    let result = engine.allocate(&candidates, &FxHashSet::default());

    assert_eq!(ids(result.squad(Side::A)), vec!["p0", "p1"]);
    assert_eq!(ids(result.squad(Side::B)), vec!["p2", "p3"]);
    assert_eq!(ids(&result.residual), vec!["p4", "p5"]);
}

// =============================================================================
// Through the controller
// =============================================================================

/// A queue of twelve: the first ten are allocated, the last two stay queued.
#[test]
fn test_controller_allocates_first_batch() {
    let mut roster = RotationController::new(RosterConfig::default());
    let names: Vec<String> = (1..=12).map(|i| format!("Player {i}")).collect();
    for id in roster.register_many(&names).unwrap() {
        roster.toggle_activate(&id).unwrap();
    }

    roster.run_allocation_now().unwrap();

    assert_eq!(roster.squad(Side::A).len(), 5);
    assert_eq!(roster.squad(Side::B).len(), 5);
    let queued: Vec<_> = roster.queue().into_iter().map(|r| r.name).collect();
    assert_eq!(queued, vec!["Player 11", "Player 12"]);
}

/// Allocation replaces existing squads; previous members become idle.
#[test]
fn test_reallocation_replaces_squads() {
    let mut roster = RotationController::new(RosterConfig::default());
    let first = roster.register_many(["a", "b"]).unwrap();
    for id in &first {
        roster.toggle_activate(id).unwrap();
    }
    roster.run_allocation_now().unwrap();

    let second = roster.register_many(["c", "d"]).unwrap();
    for id in &second {
        roster.toggle_activate(id).unwrap();
    }
    roster.run_allocation_now().unwrap();

    let placed: Vec<_> = Side::BOTH
        .into_iter()
        .flat_map(|side| roster.squad(side))
        .map(|r| r.name)
        .collect();
    assert_eq!(placed, vec!["c", "d"]);
    assert_eq!(roster.idle().len(), 2);
}

// =============================================================================
// Properties
// =============================================================================

fn candidates_strategy() -> impl Strategy<Value = Vec<Registrant>> {
    prop::collection::vec(prop::sample::select(vec!["S", "G", "D"]), 0..24).prop_map(|categories| {
        categories
            .into_iter()
            .enumerate()
            .map(|(i, category)| player(&format!("p{i}"), category))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_allocation_is_deterministic(candidates in candidates_strategy()) {
        let locks: FxHashSet<RegistrantId> = candidates
            .iter()
            .step_by(4)
            .map(|r| r.id.clone())
            .collect();

        let first = allocate(&candidates, &locks);
        let second = allocate(&candidates, &locks);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_allocation_respects_capacity_and_exclusivity(
        candidates in candidates_strategy(),
        batch_size in 1usize..16,
        squad_capacity in 1usize..8,
    ) {
        let engine = CategoryBalanced { batch_size, squad_capacity };
        let result = engine.allocate(&candidates, &FxHashSet::default());

        prop_assert!(result.squad(Side::A).len() <= squad_capacity);
        prop_assert!(result.squad(Side::B).len() <= squad_capacity);

        let a: FxHashSet<_> = result.squad(Side::A).iter().map(|r| &r.id).collect();
        prop_assert!(result.squad(Side::B).iter().all(|r| !a.contains(&r.id)));

        // Every candidate ends up in exactly one place.
        let total = result.placed_ids().count() + result.residual.len() + result.dropped.len();
        prop_assert_eq!(total, candidates.len());
    }
}
